//! # Page Sources
//!
//! Bindings from each admin list page to its endpoint. The filter text box of
//! every page maps onto one server-side filter:
//!
//! | Page         | Filter text becomes |
//! |--------------|---------------------|
//! | Users        | `search`            |
//! | KYC          | `user_id`           |
//! | Documents    | `search`            |
//! | Deposits     | `user_id`           |
//! | Withdrawals  | `user_id`           |
//! | Transactions | `type`              |
//! | Audit logs   | `action`            |

use async_trait::async_trait;
use shared::{
    AuditLog, AuditLogFilter, DepositRequest, Document, DocumentFilter, FundingFilter, KycFilter, KycSubmission,
    MessageResponse, Paginated, ReviewDecision, Transaction, TransactionFilter, UserFilter, UserRecord,
    WithdrawalRequest,
};

use super::list::{ListController, ListSource, ReviewSource};
use super::registry::Resource;
use crate::core::error::Result;
use crate::core::service::AdminApi;

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

// ---- users ----

pub struct UserList;

#[async_trait]
impl ListSource for UserList {
    type Item = UserRecord;
    const RESOURCE: Resource = Resource::Users;
    const NOUN: &'static str = "users";

    async fn fetch(&self, api: &dyn AdminApi, page: u32, limit: u32, filter_text: &str) -> Result<Paginated<UserRecord>> {
        let filter = UserFilter {
            search: non_empty(filter_text),
            page,
            limit,
        };
        api.list_users(&filter).await
    }
}

impl ListController<UserList> {
    /// Activate or deactivate an account, then re-fetch the page
    pub async fn set_user_active(&self, user_id: &str, is_active: bool) -> Result<MessageResponse> {
        let verdict = if is_active { "activated" } else { "deactivated" };
        self.mutate(
            self.api().update_user_status(user_id, is_active),
            format!("User {} successfully", verdict),
            "Failed to update user status",
        )
        .await
    }
}

// ---- kyc ----

pub struct KycQueue;

#[async_trait]
impl ListSource for KycQueue {
    type Item = KycSubmission;
    const RESOURCE: Resource = Resource::Kyc;
    const NOUN: &'static str = "KYC submissions";

    async fn fetch(&self, api: &dyn AdminApi, page: u32, limit: u32, filter_text: &str) -> Result<Paginated<KycSubmission>> {
        let filter = KycFilter {
            page,
            limit,
            user_id: non_empty(filter_text),
            id_type: None,
        };
        api.list_pending_kyc(&filter).await
    }
}

#[async_trait]
impl ReviewSource for KycQueue {
    const SUBJECT: &'static str = "KYC submission";

    async fn review(&self, api: &dyn AdminApi, id: &str, decision: &ReviewDecision) -> Result<MessageResponse> {
        api.verify_kyc(id, decision).await
    }
}

// ---- documents ----

pub struct DocumentQueue;

#[async_trait]
impl ListSource for DocumentQueue {
    type Item = Document;
    const RESOURCE: Resource = Resource::Documents;
    const NOUN: &'static str = "documents";

    async fn fetch(&self, api: &dyn AdminApi, page: u32, limit: u32, filter_text: &str) -> Result<Paginated<Document>> {
        let filter = DocumentFilter {
            page,
            limit,
            search: non_empty(filter_text),
            ..DocumentFilter::default()
        };
        api.list_documents(&filter).await
    }
}

#[async_trait]
impl ReviewSource for DocumentQueue {
    const SUBJECT: &'static str = "Document";

    async fn review(&self, api: &dyn AdminApi, id: &str, decision: &ReviewDecision) -> Result<MessageResponse> {
        api.approve_document(id, decision).await
    }
}

// ---- deposits / withdrawals ----

pub struct DepositQueue;

#[async_trait]
impl ListSource for DepositQueue {
    type Item = DepositRequest;
    const RESOURCE: Resource = Resource::Deposits;
    const NOUN: &'static str = "deposits";

    async fn fetch(&self, api: &dyn AdminApi, page: u32, limit: u32, filter_text: &str) -> Result<Paginated<DepositRequest>> {
        let filter = FundingFilter {
            page,
            limit,
            user_id: non_empty(filter_text),
            ..FundingFilter::default()
        };
        api.list_deposits(&filter).await
    }
}

#[async_trait]
impl ReviewSource for DepositQueue {
    const SUBJECT: &'static str = "Deposit";

    async fn review(&self, api: &dyn AdminApi, id: &str, decision: &ReviewDecision) -> Result<MessageResponse> {
        api.process_deposit(id, decision).await
    }
}

pub struct WithdrawalQueue;

#[async_trait]
impl ListSource for WithdrawalQueue {
    type Item = WithdrawalRequest;
    const RESOURCE: Resource = Resource::Withdrawals;
    const NOUN: &'static str = "withdrawals";

    async fn fetch(
        &self,
        api: &dyn AdminApi,
        page: u32,
        limit: u32,
        filter_text: &str,
    ) -> Result<Paginated<WithdrawalRequest>> {
        let filter = FundingFilter {
            page,
            limit,
            user_id: non_empty(filter_text),
            ..FundingFilter::default()
        };
        api.list_withdrawals(&filter).await
    }
}

#[async_trait]
impl ReviewSource for WithdrawalQueue {
    const SUBJECT: &'static str = "Withdrawal";

    async fn review(&self, api: &dyn AdminApi, id: &str, decision: &ReviewDecision) -> Result<MessageResponse> {
        api.process_withdrawal(id, decision).await
    }
}

// ---- read-only feeds ----

pub struct TransactionFeed;

#[async_trait]
impl ListSource for TransactionFeed {
    type Item = Transaction;
    const RESOURCE: Resource = Resource::Transactions;
    const NOUN: &'static str = "transactions";

    async fn fetch(&self, api: &dyn AdminApi, page: u32, limit: u32, filter_text: &str) -> Result<Paginated<Transaction>> {
        let filter = TransactionFilter {
            page,
            limit,
            kind: non_empty(filter_text),
            ..TransactionFilter::default()
        };
        api.list_transactions(&filter).await
    }
}

pub struct AuditLogFeed;

#[async_trait]
impl ListSource for AuditLogFeed {
    type Item = AuditLog;
    const RESOURCE: Resource = Resource::AuditLogs;
    const NOUN: &'static str = "audit logs";

    async fn fetch(&self, api: &dyn AdminApi, page: u32, limit: u32, filter_text: &str) -> Result<Paginated<AuditLog>> {
        let filter = AuditLogFilter {
            page,
            limit,
            action: non_empty(filter_text),
            ..AuditLogFilter::default()
        };
        api.list_audit_logs(&filter).await
    }
}
