//! # Admin API Client Module
//!
//! HTTP client for the backend admin REST API. Every function here is a thin
//! "send request, return parsed payload or error" wrapper; business rules
//! stay server-side.
//!
//! ## Module Structure
//!
//! ```text
//! api/
//! ├── mod.rs           - Module exports and AdminApi wiring
//! ├── client.rs        - ApiClient, request execution, session ownership
//! ├── auth.rs          - Login, profile, password, logout
//! ├── dashboard.rs     - Aggregate metrics
//! ├── users.rs         - User list, lookup, activation
//! ├── moderation.rs    - Shared approve/reject routine
//! ├── kyc.rs           - KYC submissions
//! ├── documents.rs     - Marketplace documents
//! ├── funding.rs       - Deposits and withdrawals
//! ├── transactions.rs  - Ledger feed
//! ├── audit.rs         - Audit log feed
//! └── settings.rs      - Platform settings
//! ```

pub mod audit;
pub mod auth;
pub mod client;
pub mod dashboard;
pub mod documents;
pub mod funding;
pub mod kyc;
pub mod moderation;
pub mod settings;
pub mod transactions;
pub mod users;

pub use client::ApiClient;

use async_trait::async_trait;
use shared::{
    AdminProfile, AuditLog, AuditLogFilter, DashboardStats, DepositRequest, Document, DocumentFilter,
    FundingFilter, KycFilter, KycSubmission, MessageResponse, Paginated, ReviewDecision, SettingsBundle,
    TokenResponse, Transaction, TransactionFilter, UpdateProfileRequest, UserFilter, UserRecord,
    WithdrawalRequest,
};

use crate::core::error::Result;
use crate::core::service::AdminApi;
use crate::services::session::Session;

#[async_trait]
impl AdminApi for ApiClient {
    fn session(&self) -> Session {
        ApiClient::session(self)
    }

    fn discard_session(&self) -> Result<()> {
        self.clear_session()
    }

    async fn login(&self, email: String, password: String, totp_code: Option<String>) -> Result<TokenResponse> {
        auth::login(self, email, password, totp_code).await
    }

    async fn get_profile(&self) -> Result<AdminProfile> {
        auth::get_profile(self).await
    }

    async fn update_profile(&self, update: UpdateProfileRequest) -> Result<AdminProfile> {
        auth::update_profile(self, update).await
    }

    async fn change_password(&self, old_password: String, new_password: String) -> Result<MessageResponse> {
        auth::change_password(self, old_password, new_password).await
    }

    async fn logout(&self) -> Result<()> {
        auth::logout(self).await
    }

    async fn get_dashboard_stats(&self) -> Result<DashboardStats> {
        dashboard::get_dashboard_stats(self).await
    }

    async fn list_users(&self, filter: &UserFilter) -> Result<Paginated<UserRecord>> {
        users::list_users(self, filter).await
    }

    async fn get_user(&self, user_id: &str) -> Result<UserRecord> {
        users::get_user(self, user_id).await
    }

    async fn update_user_status(&self, user_id: &str, is_active: bool) -> Result<MessageResponse> {
        users::update_user_status(self, user_id, is_active).await
    }

    async fn list_pending_kyc(&self, filter: &KycFilter) -> Result<Paginated<KycSubmission>> {
        kyc::list_pending_kyc(self, filter).await
    }

    async fn verify_kyc(&self, kyc_id: &str, decision: &ReviewDecision) -> Result<MessageResponse> {
        kyc::verify_kyc(self, kyc_id, decision).await
    }

    async fn list_documents(&self, filter: &DocumentFilter) -> Result<Paginated<Document>> {
        documents::list_documents(self, filter).await
    }

    async fn approve_document(&self, doc_id: &str, decision: &ReviewDecision) -> Result<MessageResponse> {
        documents::approve_document(self, doc_id, decision).await
    }

    async fn list_deposits(&self, filter: &FundingFilter) -> Result<Paginated<DepositRequest>> {
        funding::list_deposits(self, filter).await
    }

    async fn process_deposit(&self, deposit_id: &str, decision: &ReviewDecision) -> Result<MessageResponse> {
        funding::process_deposit(self, deposit_id, decision).await
    }

    async fn list_withdrawals(&self, filter: &FundingFilter) -> Result<Paginated<WithdrawalRequest>> {
        funding::list_withdrawals(self, filter).await
    }

    async fn process_withdrawal(&self, withdrawal_id: &str, decision: &ReviewDecision) -> Result<MessageResponse> {
        funding::process_withdrawal(self, withdrawal_id, decision).await
    }

    async fn list_transactions(&self, filter: &TransactionFilter) -> Result<Paginated<Transaction>> {
        transactions::list_transactions(self, filter).await
    }

    async fn list_audit_logs(&self, filter: &AuditLogFilter) -> Result<Paginated<AuditLog>> {
        audit::list_audit_logs(self, filter).await
    }

    async fn get_settings(&self) -> Result<SettingsBundle> {
        settings::get_settings(self).await
    }

    async fn update_settings(&self, settings: &SettingsBundle) -> Result<MessageResponse> {
        settings::update_settings(self, settings).await
    }

    async fn reset_settings(&self) -> Result<MessageResponse> {
        settings::reset_settings(self).await
    }
}
