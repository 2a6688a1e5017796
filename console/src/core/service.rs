//! # Service Traits
//!
//! [`AdminApi`] is the seam between page controllers and the HTTP client.
//! Controllers hold an `Arc<dyn AdminApi>`; production wires in
//! [`crate::services::api::ApiClient`], tests wire in an in-memory fake.

use async_trait::async_trait;
use shared::{
    AdminProfile, AuditLog, AuditLogFilter, DashboardStats, DepositRequest, Document, DocumentFilter,
    FundingFilter, KycFilter, KycSubmission, MessageResponse, Paginated, ReviewDecision, SettingsBundle,
    TokenResponse, Transaction, TransactionFilter, UpdateProfileRequest, UserFilter, UserRecord,
    WithdrawalRequest,
};

use crate::core::error::Result;
use crate::services::session::Session;

/// One method per backend admin operation.
#[async_trait]
pub trait AdminApi: Send + Sync {
    // ---- session ----

    /// Snapshot of the current session
    fn session(&self) -> Session;

    /// True while a bearer token is held
    fn is_authenticated(&self) -> bool {
        self.session().token.is_some()
    }

    /// Drop token and profile locally without contacting the server
    fn discard_session(&self) -> Result<()>;

    // ---- auth ----

    /// Authenticate and persist the issued token
    async fn login(&self, email: String, password: String, totp_code: Option<String>) -> Result<TokenResponse>;

    /// Fetch the logged-in admin and cache it in the session
    async fn get_profile(&self) -> Result<AdminProfile>;

    async fn update_profile(&self, update: UpdateProfileRequest) -> Result<AdminProfile>;

    async fn change_password(&self, old_password: String, new_password: String) -> Result<MessageResponse>;

    /// Notify the server, then always drop the local session
    async fn logout(&self) -> Result<()>;

    // ---- dashboard ----

    async fn get_dashboard_stats(&self) -> Result<DashboardStats>;

    // ---- users ----

    async fn list_users(&self, filter: &UserFilter) -> Result<Paginated<UserRecord>>;

    async fn get_user(&self, user_id: &str) -> Result<UserRecord>;

    async fn update_user_status(&self, user_id: &str, is_active: bool) -> Result<MessageResponse>;

    // ---- kyc ----

    async fn list_pending_kyc(&self, filter: &KycFilter) -> Result<Paginated<KycSubmission>>;

    async fn verify_kyc(&self, kyc_id: &str, decision: &ReviewDecision) -> Result<MessageResponse>;

    // ---- documents ----

    async fn list_documents(&self, filter: &DocumentFilter) -> Result<Paginated<Document>>;

    async fn approve_document(&self, doc_id: &str, decision: &ReviewDecision) -> Result<MessageResponse>;

    // ---- deposits / withdrawals ----

    async fn list_deposits(&self, filter: &FundingFilter) -> Result<Paginated<DepositRequest>>;

    async fn process_deposit(&self, deposit_id: &str, decision: &ReviewDecision) -> Result<MessageResponse>;

    async fn list_withdrawals(&self, filter: &FundingFilter) -> Result<Paginated<WithdrawalRequest>>;

    async fn process_withdrawal(&self, withdrawal_id: &str, decision: &ReviewDecision) -> Result<MessageResponse>;

    // ---- read-only feeds ----

    async fn list_transactions(&self, filter: &TransactionFilter) -> Result<Paginated<Transaction>>;

    async fn list_audit_logs(&self, filter: &AuditLogFilter) -> Result<Paginated<AuditLog>>;

    // ---- settings ----

    async fn get_settings(&self) -> Result<SettingsBundle>;

    async fn update_settings(&self, settings: &SettingsBundle) -> Result<MessageResponse>;

    async fn reset_settings(&self) -> Result<MessageResponse>;
}
