//! In-memory [`AdminApi`] for controller tests.
//!
//! Behaves like a tiny backend: lists paginate, moderation removes the row
//! from its pending queue, status toggles persist, settings round-trip.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use parking_lot::Mutex;
use shared::{
    page_count, AdminProfile, AdminRole, AuditLog, AuditLogFilter, DashboardStats, DepositRequest, Document,
    DocumentFilter, FundingFilter, KycFilter, KycStatus, KycSubmission, MessageResponse, Paginated,
    ReviewDecision, ReviewStatus, SettingValue, SettingsBundle, TokenResponse, Transaction, TransactionFilter,
    UpdateProfileRequest, UserFilter, UserRecord, WithdrawalRequest,
};

use crate::core::error::{AppError, Result};
use crate::core::service::AdminApi;
use crate::services::session::Session;

pub const FAKE_PASSWORD: &str = "Secret123";

pub fn user(id: &str, is_active: bool) -> UserRecord {
    UserRecord {
        id: id.to_string(),
        email: format!("{}@example.com", id),
        username: id.to_string(),
        full_name: None,
        role: "user".to_string(),
        kyc_status: KycStatus::Pending,
        is_active,
        is_2fa_enabled: false,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

pub fn withdrawal(id: &str) -> WithdrawalRequest {
    WithdrawalRequest {
        id: id.to_string(),
        user_id: "u1".to_string(),
        amount: 500.0,
        withdrawal_method: "crypto".to_string(),
        withdrawal_address: "0xabc".to_string(),
        status: ReviewStatus::Pending,
        admin_note: None,
        created_at: Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
        processed_at: None,
    }
}

pub fn default_settings() -> SettingsBundle {
    let mut settings = SettingsBundle::new();
    settings.set("transaction_fee_percentage", SettingValue::Number(0.5));
    settings.set("withdrawal_fee_fixed", SettingValue::Number(1.0));
    settings.set("min_withdrawal_amount", SettingValue::Number(10.0));
    settings.set("max_withdrawal_amount", SettingValue::Number(10_000.0));
    settings.set("staking_lock_period_days", SettingValue::Number(30.0));
    settings.set("eth_network", SettingValue::Text("mainnet".to_string()));
    settings.set("bsc_network", SettingValue::Text("mainnet".to_string()));
    settings
}

#[derive(Default)]
struct Backend {
    session: Session,
    users: Vec<UserRecord>,
    kyc: Vec<KycSubmission>,
    documents: Vec<Document>,
    deposits: Vec<DepositRequest>,
    withdrawals: Vec<WithdrawalRequest>,
    settings: Option<SettingsBundle>,
    saved_settings: Option<SettingsBundle>,
    search_delays: HashMap<String, Duration>,
    requested_pages: Vec<u32>,
    user_searches: Vec<Option<String>>,
    fail_lists: bool,
    fail_mutations: bool,
    fail_profile: bool,
    login_calls: usize,
    reset_calls: usize,
    password_changes: usize,
}

#[derive(Default)]
pub struct FakeAdminApi {
    inner: Mutex<Backend>,
}

impl FakeAdminApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_users(&self, users: Vec<UserRecord>) {
        self.inner.lock().users = users;
    }

    pub fn set_withdrawals(&self, withdrawals: Vec<WithdrawalRequest>) {
        self.inner.lock().withdrawals = withdrawals;
    }

    /// Delay user list responses whose search equals `search`
    pub fn delay_search(&self, search: &str, delay: Duration) {
        self.inner.lock().search_delays.insert(search.to_string(), delay);
    }

    pub fn fail_lists(&self, fail: bool) {
        self.inner.lock().fail_lists = fail;
    }

    pub fn fail_profile(&self, fail: bool) {
        self.inner.lock().fail_profile = fail;
    }

    pub fn fail_mutations(&self, fail: bool) {
        self.inner.lock().fail_mutations = fail;
    }

    /// Pages requested from the user list, in order
    pub fn requested_pages(&self) -> Vec<u32> {
        self.inner.lock().requested_pages.clone()
    }

    pub fn user_list_calls(&self) -> usize {
        self.inner.lock().user_searches.len()
    }

    pub fn last_user_search(&self) -> Option<String> {
        self.inner.lock().user_searches.last().cloned().flatten()
    }

    pub fn last_saved_settings(&self) -> Option<SettingsBundle> {
        self.inner.lock().saved_settings.clone()
    }

    pub fn reset_calls(&self) -> usize {
        self.inner.lock().reset_calls
    }

    pub fn login_calls(&self) -> usize {
        self.inner.lock().login_calls
    }

    pub fn password_changes(&self) -> usize {
        self.inner.lock().password_changes
    }

    /// Simulate the client having seen a 401
    pub fn expire_session(&self) {
        self.inner.lock().session = Session::default();
    }

    fn check_list(&self) -> Result<()> {
        if self.inner.lock().fail_lists {
            return Err(AppError::Server {
                status: 500,
                detail: None,
            });
        }
        Ok(())
    }

    fn check_mutation(&self) -> Result<()> {
        if self.inner.lock().fail_mutations {
            return Err(rejected());
        }
        Ok(())
    }
}

fn rejected() -> AppError {
    AppError::Server {
        status: 400,
        detail: Some("Request rejected by server".to_string()),
    }
}

fn not_found() -> AppError {
    AppError::Server {
        status: 404,
        detail: Some("Not found".to_string()),
    }
}

fn ok(message: &str) -> MessageResponse {
    MessageResponse {
        message: message.to_string(),
        success: true,
    }
}

fn paginate<T: Clone>(items: &[T], page: u32, limit: u32) -> Paginated<T> {
    let total = items.len() as u64;
    let limit = limit.max(1);
    let start = ((page.max(1) - 1) * limit) as usize;
    let slice = items.iter().skip(start).take(limit as usize).cloned().collect();
    Paginated {
        items: slice,
        page,
        pages: page_count(total, limit),
        total: Some(total),
    }
}

/// Remove `id` from a pending queue
fn take<T>(queue: &mut Vec<T>, id: &str, id_of: impl Fn(&T) -> &str) -> Result<()> {
    let index = queue.iter().position(|item| id_of(item) == id).ok_or_else(not_found)?;
    queue.remove(index);
    Ok(())
}

#[async_trait]
impl AdminApi for FakeAdminApi {
    fn session(&self) -> Session {
        self.inner.lock().session.clone()
    }

    fn discard_session(&self) -> Result<()> {
        self.inner.lock().session = Session::default();
        Ok(())
    }

    async fn login(&self, email: String, password: String, _totp_code: Option<String>) -> Result<TokenResponse> {
        let mut backend = self.inner.lock();
        backend.login_calls += 1;
        if password != FAKE_PASSWORD {
            return Err(AppError::Unauthorized {
                detail: Some("Invalid credentials".to_string()),
            });
        }
        let token = format!("token-for-{}", email);
        backend.session.token = Some(token.clone());
        Ok(TokenResponse {
            access_token: token,
            refresh_token: None,
            token_type: "bearer".to_string(),
        })
    }

    async fn get_profile(&self) -> Result<AdminProfile> {
        let mut backend = self.inner.lock();
        let token = backend.session.token.clone().ok_or(AppError::Unauthorized { detail: None })?;
        if backend.fail_profile {
            return Err(AppError::Server {
                status: 500,
                detail: None,
            });
        }
        let email = token.trim_start_matches("token-for-").to_string();
        let profile = AdminProfile {
            id: "adm-1".to_string(),
            username: email.split('@').next().unwrap_or_default().to_string(),
            email,
            full_name: "Ops Admin".to_string(),
            role: AdminRole::Admin,
            is_active: true,
            is_2fa_enabled: false,
            last_login: None,
            created_at: Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap(),
        };
        backend.session.profile = Some(profile.clone());
        Ok(profile)
    }

    async fn update_profile(&self, update: UpdateProfileRequest) -> Result<AdminProfile> {
        self.check_mutation()?;
        let mut profile = self.get_profile().await?;
        if let Some(full_name) = update.full_name {
            profile.full_name = full_name;
        }
        if let Some(email) = update.email {
            profile.email = email;
        }
        self.inner.lock().session.profile = Some(profile.clone());
        Ok(profile)
    }

    async fn change_password(&self, _old_password: String, _new_password: String) -> Result<MessageResponse> {
        self.check_mutation()?;
        self.inner.lock().password_changes += 1;
        Ok(ok("Password changed"))
    }

    async fn logout(&self) -> Result<()> {
        let mut backend = self.inner.lock();
        backend.session = Session::default();
        if backend.fail_mutations {
            return Err(rejected());
        }
        Ok(())
    }

    async fn get_dashboard_stats(&self) -> Result<DashboardStats> {
        self.check_list()?;
        let backend = self.inner.lock();
        Ok(DashboardStats {
            total_users: backend.users.len() as u64,
            total_documents: backend.documents.len() as u64,
            pending_deposits: backend.deposits.len() as u64,
            pending_withdrawals: backend.withdrawals.len() as u64,
            pending_kyc: backend.kyc.len() as u64,
            ..DashboardStats::default()
        })
    }

    async fn list_users(&self, filter: &UserFilter) -> Result<Paginated<UserRecord>> {
        let delay = {
            let mut backend = self.inner.lock();
            backend.requested_pages.push(filter.page);
            backend.user_searches.push(filter.search.clone());
            filter
                .search
                .as_ref()
                .and_then(|s| backend.search_delays.get(s).copied())
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.check_list()?;
        let backend = self.inner.lock();
        let matching: Vec<UserRecord> = backend
            .users
            .iter()
            .filter(|u| match &filter.search {
                Some(search) => u.username.contains(search.as_str()) || u.email.contains(search.as_str()),
                None => true,
            })
            .cloned()
            .collect();
        Ok(paginate(&matching, filter.page, filter.limit))
    }

    async fn get_user(&self, user_id: &str) -> Result<UserRecord> {
        self.check_list()?;
        let backend = self.inner.lock();
        backend.users.iter().find(|u| u.id == user_id).cloned().ok_or_else(not_found)
    }

    async fn update_user_status(&self, user_id: &str, is_active: bool) -> Result<MessageResponse> {
        self.check_mutation()?;
        let mut backend = self.inner.lock();
        let user = backend.users.iter_mut().find(|u| u.id == user_id).ok_or_else(not_found)?;
        user.is_active = is_active;
        Ok(ok("User status updated"))
    }

    async fn list_pending_kyc(&self, filter: &KycFilter) -> Result<Paginated<KycSubmission>> {
        self.check_list()?;
        Ok(paginate(&self.inner.lock().kyc, filter.page, filter.limit))
    }

    async fn verify_kyc(&self, kyc_id: &str, _decision: &ReviewDecision) -> Result<MessageResponse> {
        self.check_mutation()?;
        take(&mut self.inner.lock().kyc, kyc_id, |k| k.id.as_str())?;
        Ok(ok("KYC processed"))
    }

    async fn list_documents(&self, filter: &DocumentFilter) -> Result<Paginated<Document>> {
        self.check_list()?;
        Ok(paginate(&self.inner.lock().documents, filter.page, filter.limit))
    }

    async fn approve_document(&self, doc_id: &str, _decision: &ReviewDecision) -> Result<MessageResponse> {
        self.check_mutation()?;
        take(&mut self.inner.lock().documents, doc_id, |d| d.id.as_str())?;
        Ok(ok("Document processed"))
    }

    async fn list_deposits(&self, filter: &FundingFilter) -> Result<Paginated<DepositRequest>> {
        self.check_list()?;
        Ok(paginate(&self.inner.lock().deposits, filter.page, filter.limit))
    }

    async fn process_deposit(&self, deposit_id: &str, _decision: &ReviewDecision) -> Result<MessageResponse> {
        self.check_mutation()?;
        take(&mut self.inner.lock().deposits, deposit_id, |d| d.id.as_str())?;
        Ok(ok("Deposit processed"))
    }

    async fn list_withdrawals(&self, filter: &FundingFilter) -> Result<Paginated<WithdrawalRequest>> {
        self.check_list()?;
        Ok(paginate(&self.inner.lock().withdrawals, filter.page, filter.limit))
    }

    async fn process_withdrawal(&self, withdrawal_id: &str, _decision: &ReviewDecision) -> Result<MessageResponse> {
        self.check_mutation()?;
        take(&mut self.inner.lock().withdrawals, withdrawal_id, |w| w.id.as_str())?;
        Ok(ok("Withdrawal processed"))
    }

    async fn list_transactions(&self, filter: &TransactionFilter) -> Result<Paginated<Transaction>> {
        self.check_list()?;
        Ok(paginate::<Transaction>(&[], filter.page, filter.limit))
    }

    async fn list_audit_logs(&self, filter: &AuditLogFilter) -> Result<Paginated<AuditLog>> {
        self.check_list()?;
        Ok(paginate::<AuditLog>(&[], filter.page, filter.limit))
    }

    async fn get_settings(&self) -> Result<SettingsBundle> {
        self.check_list()?;
        let mut backend = self.inner.lock();
        Ok(backend.settings.get_or_insert_with(default_settings).clone())
    }

    async fn update_settings(&self, settings: &SettingsBundle) -> Result<MessageResponse> {
        self.check_mutation()?;
        let mut backend = self.inner.lock();
        backend.settings = Some(settings.clone());
        backend.saved_settings = Some(settings.clone());
        Ok(ok("Settings updated"))
    }

    async fn reset_settings(&self) -> Result<MessageResponse> {
        self.check_mutation()?;
        let mut backend = self.inner.lock();
        backend.reset_calls += 1;
        backend.settings = Some(default_settings());
        Ok(ok("Settings reset"))
    }
}
