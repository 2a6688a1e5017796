//! # Application Orchestrator
//!
//! [`App`] wires one controller per admin page to a shared [`AdminApi`],
//! a [`QueryRegistry`] and a [`NotificationCenter`], and tracks which page is
//! showing.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  Front end (CLI today)                                   │
//! │  - navigate / mount_current                              │
//! │  - reads controller state, drains notifications          │
//! └────────────┬─────────────────────────────────────────────┘
//!              │
//! ┌────────────▼─────────────────────────────────────────────┐
//! │  Controllers: Arc<RwLock<State>> each                    │
//! │  - ListController<S> per list page                       │
//! │  - SettingsController, DashboardController, Auth         │
//! └────────────┬─────────────────────────┬───────────────────┘
//!              │ Arc<dyn AdminApi>       │ async_channel
//! ┌────────────▼────────────┐   ┌────────▼──────────────────┐
//! │  ApiClient (reqwest)    │   │  NotificationCenter       │
//! └─────────────────────────┘   └───────────────────────────┘
//! ```
//!
//! Locks are only held between awaits, never across them.
//!
//! ## Related Modules
//!
//! - [`list`]: generic paginated list controller
//! - [`pages`]: per-resource bindings for the list controller
//! - [`settings`]: settings draft controller
//! - [`auth`]: login and session controller
//! - [`view`]: plain-text tables and settings sheet

pub mod auth;
pub mod dashboard;
pub mod list;
pub mod notifications;
pub mod pages;
pub mod registry;
pub mod settings;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use auth::{AuthController, AuthState};
pub use dashboard::{DashboardController, DashboardState};
pub use list::{ListController, ListSource, ListState, ReviewSource};
pub use notifications::{Notification, NotificationCenter, NotificationLevel, Notifier};
pub use pages::{AuditLogFeed, DepositQueue, DocumentQueue, KycQueue, TransactionFeed, UserList, WithdrawalQueue};
pub use registry::{QueryRegistry, Resource};
pub use settings::{SettingsController, SettingsState};
pub use view::{render_settings, render_table, TableRow};

use std::sync::Arc;

use crate::config::ConsoleConfig;
use crate::core::error::Result;
use crate::core::service::AdminApi;
use crate::services::api::ApiClient;
use crate::services::session::FileSessionStore;

/// Admin console pages, in navigation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Dashboard,
    Users,
    Kyc,
    Documents,
    Deposits,
    Withdrawals,
    Transactions,
    AuditLogs,
    Settings,
}

impl Page {
    pub fn all() -> &'static [Page] {
        &[
            Page::Dashboard,
            Page::Users,
            Page::Kyc,
            Page::Documents,
            Page::Deposits,
            Page::Withdrawals,
            Page::Transactions,
            Page::AuditLogs,
            Page::Settings,
        ]
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Users => "Users",
            Page::Kyc => "KYC Verification",
            Page::Documents => "Documents",
            Page::Deposits => "Deposits",
            Page::Withdrawals => "Withdrawals",
            Page::Transactions => "Transactions",
            Page::AuditLogs => "Audit Logs",
            Page::Settings => "System Settings",
        }
    }

    fn index(&self) -> usize {
        Page::all().iter().position(|p| p == self).unwrap_or(0)
    }

    pub fn next(&self) -> Page {
        let all = Page::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn previous(&self) -> Page {
        let all = Page::all();
        all[(self.index() + all.len() - 1) % all.len()]
    }
}

/// Main console orchestrator
pub struct App {
    pub api: Arc<dyn AdminApi>,
    pub auth: AuthController,
    pub dashboard: DashboardController,
    pub users: ListController<UserList>,
    pub kyc: ListController<KycQueue>,
    pub documents: ListController<DocumentQueue>,
    pub deposits: ListController<DepositQueue>,
    pub withdrawals: ListController<WithdrawalQueue>,
    pub transactions: ListController<TransactionFeed>,
    pub audit_logs: ListController<AuditLogFeed>,
    pub settings: SettingsController,
    pub registry: QueryRegistry,
    notifications: NotificationCenter,
    current_page: Page,
}

impl App {
    pub fn new(api: Arc<dyn AdminApi>, page_size: u32) -> Self {
        let notifications = NotificationCenter::new();
        let registry = QueryRegistry::new();
        let notifier = notifications.notifier();

        Self {
            auth: AuthController::new(api.clone(), notifier.clone()),
            dashboard: DashboardController::new(api.clone(), registry.clone(), notifier.clone()),
            users: ListController::new(api.clone(), UserList, page_size, registry.clone(), notifier.clone()),
            kyc: ListController::new(api.clone(), KycQueue, page_size, registry.clone(), notifier.clone()),
            documents: ListController::new(api.clone(), DocumentQueue, page_size, registry.clone(), notifier.clone()),
            deposits: ListController::new(api.clone(), DepositQueue, page_size, registry.clone(), notifier.clone()),
            withdrawals: ListController::new(api.clone(), WithdrawalQueue, page_size, registry.clone(), notifier.clone()),
            transactions: ListController::new(api.clone(), TransactionFeed, page_size, registry.clone(), notifier.clone()),
            audit_logs: ListController::new(api.clone(), AuditLogFeed, page_size, registry.clone(), notifier.clone()),
            settings: SettingsController::new(api.clone(), notifier),
            api,
            registry,
            notifications,
            current_page: Page::Dashboard,
        }
    }

    /// Build the HTTP client and file-backed session from configuration
    pub fn from_config(config: &ConsoleConfig) -> Result<Self> {
        let store = Arc::new(FileSessionStore::new(&config.session_file));
        let client = ApiClient::new(&config.api_url, config.http_timeout, store)?;
        Ok(Self::new(Arc::new(client), config.page_size))
    }

    pub fn current_page(&self) -> Page {
        self.current_page
    }

    pub fn navigate(&mut self, page: Page) {
        tracing::debug!(from = ?self.current_page, to = ?page, "Navigate");
        self.current_page = page;
    }

    pub fn navigate_next(&mut self) -> Page {
        self.navigate(self.current_page.next());
        self.current_page
    }

    pub fn navigate_previous(&mut self) -> Page {
        self.navigate(self.current_page.previous());
        self.current_page
    }

    /// Show `page` and run its initial load
    pub async fn mount(&mut self, page: Page) -> bool {
        self.navigate(page);
        self.mount_current().await
    }

    /// Initial load of the current page. Does nothing while logged out.
    pub async fn mount_current(&self) -> bool {
        if !self.auth.sync_with_session() {
            tracing::info!(page = self.current_page.title(), "Not authenticated, staying on login");
            return false;
        }

        match self.current_page {
            Page::Dashboard => self.dashboard.mount().await,
            Page::Users => self.users.mount().await,
            Page::Kyc => self.kyc.mount().await,
            Page::Documents => self.documents.mount().await,
            Page::Deposits => self.deposits.mount().await,
            Page::Withdrawals => self.withdrawals.mount().await,
            Page::Transactions => self.transactions.mount().await,
            Page::AuditLogs => self.audit_logs.mount().await,
            Page::Settings => self.settings.mount().await,
        }

        // A 401 during the load clears the session
        self.auth.sync_with_session()
    }

    /// Reload every loaded list that a mutation has made stale
    pub async fn refresh_stale(&self) {
        if self.dashboard.is_stale() && self.dashboard.snapshot().stats.is_some() {
            self.dashboard.refresh().await;
        }
        macro_rules! refresh_if_loaded {
            ($($controller:ident),*) => {
                $(
                    if self.$controller.is_loaded() {
                        self.$controller.refresh_if_stale().await;
                    }
                )*
            };
        }
        refresh_if_loaded!(users, kyc, documents, deposits, withdrawals, transactions, audit_logs);
    }

    /// Notifications raised since the last call
    pub fn drain_notifications(&self) -> Vec<Notification> {
        self.notifications.drain()
    }
}
