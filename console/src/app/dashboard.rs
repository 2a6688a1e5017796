//! # Dashboard Controller

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use shared::DashboardStats;

use super::notifications::Notifier;
use super::registry::{QueryRegistry, Resource};
use crate::core::service::AdminApi;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    /// `None` until the first successful load
    pub stats: Option<DashboardStats>,
    pub loading: bool,
}

pub struct DashboardController {
    api: Arc<dyn AdminApi>,
    state: Arc<RwLock<DashboardState>>,
    loaded_generation: Mutex<Option<u64>>,
    registry: QueryRegistry,
    notifier: Notifier,
}

impl DashboardController {
    pub fn new(api: Arc<dyn AdminApi>, registry: QueryRegistry, notifier: Notifier) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(DashboardState::default())),
            loaded_generation: Mutex::new(None),
            registry,
            notifier,
        }
    }

    pub fn state(&self) -> Arc<RwLock<DashboardState>> {
        self.state.clone()
    }

    pub fn snapshot(&self) -> DashboardState {
        self.state.read().clone()
    }

    pub fn is_stale(&self) -> bool {
        *self.loaded_generation.lock() != Some(self.registry.generation(Resource::Dashboard))
    }

    pub async fn mount(&self) {
        self.refresh().await;
    }

    pub async fn refresh(&self) {
        let generation = self.registry.generation(Resource::Dashboard);
        self.state.write().loading = true;

        match self.api.get_dashboard_stats().await {
            Ok(stats) => {
                tracing::debug!(pending = stats.pending_total(), "Dashboard loaded");
                let mut state = self.state.write();
                state.stats = Some(stats);
                state.loading = false;
                drop(state);
                *self.loaded_generation.lock() = Some(generation);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Dashboard fetch failed");
                self.state.write().loading = false;
                self.notifier.error(e.user_message("Failed to fetch dashboard stats"));
            }
        }
    }
}
