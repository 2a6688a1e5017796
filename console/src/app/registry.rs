//! # Query Registry
//!
//! Tracks a generation counter per list resource. A mutation bumps the
//! resource it touched (and the lists derived from it); a controller whose
//! loaded generation is behind re-fetches on its next mount.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

/// Server-side collections a list page can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Users,
    Kyc,
    Documents,
    Deposits,
    Withdrawals,
    Transactions,
    AuditLogs,
    Dashboard,
}

impl Resource {
    /// Lists whose content changes when this resource is mutated
    pub fn dependents(&self) -> &'static [Resource] {
        match self {
            Resource::Deposits | Resource::Withdrawals => &[Resource::Transactions, Resource::Dashboard],
            Resource::Kyc => &[Resource::Users, Resource::Dashboard],
            Resource::Documents | Resource::Users => &[Resource::Dashboard],
            Resource::Transactions | Resource::AuditLogs | Resource::Dashboard => &[],
        }
    }
}

/// Shared generation table
#[derive(Debug, Clone, Default)]
pub struct QueryRegistry {
    generations: Arc<RwLock<HashMap<Resource, u64>>>,
}

impl QueryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self, resource: Resource) -> u64 {
        self.generations.read().get(&resource).copied().unwrap_or(0)
    }

    /// Mark `resource` and its dependents stale
    pub fn invalidate(&self, resource: Resource) {
        let mut generations = self.generations.write();
        for r in std::iter::once(&resource).chain(resource.dependents()) {
            *generations.entry(*r).or_insert(0) += 1;
        }
        tracing::debug!(resource = ?resource, "Query invalidated");
    }
}
