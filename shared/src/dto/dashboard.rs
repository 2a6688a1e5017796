use serde::{Deserialize, Serialize};

/// Aggregate metrics shown on the admin dashboard
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DashboardStats {
    pub total_users: u64,
    pub total_documents: u64,
    pub total_transactions: u64,
    pub pending_deposits: u64,
    pub pending_withdrawals: u64,
    pub pending_kyc: u64,
    pub total_revenue: f64,
    pub active_stakings: u64,
    pub active_investments: u64,
}

impl DashboardStats {
    /// Items waiting on an admin decision
    pub fn pending_total(&self) -> u64 {
        self.pending_deposits + self.pending_withdrawals + self.pending_kyc
    }
}
