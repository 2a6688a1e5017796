//! Deposit and withdrawal requests.
//!
//! Both resources share one filter type and one moderation shape
//! (`PUT /admin/{resource}/{id}/process?approved=&admin_note=`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::pagination::{push_opt, QueryParams, DEFAULT_PAGE_SIZE};
use super::ReviewStatus;

/// Pending financial action that an admin approves or rejects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FundingKind {
    Deposit,
    Withdrawal,
}

impl FundingKind {
    /// Collection segment under `/admin`
    pub fn resource(&self) -> &'static str {
        match self {
            FundingKind::Deposit => "deposits",
            FundingKind::Withdrawal => "withdrawals",
        }
    }
}

/// Incoming funds awaiting admin approval
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DepositRequest {
    pub id: String,
    pub user_id: String,
    pub amount: f64,
    pub payment_method: String,
    #[serde(default)]
    pub status: ReviewStatus,
    #[serde(default)]
    pub admin_note: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub processed_at: Option<DateTime<Utc>>,
}

/// Outgoing funds awaiting admin approval
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WithdrawalRequest {
    pub id: String,
    pub user_id: String,
    pub amount: f64,
    pub withdrawal_method: String,
    pub withdrawal_address: String,
    #[serde(default)]
    pub status: ReviewStatus,
    #[serde(default)]
    pub admin_note: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub processed_at: Option<DateTime<Utc>>,
}

/// `GET /admin/deposits` and `GET /admin/withdrawals` filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FundingFilter {
    pub page: u32,
    pub limit: u32,
    pub status: Option<ReviewStatus>,
    pub user_id: Option<String>,
}

impl Default for FundingFilter {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            status: None,
            user_id: None,
        }
    }
}

impl QueryParams for FundingFilter {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page.to_string()), ("limit", self.limit.to_string())];
        push_opt(&mut pairs, "status", self.status.map(|s| s.as_str()));
        push_opt(&mut pairs, "user_id", self.user_id.as_deref());
        pairs
    }
}
