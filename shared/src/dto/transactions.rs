use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::pagination::{push_opt, QueryParams, DEFAULT_PAGE_SIZE};

/// Ledger entry (deposit, withdrawal, purchase, staking, investment, ...)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: f64,
    pub status: String,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    pub created_at: DateTime<Utc>,
}

/// `GET /admin/transactions` filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionFilter {
    pub page: u32,
    pub limit: u32,
    pub kind: Option<String>,
    pub status: Option<String>,
    pub user_id: Option<String>,
}

impl Default for TransactionFilter {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            kind: None,
            status: None,
            user_id: None,
        }
    }
}

impl QueryParams for TransactionFilter {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page.to_string()), ("limit", self.limit.to_string())];
        push_opt(&mut pairs, "type", self.kind.as_deref());
        push_opt(&mut pairs, "status", self.status.as_deref());
        push_opt(&mut pairs, "user_id", self.user_id.as_deref());
        pairs
    }
}
