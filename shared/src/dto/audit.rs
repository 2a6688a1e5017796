use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::pagination::{push_opt, QueryParams, DEFAULT_PAGE_SIZE};

/// Recorded admin or user action
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditLog {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub action: String,
    #[serde(default)]
    pub details: Map<String, Value>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// `GET /admin/audit-logs` filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditLogFilter {
    pub page: u32,
    pub limit: u32,
    pub action: Option<String>,
    pub user_id: Option<String>,
}

impl Default for AuditLogFilter {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            action: None,
            user_id: None,
        }
    }
}

impl QueryParams for AuditLogFilter {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page.to_string()), ("limit", self.limit.to_string())];
        push_opt(&mut pairs, "action", self.action.as_deref().filter(|s| !s.is_empty()));
        push_opt(&mut pairs, "user_id", self.user_id.as_deref());
        pairs
    }
}
