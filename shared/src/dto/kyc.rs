use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::pagination::{push_opt, QueryParams, DEFAULT_PAGE_SIZE};
use super::ReviewStatus;

/// Identity documents submitted by a user for verification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KycSubmission {
    pub id: String,
    pub user_id: String,
    pub id_type: String,
    #[serde(default)]
    pub file_ids: Vec<String>,
    #[serde(default)]
    pub status: ReviewStatus,
    #[serde(default)]
    pub admin_note: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub reviewed_at: Option<DateTime<Utc>>,
}

/// `GET /admin/kyc/pending` filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KycFilter {
    pub page: u32,
    pub limit: u32,
    pub user_id: Option<String>,
    pub id_type: Option<String>,
}

impl Default for KycFilter {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            user_id: None,
            id_type: None,
        }
    }
}

impl QueryParams for KycFilter {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page.to_string()), ("limit", self.limit.to_string())];
        push_opt(&mut pairs, "user_id", self.user_id.as_deref());
        push_opt(&mut pairs, "id_type", self.id_type.as_deref());
        pairs
    }
}
