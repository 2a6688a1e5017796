use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::pagination::{push_opt, QueryParams, DEFAULT_PAGE_SIZE};
use super::ReviewStatus;

/// Document listed for sale on the marketplace
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub seller_id: String,
    pub file_id: String,
    #[serde(default)]
    pub status: ReviewStatus,
    #[serde(default)]
    pub downloads: u64,
    #[serde(default)]
    pub revenue: f64,
    pub created_at: DateTime<Utc>,
}

/// `GET /admin/documents` filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFilter {
    pub page: u32,
    pub limit: u32,
    pub status: Option<ReviewStatus>,
    pub category: Option<String>,
    pub search: Option<String>,
}

impl Default for DocumentFilter {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            status: None,
            category: None,
            search: None,
        }
    }
}

impl QueryParams for DocumentFilter {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page.to_string()), ("limit", self.limit.to_string())];
        push_opt(&mut pairs, "status", self.status.map(|s| s.as_str()));
        push_opt(&mut pairs, "category", self.category.as_deref());
        push_opt(&mut pairs, "search", self.search.as_deref().filter(|s| !s.is_empty()));
        pairs
    }
}
