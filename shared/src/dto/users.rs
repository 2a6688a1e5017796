use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::pagination::{push_opt, QueryParams, DEFAULT_PAGE_SIZE};

/// KYC state of a platform user
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum KycStatus {
    Verified,
    Pending,
    Rejected,
}

impl Default for KycStatus {
    fn default() -> Self {
        KycStatus::Pending
    }
}

impl KycStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            KycStatus::Verified => "verified",
            KycStatus::Pending => "pending",
            KycStatus::Rejected => "rejected",
        }
    }
}

/// Platform user as returned by the admin API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default)]
    pub kyc_status: KycStatus,
    pub is_active: bool,
    #[serde(default)]
    pub is_2fa_enabled: bool,
    pub created_at: DateTime<Utc>,
}

fn default_role() -> String {
    "user".to_string()
}

impl UserRecord {
    /// Name shown in list rows; falls back to `N/A` like the web console
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().filter(|n| !n.is_empty()).unwrap_or("N/A")
    }
}

/// `GET /admin/users` filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFilter {
    pub search: Option<String>,
    pub page: u32,
    pub limit: u32,
}

impl Default for UserFilter {
    fn default() -> Self {
        Self {
            search: None,
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl QueryParams for UserFilter {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(3);
        push_opt(&mut pairs, "search", self.search.as_deref().filter(|s| !s.is_empty()));
        pairs.push(("page", self.page.to_string()));
        pairs.push(("limit", self.limit.to_string()));
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_filter_order() {
        let filter = UserFilter {
            search: Some("alice".to_string()),
            page: 1,
            limit: 20,
        };
        assert_eq!(
            filter.query_pairs(),
            vec![
                ("search", "alice".to_string()),
                ("page", "1".to_string()),
                ("limit", "20".to_string()),
            ]
        );
    }

    #[test]
    fn test_user_filter_skips_empty_search() {
        let filter = UserFilter {
            search: Some(String::new()),
            ..UserFilter::default()
        };
        assert_eq!(filter.query_pairs().len(), 2);
    }

    #[test]
    fn test_user_record_display_name() {
        let json = r#"{
            "id": "u1",
            "email": "bob@example.com",
            "username": "bob",
            "kyc_status": "rejected",
            "is_active": false,
            "created_at": "2024-05-01T00:00:00Z"
        }"#;
        let user: UserRecord = serde_json::from_str(json).unwrap();
        assert_eq!(user.display_name(), "N/A");
        assert_eq!(user.kyc_status, KycStatus::Rejected);
        assert_eq!(user.role, "user");
    }
}
