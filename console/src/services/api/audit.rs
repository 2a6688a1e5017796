//! # Audit Log Endpoint

use shared::{AuditLog, AuditLogFilter, Paginated, QueryParams};

use super::client::ApiClient;
use crate::core::error::Result;

#[tracing::instrument(skip(client), fields(page = filter.page))]
pub async fn list_audit_logs(client: &ApiClient, filter: &AuditLogFilter) -> Result<Paginated<AuditLog>> {
    client
        .get_page("/audit-logs", &filter.query_pairs(), "logs", filter.limit)
        .await
}
