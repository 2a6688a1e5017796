//! # Dashboard Endpoint

use shared::DashboardStats;

use super::client::ApiClient;
use crate::core::error::Result;

/// Aggregate platform metrics.
#[tracing::instrument(skip(client))]
pub async fn get_dashboard_stats(client: &ApiClient) -> Result<DashboardStats> {
    client.get("/dashboard", &[]).await
}
