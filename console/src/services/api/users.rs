//! # User Endpoints
//!
//! Platform user listing, lookup and activation.

use shared::{MessageResponse, Paginated, QueryParams, UserFilter, UserRecord};

use super::client::{segment, ApiClient};
use crate::core::error::Result;

#[tracing::instrument(skip(client), fields(page = filter.page, limit = filter.limit))]
pub async fn list_users(client: &ApiClient, filter: &UserFilter) -> Result<Paginated<UserRecord>> {
    client
        .get_page("/users", &filter.query_pairs(), "users", filter.limit)
        .await
}

#[tracing::instrument(skip(client))]
pub async fn get_user(client: &ApiClient, user_id: &str) -> Result<UserRecord> {
    client.get(&format!("/users/{}", segment(user_id)), &[]).await
}

/// Activate or deactivate an account. `is_active` goes in the query string.
#[tracing::instrument(skip(client))]
pub async fn update_user_status(client: &ApiClient, user_id: &str, is_active: bool) -> Result<MessageResponse> {
    let response: MessageResponse = client
        .put_query(
            &format!("/users/{}/status", segment(user_id)),
            &[("is_active", is_active.to_string())],
        )
        .await?;
    tracing::info!(user_id, is_active, "User status updated");
    Ok(response)
}
