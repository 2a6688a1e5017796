//! # Moderation Endpoints
//!
//! One routine behind every approve/reject call:
//! `PUT /admin/{resource}/{id}/{action}?approved=&admin_note=`.
//! The decision always travels in the query string.

use shared::{MessageResponse, ReviewDecision};

use super::client::{segment, ApiClient};
use crate::core::error::Result;

/// Query pairs for a decision; a missing note is omitted entirely
pub fn decision_query(decision: &ReviewDecision) -> Vec<(&'static str, String)> {
    let mut query = vec![("approved", decision.approved.to_string())];
    if let Some(note) = &decision.admin_note {
        query.push(("admin_note", note.clone()));
    }
    query
}

/// Approve or reject `id` under `resource`.
#[tracing::instrument(skip(client, decision), fields(approved = decision.approved))]
pub async fn moderate(
    client: &ApiClient,
    resource: &str,
    action: &str,
    id: &str,
    decision: &ReviewDecision,
) -> Result<MessageResponse> {
    let path = format!("/{}/{}/{}", resource, segment(id), action);
    let response: MessageResponse = client.put_query(&path, &decision_query(decision)).await?;

    tracing::info!(
        resource,
        id,
        approved = decision.approved,
        "Moderation decision recorded"
    );
    Ok(response)
}
