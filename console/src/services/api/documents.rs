//! # Document Endpoints
//!
//! Marketplace documents awaiting approval.

use shared::{Document, DocumentFilter, MessageResponse, Paginated, QueryParams, ReviewDecision};

use super::client::ApiClient;
use super::moderation::moderate;
use crate::core::error::Result;

#[tracing::instrument(skip(client), fields(page = filter.page))]
pub async fn list_documents(client: &ApiClient, filter: &DocumentFilter) -> Result<Paginated<Document>> {
    client
        .get_page("/documents", &filter.query_pairs(), "documents", filter.limit)
        .await
}

pub async fn approve_document(client: &ApiClient, doc_id: &str, decision: &ReviewDecision) -> Result<MessageResponse> {
    moderate(client, "documents", "approve", doc_id, decision).await
}
