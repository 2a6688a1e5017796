//! # Transaction Endpoint
//!
//! Read-only ledger feed.

use shared::{Paginated, QueryParams, Transaction, TransactionFilter};

use super::client::ApiClient;
use crate::core::error::Result;

#[tracing::instrument(skip(client), fields(page = filter.page))]
pub async fn list_transactions(client: &ApiClient, filter: &TransactionFilter) -> Result<Paginated<Transaction>> {
    client
        .get_page("/transactions", &filter.query_pairs(), "transactions", filter.limit)
        .await
}
