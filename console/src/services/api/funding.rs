//! # Deposit and Withdrawal Endpoints
//!
//! Both resources share list and moderation shapes; [`FundingKind`] picks the
//! collection.

use serde::de::DeserializeOwned;
use shared::{
    DepositRequest, FundingFilter, FundingKind, MessageResponse, Paginated, QueryParams, ReviewDecision,
    WithdrawalRequest,
};

use super::client::ApiClient;
use super::moderation::moderate;
use crate::core::error::Result;

#[tracing::instrument(skip(client, filter), fields(page = filter.page))]
pub async fn list_funding<T: DeserializeOwned>(
    client: &ApiClient,
    kind: FundingKind,
    filter: &FundingFilter,
) -> Result<Paginated<T>> {
    let resource = kind.resource();
    client
        .get_page(&format!("/{}", resource), &filter.query_pairs(), resource, filter.limit)
        .await
}

pub async fn process_funding(
    client: &ApiClient,
    kind: FundingKind,
    id: &str,
    decision: &ReviewDecision,
) -> Result<MessageResponse> {
    moderate(client, kind.resource(), "process", id, decision).await
}

pub async fn list_deposits(client: &ApiClient, filter: &FundingFilter) -> Result<Paginated<DepositRequest>> {
    list_funding(client, FundingKind::Deposit, filter).await
}

pub async fn process_deposit(client: &ApiClient, deposit_id: &str, decision: &ReviewDecision) -> Result<MessageResponse> {
    process_funding(client, FundingKind::Deposit, deposit_id, decision).await
}

pub async fn list_withdrawals(client: &ApiClient, filter: &FundingFilter) -> Result<Paginated<WithdrawalRequest>> {
    list_funding(client, FundingKind::Withdrawal, filter).await
}

pub async fn process_withdrawal(
    client: &ApiClient,
    withdrawal_id: &str,
    decision: &ReviewDecision,
) -> Result<MessageResponse> {
    process_funding(client, FundingKind::Withdrawal, withdrawal_id, decision).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::session::{MemorySessionStore, Session};
    use std::sync::Arc;

    fn authed(url: &str) -> ApiClient {
        let store = Arc::new(MemorySessionStore::with_session(Session {
            token: Some("tok".into()),
            profile: None,
        }));
        ApiClient::new(url, None, store).unwrap()
    }

    #[tokio::test]
    async fn test_process_withdrawal_rejection() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock(
                "PUT",
                "/admin/withdrawals/42/process?approved=false&admin_note=insufficient%20funds",
            )
            .match_header("authorization", "Bearer tok")
            .with_status(200)
            .with_body(r#"{"message":"Withdrawal rejected"}"#)
            .expect(1)
            .create_async()
            .await;

        let client = authed(&server.url());
        let decision = ReviewDecision::reject(Some("insufficient funds".into()));
        let response = process_withdrawal(&client, "42", &decision).await.unwrap();

        assert_eq!(response.message, "Withdrawal rejected");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_list_deposits_reads_resource_key() {
        let mut server = mockito::Server::new_async().await;
        let body = serde_json::json!({
            "deposits": [{
                "id": "d1",
                "user_id": "u1",
                "amount": 250.0,
                "payment_method": "bank_transfer",
                "status": "pending",
                "created_at": "2024-05-01T09:30:00Z"
            }],
            "page": 1,
            "pages": 1
        });
        let _mock = server
            .mock("GET", "/admin/deposits?page=1&limit=20&status=pending")
            .with_status(200)
            .with_body(body.to_string())
            .create_async()
            .await;

        let client = authed(&server.url());
        let filter = FundingFilter {
            status: Some(shared::ReviewStatus::Pending),
            ..FundingFilter::default()
        };
        let page = list_deposits(&client, &filter).await.unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].payment_method, "bank_transfer");
    }
}
