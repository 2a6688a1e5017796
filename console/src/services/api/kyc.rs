//! # KYC Endpoints
//!
//! Pending identity submissions and their adjudication.

use shared::{KycFilter, KycSubmission, MessageResponse, Paginated, QueryParams, ReviewDecision};

use super::client::ApiClient;
use super::moderation::moderate;
use crate::core::error::Result;

#[tracing::instrument(skip(client), fields(page = filter.page))]
pub async fn list_pending_kyc(client: &ApiClient, filter: &KycFilter) -> Result<Paginated<KycSubmission>> {
    client
        .get_page("/kyc/pending", &filter.query_pairs(), "submissions", filter.limit)
        .await
}

pub async fn verify_kyc(client: &ApiClient, kyc_id: &str, decision: &ReviewDecision) -> Result<MessageResponse> {
    moderate(client, "kyc", "verify", kyc_id, decision).await
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
    async fn test_list_pending_kyc_filters_by_user() {
        let mut server = mockito::Server::new_async().await;
        let body = serde_json::json!({
            "submissions": [{
                "id": "k1",
                "user_id": "u9",
                "id_type": "passport",
                "file_ids": ["f1", "f2"],
                "created_at": "2024-04-01T08:00:00Z"
            }],
            "page": 1,
            "pages": 1
        });
        let _mock = server
            .mock("GET", "/admin/kyc/pending?page=1&limit=20&user_id=u9")
            .with_status(200)
            .with_body(body.to_string())
            .create_async()
            .await;

        let client = authed(&server.url());
        let filter = KycFilter {
            user_id: Some("u9".into()),
            ..KycFilter::default()
        };
        let page = list_pending_kyc(&client, &filter).await.unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].file_ids, vec!["f1", "f2"]);
    }

    #[tokio::test]
    async fn test_verify_kyc_without_note() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/admin/kyc/k1/verify?approved=true")
            .with_status(200)
            .with_body(r#"{"message":"KYC approved"}"#)
            .expect(1)
            .create_async()
            .await;

        let client = authed(&server.url());
        verify_kyc(&client, "k1", &ReviewDecision::approve(None)).await.unwrap();
        mock.assert_async().await;
    }
}
