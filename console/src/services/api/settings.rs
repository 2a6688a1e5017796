//! # Settings Endpoints
//!
//! Platform-wide fees, limits, rates and network names. Updates always send
//! the whole bundle.

use shared::{MessageResponse, SettingsBundle};

use super::client::ApiClient;
use crate::core::error::Result;

#[tracing::instrument(skip(client))]
pub async fn get_settings(client: &ApiClient) -> Result<SettingsBundle> {
    let settings: SettingsBundle = client.get("/settings", &[]).await?;
    tracing::debug!(fields = settings.len(), "Settings loaded");
    Ok(settings)
}

#[tracing::instrument(skip(client, settings), fields(fields = settings.len()))]
pub async fn update_settings(client: &ApiClient, settings: &SettingsBundle) -> Result<MessageResponse> {
    let response: MessageResponse = client.put_json("/settings", settings).await?;
    tracing::info!("Settings updated");
    Ok(response)
}

#[tracing::instrument(skip(client))]
pub async fn reset_settings(client: &ApiClient) -> Result<MessageResponse> {
    let response: MessageResponse = client.post_empty("/settings/reset").await?;
    tracing::warn!("Settings reset to defaults");
    Ok(response)
}
