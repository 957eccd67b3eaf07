//! Notification feed operations.

use serde_json::Value;
use spendtrack_client::transport::RequestEnvelope;
use spendtrack_client::{endpoints, ApiClient};
use spendtrack_core::ApiError;

use super::{expect_data, require_id};

pub(super) async fn list(client: &ApiClient) -> Result<Value, ApiError> {
    expect_data(client, RequestEnvelope::get(endpoints::NOTIFICATIONS)).await
}

pub(super) async fn unread_count(client: &ApiClient) -> Result<Value, ApiError> {
    expect_data(
        client,
        RequestEnvelope::get(endpoints::NOTIFICATIONS_UNREAD_COUNT),
    )
    .await
}

pub(super) async fn mark_as_read(client: &ApiClient, id: &str) -> Result<Value, ApiError> {
    require_id(id, "notification")?;
    expect_data(
        client,
        RequestEnvelope::patch(endpoints::notification_read(id)),
    )
    .await
}

pub(super) async fn mark_all_as_read(client: &ApiClient) -> Result<Value, ApiError> {
    expect_data(
        client,
        RequestEnvelope::patch(endpoints::NOTIFICATIONS_READ_ALL),
    )
    .await
}

pub(super) async fn delete(client: &ApiClient, id: &str) -> Result<Value, ApiError> {
    require_id(id, "notification")?;
    expect_data(client, RequestEnvelope::delete(endpoints::notification(id))).await
}
