//! Sign-in and sign-up.

use serde_json::Value;
use spendtrack_client::transport::RequestEnvelope;
use spendtrack_client::{endpoints, ApiClient};
use spendtrack_core::{ApiError, SignInPayload, SignUpPayload};
use tracing::debug;

use super::{expect_data, to_body};

pub(super) async fn sign_in(
    client: &ApiClient,
    payload: SignInPayload,
) -> Result<Value, ApiError> {
    if payload.user_name.trim().is_empty() || payload.password.is_empty() {
        return Err(ApiError::invalid("Username and password are required."));
    }

    debug!(user_name = %payload.user_name, "Signing in");
    let envelope = RequestEnvelope::post(endpoints::SIGNIN).with_body(to_body(&payload)?);
    expect_data(client, envelope).await
}

pub(super) async fn sign_up(
    client: &ApiClient,
    payload: SignUpPayload,
) -> Result<Value, ApiError> {
    if payload.user_name.trim().is_empty() || payload.password.is_empty() {
        return Err(ApiError::invalid("Username and password are required."));
    }

    debug!(user_name = %payload.user_name, "Signing up");
    let envelope = RequestEnvelope::post(endpoints::SIGNUP).with_body(to_body(&payload)?);
    expect_data(client, envelope).await
}
