//! Credential interceptor pipeline.
//!
//! [`ApiClient`] wraps a [`Transport`] so that every outgoing call carries
//! correct credentials and every server-issued token rotation lands in the
//! credential store, without call sites knowing about authentication.
//!
//! Request phase: attach `Authorization: Bearer` and the refresh-token
//! header when the path is not on the auth-exempt allowlist. A missing
//! token is not an error; the server decides whether to reject.
//!
//! Response phase: detect rotation signals in headers or a fresh token in
//! the body and persist before handing the response back. On 401, delete
//! both tokens (never the principal) and surface `requires_login`.
//!
//! There is no lock across the credential read → send window and rotation
//! writes are last-writer-wins; the server tolerates the brief staleness
//! window this allows.

use std::sync::Arc;

use serde_json::Value;
use spendtrack_core::ApiError;
use tracing::{debug, warn};

use crate::credentials::{keys, CredentialError, CredentialStore};
use crate::transport::{ApiResponse, RequestEnvelope, Transport};

/// Header the backend sets (truthy) to signal a token rotation.
pub const ROTATION_SIGNAL_HEADER: &str = "new-access-token";

/// Header that may both signal a rotation and carry the new access token.
pub const ACCESS_TOKEN_HEADER: &str = "x-access-token";

/// Header carrying a rotated refresh token; also attached outbound so the
/// backend can refresh server-side.
pub const REFRESH_TOKEN_HEADER: &str = "x-refresh-token";

/// Returns true for header values the rotation contract treats as set.
fn is_truthy(value: &str) -> bool {
    !value.is_empty() && value != "false" && value != "0"
}

/// Extracts a non-empty string field from a JSON body.
fn body_str<'a>(body: &'a Value, field: &str) -> Option<&'a str> {
    body.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

// ============================================================================
// Api Client
// ============================================================================

/// Transport wrapped with the credential interceptor pipeline.
///
/// Both collaborators are injected capabilities so tests can substitute an
/// in-memory store and a scripted transport.
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    credentials: Arc<dyn CredentialStore>,
}

impl ApiClient {
    /// Creates a client over the given transport and credential store.
    pub fn new(transport: Arc<dyn Transport>, credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            transport,
            credentials,
        }
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    /// The credential store this client persists tokens into.
    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    /// Sends an envelope through the full pipeline.
    ///
    /// Returns the response only for 2xx statuses; everything else comes
    /// back as a normalized [`ApiError`].
    pub async fn send(&self, envelope: RequestEnvelope) -> Result<ApiResponse, ApiError> {
        let headers = self.request_headers(&envelope).await;
        let response = self.transport.execute(&envelope, &headers).await?;

        if response.status == 401 {
            debug!(path = %envelope.path, "401 response, clearing credentials");
            self.delete_key(keys::ACCESS_TOKEN).await;
            self.delete_key(keys::REFRESH_TOKEN).await;
            return Err(ApiError::unauthorized(
                response.status_text.clone(),
                Some(response.data),
            ));
        }

        if !response.is_success() {
            return Err(ApiError::from_status(
                response.status,
                &response.status_text,
                Some(response.data),
            ));
        }

        self.apply_rotation(&response).await;
        Ok(response)
    }

    /// Deletes all stored credentials, principal included. Explicit logout.
    pub async fn sign_out(&self) -> Result<(), CredentialError> {
        for key in keys::ALL {
            self.credentials.delete(key).await?;
        }
        debug!("Signed out, credentials cleared");
        Ok(())
    }

    /// Builds the outbound credential headers for an envelope.
    ///
    /// Two independent store reads; a rotation landing between them is
    /// accepted (the server tolerates one stale request).
    async fn request_headers(&self, envelope: &RequestEnvelope) -> Vec<(String, String)> {
        let mut headers = Vec::new();

        if !envelope.requires_auth {
            return headers;
        }

        if let Some(token) = self.read_key(keys::ACCESS_TOKEN).await {
            headers.push(("authorization".to_string(), format!("Bearer {token}")));
        }
        if let Some(token) = self.read_key(keys::REFRESH_TOKEN).await {
            headers.push((REFRESH_TOKEN_HEADER.to_string(), token));
        }

        headers
    }

    /// Persists any rotated or freshly-issued tokens from a 2xx response.
    ///
    /// The rotation header takes precedence over the body when both carry a
    /// token. Applying the same response twice is idempotent. Persistence
    /// completes before the response is handed back to the caller.
    async fn apply_rotation(&self, response: &ApiResponse) {
        let signaled = response
            .header(ROTATION_SIGNAL_HEADER)
            .is_some_and(is_truthy)
            || response.header(ACCESS_TOKEN_HEADER).is_some_and(is_truthy);

        let header_access = response
            .header(ACCESS_TOKEN_HEADER)
            .filter(|v| is_truthy(v))
            .map(str::to_string);
        let body_access = body_str(&response.data, "accessToken").map(str::to_string);

        let access = if signaled {
            let token = header_access.or(body_access);
            if token.is_none() {
                warn!("Rotation signaled but no access token in headers or body");
            }
            token
        } else {
            // Sign-in/sign-up responses carry tokens in the body with no
            // rotation header.
            body_access
        };

        let Some(access) = access else {
            return;
        };

        let refresh = response
            .header(REFRESH_TOKEN_HEADER)
            .filter(|v| is_truthy(v))
            .map(str::to_string)
            .or_else(|| body_str(&response.data, "refreshToken").map(str::to_string));
        let user_name = body_str(&response.data, "user_name").map(str::to_string);

        debug!(
            rotated_refresh = refresh.is_some(),
            has_principal = user_name.is_some(),
            "Persisting rotated credentials"
        );

        self.write_key(keys::ACCESS_TOKEN, &access).await;
        if let Some(refresh) = refresh {
            self.write_key(keys::REFRESH_TOKEN, &refresh).await;
        }
        // The principal is only ever written alongside an access token.
        if let Some(user_name) = user_name {
            self.write_key(keys::USER_NAME, &user_name).await;
        }
    }

    /// Reads a key, degrading store failures to "absent".
    async fn read_key(&self, key: &str) -> Option<String> {
        match self.credentials.get(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %key, error = %e, "Credential read failed");
                None
            }
        }
    }

    /// Writes a key; a store failure is logged but does not fail the
    /// request, the server response stays authoritative.
    async fn write_key(&self, key: &str, value: &str) {
        if let Err(e) = self.credentials.set(key, value).await {
            warn!(key = %key, error = %e, "Credential write failed");
        }
    }

    /// Deletes a key; a store failure is logged but does not fail the
    /// request.
    async fn delete_key(&self, key: &str) {
        if let Err(e) = self.credentials.delete(key).await {
            warn!(key = %key, error = %e, "Credential delete failed");
        }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.transport.base_url())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::MemoryCredentialStore;
    use crate::transport::HttpMethod;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Scripted transport that records every request it sees.
    struct MockTransport {
        responses: Mutex<Vec<Result<ApiResponse, ApiError>>>,
        seen: Mutex<Vec<(HttpMethod, String, Vec<(String, String)>)>>,
    }

    impl MockTransport {
        fn new(responses: Vec<Result<ApiResponse, ApiError>>) -> Self {
            Self {
                // Popped from the back; reverse so scripts read top-down.
                responses: Mutex::new(responses.into_iter().rev().collect()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn seen_headers(&self, index: usize) -> Vec<(String, String)> {
            self.seen.lock().unwrap()[index].2.clone()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        fn base_url(&self) -> &str {
            "http://localhost:2222"
        }

        async fn execute(
            &self,
            envelope: &RequestEnvelope,
            headers: &[(String, String)],
        ) -> Result<ApiResponse, ApiError> {
            self.seen.lock().unwrap().push((
                envelope.method,
                envelope.path.clone(),
                headers.to_vec(),
            ));
            self.responses
                .lock()
                .unwrap()
                .pop()
                .expect("mock transport ran out of scripted responses")
        }
    }

    fn ok_response(data: Value) -> ApiResponse {
        ApiResponse {
            status: 200,
            status_text: "OK".to_string(),
            headers: HashMap::new(),
            data,
        }
    }

    fn response_with_headers(data: Value, headers: &[(&str, &str)]) -> ApiResponse {
        ApiResponse {
            status: 200,
            status_text: "OK".to_string(),
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_lowercase(), (*v).to_string()))
                .collect(),
            data,
        }
    }

    fn client(
        responses: Vec<Result<ApiResponse, ApiError>>,
        store: MemoryCredentialStore,
    ) -> (ApiClient, Arc<MockTransport>, Arc<MemoryCredentialStore>) {
        let transport = Arc::new(MockTransport::new(responses));
        let store = Arc::new(store);
        let client = ApiClient::new(transport.clone(), store.clone());
        (client, transport, store)
    }

    #[tokio::test]
    async fn test_bearer_header_attached_when_token_present() {
        let (client, transport, _) = client(
            vec![Ok(ok_response(json!({})))],
            MemoryCredentialStore::seeded(&[(keys::ACCESS_TOKEN, "T1")]),
        );

        client.send(RequestEnvelope::get("/expenses")).await.unwrap();

        let headers = transport.seen_headers(0);
        assert!(headers.contains(&("authorization".to_string(), "Bearer T1".to_string())));
    }

    #[tokio::test]
    async fn test_no_bearer_header_for_exempt_path() {
        let (client, transport, _) = client(
            vec![Ok(ok_response(json!({})))],
            MemoryCredentialStore::seeded(&[(keys::ACCESS_TOKEN, "T1")]),
        );

        client.send(RequestEnvelope::post("/signin")).await.unwrap();

        assert!(transport.seen_headers(0).is_empty());
    }

    #[tokio::test]
    async fn test_missing_token_sends_unauthenticated() {
        let (client, transport, _) = client(
            vec![Ok(ok_response(json!({})))],
            MemoryCredentialStore::new(),
        );

        client.send(RequestEnvelope::get("/expenses")).await.unwrap();

        assert!(transport.seen_headers(0).is_empty());
    }

    #[tokio::test]
    async fn test_refresh_token_header_attached() {
        let (client, transport, _) = client(
            vec![Ok(ok_response(json!({})))],
            MemoryCredentialStore::seeded(&[
                (keys::ACCESS_TOKEN, "T1"),
                (keys::REFRESH_TOKEN, "R1"),
            ]),
        );

        client.send(RequestEnvelope::get("/budgets")).await.unwrap();

        let headers = transport.seen_headers(0);
        assert!(headers.contains(&(REFRESH_TOKEN_HEADER.to_string(), "R1".to_string())));
    }

    #[tokio::test]
    async fn test_rotation_header_value_takes_precedence_over_body() {
        let (client, _, store) = client(
            vec![Ok(response_with_headers(
                json!({ "accessToken": "BODY" }),
                &[("new-access-token", "true"), ("x-access-token", "HEADER")],
            ))],
            MemoryCredentialStore::seeded(&[(keys::ACCESS_TOKEN, "T1")]),
        );

        client.send(RequestEnvelope::get("/expenses")).await.unwrap();

        assert_eq!(
            store.get(keys::ACCESS_TOKEN).await.unwrap(),
            Some("HEADER".to_string())
        );
    }

    #[tokio::test]
    async fn test_rotation_falls_back_to_body_token() {
        let (client, _, store) = client(
            vec![Ok(response_with_headers(
                json!({ "accessToken": "T2", "refreshToken": "R2", "user_name": "alice" }),
                &[("new-access-token", "true")],
            ))],
            MemoryCredentialStore::seeded(&[
                (keys::ACCESS_TOKEN, "T1"),
                (keys::REFRESH_TOKEN, "R1"),
            ]),
        );

        client.send(RequestEnvelope::get("/expenses")).await.unwrap();

        assert_eq!(
            store.get(keys::ACCESS_TOKEN).await.unwrap(),
            Some("T2".to_string())
        );
        assert_eq!(
            store.get(keys::REFRESH_TOKEN).await.unwrap(),
            Some("R2".to_string())
        );
        assert_eq!(
            store.get(keys::USER_NAME).await.unwrap(),
            Some("alice".to_string())
        );
    }

    #[tokio::test]
    async fn test_rotation_is_idempotent() {
        let rotated = response_with_headers(
            json!({ "accessToken": "T2" }),
            &[("new-access-token", "true")],
        );
        let (client, _, store) = client(
            vec![Ok(rotated.clone()), Ok(rotated)],
            MemoryCredentialStore::seeded(&[(keys::ACCESS_TOKEN, "T1")]),
        );

        client.send(RequestEnvelope::get("/expenses")).await.unwrap();
        assert_eq!(
            store.get(keys::ACCESS_TOKEN).await.unwrap(),
            Some("T2".to_string())
        );

        client.send(RequestEnvelope::get("/expenses")).await.unwrap();
        assert_eq!(
            store.get(keys::ACCESS_TOKEN).await.unwrap(),
            Some("T2".to_string())
        );
    }

    #[tokio::test]
    async fn test_body_token_persisted_without_rotation_signal() {
        // Sign-in style response: no rotation header, token in the body.
        let (client, _, store) = client(
            vec![Ok(ok_response(json!({
                "accessToken": "T1",
                "refreshToken": "R1",
                "user_name": "alice"
            })))],
            MemoryCredentialStore::new(),
        );

        client
            .send(RequestEnvelope::post("/signin").with_body(json!({
                "user_name": "alice",
                "password": "secret123"
            })))
            .await
            .unwrap();

        assert_eq!(
            store.get(keys::ACCESS_TOKEN).await.unwrap(),
            Some("T1".to_string())
        );
        assert_eq!(
            store.get(keys::REFRESH_TOKEN).await.unwrap(),
            Some("R1".to_string())
        );
        assert_eq!(
            store.get(keys::USER_NAME).await.unwrap(),
            Some("alice".to_string())
        );
    }

    #[tokio::test]
    async fn test_401_clears_tokens_but_not_principal() {
        let (client, _, store) = client(
            vec![Ok(ApiResponse {
                status: 401,
                status_text: "Unauthorized".to_string(),
                headers: HashMap::new(),
                data: json!({ "message": "Token expired" }),
            })],
            MemoryCredentialStore::seeded(&[
                (keys::ACCESS_TOKEN, "T1"),
                (keys::REFRESH_TOKEN, "R1"),
                (keys::USER_NAME, "alice"),
            ]),
        );

        let err = client
            .send(RequestEnvelope::get("/expenses"))
            .await
            .unwrap_err();

        assert!(err.requires_login);
        assert_eq!(err.status, Some(401));
        assert_eq!(store.get(keys::ACCESS_TOKEN).await.unwrap(), None);
        assert_eq!(store.get(keys::REFRESH_TOKEN).await.unwrap(), None);
        assert_eq!(
            store.get(keys::USER_NAME).await.unwrap(),
            Some("alice".to_string())
        );
    }

    #[tokio::test]
    async fn test_error_status_carries_body() {
        let (client, _, _) = client(
            vec![Ok(ApiResponse {
                status: 500,
                status_text: "Internal Server Error".to_string(),
                headers: HashMap::new(),
                data: json!({ "error": "db down" }),
            })],
            MemoryCredentialStore::new(),
        );

        let err = client
            .send(RequestEnvelope::get("/expenses"))
            .await
            .unwrap_err();

        assert_eq!(err.status, Some(500));
        assert_eq!(err.surfaced_message("fallback"), "db down");
    }

    #[tokio::test]
    async fn test_transport_error_passes_through() {
        let (client, _, _) = client(
            vec![Err(ApiError::timeout("http://localhost:2222"))],
            MemoryCredentialStore::new(),
        );

        let err = client
            .send(RequestEnvelope::get("/expenses"))
            .await
            .unwrap_err();

        assert!(err.is_timeout());
        assert!(err.message.contains("http://localhost:2222"));
    }

    #[tokio::test]
    async fn test_sign_out_clears_everything() {
        let (client, _, store) = client(
            vec![],
            MemoryCredentialStore::seeded(&[
                (keys::ACCESS_TOKEN, "T1"),
                (keys::REFRESH_TOKEN, "R1"),
                (keys::USER_NAME, "alice"),
            ]),
        );

        client.sign_out().await.unwrap();

        for key in keys::ALL {
            assert_eq!(store.get(key).await.unwrap(), None);
        }
    }
}
