//! HTTP transport.
//!
//! [`HttpTransport`] wraps a configured `reqwest` client: base URL, fixed
//! wall-clock timeout, default headers. It returns an [`ApiResponse`] for
//! every HTTP exchange that completed, whatever the status; only failures
//! below HTTP (timeout, connect, DNS) become errors here. Status-based
//! classification is the interceptor's job.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use spendtrack_core::ApiError;
use tracing::{debug, instrument};

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default client-type header the backend keys on.
pub const CLIENT_TYPE_HEADER: &str = "x-client-type";

/// Value for [`CLIENT_TYPE_HEADER`].
pub const CLIENT_TYPE: &str = "mobile";

/// User agent string for spendtrack.
const USER_AGENT: &str = concat!("spendtrack/", env!("CARGO_PKG_VERSION"));

/// Path substrings that never carry credentials.
pub const AUTH_EXEMPT_PATHS: &[&str] = &["/signin", "/signup"];

/// Returns true if the path matches the auth-exempt allowlist
/// (case-insensitive substring match).
pub fn is_auth_exempt(path: &str) -> bool {
    let lower = path.to_lowercase();
    AUTH_EXEMPT_PATHS.iter().any(|p| lower.contains(p))
}

// ============================================================================
// Http Method
// ============================================================================

/// The HTTP verbs the backend contract uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// GET.
    Get,
    /// POST.
    Post,
    /// PATCH.
    Patch,
    /// DELETE.
    Delete,
}

impl HttpMethod {
    /// Returns the method name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Request Envelope
// ============================================================================

/// An outgoing request, immutable once constructed.
///
/// `requires_auth` is computed from the static allowlist at construction
/// time so call sites never decide about authentication themselves.
#[derive(Debug, Clone)]
pub struct RequestEnvelope {
    /// HTTP verb.
    pub method: HttpMethod,
    /// Path relative to the base URL.
    pub path: String,
    /// Query parameters.
    pub params: Vec<(String, String)>,
    /// JSON body.
    pub body: Option<Value>,
    /// Whether the interceptor should attach credentials.
    pub requires_auth: bool,
}

impl RequestEnvelope {
    /// Creates an envelope, computing `requires_auth` from the allowlist.
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        let path = path.into();
        let requires_auth = !is_auth_exempt(&path);
        Self {
            method,
            path,
            params: Vec::new(),
            body: None,
            requires_auth,
        }
    }

    /// Creates a GET envelope.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// Creates a POST envelope.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    /// Creates a PATCH envelope.
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, path)
    }

    /// Creates a DELETE envelope.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Sets query parameters.
    pub fn with_params(mut self, params: Vec<(String, String)>) -> Self {
        self.params = params;
        self
    }

    /// Sets the JSON body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

// ============================================================================
// Api Response
// ============================================================================

/// A completed HTTP exchange: status, headers, parsed JSON body.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Canonical status text ("OK", "Unauthorized", ...).
    pub status_text: String,
    /// Response headers, keys lowercased.
    pub headers: HashMap<String, String>,
    /// Parsed JSON body; `Null` when the body was empty or not JSON.
    pub data: Value,
}

impl ApiResponse {
    /// Returns true for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Looks up a header by name, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }
}

// ============================================================================
// Transport Trait
// ============================================================================

/// Executes request envelopes against a backend.
///
/// Implemented by [`HttpTransport`] for real traffic and by in-memory mocks
/// in tests. Extra headers come from the interceptor (bearer/refresh
/// tokens); the transport adds its own defaults underneath.
#[async_trait]
pub trait Transport: Send + Sync {
    /// The backend base URL, used in remediation hints.
    fn base_url(&self) -> &str;

    /// Sends the request and returns the completed exchange.
    ///
    /// Returns `Err` only for transport-level failures (timeout, network
    /// unreachable, unclassifiable); any HTTP response, error status
    /// included, is an `Ok`.
    async fn execute(
        &self,
        envelope: &RequestEnvelope,
        headers: &[(String, String)],
    ) -> Result<ApiResponse, ApiError>;
}

// ============================================================================
// Http Transport
// ============================================================================

/// Transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    inner: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Creates a transport with the default 30 second timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a transport with a custom timeout.
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::unknown(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            inner: client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Classifies a `reqwest` failure into the normalized taxonomy.
    fn classify(&self, err: &reqwest::Error) -> ApiError {
        if err.is_timeout() {
            ApiError::timeout(&self.base_url)
        } else if err.is_connect() {
            ApiError::unreachable(&self.base_url)
        } else {
            ApiError::unknown(err.to_string())
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    #[instrument(skip(self, headers), fields(method = %envelope.method, path = %envelope.path))]
    async fn execute(
        &self,
        envelope: &RequestEnvelope,
        headers: &[(String, String)],
    ) -> Result<ApiResponse, ApiError> {
        let url = format!("{}{}", self.base_url, envelope.path);
        debug!(url = %url, "Sending request");

        let method = match envelope.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut request = self
            .inner
            .request(method, &url)
            .header(CLIENT_TYPE_HEADER, CLIENT_TYPE);

        if !envelope.params.is_empty() {
            request = request.query(&envelope.params);
        }
        if let Some(body) = &envelope.body {
            request = request.json(body);
        }
        for (name, value) in headers {
            request = request.header(name, value);
        }

        let response = request.send().await.map_err(|e| self.classify(&e))?;

        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or("").to_string();

        let mut header_map = HashMap::new();
        for (name, value) in response.headers() {
            if let Ok(v) = value.to_str() {
                header_map.insert(name.as_str().to_lowercase(), v.to_string());
            }
        }

        let bytes = response.bytes().await.map_err(|e| self.classify(&e))?;
        let data = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        debug!(status = status.as_u16(), "Response received");

        Ok(ApiResponse {
            status: status.as_u16(),
            status_text,
            headers: header_map,
            data,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_exempt_allowlist() {
        assert!(is_auth_exempt("/signin"));
        assert!(is_auth_exempt("/signUp"));
        assert!(is_auth_exempt("/api/v2/SignIn"));
        assert!(!is_auth_exempt("/expenses"));
        assert!(!is_auth_exempt("/budgets/with-status"));
    }

    #[test]
    fn test_envelope_computes_requires_auth() {
        assert!(!RequestEnvelope::post("/signin").requires_auth);
        assert!(!RequestEnvelope::post("/signUp").requires_auth);
        assert!(RequestEnvelope::get("/expenses").requires_auth);
    }

    #[test]
    fn test_response_header_lookup_is_case_insensitive() {
        let mut headers = HashMap::new();
        headers.insert("x-access-token".to_string(), "T2".to_string());

        let response = ApiResponse {
            status: 200,
            status_text: "OK".to_string(),
            headers,
            data: Value::Null,
        };

        assert_eq!(response.header("X-Access-Token"), Some("T2"));
        assert_eq!(response.header("missing"), None);
    }

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let transport = HttpTransport::new("http://localhost:2222/").unwrap();
        assert_eq!(transport.base_url(), "http://localhost:2222");
    }

    #[test]
    fn test_is_success() {
        let response = ApiResponse {
            status: 204,
            status_text: "No Content".to_string(),
            headers: HashMap::new(),
            data: Value::Null,
        };
        assert!(response.is_success());
    }
}
