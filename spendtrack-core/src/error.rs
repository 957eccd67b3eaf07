//! The normalized error taxonomy.
//!
//! Every failure path in the client and dispatch crates converges on
//! [`ApiError`] before it reaches application code: transport failures,
//! HTTP error statuses, and malformed responses all end up here. Nothing
//! above the client crate ever sees a raw `reqwest` or `keyring` error.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// Error Kind
// ============================================================================

/// Classification of a failed API operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The request exceeded the transport's wall-clock timeout.
    Timeout,
    /// The backend could not be reached at all (DNS, connect, refused).
    NetworkUnreachable,
    /// The server rejected the credentials (HTTP 401).
    Unauthorized,
    /// The server failed (HTTP 5xx).
    ServerError,
    /// The request was rejected (HTTP 4xx other than 401).
    ClientError,
    /// Anything that does not fit the categories above.
    Unknown,
}

impl ErrorKind {
    /// Returns a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Timeout => "Timeout",
            Self::NetworkUnreachable => "Network Unreachable",
            Self::Unauthorized => "Unauthorized",
            Self::ServerError => "Server Error",
            Self::ClientError => "Client Error",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// Api Error
// ============================================================================

/// A failure, normalized.
///
/// Carries the classification, the HTTP status when one exists, a non-empty
/// human-readable message, and the raw response body when the server sent
/// one. `requires_login` is only ever set on [`ErrorKind::Unauthorized`] so
/// callers can force re-authentication without re-inspecting status codes.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ApiError {
    /// Failure classification.
    pub kind: ErrorKind,
    /// HTTP status, if a response was received.
    pub status: Option<u16>,
    /// Human-readable message. Never empty.
    pub message: String,
    /// True when the session is gone and the user must sign in again.
    #[serde(default)]
    pub requires_login: bool,
    /// Raw response body, if the server sent one.
    pub raw: Option<Value>,
}

impl ApiError {
    /// Creates a timeout error with a remediation hint naming the backend.
    pub fn timeout(base_url: &str) -> Self {
        Self {
            kind: ErrorKind::Timeout,
            status: None,
            message: format!(
                "Request timed out. Check that the backend is reachable at {base_url}."
            ),
            requires_login: false,
            raw: None,
        }
    }

    /// Creates a network-unreachable error with a remediation hint.
    pub fn unreachable(base_url: &str) -> Self {
        Self {
            kind: ErrorKind::NetworkUnreachable,
            status: None,
            message: format!(
                "Could not reach the backend. Check that it is running at {base_url}."
            ),
            requires_login: false,
            raw: None,
        }
    }

    /// Creates an unclassified transport-level error.
    pub fn unknown(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind: ErrorKind::Unknown,
            status: None,
            message: if message.is_empty() {
                "Something went wrong. Please try again.".to_string()
            } else {
                message
            },
            requires_login: false,
            raw: None,
        }
    }

    /// Creates a local validation error; no request was made, so there is
    /// no status and no raw body.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::ClientError,
            status: None,
            message: message.into(),
            requires_login: false,
            raw: None,
        }
    }

    /// Creates the forced-logout error for an HTTP 401 response.
    pub fn unauthorized(message: impl Into<String>, raw: Option<Value>) -> Self {
        let message = message.into();
        Self {
            kind: ErrorKind::Unauthorized,
            status: Some(401),
            message: if message.is_empty() {
                "Your session has expired. Please sign in again.".to_string()
            } else {
                message
            },
            requires_login: true,
            raw,
        }
    }

    /// Classifies a non-2xx HTTP response into an error.
    ///
    /// 401 becomes [`ErrorKind::Unauthorized`] with `requires_login` set;
    /// other 4xx become [`ErrorKind::ClientError`]; 5xx become
    /// [`ErrorKind::ServerError`]. The original status, status text, and
    /// body are carried through.
    pub fn from_status(status: u16, status_text: &str, raw: Option<Value>) -> Self {
        if status == 401 {
            return Self::unauthorized(status_text, raw);
        }

        let kind = if status >= 500 {
            ErrorKind::ServerError
        } else if status >= 400 {
            ErrorKind::ClientError
        } else {
            ErrorKind::Unknown
        };

        let message = if status_text.is_empty() {
            format!("Request failed with status {status}")
        } else {
            status_text.to_string()
        };

        Self {
            kind,
            status: Some(status),
            message,
            requires_login: false,
            raw,
        }
    }

    /// Derives the message the end user should see.
    ///
    /// Fixed precedence: the server's `error` field, then the server's
    /// `message` field, then the transport-level message, then the caller's
    /// operation-specific fallback. The result is never empty as long as
    /// the fallback is not.
    pub fn surfaced_message(&self, fallback: &str) -> String {
        if let Some(raw) = &self.raw {
            if let Some(e) = non_empty_str(raw.get("error")) {
                return e.to_string();
            }
            if let Some(m) = non_empty_str(raw.get("message")) {
                return m.to_string();
            }
        }
        if !self.message.is_empty() {
            return self.message.clone();
        }
        fallback.to_string()
    }

    /// Re-wraps this error with a user-facing message derived per the
    /// precedence rule, keeping kind, status, and flags intact.
    pub fn with_fallback(mut self, fallback: &str) -> Self {
        self.message = self.surfaced_message(fallback);
        self
    }

    /// Returns true if this is a timeout.
    pub fn is_timeout(&self) -> bool {
        self.kind == ErrorKind::Timeout
    }
}

/// Extracts a non-empty string from an optional JSON value.
fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_status_classification() {
        assert_eq!(
            ApiError::from_status(500, "Internal Server Error", None).kind,
            ErrorKind::ServerError
        );
        assert_eq!(
            ApiError::from_status(404, "Not Found", None).kind,
            ErrorKind::ClientError
        );
        assert_eq!(
            ApiError::from_status(401, "Unauthorized", None).kind,
            ErrorKind::Unauthorized
        );
    }

    #[test]
    fn test_unauthorized_sets_requires_login() {
        let err = ApiError::from_status(401, "Unauthorized", None);
        assert!(err.requires_login);
        assert_eq!(err.status, Some(401));

        let err = ApiError::from_status(403, "Forbidden", None);
        assert!(!err.requires_login);
    }

    #[test]
    fn test_message_precedence() {
        let mut err = ApiError::from_status(400, "C", None);
        err.raw = Some(json!({ "error": "A", "message": "B" }));
        assert_eq!(err.surfaced_message("fallback"), "A");

        err.raw = Some(json!({ "message": "B" }));
        assert_eq!(err.surfaced_message("fallback"), "B");

        err.raw = Some(json!({}));
        assert_eq!(err.surfaced_message("fallback"), "C");

        err.message = String::new();
        assert_eq!(err.surfaced_message("fallback"), "fallback");
    }

    #[test]
    fn test_message_precedence_ignores_empty_fields() {
        let mut err = ApiError::from_status(400, "transport", None);
        err.raw = Some(json!({ "error": "", "message": "from server" }));
        assert_eq!(err.surfaced_message("fallback"), "from server");
    }

    #[test]
    fn test_timeout_hint_names_base_url() {
        let err = ApiError::timeout("http://localhost:2222");
        assert!(err.is_timeout());
        assert!(err.message.contains("http://localhost:2222"));
    }

    #[test]
    fn test_unknown_never_empty() {
        let err = ApiError::unknown("");
        assert!(!err.message.is_empty());
    }

    #[test]
    fn test_with_fallback_keeps_classification() {
        let err = ApiError::from_status(500, "", Some(json!({ "error": "boom" })))
            .with_fallback("Failed to fetch expenses. Please try again.");
        assert_eq!(err.message, "boom");
        assert_eq!(err.kind, ErrorKind::ServerError);
        assert_eq!(err.status, Some(500));
    }
}
