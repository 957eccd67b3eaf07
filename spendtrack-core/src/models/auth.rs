//! Authentication wire types.

use serde::{Deserialize, Serialize};

// ============================================================================
// Auth Session
// ============================================================================

/// The token bundle a sign-in or sign-up response carries in its body.
///
/// The interceptor persists these into the credential store; this type
/// exists for callers that want the typed shape (the CLI, tests).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    /// Bearer token for subsequent requests.
    #[serde(rename = "accessToken")]
    pub access_token: String,
    /// Token the backend uses to mint fresh access tokens.
    #[serde(rename = "refreshToken")]
    pub refresh_token: Option<String>,
    /// Principal identifier.
    pub user_name: Option<String>,
}

// ============================================================================
// Sign In / Sign Up
// ============================================================================

/// Credentials submitted on sign-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInPayload {
    /// Principal identifier.
    pub user_name: String,
    /// Plaintext password (TLS is the transport's concern).
    pub password: String,
}

/// Account details submitted on sign-up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpPayload {
    /// Desired principal identifier.
    pub user_name: String,
    /// Plaintext password.
    pub password: String,
    /// Contact email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_wire_names() {
        let json = r#"{
            "accessToken": "T1",
            "refreshToken": "R1",
            "user_name": "alice"
        }"#;

        let session: AuthSession = serde_json::from_str(json).unwrap();
        assert_eq!(session.access_token, "T1");
        assert_eq!(session.refresh_token.as_deref(), Some("R1"));
        assert_eq!(session.user_name.as_deref(), Some("alice"));
    }

    #[test]
    fn test_session_tolerates_missing_refresh() {
        let json = r#"{ "accessToken": "T1" }"#;
        let session: AuthSession = serde_json::from_str(json).unwrap();
        assert!(session.refresh_token.is_none());
    }
}
