//! Secure credential storage.
//!
//! The credential store is an injected capability: everything that touches
//! tokens goes through the [`CredentialStore`] trait so tests can substitute
//! an in-memory fake and assert exact read/write sequences. The default
//! implementation uses the system keychain:
//! - macOS: Keychain Services
//! - Windows: Credential Manager
//! - Linux: Secret Service (GNOME Keyring, KDE Wallet)

use std::collections::HashMap;

use async_trait::async_trait;
use keyring::Entry;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Keychain service name for spendtrack credentials.
const SERVICE: &str = "spendtrack";

// ============================================================================
// Credential Keys
// ============================================================================

/// Keys the credential bundle is stored under.
///
/// Access and refresh tokens are written together on rotation; `user_name`
/// is only ever written alongside a non-null access token and survives a
/// forced logout so the UI can still show the last signed-in user.
pub mod keys {
    /// Bearer token attached to authenticated requests.
    pub const ACCESS_TOKEN: &str = "accessToken";
    /// Token the backend uses to mint fresh access tokens.
    pub const REFRESH_TOKEN: &str = "refreshToken";
    /// Principal identifier.
    pub const USER_NAME: &str = "user_name";

    /// All keys, for a full sign-out.
    pub const ALL: &[&str] = &[ACCESS_TOKEN, REFRESH_TOKEN, USER_NAME];
}

// ============================================================================
// Credential Error
// ============================================================================

/// Error type for credential store operations.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Access denied to the underlying secret store.
    #[error("Access denied to credential store")]
    AccessDenied,

    /// Platform-level failure.
    #[error("Platform error: {0}")]
    Platform(String),

    /// Generic error.
    #[error("Credential store error: {0}")]
    Other(String),
}

impl From<keyring::Error> for CredentialError {
    fn from(err: keyring::Error) -> Self {
        match err {
            keyring::Error::NoStorageAccess(_) => CredentialError::AccessDenied,
            keyring::Error::PlatformFailure(e) => CredentialError::Platform(e.to_string()),
            keyring::Error::Ambiguous(_) => {
                CredentialError::Other("Ambiguous credential entry".to_string())
            }
            _ => CredentialError::Other(err.to_string()),
        }
    }
}

// ============================================================================
// Credential Store Trait
// ============================================================================

/// Async get/set/delete of named string secrets.
///
/// A missing key is `Ok(None)`, not an error; deleting a missing key is a
/// no-op. Reads and writes are individually atomic but there is no
/// transactional guarantee across keys (last writer wins, per the client's
/// concurrency model).
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Gets a secret by key.
    async fn get(&self, key: &str) -> Result<Option<String>, CredentialError>;

    /// Stores a secret under a key, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), CredentialError>;

    /// Deletes a secret. Deleting a missing key succeeds.
    async fn delete(&self, key: &str) -> Result<(), CredentialError>;
}

// ============================================================================
// System Credential Store
// ============================================================================

/// Default implementation backed by the system keychain via the `keyring`
/// crate.
#[derive(Debug, Clone, Default)]
pub struct SystemCredentialStore;

impl SystemCredentialStore {
    /// Creates a new system credential store.
    pub fn new() -> Self {
        Self
    }

    fn entry(key: &str) -> Result<Entry, CredentialError> {
        Entry::new(SERVICE, key).map_err(|e| CredentialError::Platform(e.to_string()))
    }
}

#[async_trait]
impl CredentialStore for SystemCredentialStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CredentialError> {
        let entry = Self::entry(key)?;

        match entry.get_password() {
            Ok(secret) => {
                debug!(key = %key, "Credential found");
                Ok(Some(secret))
            }
            Err(keyring::Error::NoEntry) => {
                debug!(key = %key, "Credential not found");
                Ok(None)
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to get credential");
                Err(e.into())
            }
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), CredentialError> {
        let entry = Self::entry(key)?;

        entry.set_password(value).map_err(|e| {
            warn!(key = %key, error = %e, "Failed to set credential");
            CredentialError::from(e)
        })?;

        debug!(key = %key, "Credential stored");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CredentialError> {
        let entry = Self::entry(key)?;

        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => {
                debug!(key = %key, "Credential deleted");
                Ok(())
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to delete credential");
                Err(e.into())
            }
        }
    }
}

// ============================================================================
// Memory Credential Store
// ============================================================================

/// In-memory credential store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryCredentialStore {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with the given key/value pairs.
    pub fn seeded(pairs: &[(&str, &str)]) -> Self {
        let entries = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Self {
            entries: Mutex::new(entries),
        }
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CredentialError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), CredentialError> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CredentialError> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemoryCredentialStore::new();

        assert_eq!(store.get(keys::ACCESS_TOKEN).await.unwrap(), None);

        store.set(keys::ACCESS_TOKEN, "T1").await.unwrap();
        assert_eq!(
            store.get(keys::ACCESS_TOKEN).await.unwrap(),
            Some("T1".to_string())
        );

        store.delete(keys::ACCESS_TOKEN).await.unwrap();
        assert_eq!(store.get(keys::ACCESS_TOKEN).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_missing_key_is_ok() {
        let store = MemoryCredentialStore::new();
        assert!(store.delete("never-set").await.is_ok());
    }

    #[tokio::test]
    async fn test_seeded_store() {
        let store = MemoryCredentialStore::seeded(&[(keys::USER_NAME, "alice")]);
        assert_eq!(
            store.get(keys::USER_NAME).await.unwrap(),
            Some("alice".to_string())
        );
    }

    // Note: SystemCredentialStore tests require platform keychain access and
    // run as integration tests, not unit tests.
}
