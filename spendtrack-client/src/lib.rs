// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # spendtrack Client
//!
//! HTTP transport, credential storage, and the interceptor pipeline for the
//! spendtrack backend.
//!
//! ## Layers
//!
//! - [`transport`] - [`Transport`] trait and the `reqwest`-backed
//!   [`HttpTransport`]; transport-level failures only, HTTP error statuses
//!   pass through as responses
//! - [`credentials`] - [`CredentialStore`] trait, system-keychain and
//!   in-memory implementations
//! - [`interceptor`] - [`ApiClient`], which attaches credentials on the way
//!   out and persists token rotations on the way in
//! - [`endpoints`] - the backend path table
//! - [`config`] - environment selection and base URLs
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use spendtrack_client::{ApiClient, HttpTransport, SystemCredentialStore};
//! use spendtrack_client::transport::RequestEnvelope;
//!
//! let transport = Arc::new(HttpTransport::new("http://localhost:2222")?);
//! let client = ApiClient::new(transport, Arc::new(SystemCredentialStore::new()));
//! let response = client.send(RequestEnvelope::get("/expenses")).await?;
//! ```

pub mod config;
pub mod credentials;
pub mod endpoints;
pub mod interceptor;
pub mod transport;

pub use config::{ClientConfig, ConfigError, Environment};
pub use credentials::{
    keys, CredentialError, CredentialStore, MemoryCredentialStore, SystemCredentialStore,
};
pub use interceptor::ApiClient;
pub use transport::{ApiResponse, HttpMethod, HttpTransport, RequestEnvelope, Transport};
