//! Command implementations.

pub mod analytics;
pub mod auth;
pub mod budgets;
pub mod config;
pub mod expenses;
pub mod notifications;

use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::Value;
use spendtrack_client::{ApiClient, ClientConfig, HttpTransport, SystemCredentialStore};
use spendtrack_dispatch::{Callback, Dispatcher, Intent};
use url::Url;

use crate::{Cli, OutputFormat};

/// Builds a dispatcher over the configured backend.
///
/// The `--base-url` flag wins over the config file's environment selection.
pub fn build_dispatcher(cli: &Cli) -> Result<Dispatcher> {
    let config = ClientConfig::load().context("Failed to load configuration")?;

    let base_url = match &cli.base_url {
        Some(url) => url.clone(),
        None => config.base_url().to_string(),
    };
    Url::parse(&base_url).with_context(|| format!("Invalid base URL: {base_url}"))?;

    let transport = HttpTransport::with_timeout(
        &base_url,
        std::time::Duration::from_secs(config.timeout_secs),
    )
    .map_err(|e| anyhow::anyhow!(e.message))?;

    let client = ApiClient::new(Arc::new(transport), Arc::new(SystemCredentialStore::new()));
    Ok(Dispatcher::new(Arc::new(client)))
}

/// Dispatches one intent and waits for its terminal callback.
pub async fn dispatch_and_wait(dispatcher: &Dispatcher, intent: Intent) -> Result<Value> {
    let (callback, outcome) = Callback::channel();
    dispatcher.dispatch(intent, callback);

    let result = outcome.await.context("Dispatch task dropped its callback")?;
    result.map_err(|e| {
        if e.requires_login {
            anyhow::anyhow!("{} (run 'spendtrack signin' to start a new session)", e.message)
        } else {
            anyhow::anyhow!(e.message)
        }
    })
}

/// Prints a payload as JSON, honoring `--pretty`.
pub fn print_json(data: &Value, pretty: bool) -> Result<()> {
    let output = if pretty {
        serde_json::to_string_pretty(data)?
    } else {
        serde_json::to_string(data)?
    };
    println!("{output}");
    Ok(())
}

/// True when the global format flag asks for JSON.
pub fn wants_json(cli: &Cli) -> bool {
    cli.format == OutputFormat::Json
}
