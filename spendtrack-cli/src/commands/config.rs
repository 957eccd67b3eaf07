//! Config command - show and change client configuration.

use anyhow::{Context, Result};
use spendtrack_client::{ClientConfig, Environment};
use url::Url;

use super::{print_json, wants_json};
use crate::Cli;

/// Arguments for the config command.
#[derive(clap::Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(clap::Subcommand)]
pub enum ConfigCommand {
    /// Show the active configuration.
    Show,

    /// Select the backend environment (local or production).
    Env {
        /// Environment name.
        name: String,
    },

    /// Set a backend base URL.
    SetUrl {
        /// Environment to change (local or production).
        environment: String,
        /// Base URL.
        url: String,
    },
}

/// Runs a config subcommand.
pub async fn run(args: &ConfigArgs, cli: &Cli) -> Result<()> {
    let mut config = ClientConfig::load().context("Failed to load configuration")?;

    match &args.command {
        ConfigCommand::Show => {
            if wants_json(cli) {
                return print_json(&serde_json::to_value(&config)?, cli.pretty);
            }
            println!("environment:    {}", config.environment);
            println!("local_url:      {}", config.local_url);
            println!("production_url: {}", config.production_url);
            println!("timeout_secs:   {}", config.timeout_secs);
            println!("base_url:       {}", config.base_url());
        }
        ConfigCommand::Env { name } => {
            config.environment = name
                .parse::<Environment>()
                .map_err(|e| anyhow::anyhow!(e))?;
            config.save().context("Failed to save configuration")?;
            if !cli.quiet {
                println!("Environment set to {}.", config.environment);
            }
        }
        ConfigCommand::SetUrl { environment, url } => {
            Url::parse(url).with_context(|| format!("Invalid URL: {url}"))?;
            match environment.parse::<Environment>().map_err(|e| anyhow::anyhow!(e))? {
                Environment::Local => config.local_url = url.clone(),
                Environment::Production => config.production_url = url.clone(),
            }
            config.save().context("Failed to save configuration")?;
            if !cli.quiet {
                println!("Updated {environment} URL.");
            }
        }
    }

    Ok(())
}
