// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! spendtrack CLI - expense tracking from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Sign in
//! spendtrack signin alice
//!
//! # Record an expense
//! spendtrack expenses add 12.50 groceries --method card
//!
//! # List expenses for a range
//! spendtrack expenses list --start 2026-08-01 --end 2026-08-31
//!
//! # Budgets with spending status
//! spendtrack budgets status
//!
//! # Notifications
//! spendtrack notifications list
//! spendtrack notifications read-all
//!
//! # Analytics, JSON output
//! spendtrack analytics summary --period month --format json --pretty
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{analytics, auth, budgets, config, expenses, notifications};

// ============================================================================
// CLI Definition
// ============================================================================

/// spendtrack CLI - personal expense tracking.
#[derive(Parser)]
#[command(name = "spendtrack")]
#[command(about = "Expense tracking CLI")]
#[command(version)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Backend base URL, overriding the configured environment.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and store the session.
    Signin(auth::SigninArgs),

    /// Create an account.
    Signup(auth::SignupArgs),

    /// Sign out, clearing stored credentials.
    Signout,

    /// Manage expenses.
    #[command(visible_alias = "e")]
    Expenses(expenses::ExpensesArgs),

    /// Manage budgets.
    #[command(visible_alias = "b")]
    Budgets(budgets::BudgetsArgs),

    /// Manage notifications.
    #[command(visible_alias = "n")]
    Notifications(notifications::NotificationsArgs),

    /// Spending analytics.
    #[command(visible_alias = "a")]
    Analytics(analytics::AnalyticsArgs),

    /// Manage configuration.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("spendtrack=debug,info")
    } else {
        EnvFilter::new("spendtrack=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Signin(args) => auth::signin(args, &cli).await,
        Commands::Signup(args) => auth::signup(args, &cli).await,
        Commands::Signout => auth::signout(&cli).await,
        Commands::Expenses(args) => expenses::run(args, &cli).await,
        Commands::Budgets(args) => budgets::run(args, &cli).await,
        Commands::Notifications(args) => notifications::run(args, &cli).await,
        Commands::Analytics(args) => analytics::run(args, &cli).await,
        Commands::Config(args) => config::run(args, &cli).await,
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(1);
    }

    Ok(())
}
