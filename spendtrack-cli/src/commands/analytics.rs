//! Analytics commands.

use anyhow::Result;
use serde_json::Value;
use spendtrack_core::{AnalyticsSummary, TrendDirection};
use spendtrack_dispatch::{AnalyticsPeriod, Intent};

use super::{build_dispatcher, dispatch_and_wait, print_json, wants_json};
use crate::Cli;

/// Arguments for the analytics command.
#[derive(clap::Args)]
pub struct AnalyticsArgs {
    #[command(subcommand)]
    pub command: AnalyticsCommand,

    /// Aggregation window (week, month, quarter, year).
    #[arg(long, global = true, default_value = "month")]
    pub period: String,
}

/// Analytics subcommands.
#[derive(clap::Subcommand)]
pub enum AnalyticsCommand {
    /// Combined analytics payload.
    Summary,

    /// Spending over time.
    Trends,

    /// Per-category breakdown.
    Categories,

    /// Per-payment-method breakdown.
    PaymentMethods,

    /// Highest-spend categories.
    Top {
        /// Maximum number of categories.
        #[arg(long)]
        limit: Option<u32>,
    },
}

fn print_summary(data: &Value) {
    let Ok(summary) = serde_json::from_value::<AnalyticsSummary>(data.clone()) else {
        println!("{data}");
        return;
    };

    let total: f64 = summary.categories.iter().map(|c| c.total).sum();
    println!("Total spending: {total:.2}");

    if !summary.top_categories.is_empty() {
        println!("Top categories:");
        for c in &summary.top_categories {
            println!(
                "  {:<16}  {:>10.2}  ({:>5.1}%)",
                c.category_name, c.total, c.percentage
            );
        }
    }
    if !summary.payment_methods.is_empty() {
        println!("Payment methods:");
        for p in &summary.payment_methods {
            println!(
                "  {:<16}  {:>10.2}  {} transactions",
                p.payment_method, p.total, p.count
            );
        }
    }
    if let Some(forecast) = &summary.forecast {
        let trend = match forecast.trend {
            TrendDirection::Increasing => "increasing",
            TrendDirection::Decreasing => "decreasing",
            TrendDirection::Stable => "stable",
        };
        println!("Forecast: {:.2} projected ({trend})", forecast.projected);
    }
}

/// Runs an analytics subcommand.
pub async fn run(args: &AnalyticsArgs, cli: &Cli) -> Result<()> {
    let dispatcher = build_dispatcher(cli)?;
    let period: AnalyticsPeriod = args
        .period
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let intent = match &args.command {
        AnalyticsCommand::Summary => Intent::GetAnalyticsSummary(period),
        AnalyticsCommand::Trends => Intent::GetTrends(period),
        AnalyticsCommand::Categories => Intent::GetCategoryBreakdown(period),
        AnalyticsCommand::PaymentMethods => Intent::GetPaymentMethods(period),
        AnalyticsCommand::Top { limit } => Intent::GetTopCategories {
            period,
            limit: *limit,
        },
    };

    let is_summary = matches!(args.command, AnalyticsCommand::Summary);
    let data = dispatch_and_wait(&dispatcher, intent).await?;

    if wants_json(cli) {
        return print_json(&data, cli.pretty);
    }
    if is_summary {
        print_summary(&data);
    } else {
        print_json(&data, true)?;
    }
    Ok(())
}
