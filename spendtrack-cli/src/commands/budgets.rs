//! Budget commands.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use spendtrack_core::{Budget, BudgetDraft, BudgetPeriod};
use spendtrack_dispatch::Intent;

use super::{build_dispatcher, dispatch_and_wait, print_json, wants_json};
use crate::Cli;

/// Arguments for the budgets command.
#[derive(clap::Args)]
pub struct BudgetsArgs {
    #[command(subcommand)]
    pub command: BudgetsCommand,
}

/// Budget subcommands.
#[derive(clap::Subcommand)]
pub enum BudgetsCommand {
    /// List budgets.
    List,

    /// List budgets with spending status.
    Status,

    /// Create a budget.
    Add(BudgetFields),

    /// Show one budget.
    Show {
        /// Budget id.
        id: String,
    },

    /// Update a budget.
    Update {
        /// Budget id.
        id: String,
        #[command(flatten)]
        fields: BudgetFields,
    },

    /// Delete a budget.
    Delete {
        /// Budget id.
        id: String,
    },
}

/// Budget fields shared by add and update.
#[derive(clap::Args)]
pub struct BudgetFields {
    /// Display name.
    pub name: String,

    /// Spending cap for the period.
    pub amount: f64,

    /// Category this budget covers; overall budget when omitted.
    #[arg(long)]
    pub category: Option<String>,

    /// Recurrence period (weekly, monthly, yearly).
    #[arg(long, default_value = "monthly")]
    pub period: String,

    /// Period start (YYYY-MM-DD).
    #[arg(long)]
    pub start: String,

    /// Period end (YYYY-MM-DD).
    #[arg(long)]
    pub end: String,

    /// Fraction of the cap at which to alert.
    #[arg(long, default_value_t = 0.8)]
    pub threshold: f64,
}

fn parse_day(input: &str) -> Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .with_context(|| format!("Invalid date: {input}"))?;
    let midnight = date.and_hms_opt(0, 0, 0).context("Invalid time of day")?;
    Ok(midnight.and_utc())
}

fn parse_period(input: &str) -> Result<BudgetPeriod> {
    match input.to_lowercase().as_str() {
        "weekly" => Ok(BudgetPeriod::Weekly),
        "monthly" => Ok(BudgetPeriod::Monthly),
        "yearly" => Ok(BudgetPeriod::Yearly),
        other => anyhow::bail!("Unknown period: {other} (weekly, monthly, yearly)"),
    }
}

impl BudgetFields {
    fn to_draft(&self) -> Result<BudgetDraft> {
        Ok(BudgetDraft {
            name: self.name.clone(),
            category_id: self.category.clone(),
            amount: self.amount,
            period: parse_period(&self.period)?,
            start_date: parse_day(&self.start)?,
            end_date: parse_day(&self.end)?,
            alert_threshold: self.threshold,
        })
    }
}

fn print_budget_list(data: &Value) {
    let Ok(budgets) = serde_json::from_value::<Vec<Budget>>(data.clone()) else {
        println!("{data}");
        return;
    };

    if budgets.is_empty() {
        println!("No budgets.");
        return;
    }

    for b in &budgets {
        let category = b.category_id.as_deref().unwrap_or("overall");
        if b.has_status() {
            let spent = b.spending.unwrap_or(0.0);
            let pct = b.percentage_used.unwrap_or(0.0);
            let flag = match (b.is_over_budget, b.is_over_threshold) {
                (Some(true), _) => "  OVER BUDGET",
                (_, Some(true)) => "  over threshold",
                _ => "",
            };
            println!(
                "{:<20}  {:<12}  {spent:>10.2} / {:>10.2}  ({pct:>5.1}%){flag}",
                b.name, category, b.amount
            );
        } else {
            println!("{:<20}  {:<12}  {:>10.2} per {}", b.name, category, b.amount, b.period);
        }
    }
}

/// Runs a budgets subcommand.
pub async fn run(args: &BudgetsArgs, cli: &Cli) -> Result<()> {
    let dispatcher = build_dispatcher(cli)?;

    let (intent, list_output) = match &args.command {
        BudgetsCommand::List => (Intent::GetBudgets, true),
        BudgetsCommand::Status => (Intent::GetBudgetsWithStatus, true),
        BudgetsCommand::Add(fields) => (Intent::CreateBudget(fields.to_draft()?), false),
        BudgetsCommand::Show { id } => (Intent::GetBudget { id: id.clone() }, false),
        BudgetsCommand::Update { id, fields } => (
            Intent::UpdateBudget {
                id: id.clone(),
                draft: fields.to_draft()?,
            },
            false,
        ),
        BudgetsCommand::Delete { id } => (Intent::DeleteBudget { id: id.clone() }, false),
    };

    let data = dispatch_and_wait(&dispatcher, intent).await?;

    if wants_json(cli) {
        return print_json(&data, cli.pretty);
    }
    if list_output {
        print_budget_list(&data);
    } else {
        print_json(&data, true)?;
    }
    Ok(())
}
