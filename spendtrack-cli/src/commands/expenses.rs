//! Expense commands.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use spendtrack_core::{Expense, ExpenseDraft, ExpenseFilters};
use spendtrack_dispatch::Intent;

use super::{build_dispatcher, dispatch_and_wait, print_json, wants_json};
use crate::Cli;

/// Arguments for the expenses command.
#[derive(clap::Args)]
pub struct ExpensesArgs {
    #[command(subcommand)]
    pub command: ExpensesCommand,
}

/// Expense subcommands.
#[derive(clap::Subcommand)]
pub enum ExpensesCommand {
    /// List expenses, optionally filtered.
    List {
        /// Inclusive range start (YYYY-MM-DD).
        #[arg(long)]
        start: Option<String>,
        /// Inclusive range end (YYYY-MM-DD).
        #[arg(long)]
        end: Option<String>,
        /// Restrict to one category.
        #[arg(long)]
        category: Option<String>,
    },

    /// Record a new expense.
    Add {
        /// Amount spent.
        amount: f64,
        /// Category identifier.
        category: String,
        /// When the expense occurred (YYYY-MM-DD or RFC 3339); now when
        /// omitted.
        #[arg(long)]
        date: Option<String>,
        /// Free-form note.
        #[arg(long)]
        note: Option<String>,
        /// Payment method.
        #[arg(long, default_value = "card")]
        method: String,
    },

    /// Show one expense.
    Show {
        /// Expense id.
        id: String,
    },

    /// Update an expense.
    Update {
        /// Expense id.
        id: String,
        /// New amount.
        #[arg(long)]
        amount: f64,
        /// New category.
        #[arg(long)]
        category: String,
        /// New date (YYYY-MM-DD or RFC 3339).
        #[arg(long)]
        date: Option<String>,
        /// New note.
        #[arg(long)]
        note: Option<String>,
        /// New payment method.
        #[arg(long, default_value = "card")]
        method: String,
    },

    /// Delete an expense.
    Delete {
        /// Expense id.
        id: String,
    },
}

/// Parses a date given as YYYY-MM-DD or full RFC 3339.
fn parse_date(input: Option<&String>) -> Result<DateTime<Utc>> {
    let Some(input) = input else {
        return Ok(Utc::now());
    };

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        let midnight = date
            .and_hms_opt(0, 0, 0)
            .context("Invalid time of day")?;
        return Ok(midnight.and_utc());
    }

    DateTime::parse_from_rfc3339(input)
        .map(|d| d.with_timezone(&Utc))
        .with_context(|| format!("Invalid date: {input}"))
}

fn draft(
    amount: f64,
    category: &str,
    date: Option<&String>,
    note: Option<&String>,
    method: &str,
) -> Result<ExpenseDraft> {
    Ok(ExpenseDraft {
        amount,
        category_id: category.to_string(),
        date: parse_date(date)?,
        description: note.cloned(),
        payment_method: method.to_string(),
    })
}

fn print_expense_list(data: &Value) {
    let Ok(expenses) = serde_json::from_value::<Vec<Expense>>(data.clone()) else {
        println!("{data}");
        return;
    };

    if expenses.is_empty() {
        println!("No expenses.");
        return;
    }

    let total: f64 = expenses.iter().map(|e| e.amount).sum();
    for e in &expenses {
        let note = e.description.as_deref().unwrap_or("");
        println!(
            "{}  {:>10.2}  {:<16}  {:<8}  {}",
            e.date.format("%Y-%m-%d"),
            e.amount,
            e.category_id,
            e.payment_method,
            note
        );
    }
    println!();
    println!("{} expenses, {total:.2} total", expenses.len());
}

/// Runs an expenses subcommand.
pub async fn run(args: &ExpensesArgs, cli: &Cli) -> Result<()> {
    let dispatcher = build_dispatcher(cli)?;

    let (intent, list_output) = match &args.command {
        ExpensesCommand::List {
            start,
            end,
            category,
        } => (
            Intent::GetExpenses(ExpenseFilters {
                start_date: start.clone(),
                end_date: end.clone(),
                category_id: category.clone(),
            }),
            true,
        ),
        ExpensesCommand::Add {
            amount,
            category,
            date,
            note,
            method,
        } => (
            Intent::CreateExpense(draft(
                *amount,
                category,
                date.as_ref(),
                note.as_ref(),
                method,
            )?),
            false,
        ),
        ExpensesCommand::Show { id } => (Intent::GetExpense { id: id.clone() }, false),
        ExpensesCommand::Update {
            id,
            amount,
            category,
            date,
            note,
            method,
        } => (
            Intent::UpdateExpense {
                id: id.clone(),
                draft: draft(*amount, category, date.as_ref(), note.as_ref(), method)?,
            },
            false,
        ),
        ExpensesCommand::Delete { id } => (Intent::DeleteExpense { id: id.clone() }, false),
    };

    let data = dispatch_and_wait(&dispatcher, intent).await?;

    if wants_json(cli) {
        return print_json(&data, cli.pretty);
    }
    if list_output {
        print_expense_list(&data);
    } else {
        print_json(&data, true)?;
    }
    Ok(())
}
