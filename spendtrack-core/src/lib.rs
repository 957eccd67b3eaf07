// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # spendtrack Core
//!
//! Core types and the normalized error taxonomy for the spendtrack client.
//!
//! This crate provides the foundational types used across the other
//! spendtrack crates:
//!
//! - Domain models (expenses, budgets, notifications, analytics)
//! - The [`ApiError`] taxonomy every failure path converges on
//! - Authentication wire types
//!
//! ## Key Types
//!
//! ### Errors
//! - [`ApiError`] - The normalized error every failure becomes
//! - [`ErrorKind`] - Timeout / NetworkUnreachable / Unauthorized / ...
//!
//! ### Domain
//! - [`Expense`], [`ExpenseDraft`], [`ExpenseFilters`]
//! - [`Budget`], [`BudgetDraft`], [`BudgetPeriod`]
//! - [`Notification`], [`NotificationKind`]
//! - [`AnalyticsSummary`] and its parts
//!
//! ### Auth
//! - [`AuthSession`], [`SignInPayload`], [`SignUpPayload`]

pub mod error;
pub mod models;

// Re-export error types
pub use error::{ApiError, ErrorKind};

// Re-export all model types
pub use models::{
    // Analytics
    AnalyticsSummary,
    CategoryBreakdown,
    PaymentMethodAnalysis,
    SpendingForecast,
    SpendingTrend,
    TrendDirection,
    // Auth
    AuthSession,
    SignInPayload,
    SignUpPayload,
    // Budgets
    Budget,
    BudgetDraft,
    BudgetPeriod,
    // Expenses
    Expense,
    ExpenseDraft,
    ExpenseFilters,
    // Notifications
    Notification,
    NotificationKind,
};
