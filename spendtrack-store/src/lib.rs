// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # spendtrack Store
//!
//! Optimistic local caches for list state.
//!
//! - [`NotificationFeed`] - the optimistic exemplar: mutations apply
//!   locally first, server confirmation swaps in the canonical copy, and
//!   failures roll back only per [`RollbackPolicy`]
//! - [`ExpenseList`] / [`BudgetList`] - plain list caches that apply
//!   server-confirmed CRUD results
//!
//! These are synchronous reducers over owned state; callers decide how to
//! share them (typically behind a `tokio::sync::Mutex` next to the
//! dispatcher callbacks).

pub mod budgets;
pub mod expenses;
pub mod notifications;

pub use budgets::BudgetList;
pub use expenses::ExpenseList;
pub use notifications::{NotificationFeed, RollbackPolicy};
