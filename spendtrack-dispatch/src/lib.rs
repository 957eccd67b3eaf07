// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # spendtrack Dispatch
//!
//! The action-to-effect coordinator: typed intents, run-latest dispatch,
//! and per-operation handlers.
//!
//! A caller builds an [`Intent`], pairs it with a [`Callback`], and hands
//! both to the [`Dispatcher`]. The dispatcher runs the intent's handler on
//! the tokio runtime and resolves exactly one side of the callback. One
//! in-flight intent per [`IntentKind`] is tracked; a newer dispatch of the
//! same kind supersedes the older one without cancelling it.
//!
//! ## Example
//!
//! ```ignore
//! use spendtrack_dispatch::{Callback, Dispatcher, Intent};
//!
//! let dispatcher = Dispatcher::new(client);
//! let (callback, outcome) = Callback::channel();
//! dispatcher.dispatch(Intent::GetBudgets, callback);
//! let budgets = outcome.await??;
//! ```

mod dispatcher;
mod handlers;
mod intent;

pub use dispatcher::Dispatcher;
pub use intent::{AnalyticsPeriod, Callback, Intent, IntentKind};
