//! Domain models.
//!
//! Serde structs matching the backend's wire format. The backend uses
//! Mongo-style `_id` identifiers and mixes snake_case and camelCase field
//! names; renames are applied per field rather than per struct so the Rust
//! side stays uniformly snake_case.

mod analytics;
mod auth;
mod budget;
mod expense;
mod notification;

pub use analytics::{
    AnalyticsSummary, CategoryBreakdown, PaymentMethodAnalysis, SpendingForecast, SpendingTrend,
    TrendDirection,
};
pub use auth::{AuthSession, SignInPayload, SignUpPayload};
pub use budget::{Budget, BudgetDraft, BudgetPeriod};
pub use expense::{Expense, ExpenseDraft, ExpenseFilters};
pub use notification::{Notification, NotificationKind};
