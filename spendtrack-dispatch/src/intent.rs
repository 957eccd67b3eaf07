//! Typed intents and their completion callbacks.
//!
//! An [`Intent`] is one user-facing operation with its payload; every
//! dispatch carries a [`Callback`] pair and resolves exactly one side of it.
//! [`IntentKind`] is the fieldless key the dispatcher uses for run-latest
//! bookkeeping and for per-operation fallback messages.

use serde_json::Value;
use spendtrack_core::{
    ApiError, BudgetDraft, ExpenseDraft, ExpenseFilters, SignInPayload, SignUpPayload,
};
use tokio::sync::oneshot;

// ============================================================================
// Analytics Period
// ============================================================================

/// Time window an analytics query aggregates over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalyticsPeriod {
    /// Last 7 days.
    Week,
    /// Last 30 days.
    #[default]
    Month,
    /// Last 90 days.
    Quarter,
    /// Last 365 days.
    Year,
}

impl AnalyticsPeriod {
    /// Wire value for the `period` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Year => "year",
        }
    }
}

impl std::fmt::Display for AnalyticsPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AnalyticsPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "quarter" => Ok(Self::Quarter),
            "year" => Ok(Self::Year),
            other => Err(format!("Unknown period: {other}")),
        }
    }
}

// ============================================================================
// Intent
// ============================================================================

/// One user-facing operation with its payload.
#[derive(Debug, Clone)]
pub enum Intent {
    /// Sign in with username and password.
    SignIn(SignInPayload),
    /// Create an account.
    SignUp(SignUpPayload),

    /// Record a new expense.
    CreateExpense(ExpenseDraft),
    /// Fetch expenses, optionally filtered.
    GetExpenses(ExpenseFilters),
    /// Fetch a single expense.
    GetExpense {
        /// Expense id.
        id: String,
    },
    /// Update an existing expense.
    UpdateExpense {
        /// Expense id.
        id: String,
        /// Replacement fields.
        draft: ExpenseDraft,
    },
    /// Delete an expense.
    DeleteExpense {
        /// Expense id.
        id: String,
    },

    /// Create a budget.
    CreateBudget(BudgetDraft),
    /// Fetch all budgets.
    GetBudgets,
    /// Fetch a single budget.
    GetBudget {
        /// Budget id.
        id: String,
    },
    /// Fetch budgets enriched with spending status.
    GetBudgetsWithStatus,
    /// Update an existing budget.
    UpdateBudget {
        /// Budget id.
        id: String,
        /// Replacement fields.
        draft: BudgetDraft,
    },
    /// Delete a budget.
    DeleteBudget {
        /// Budget id.
        id: String,
    },

    /// Fetch the notification feed.
    GetNotifications,
    /// Fetch the unread-notification count.
    GetUnreadCount,
    /// Mark one notification as read.
    MarkAsRead {
        /// Notification id.
        id: String,
    },
    /// Mark every notification as read.
    MarkAllAsRead,
    /// Delete a notification.
    DeleteNotification {
        /// Notification id.
        id: String,
    },

    /// Fetch the combined analytics payload.
    GetAnalyticsSummary(AnalyticsPeriod),
    /// Fetch spending over time.
    GetTrends(AnalyticsPeriod),
    /// Fetch the per-category breakdown.
    GetCategoryBreakdown(AnalyticsPeriod),
    /// Fetch per-payment-method analytics.
    GetPaymentMethods(AnalyticsPeriod),
    /// Fetch the highest-spend categories.
    GetTopCategories {
        /// Aggregation window.
        period: AnalyticsPeriod,
        /// Maximum number of categories; server default when `None`.
        limit: Option<u32>,
    },
}

impl Intent {
    /// The fieldless kind of this intent, the run-latest concurrency unit.
    pub fn kind(&self) -> IntentKind {
        match self {
            Self::SignIn(_) => IntentKind::SignIn,
            Self::SignUp(_) => IntentKind::SignUp,
            Self::CreateExpense(_) => IntentKind::CreateExpense,
            Self::GetExpenses(_) => IntentKind::GetExpenses,
            Self::GetExpense { .. } => IntentKind::GetExpense,
            Self::UpdateExpense { .. } => IntentKind::UpdateExpense,
            Self::DeleteExpense { .. } => IntentKind::DeleteExpense,
            Self::CreateBudget(_) => IntentKind::CreateBudget,
            Self::GetBudgets => IntentKind::GetBudgets,
            Self::GetBudget { .. } => IntentKind::GetBudget,
            Self::GetBudgetsWithStatus => IntentKind::GetBudgetsWithStatus,
            Self::UpdateBudget { .. } => IntentKind::UpdateBudget,
            Self::DeleteBudget { .. } => IntentKind::DeleteBudget,
            Self::GetNotifications => IntentKind::GetNotifications,
            Self::GetUnreadCount => IntentKind::GetUnreadCount,
            Self::MarkAsRead { .. } => IntentKind::MarkAsRead,
            Self::MarkAllAsRead => IntentKind::MarkAllAsRead,
            Self::DeleteNotification { .. } => IntentKind::DeleteNotification,
            Self::GetAnalyticsSummary(_) => IntentKind::GetAnalyticsSummary,
            Self::GetTrends(_) => IntentKind::GetTrends,
            Self::GetCategoryBreakdown(_) => IntentKind::GetCategoryBreakdown,
            Self::GetPaymentMethods(_) => IntentKind::GetPaymentMethods,
            Self::GetTopCategories { .. } => IntentKind::GetTopCategories,
        }
    }
}

// ============================================================================
// Intent Kind
// ============================================================================

/// Fieldless intent discriminant.
///
/// One in-flight intent per kind is tracked; a newer dispatch of the same
/// kind supersedes the older one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum IntentKind {
    SignIn,
    SignUp,
    CreateExpense,
    GetExpenses,
    GetExpense,
    UpdateExpense,
    DeleteExpense,
    CreateBudget,
    GetBudgets,
    GetBudget,
    GetBudgetsWithStatus,
    UpdateBudget,
    DeleteBudget,
    GetNotifications,
    GetUnreadCount,
    MarkAsRead,
    MarkAllAsRead,
    DeleteNotification,
    GetAnalyticsSummary,
    GetTrends,
    GetCategoryBreakdown,
    GetPaymentMethods,
    GetTopCategories,
}

impl IntentKind {
    /// Stable camelCase name, used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SignIn => "signin",
            Self::SignUp => "signup",
            Self::CreateExpense => "createExpense",
            Self::GetExpenses => "getExpenses",
            Self::GetExpense => "getExpense",
            Self::UpdateExpense => "updateExpense",
            Self::DeleteExpense => "deleteExpense",
            Self::CreateBudget => "createBudget",
            Self::GetBudgets => "getBudgets",
            Self::GetBudget => "getBudget",
            Self::GetBudgetsWithStatus => "getBudgetsWithStatus",
            Self::UpdateBudget => "updateBudget",
            Self::DeleteBudget => "deleteBudget",
            Self::GetNotifications => "getNotifications",
            Self::GetUnreadCount => "getUnreadCount",
            Self::MarkAsRead => "markAsRead",
            Self::MarkAllAsRead => "markAllAsRead",
            Self::DeleteNotification => "deleteNotification",
            Self::GetAnalyticsSummary => "getAnalyticsSummary",
            Self::GetTrends => "getTrends",
            Self::GetCategoryBreakdown => "getCategoryBreakdown",
            Self::GetPaymentMethods => "getPaymentMethods",
            Self::GetTopCategories => "getTopCategories",
        }
    }

    /// Last-resort failure message when neither the server body nor the
    /// transport produced one.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::SignIn => "Failed to sign in. Please try again.",
            Self::SignUp => "Failed to sign up. Please try again.",
            Self::CreateExpense => "Failed to create expense. Please try again.",
            Self::GetExpenses => "Failed to fetch expenses. Please try again.",
            Self::GetExpense => "Failed to fetch expense. Please try again.",
            Self::UpdateExpense => "Failed to update expense. Please try again.",
            Self::DeleteExpense => "Failed to delete expense. Please try again.",
            Self::CreateBudget => "Failed to create budget. Please try again.",
            Self::GetBudgets => "Failed to fetch budgets. Please try again.",
            Self::GetBudget => "Failed to fetch budget. Please try again.",
            Self::GetBudgetsWithStatus => "Failed to fetch budget status. Please try again.",
            Self::UpdateBudget => "Failed to update budget. Please try again.",
            Self::DeleteBudget => "Failed to delete budget. Please try again.",
            Self::GetNotifications => "Failed to fetch notifications. Please try again.",
            Self::GetUnreadCount => "Failed to fetch unread count. Please try again.",
            Self::MarkAsRead => "Failed to mark notification as read. Please try again.",
            Self::MarkAllAsRead => "Failed to mark notifications as read. Please try again.",
            Self::DeleteNotification => "Failed to delete notification. Please try again.",
            Self::GetAnalyticsSummary => "Failed to fetch analytics. Please try again.",
            Self::GetTrends => "Failed to fetch spending trends. Please try again.",
            Self::GetCategoryBreakdown => "Failed to fetch category breakdown. Please try again.",
            Self::GetPaymentMethods => {
                "Failed to fetch payment method analytics. Please try again."
            }
            Self::GetTopCategories => "Failed to fetch top categories. Please try again.",
        }
    }
}

impl std::fmt::Display for IntentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Callback
// ============================================================================

/// Success/failure continuation pair for a dispatched intent.
///
/// Exactly one side fires, exactly once, after the intent reaches a terminal
/// state. Both sides are `FnOnce` so resolution consumes the callback.
pub struct Callback {
    on_success: Box<dyn FnOnce(Value) + Send>,
    on_failure: Box<dyn FnOnce(ApiError) + Send>,
}

impl Callback {
    /// Creates a callback from two closures.
    pub fn new(
        on_success: impl FnOnce(Value) + Send + 'static,
        on_failure: impl FnOnce(ApiError) + Send + 'static,
    ) -> Self {
        Self {
            on_success: Box::new(on_success),
            on_failure: Box::new(on_failure),
        }
    }

    /// A callback that ignores the outcome.
    pub fn noop() -> Self {
        Self::new(|_| {}, |_| {})
    }

    /// Creates a callback whose outcome is delivered on a oneshot channel.
    ///
    /// Convenient for await-style call sites (the CLI, tests). Dropping the
    /// receiver is fine; the send side ignores a closed channel.
    pub fn channel() -> (Self, oneshot::Receiver<Result<Value, ApiError>>) {
        let (tx, rx) = oneshot::channel();
        let tx_err = std::sync::Arc::new(std::sync::Mutex::new(Some(tx)));
        let tx_ok = tx_err.clone();

        let callback = Self::new(
            move |data| {
                if let Some(tx) = tx_ok.lock().ok().and_then(|mut s| s.take()) {
                    let _ = tx.send(Ok(data));
                }
            },
            move |err| {
                if let Some(tx) = tx_err.lock().ok().and_then(|mut s| s.take()) {
                    let _ = tx.send(Err(err));
                }
            },
        );
        (callback, rx)
    }

    /// Resolves the success side.
    pub fn succeed(self, data: Value) {
        (self.on_success)(data);
    }

    /// Resolves the failure side.
    pub fn fail(self, error: ApiError) {
        (self.on_failure)(error);
    }

    /// Resolves from a handler result.
    pub fn resolve(self, result: Result<Value, ApiError>) {
        match result {
            Ok(data) => self.succeed(data),
            Err(err) => self.fail(err),
        }
    }
}

impl std::fmt::Debug for Callback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callback").finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
