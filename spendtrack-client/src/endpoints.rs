//! Backend endpoint table.
//!
//! One place for every path the client talks to. The sign-up path keeps the
//! backend's `/signUp` casing; the auth-exempt match is case-insensitive so
//! the casing does not matter for credential attachment.

/// Sign-in.
pub const SIGNIN: &str = "/signin";
/// Sign-up.
pub const SIGNUP: &str = "/signUp";
/// Current user profile.
pub const USER: &str = "/user";

/// Expense collection.
pub const EXPENSES: &str = "/expenses";

/// A single expense.
pub fn expense(id: &str) -> String {
    format!("/expenses/{id}")
}

/// Budget collection.
pub const BUDGETS: &str = "/budgets";
/// Budgets enriched with spending status.
pub const BUDGETS_WITH_STATUS: &str = "/budgets/with-status";

/// A single budget.
pub fn budget(id: &str) -> String {
    format!("/budgets/{id}")
}

/// Status of a single budget.
pub fn budget_status(id: &str) -> String {
    format!("/budgets/{id}/status")
}

/// Notification collection.
pub const NOTIFICATIONS: &str = "/notifications";
/// Count of unread notifications.
pub const NOTIFICATIONS_UNREAD_COUNT: &str = "/notifications/unread-count";
/// Mark every notification read.
pub const NOTIFICATIONS_READ_ALL: &str = "/notifications/read-all";

/// A single notification.
pub fn notification(id: &str) -> String {
    format!("/notifications/{id}")
}

/// Mark a single notification read.
pub fn notification_read(id: &str) -> String {
    format!("/notifications/{id}/read")
}

/// Combined analytics payload.
pub const ANALYTICS_SUMMARY: &str = "/analytics/summary";
/// Spending over time.
pub const ANALYTICS_TRENDS: &str = "/analytics/trends";
/// Per-category breakdown.
pub const ANALYTICS_CATEGORIES: &str = "/analytics/categories";
/// Per-payment-method breakdown.
pub const ANALYTICS_PAYMENT_METHODS: &str = "/analytics/payment-methods";
/// Highest-spend categories.
pub const ANALYTICS_TOP_CATEGORIES: &str = "/analytics/top-categories";

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::is_auth_exempt;

    #[test]
    fn test_id_interpolation() {
        assert_eq!(expense("e1"), "/expenses/e1");
        assert_eq!(budget_status("b1"), "/budgets/b1/status");
        assert_eq!(notification_read("n1"), "/notifications/n1/read");
    }

    #[test]
    fn test_auth_exemption_covers_signup_casing() {
        assert!(is_auth_exempt(SIGNIN));
        assert!(is_auth_exempt(SIGNUP));
        assert!(!is_auth_exempt(EXPENSES));
        assert!(!is_auth_exempt(NOTIFICATIONS_READ_ALL));
    }
}
