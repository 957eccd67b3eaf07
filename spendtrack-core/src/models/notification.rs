//! Notification types.
//!
//! Notifications are produced server-side (budget alerts, bill reminders)
//! and consumed read-mostly by the client; the only client-side mutations
//! are mark-as-read and delete, which the optimistic cache applies before
//! server confirmation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Notification Kind
// ============================================================================

/// The category of a server-issued notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A budget has been exceeded.
    BudgetAlert,
    /// Spending crossed a budget's alert threshold.
    BudgetThreshold,
    /// An upcoming bill.
    BillReminder,
    /// Periodic spending summary.
    SpendingSummary,
}

impl NotificationKind {
    /// Returns a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::BudgetAlert => "Budget Alert",
            Self::BudgetThreshold => "Budget Threshold",
            Self::BillReminder => "Bill Reminder",
            Self::SpendingSummary => "Spending Summary",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// Notification
// ============================================================================

/// A single notification as stored by the backend.
///
/// Field names mirror the wire format; the backend uses Mongo-style `_id`
/// and camelCase timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Server-assigned identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Owning user.
    pub user_id: String,
    /// Notification category.
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// Short title.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Category-specific payload (budget id, expense id, ...).
    #[serde(default)]
    pub data: Value,
    /// Whether the user has read this notification.
    pub is_read: bool,
    /// Whether a push was delivered for it.
    #[serde(default)]
    pub is_pushed: bool,
    /// Creation time.
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    /// Last update time.
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_wire_format() {
        let json = r#"{
            "_id": "n1",
            "user_id": "u1",
            "type": "budget_alert",
            "title": "Budget exceeded",
            "message": "Groceries is over budget",
            "data": { "budget_id": "b1" },
            "is_read": false,
            "is_pushed": true,
            "createdAt": "2025-01-15T08:30:00Z",
            "updatedAt": "2025-01-15T08:30:00Z"
        }"#;

        let n: Notification = serde_json::from_str(json).unwrap();
        assert_eq!(n.id, "n1");
        assert_eq!(n.kind, NotificationKind::BudgetAlert);
        assert!(!n.is_read);
        assert_eq!(n.data["budget_id"], "b1");
    }

    #[test]
    fn test_data_defaults_to_null() {
        let json = r#"{
            "_id": "n2",
            "user_id": "u1",
            "type": "bill_reminder",
            "title": "Rent due",
            "message": "Rent is due tomorrow",
            "is_read": true,
            "createdAt": "2025-01-15T08:30:00Z",
            "updatedAt": "2025-01-15T08:30:00Z"
        }"#;

        let n: Notification = serde_json::from_str(json).unwrap();
        assert!(n.data.is_null());
        assert!(!n.is_pushed);
    }
}
