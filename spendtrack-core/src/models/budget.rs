//! Budget types.
//!
//! A budget caps spending for a category (or overall, when `category_id`
//! is absent) over a period. The `/budgets/with-status` endpoint returns
//! budgets enriched with computed spending fields; those are optional on
//! [`Budget`] so one model covers both shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Budget Period
// ============================================================================

/// The recurrence period of a budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    /// Resets weekly.
    Weekly,
    /// Resets monthly.
    Monthly,
    /// Resets yearly.
    Yearly,
}

impl BudgetPeriod {
    /// Returns a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
            Self::Yearly => "Yearly",
        }
    }
}

impl std::fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// Budget
// ============================================================================

/// A budget as stored by the backend, optionally enriched with status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    /// Server-assigned identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Category this budget covers; `None` means overall budget.
    pub category_id: Option<String>,
    /// Spending cap for the period.
    pub amount: f64,
    /// Recurrence period.
    pub period: BudgetPeriod,
    /// Period start.
    pub start_date: DateTime<Utc>,
    /// Period end.
    pub end_date: DateTime<Utc>,
    /// Fraction of the cap at which to alert (0.0 to 1.0).
    pub alert_threshold: f64,
    /// Whether the budget is active.
    pub is_active: bool,

    // Computed fields, present only on the with-status shape.
    /// Amount spent so far in the period.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spending: Option<f64>,
    /// Amount left (negative when over budget).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining: Option<f64>,
    /// Spending as a percentage of the cap.
    #[serde(rename = "percentageUsed", skip_serializing_if = "Option::is_none")]
    pub percentage_used: Option<f64>,
    /// True when spending exceeds the cap.
    #[serde(rename = "isOverBudget", skip_serializing_if = "Option::is_none")]
    pub is_over_budget: Option<bool>,
    /// True when spending crossed the alert threshold.
    #[serde(rename = "isOverThreshold", skip_serializing_if = "Option::is_none")]
    pub is_over_threshold: Option<bool>,
    /// True when the client should surface an alert.
    #[serde(rename = "shouldAlert", skip_serializing_if = "Option::is_none")]
    pub should_alert: Option<bool>,
}

impl Budget {
    /// Returns true if this budget carries computed status fields.
    pub fn has_status(&self) -> bool {
        self.percentage_used.is_some()
    }
}

// ============================================================================
// Budget Draft
// ============================================================================

/// Client-authored budget data, sent on create and update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetDraft {
    /// Display name.
    pub name: String,
    /// Category this budget covers; `None` means overall budget.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    /// Spending cap for the period.
    pub amount: f64,
    /// Recurrence period.
    pub period: BudgetPeriod,
    /// Period start.
    pub start_date: DateTime<Utc>,
    /// Period end.
    pub end_date: DateTime<Utc>,
    /// Fraction of the cap at which to alert.
    pub alert_threshold: f64,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_with_status_shape() {
        let json = r#"{
            "_id": "b1",
            "name": "Groceries",
            "category_id": "groceries",
            "amount": 500.0,
            "period": "monthly",
            "start_date": "2025-01-01T00:00:00Z",
            "end_date": "2025-01-31T23:59:59Z",
            "alert_threshold": 0.8,
            "is_active": true,
            "spending": 520.0,
            "remaining": -20.0,
            "percentageUsed": 104.0,
            "isOverBudget": true
        }"#;

        let b: Budget = serde_json::from_str(json).unwrap();
        assert!(b.has_status());
        assert_eq!(b.period, BudgetPeriod::Monthly);
        assert_eq!(b.is_over_budget, Some(true));
        assert_eq!(b.remaining, Some(-20.0));
    }

    #[test]
    fn test_deserialize_bare_shape() {
        let json = r#"{
            "_id": "b2",
            "name": "Overall",
            "category_id": null,
            "amount": 2000.0,
            "period": "monthly",
            "start_date": "2025-01-01T00:00:00Z",
            "end_date": "2025-01-31T23:59:59Z",
            "alert_threshold": 0.9,
            "is_active": true
        }"#;

        let b: Budget = serde_json::from_str(json).unwrap();
        assert!(!b.has_status());
        assert!(b.category_id.is_none());
    }
}
