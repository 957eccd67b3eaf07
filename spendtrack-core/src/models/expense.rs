//! Expense types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Expense
// ============================================================================

/// A recorded expense as stored by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    /// Server-assigned identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Amount spent, in the account currency.
    pub amount: f64,
    /// Category identifier from the static taxonomy.
    pub category_id: String,
    /// Denormalized category display name, when the backend includes it.
    pub category_name: Option<String>,
    /// When the expense occurred.
    pub date: DateTime<Utc>,
    /// Free-form note.
    pub description: Option<String>,
    /// Payment method identifier from the static taxonomy.
    pub payment_method: String,
    /// Creation time.
    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<DateTime<Utc>>,
}

// ============================================================================
// Expense Draft
// ============================================================================

/// Client-authored expense data, sent on create and update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseDraft {
    /// Amount spent.
    pub amount: f64,
    /// Category identifier.
    pub category_id: String,
    /// When the expense occurred.
    pub date: DateTime<Utc>,
    /// Free-form note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Payment method identifier.
    pub payment_method: String,
}

// ============================================================================
// Expense Filters
// ============================================================================

/// Query filters for the expense list.
///
/// Dates travel as ISO-8601 strings because the backend compares them
/// lexically against stored timestamps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpenseFilters {
    /// Inclusive range start.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// Inclusive range end.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    /// Restrict to one category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
}

impl ExpenseFilters {
    /// Converts the filters into query parameters, skipping unset fields.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(start) = &self.start_date {
            params.push(("start_date".to_string(), start.clone()));
        }
        if let Some(end) = &self.end_date {
            params.push(("end_date".to_string(), end.clone()));
        }
        if let Some(category) = &self.category_id {
            params.push(("category_id".to_string(), category.clone()));
        }
        params
    }

    /// Returns true if no filter is set.
    pub fn is_empty(&self) -> bool {
        self.start_date.is_none() && self.end_date.is_none() && self.category_id.is_none()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_to_params() {
        let filters = ExpenseFilters {
            start_date: Some("2025-01-01T00:00:00Z".to_string()),
            end_date: None,
            category_id: Some("groceries".to_string()),
        };

        let params = filters.to_params();
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].0, "start_date");
        assert_eq!(params[1], ("category_id".to_string(), "groceries".to_string()));
    }

    #[test]
    fn test_empty_filters() {
        let filters = ExpenseFilters::default();
        assert!(filters.is_empty());
        assert!(filters.to_params().is_empty());
    }

    #[test]
    fn test_draft_skips_absent_description() {
        let draft = ExpenseDraft {
            amount: 12.5,
            category_id: "transport".to_string(),
            date: "2025-01-15T08:30:00Z".parse().unwrap(),
            description: None,
            payment_method: "card".to_string(),
        };

        let json = serde_json::to_value(&draft).unwrap();
        assert!(json.get("description").is_none());
        assert_eq!(json["amount"], 12.5);
    }
}
