//! Budget list cache.

use spendtrack_core::{ApiError, Budget};

/// Local budget list state.
///
/// The same list holds plain budgets or status-enriched ones (the
/// `/budgets/with-status` shape); [`Budget`] carries the computed fields as
/// options either way.
#[derive(Debug, Default)]
pub struct BudgetList {
    items: Vec<Budget>,
    loading: bool,
    error: Option<ApiError>,
}

impl BudgetList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current entries.
    pub fn items(&self) -> &[Budget] {
        &self.items
    }

    /// True while a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Last recorded error, if any.
    pub fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }

    /// Marks a fetch as started.
    pub fn set_loading(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Replaces the list with a fetched page.
    pub fn set_items(&mut self, items: Vec<Budget>) {
        self.items = items;
        self.loading = false;
        self.error = None;
    }

    /// Records a failed fetch or mutation.
    pub fn set_error(&mut self, error: ApiError) {
        self.loading = false;
        self.error = Some(error);
    }

    /// Prepends a server-confirmed new budget.
    pub fn apply_created(&mut self, budget: Budget) {
        self.items.insert(0, budget);
    }

    /// Replaces the matching entry with the server's updated copy.
    pub fn apply_updated(&mut self, budget: Budget) {
        if let Some(entry) = self.items.iter_mut().find(|b| b.id == budget.id) {
            *entry = budget;
        }
    }

    /// Removes the entry with the given id.
    pub fn apply_deleted(&mut self, id: &str) {
        self.items.retain(|b| b.id != id);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use spendtrack_core::BudgetPeriod;

    fn budget(id: &str, amount: f64) -> Budget {
        Budget {
            id: id.to_string(),
            name: "Groceries".to_string(),
            category_id: None,
            amount,
            period: BudgetPeriod::Monthly,
            start_date: Utc::now(),
            end_date: Utc::now(),
            alert_threshold: 0.8,
            is_active: true,
            spending: None,
            remaining: None,
            percentage_used: None,
            is_over_budget: None,
            is_over_threshold: None,
            should_alert: None,
        }
    }

    #[test]
    fn test_crud_application() {
        let mut list = BudgetList::new();
        list.set_items(vec![budget("b1", 100.0)]);

        list.apply_created(budget("b2", 50.0));
        assert_eq!(list.items()[0].id, "b2");

        list.apply_updated(budget("b1", 120.0));
        assert_eq!(list.items()[1].amount, 120.0);

        list.apply_deleted("b2");
        assert_eq!(list.items().len(), 1);
        assert_eq!(list.items()[0].id, "b1");
    }

    #[test]
    fn test_status_enriched_items() {
        let mut enriched = budget("b1", 100.0);
        enriched.spending = Some(90.0);
        enriched.percentage_used = Some(90.0);
        enriched.is_over_threshold = Some(true);

        let mut list = BudgetList::new();
        list.set_items(vec![enriched]);

        assert!(list.items()[0].has_status());
    }
}
