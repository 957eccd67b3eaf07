//! Expense list cache.

use spendtrack_core::{ApiError, Expense};

/// Local expense list state: items, loading flag, last error.
///
/// CRUD results from the server are applied directly; there is no
/// optimistic phase here since expense mutations only resolve through
/// their confirmed server copies.
#[derive(Debug, Default)]
pub struct ExpenseList {
    items: Vec<Expense>,
    loading: bool,
    error: Option<ApiError>,
}

impl ExpenseList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current entries, newest first.
    pub fn items(&self) -> &[Expense] {
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
    pub fn set_items(&mut self, items: Vec<Expense>) {
        self.items = items;
        self.loading = false;
        self.error = None;
    }

    /// Records a failed fetch or mutation.
    pub fn set_error(&mut self, error: ApiError) {
        self.loading = false;
        self.error = Some(error);
    }

    /// Prepends a server-confirmed new expense.
    pub fn apply_created(&mut self, expense: Expense) {
        self.items.insert(0, expense);
    }

    /// Replaces the matching entry with the server's updated copy; unknown
    /// ids are ignored.
    pub fn apply_updated(&mut self, expense: Expense) {
        if let Some(entry) = self.items.iter_mut().find(|e| e.id == expense.id) {
            *entry = expense;
        }
    }

    /// Removes the entry with the given id.
    pub fn apply_deleted(&mut self, id: &str) {
        self.items.retain(|e| e.id != id);
    }
}

// ============================================================================
// Tests
// ============================================================================
