//! Optimistic notification feed.
//!
//! The feed applies user mutations locally before the server confirms them:
//! marking read flips the entry and decrements the unread counter
//! immediately, deletion removes the entry immediately. Confirmation swaps
//! in the server's canonical copy (idempotent); failure records the error
//! and rolls the local change back only where [`RollbackPolicy`] says so.
//! The default policy never rolls back, keeping the optimistic state on the
//! grounds that the next full fetch reconciles it.
//!
//! The unread counter is a separate integer, floored at zero, and replaced
//! wholesale by the dedicated unread-count fetch.

use std::collections::HashMap;

use spendtrack_core::{ApiError, Notification};
use tracing::{debug, warn};

// ============================================================================
// Rollback Policy
// ============================================================================

/// Which failed optimistic mutations get rolled back.
#[derive(Debug, Clone, Copy, Default)]
pub struct RollbackPolicy {
    /// Roll back a failed single mark-as-read.
    pub mark_as_read: bool,
    /// Roll back a failed mark-all-as-read.
    pub mark_all_as_read: bool,
    /// Reinsert a notification whose deletion failed.
    pub delete_notification: bool,
}

impl RollbackPolicy {
    /// Policy that rolls back every failed mutation.
    pub fn all() -> Self {
        Self {
            mark_as_read: true,
            mark_all_as_read: true,
            delete_notification: true,
        }
    }
}

// ============================================================================
// Notification Feed
// ============================================================================

/// Local notification state with optimistic mutations.
#[derive(Debug, Default)]
pub struct NotificationFeed {
    items: Vec<Notification>,
    unread_count: u32,
    loading: bool,
    error: Option<ApiError>,
    policy: RollbackPolicy,
    // Pending optimistic state, keyed by notification id.
    pending_marks: HashMap<String, bool>,
    pending_all: Option<Vec<String>>,
    pending_deletes: HashMap<String, (usize, Notification)>,
}

impl NotificationFeed {
    /// Creates an empty feed with the default (no-rollback) policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty feed with an explicit rollback policy.
    pub fn with_policy(policy: RollbackPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Current entries, newest first.
    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    /// Current unread counter.
    pub fn unread_count(&self) -> u32 {
        self.unread_count
    }

    /// True while a feed fetch is in flight.
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

    /// Replaces the feed with a fetched list; pending optimistic state is
    /// discarded since the server copy is now authoritative.
    pub fn set_items(&mut self, items: Vec<Notification>) {
        self.items = items;
        self.loading = false;
        self.error = None;
        self.pending_marks.clear();
        self.pending_all = None;
        self.pending_deletes.clear();
    }

    /// Records a failed fetch.
    pub fn set_error(&mut self, error: ApiError) {
        self.loading = false;
        self.error = Some(error);
    }

    /// Replaces the unread counter wholesale.
    pub fn set_unread_count(&mut self, count: u32) {
        self.unread_count = count;
    }

    /// Prepends a freshly pushed notification, bumping the counter when it
    /// arrives unread.
    pub fn add_notification(&mut self, notification: Notification) {
        if !notification.is_read {
            self.unread_count = self.unread_count.saturating_add(1);
        }
        self.items.insert(0, notification);
    }

    // ------------------------------------------------------------------
    // mark_as_read
    // ------------------------------------------------------------------

    /// Optimistically marks one notification read.
    pub fn mark_as_read(&mut self, id: &str) {
        let Some(entry) = self.items.iter_mut().find(|n| n.id == id) else {
            return;
        };
        if entry.is_read {
            return;
        }

        entry.is_read = true;
        self.unread_count = self.unread_count.saturating_sub(1);
        self.pending_marks.insert(id.to_string(), true);
        debug!(id = %id, unread = self.unread_count, "Optimistically marked read");
    }

    /// Confirms a mark-as-read with the server's canonical copy.
    pub fn confirm_mark_as_read(&mut self, server: Notification) {
        self.pending_marks.remove(&server.id);
        if let Some(entry) = self.items.iter_mut().find(|n| n.id == server.id) {
            *entry = server;
        }
    }

    /// Records a failed mark-as-read, rolling back per policy.
    pub fn fail_mark_as_read(&mut self, id: &str, error: ApiError) {
        let was_unread = self.pending_marks.remove(id).unwrap_or(false);

        if self.policy.mark_as_read && was_unread {
            if let Some(entry) = self.items.iter_mut().find(|n| n.id == id) {
                entry.is_read = false;
                self.unread_count = self.unread_count.saturating_add(1);
            }
        } else {
            warn!(id = %id, error = %error, "Mark-as-read failed, keeping optimistic state");
        }
        self.error = Some(error);
    }

    // ------------------------------------------------------------------
    // mark_all_as_read
    // ------------------------------------------------------------------

    /// Optimistically marks every notification read and zeroes the counter.
    pub fn mark_all_as_read(&mut self) {
        let mut flipped = Vec::new();
        for entry in &mut self.items {
            if !entry.is_read {
                entry.is_read = true;
                flipped.push(entry.id.clone());
            }
        }
        self.unread_count = 0;
        self.pending_all = Some(flipped);
    }

    /// Confirms a mark-all-as-read.
    pub fn confirm_mark_all_as_read(&mut self) {
        self.pending_all = None;
    }

    /// Records a failed mark-all-as-read, rolling back per policy.
    pub fn fail_mark_all_as_read(&mut self, error: ApiError) {
        let flipped = self.pending_all.take().unwrap_or_default();

        if self.policy.mark_all_as_read && !flipped.is_empty() {
            for entry in &mut self.items {
                if flipped.contains(&entry.id) {
                    entry.is_read = false;
                }
            }
            let restored = u32::try_from(flipped.len()).unwrap_or(u32::MAX);
            self.unread_count = self.unread_count.saturating_add(restored);
        } else {
            warn!(error = %error, "Mark-all-as-read failed, keeping optimistic state");
        }
        self.error = Some(error);
    }

    // ------------------------------------------------------------------
    // delete_notification
    // ------------------------------------------------------------------

    /// Optimistically removes a notification.
    pub fn delete_notification(&mut self, id: &str) {
        let Some(index) = self.items.iter().position(|n| n.id == id) else {
            return;
        };

        let removed = self.items.remove(index);
        if !removed.is_read {
            self.unread_count = self.unread_count.saturating_sub(1);
        }
        self.pending_deletes.insert(id.to_string(), (index, removed));
        debug!(id = %id, "Optimistically deleted notification");
    }

    /// Confirms a deletion.
    pub fn confirm_delete(&mut self, id: &str) {
        self.pending_deletes.remove(id);
    }

    /// Records a failed deletion, reinserting per policy.
    pub fn fail_delete(&mut self, id: &str, error: ApiError) {
        let pending = self.pending_deletes.remove(id);

        if self.policy.delete_notification {
            if let Some((index, removed)) = pending {
                if !removed.is_read {
                    self.unread_count = self.unread_count.saturating_add(1);
                }
                let index = index.min(self.items.len());
                self.items.insert(index, removed);
            }
        } else {
            warn!(id = %id, error = %error, "Delete failed, keeping optimistic state");
        }
        self.error = Some(error);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use spendtrack_core::NotificationKind;

    fn notification(id: &str, is_read: bool) -> Notification {
        Notification {
            id: id.to_string(),
            user_id: "u1".to_string(),
            kind: NotificationKind::BudgetAlert,
            title: "Budget alert".to_string(),
            message: "Groceries at 90%".to_string(),
            data: serde_json::Value::Null,
            is_read,
            is_pushed: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn feed_with(entries: Vec<Notification>, unread: u32) -> NotificationFeed {
        let mut feed = NotificationFeed::new();
        feed.set_items(entries);
        feed.set_unread_count(unread);
        feed
    }

    #[test]
    fn test_mark_as_read_flips_and_decrements() {
        let mut feed = feed_with(vec![notification("n1", false), notification("n2", true)], 1);

        feed.mark_as_read("n1");

        assert!(feed.items()[0].is_read);
        assert_eq!(feed.unread_count(), 0);
    }

    #[test]
    fn test_mark_as_read_on_read_entry_is_noop() {
        let mut feed = feed_with(vec![notification("n1", true)], 0);

        feed.mark_as_read("n1");
        assert_eq!(feed.unread_count(), 0);
    }

    #[test]
    fn test_counter_floors_at_zero() {
        let mut feed = feed_with(vec![notification("n1", false)], 0);

        // Counter and list can disagree transiently; the floor still holds.
        feed.mark_as_read("n1");
        feed.delete_notification("n1");
        assert_eq!(feed.unread_count(), 0);
    }

    #[test]
    fn test_counter_bounds_under_mutation_sequence() {
        let entries: Vec<_> = (0..5)
            .map(|i| notification(&format!("n{i}"), i % 2 == 0))
            .collect();
        let unread = 2;
        let mut feed = feed_with(entries, unread);

        feed.mark_as_read("n1");
        feed.mark_as_read("n1");
        feed.delete_notification("n3");
        feed.mark_all_as_read();
        feed.delete_notification("n0");
        feed.add_notification(notification("n9", false));

        assert!(feed.unread_count() <= unread + 1);
    }

    #[test]
    fn test_failure_without_rollback_keeps_optimistic_state() {
        let mut feed = feed_with(vec![notification("n1", false)], 1);

        feed.mark_as_read("n1");
        feed.fail_mark_as_read("n1", ApiError::unknown("boom"));

        assert!(feed.items()[0].is_read);
        assert_eq!(feed.unread_count(), 0);
        assert!(feed.error().is_some());
    }

    #[test]
    fn test_failure_with_rollback_restores_state() {
        let mut feed = NotificationFeed::with_policy(RollbackPolicy::all());
        feed.set_items(vec![notification("n1", false)]);
        feed.set_unread_count(1);

        feed.mark_as_read("n1");
        feed.fail_mark_as_read("n1", ApiError::unknown("boom"));

        assert!(!feed.items()[0].is_read);
        assert_eq!(feed.unread_count(), 1);
    }

    #[test]
    fn test_confirm_swaps_in_server_copy() {
        let mut feed = feed_with(vec![notification("n1", false)], 1);

        feed.mark_as_read("n1");
        let mut server = notification("n1", true);
        server.title = "Updated".to_string();
        feed.confirm_mark_as_read(server.clone());
        // Confirming again is idempotent.
        feed.confirm_mark_as_read(server);

        assert!(feed.items()[0].is_read);
        assert_eq!(feed.items()[0].title, "Updated");
        assert_eq!(feed.unread_count(), 0);
    }

    #[test]
    fn test_mark_all_zeroes_counter_and_flips_all() {
        let mut feed = feed_with(
            vec![
                notification("n1", false),
                notification("n2", false),
                notification("n3", true),
            ],
            2,
        );

        feed.mark_all_as_read();

        assert_eq!(feed.unread_count(), 0);
        assert!(feed.items().iter().all(|n| n.is_read));
    }

    #[test]
    fn test_mark_all_rollback_restores_only_flipped() {
        let mut feed = NotificationFeed::with_policy(RollbackPolicy::all());
        feed.set_items(vec![notification("n1", false), notification("n2", true)]);
        feed.set_unread_count(1);

        feed.mark_all_as_read();
        feed.fail_mark_all_as_read(ApiError::unknown("boom"));

        assert!(!feed.items()[0].is_read);
        assert!(feed.items()[1].is_read);
        assert_eq!(feed.unread_count(), 1);
    }

    #[test]
    fn test_delete_rollback_reinserts_at_position() {
        let mut feed = NotificationFeed::with_policy(RollbackPolicy::all());
        feed.set_items(vec![
            notification("n1", true),
            notification("n2", false),
            notification("n3", true),
        ]);
        feed.set_unread_count(1);

        feed.delete_notification("n2");
        assert_eq!(feed.unread_count(), 0);

        feed.fail_delete("n2", ApiError::unknown("boom"));
        assert_eq!(feed.items()[1].id, "n2");
        assert_eq!(feed.unread_count(), 1);
    }

    #[test]
    fn test_add_notification_prepends_and_bumps_counter() {
        let mut feed = feed_with(vec![notification("n1", true)], 0);

        feed.add_notification(notification("n2", false));

        assert_eq!(feed.items()[0].id, "n2");
        assert_eq!(feed.unread_count(), 1);
    }

    #[test]
    fn test_set_items_discards_pending_state() {
        let mut feed = feed_with(vec![notification("n1", false)], 1);

        feed.mark_as_read("n1");
        feed.set_items(vec![notification("n1", false)]);
        // A stale failure after a refetch must not touch the fresh copy.
        feed.fail_mark_as_read("n1", ApiError::unknown("boom"));

        assert!(!feed.items()[0].is_read);
    }
}
