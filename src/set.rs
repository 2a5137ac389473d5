//! Ordered callback storage for a single event name.
//!
//! This module provides [`SubscriptionSet`], the per-event-name storage used
//! by the [`Emitter`](crate::Emitter). Each event name that has at least one
//! live subscription owns one set; the emitter drops the set entirely when
//! its last subscription is released, so an empty set never persists in the
//! registry.
//!
//! # Ordering
//!
//! Entries are kept in a `Vec` in subscription order. `insert` appends,
//! `remove` closes the gap without disturbing the relative order of the
//! remaining entries, and `snapshot` yields the entries in that same order.
//! This is what gives `emit` its first-subscribed, first-invoked guarantee.

use std::sync::Arc;

use crate::subscription::Id;

/// A registered callback, shared between the set and any in-flight dispatch
/// snapshot. Callbacks take the emitted payload by reference, so every
/// subscriber of one emission observes the same value.
pub(crate) type Callback<A> = Arc<dyn Fn(&A) + Send + Sync>;

/// Insertion-ordered `(Id, callback)` storage for one event name.
///
/// Identity of an entry is its [`Id`], not the callback value, so the same
/// callback registered twice yields two independently removable entries.
pub(crate) struct SubscriptionSet<A: 'static> {
    /// Entries in subscription order.
    entries: Vec<Entry<A>>,
}

/// One registration: the subscription id and the callback it maps to.
struct Entry<A: 'static> {
    id: Id,
    callback: Callback<A>,
}

impl<A: 'static> SubscriptionSet<A> {
    /// Construct an empty set.
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a callback at the end of the subscription order.
    ///
    /// Ids are allocated from a monotonic counter and never reused, so an
    /// id can only be inserted once.
    pub(crate) fn insert(&mut self, id: Id, callback: Callback<A>) {
        debug_assert!(
            !self.entries.iter().any(|entry| entry.id == id),
            "duplicate subscription id: {id:?}"
        );
        self.entries.push(Entry { id, callback });
    }

    /// Remove the entry with the given id, preserving the order of the rest.
    ///
    /// Returns `true` if an entry was removed, `false` if the id was not
    /// present (already released).
    pub(crate) fn remove(&mut self, id: Id) -> bool {
        match self.entries.iter().position(|entry| entry.id == id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Clone the `(Id, callback)` pairs in subscription order.
    ///
    /// The clones are `Arc` handles, so the snapshot stays valid and
    /// invocable after the set itself is mutated or dropped.
    pub(crate) fn snapshot(&self) -> Vec<(Id, Callback<A>)> {
        self.entries
            .iter()
            .map(|entry| (entry.id, Arc::clone(&entry.callback)))
            .collect()
    }

    /// Number of live subscriptions in this set.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set has no live subscriptions.
    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<A: 'static> Default for SubscriptionSet<A> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> Callback<Vec<i32>> {
        Arc::new(|_| {})
    }

    // ==================== Insertion Order ====================

    #[test]
    fn new_set_is_empty() {
        let set = SubscriptionSet::<Vec<i32>>::new();

        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn insert_preserves_subscription_order() {
        // Given
        let mut set = SubscriptionSet::<Vec<i32>>::new();

        // When
        set.insert(Id::from(0), noop());
        set.insert(Id::from(1), noop());
        set.insert(Id::from(2), noop());

        // Then
        let ids: Vec<_> = set.snapshot().into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![Id::from(0), Id::from(1), Id::from(2)]);
    }

    // ==================== Removal ====================

    #[test]
    fn remove_keeps_remaining_order() {
        // Given
        let mut set = SubscriptionSet::<Vec<i32>>::new();
        set.insert(Id::from(0), noop());
        set.insert(Id::from(1), noop());
        set.insert(Id::from(2), noop());

        // When
        assert!(set.remove(Id::from(1)));

        // Then
        let ids: Vec<_> = set.snapshot().into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![Id::from(0), Id::from(2)]);
    }

    #[test]
    fn remove_absent_id_returns_false() {
        // Given
        let mut set = SubscriptionSet::<Vec<i32>>::new();
        set.insert(Id::from(0), noop());

        // When / Then
        assert!(!set.remove(Id::from(7)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn remove_last_entry_empties_set() {
        // Given
        let mut set = SubscriptionSet::<Vec<i32>>::new();
        set.insert(Id::from(0), noop());

        // When
        assert!(set.remove(Id::from(0)));

        // Then
        assert!(set.is_empty());
    }

    // ==================== Snapshot ====================

    #[test]
    fn snapshot_is_unaffected_by_later_mutation() {
        // Given
        let mut set = SubscriptionSet::<Vec<i32>>::new();
        set.insert(Id::from(0), noop());
        set.insert(Id::from(1), noop());

        // When
        let snapshot = set.snapshot();
        set.remove(Id::from(1));

        // Then - snapshot still holds both entries
        assert_eq!(snapshot.len(), 2);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn snapshot_callbacks_remain_invocable() {
        // Given
        use std::sync::atomic::{AtomicUsize, Ordering};

        let calls = Arc::new(AtomicUsize::new(0));
        let calls_in_cb = Arc::clone(&calls);

        let mut set = SubscriptionSet::<Vec<i32>>::new();
        set.insert(
            Id::from(0),
            Arc::new(move |_| {
                calls_in_cb.fetch_add(1, Ordering::Relaxed);
            }),
        );

        // When - drop the set, then invoke from the snapshot
        let snapshot = set.snapshot();
        drop(set);
        for (_, callback) in &snapshot {
            callback(&vec![1, 2]);
        }

        // Then
        assert_eq!(calls.load(Ordering::Relaxed), 1);
    }
}
