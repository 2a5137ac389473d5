//! Subscription identifiers and handles.
//!
//! This module provides the two types that identify a single registration:
//!
//! - **[`Id`]**: a unique numeric identifier allocated by the
//!   [`Emitter`](crate::Emitter) when a callback is registered. Ids are
//!   monotonic and never reused, so the id alone is enough to tell two
//!   registrations apart even when they hold the same callback.
//!
//! - **[`Subscription`]**: the opaque handle returned by `subscribe`. It
//!   carries a weak back-reference to the emitter's registry and exposes one
//!   operation, [`release()`](Subscription::release), which deregisters
//!   exactly this registration.
//!
//! # Lifecycle
//!
//! A subscription is either active or released. `release()` performs the
//! only transition; releasing an already-released handle, or a handle whose
//! emitter has been dropped, is a harmless no-op.

use std::fmt;
use std::sync::Weak;

use crate::emitter::EventMap;

/// A unique identifier for one subscription within one emitter.
///
/// Used as the lookup key in the event name's subscription set, in place of
/// the callback value itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id(u64);

impl Id {
    /// Construct a new Id from a raw u64 value.
    #[inline]
    pub(crate) const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw value of this id.
    #[inline]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for Id {
    #[inline]
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

/// A handle to one callback registration for one event name.
///
/// Returned by [`Emitter::subscribe`](crate::Emitter::subscribe). Dropping
/// the handle does *not* deregister the callback; only
/// [`release()`](Self::release) does.
pub struct Subscription<A: 'static> {
    /// Back-reference to the owning emitter's registry. Weak so a handle
    /// that outlives its emitter degrades to an inert token.
    events: Weak<EventMap<A>>,

    /// The event name this subscription is registered under.
    event_name: String,

    /// The unique identifier of this registration.
    id: Id,
}

impl<A: 'static> Subscription<A> {
    /// Construct a handle for a registration the emitter just inserted.
    pub(crate) fn new(events: Weak<EventMap<A>>, event_name: String, id: Id) -> Self {
        Self {
            events,
            event_name,
            id,
        }
    }

    /// Get the id of this subscription.
    #[inline]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Get the event name this subscription is registered under.
    #[inline]
    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    /// Deregister this subscription.
    ///
    /// Removes this registration from its event name's set, if still
    /// present. If that leaves the set empty, the event name is removed from
    /// the emitter's registry entirely, so a fully released name behaves
    /// identically to one that was never subscribed.
    ///
    /// Idempotent: releasing twice, or releasing after the emitter has been
    /// dropped, has no effect and raises no error. An `emit` already
    /// dispatching on another thread may still invoke the callback it
    /// snapshotted before this release took effect.
    pub fn release(&self) {
        let Some(events) = self.events.upgrade() else {
            // Emitter is gone, and its registry with it.
            return;
        };

        let mut removed = false;
        let mut emptied = false;
        if let Some(mut set) = events.get_mut(&self.event_name) {
            removed = set.remove(self.id);
            emptied = set.is_empty();
        }

        // The guard above is dropped before touching the map again. The
        // emptiness check is repeated under the shard lock since another
        // thread may have subscribed in between.
        if emptied {
            events.remove_if(&self.event_name, |_, set| set.is_empty());
        }

        if removed {
            log::trace!(
                "released subscription {} for '{}'",
                self.id.value(),
                self.event_name
            );
        }
    }
}

impl<A: 'static> fmt::Debug for Subscription<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("event_name", &self.event_name)
            .field("id", &self.id)
            .finish()
    }
}

#[test]
fn id_from_u64() {
    // Given
    let id1 = Id::from(42);
    let id2 = Id::from(1000);

    // Then
    assert_eq!(id1.value(), 42);
    assert_eq!(id2.value(), 1000);
}

#[test]
fn id_ordering_follows_allocation_order() {
    // Given
    let first = Id::new(0);
    let second = Id::new(1);

    // Then
    assert!(first < second);
    assert_ne!(first, second);
}

#[test]
fn subscription_debug_names_the_event() {
    // Given
    let emitter = crate::Emitter::<Vec<i32>>::new();
    let sub = emitter.subscribe("add", |_| {});

    // Then
    let rendered = format!("{sub:?}");
    assert!(rendered.contains("add"));
}
