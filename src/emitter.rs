//! Central registry routing emitted events to their subscribers.
//!
//! This module provides [`Emitter`], which owns the mapping from event name
//! to that name's ordered [`SubscriptionSet`]. It handles registration via
//! [`subscribe()`](Emitter::subscribe), synchronous dispatch via
//! [`emit()`](Emitter::emit), and hands out [`Subscription`] handles that
//! deregister themselves via `release()`.
//!
//! # Payload Type
//!
//! `Emitter` is generic over one argument-payload type `A`. Every callback
//! on the emitter receives `&A`; emissions with differing arity are
//! expressed through the payload type itself (a tuple, a `Vec`, a domain
//! struct). This trades the fully dynamic argument lists of looser systems
//! for a statically checked dispatch signature.
//!
//! # Thread Safety
//!
//! The registry uses sharded locking via `DashMap`, and subscription ids
//! come from an atomic counter, so `subscribe`, `emit`, and `release` all
//! take `&self` and may be called from any thread. `emit` snapshots the
//! name's subscription list under the shard lock and invokes the callbacks
//! after dropping it, which means:
//!
//! - callbacks may freely call `subscribe`, `release`, or even `emit` on the
//!   same emitter without deadlocking;
//! - subscriptions added or released during a dispatch never affect the
//!   dispatch already in flight, only subsequent ones.
//!
//! # Example
//!
//! ```rust,ignore
//! let emitter = Emitter::<(i32, i32)>::new();
//!
//! let sub = emitter.subscribe("moved", |&(x, y)| {
//!     println!("moved to {x}, {y}");
//! });
//!
//! emitter.emit("moved", &(3, 4));
//! sub.release();
//! ```

use std::fmt;
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use dashmap::DashMap;

use crate::set::SubscriptionSet;
use crate::subscription::{Id, Subscription};

/// Map from event name to the ordered set of its live subscriptions.
///
/// Invariant: a name is present if and only if its set is non-empty.
/// `subscribe` creates the entry, `release` removes it when the last
/// subscription goes away.
pub(crate) type EventMap<A> = DashMap<String, SubscriptionSet<A>>;

/// A named-event emitter.
///
/// Routes each [`emit()`](Self::emit) to every callback currently
/// registered for the event name, in subscription order. Registration
/// identity is a per-emitter [`Id`], so the same callback value subscribed
/// twice yields two independent registrations.
pub struct Emitter<A: 'static> {
    /// Registered subscriptions, keyed by event name. Shared with the
    /// handles via `Weak` so `release` can reach back into the registry.
    events: Arc<EventMap<A>>,

    /// Next subscription identifier. Monotonic, never reused.
    next_id: AtomicU64,
}

impl<A: 'static> Emitter<A> {
    /// Construct a new emitter with no subscriptions.
    pub fn new() -> Self {
        Self {
            events: Arc::new(DashMap::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Register `callback` for `event_name`.
    ///
    /// The callback is appended at the end of the name's subscription order
    /// and stays registered until the returned [`Subscription`] is
    /// released. Dropping the handle does not deregister. Always succeeds.
    pub fn subscribe(
        &self,
        event_name: impl Into<String>,
        callback: impl Fn(&A) + Send + Sync + 'static,
    ) -> Subscription<A> {
        let event_name = event_name.into();
        let id = Id::new(self.next_id.fetch_add(1, Ordering::Relaxed));

        self.events
            .entry(event_name.clone())
            .or_default()
            .insert(id, Arc::new(callback));

        log::trace!("subscribed {} to '{}'", id.value(), event_name);
        Subscription::new(Arc::downgrade(&self.events), event_name, id)
    }

    /// Invoke every callback currently registered for `event_name`, in
    /// subscription order, passing `args` to each.
    ///
    /// A name with no subscriptions (never subscribed, or fully released)
    /// is a no-op, not an error.
    ///
    /// The subscription list is snapshotted before the first callback runs:
    /// releases and subscribes performed by the callbacks themselves take
    /// effect on the next emission, never the current one.
    ///
    /// A panicking callback is not caught; the panic propagates to the
    /// caller and the remaining callbacks of this emission are skipped.
    pub fn emit(&self, event_name: &str, args: &A) {
        let Some(set) = self.events.get(event_name) else {
            return;
        };
        let snapshot = set.snapshot();
        // Drop the shard lock before dispatch so callbacks can re-enter
        // this emitter.
        drop(set);

        log::trace!(
            "emitting '{}' to {} subscriber(s)",
            event_name,
            snapshot.len()
        );
        for (_, callback) in snapshot {
            callback(args);
        }
    }

    /// Number of live subscriptions for `event_name`.
    #[inline]
    pub fn subscriber_count(&self, event_name: &str) -> usize {
        self.events
            .get(event_name)
            .map(|set| set.len())
            .unwrap_or(0)
    }

    /// Whether `event_name` has at least one live subscription.
    #[inline]
    pub fn has_subscribers(&self, event_name: &str) -> bool {
        self.events.contains_key(event_name)
    }

    /// Number of event names with at least one live subscription.
    #[inline]
    pub fn event_count(&self) -> usize {
        self.events.len()
    }
}

impl<A: 'static> Default for Emitter<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: 'static> fmt::Debug for Emitter<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("event_count", &self.event_count())
            .finish()
    }
}
