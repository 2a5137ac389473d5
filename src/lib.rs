//! A minimal named-event emitter.
//!
//! This crate provides [`Emitter`], a publish/subscribe registry that routes
//! emitted events to callbacks registered under a string event name.
//! Subscribing returns a [`Subscription`] handle; releasing the handle
//! deregisters exactly that callback and nothing else.
//!
//! # Overview
//!
//! - **[`Emitter`]**: owns the mapping from event name to its ordered set of
//!   live subscriptions. `subscribe` appends, `emit` dispatches in
//!   subscription order.
//! - **[`Subscription`]**: opaque handle identifying one registration for one
//!   event name. Its only operation is `release()`, which is idempotent.
//!
//! # Dispatch Model
//!
//! Dispatch is synchronous: `emit` invokes every callback currently
//! registered for the name, in insertion order, on the calling thread, and
//! returns once all of them have run. Callbacks registered or released while
//! an `emit` is in flight never affect that `emit` call; they take effect on
//! the next one.
//!
//! # Example
//!
//! ```rust,ignore
//! use emitter::Emitter;
//!
//! let emitter = Emitter::<Vec<i32>>::new();
//!
//! let sub = emitter.subscribe("add", |args| {
//!     println!("add called with {:?}", args);
//! });
//!
//! emitter.emit("add", &vec![1, 2]); // callback fires with [1, 2]
//!
//! sub.release();
//! emitter.emit("add", &vec![3, 4]); // no subscribers, no-op
//! ```

pub mod emitter;
pub mod subscription;

pub(crate) mod set;

pub use emitter::Emitter;
pub use subscription::{Id as SubscriptionId, Subscription};
