#![forbid(unsafe_code)]

//! Change-tracking signal broadcast primitives for StepWire.
//!
//! This crate provides the step-driven reactive core:
//!
//! - [`Broadcaster`]: a shared, version-tracked signal sampled once per
//!   simulation step, notifying subscriber callbacks on change.
//! - [`Subscription`]: RAII guard that automatically unsubscribes on drop.
//! - [`compare`]: equality policies deciding when a sample counts as changed.
//!
//! # Architecture
//!
//! `Broadcaster<T>` uses `Rc<RefCell<..>>` for single-threaded shared
//! ownership. Exactly one external driver is expected to call
//! [`advance_step`](Broadcaster::advance_step) and then
//! [`sample`](Broadcaster::sample) once per tick; subscriber callbacks run
//! synchronously on the same thread and may re-enter `subscribe` /
//! `unsubscribe` freely.
//!
//! # Invariants
//!
//! 1. Version increments exactly once per sample that changes the value.
//! 2. Active subscribers are notified in activation order.
//! 3. A sample equal to the current value (per the comparator) is a no-op:
//!    no version bump, no notifications.
//! 4. A deferred subscriber stays pending for exactly its step delay and is
//!    promoted at the start of the following step, before that step's sample.
//! 5. Dropping a [`Subscription`] removes the callback before the next
//!    notification cycle.

pub mod broadcaster;
pub mod compare;
pub mod subscription;

pub use broadcaster::{Broadcaster, SubscriberHandle};
pub use compare::{Comparator, epsilon_f32, epsilon_f64, exact};
pub use subscription::Subscription;
