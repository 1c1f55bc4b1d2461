#![forbid(unsafe_code)]

//! Step-driven signal broadcaster with deferred subscription.
//!
//! # Design
//!
//! [`Broadcaster<T>`] owns the last accepted value of a derived signal and an
//! ordered set of subscriber callbacks. Once per simulation step the driver
//! calls [`advance_step`](Broadcaster::advance_step) and then
//! [`sample`](Broadcaster::sample) with the freshly computed value. If the
//! value differs from the stored one (per the equality policy), every active
//! subscriber is notified with the new value, in activation order.
//!
//! Subscribers may also join *deferred*: a subscriber registered with
//! [`subscribe_deferred`](Broadcaster::subscribe_deferred) stays pending for
//! its step delay and only then starts receiving notifications, without
//! disturbing already-active subscribers and without replaying the current
//! value to the late joiner.
//!
//! # Ordering
//!
//! Within one step, pending promotion happens first (`advance_step`), then
//! sampling (`sample`). A subscriber deferred by `n` steps is promoted at the
//! start of step `n + 1`, so the first notification it can observe is step
//! `n + 1`'s changed value. The sample coinciding with its last pending step
//! never reaches it.
//!
//! # Invariants
//!
//! 1. `version` increments exactly once per accepted (changed) sample.
//! 2. Notification dispatch iterates a snapshot of the active set taken at
//!    accept time: callbacks may subscribe or unsubscribe freely without
//!    skipping or double-notifying a still-registered subscriber.
//! 3. A subscriber removed during dispatch (including by its own callback)
//!    receives no further notifications, in this or any later sample.
//! 4. A subscriber added during dispatch first hears the next accepted sample.
//!
//! # Failure Modes
//!
//! - **Callback panics**: the panic unwinds to the driver of `sample`. The
//!   broadcaster establishes no isolation boundary and performs no retries.
//! - **Unknown handle passed to `unsubscribe`**: no-op, returns `false`.

use std::cell::RefCell;
use std::rc::Rc;

use crate::compare::{self, Comparator};
use crate::subscription::Subscription;

/// Subscriber callback stored by the broadcaster.
type Callback<T> = Rc<dyn Fn(&T)>;

/// Identifies a subscriber (active or pending) for later removal.
///
/// Handles are never reused within one broadcaster, so a stale handle held
/// after `unsubscribe` stays harmless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberHandle(u64);

/// An active subscriber: receives every accepted sample.
struct ActiveEntry<T> {
    id: u64,
    callback: Callback<T>,
}

/// A pending subscriber: joins the active set once `remaining` steps elapse.
struct PendingEntry<T> {
    id: u64,
    callback: Callback<T>,
    remaining: u32,
}

/// Shared interior for [`Broadcaster<T>`].
struct BroadcasterInner<T> {
    /// Last accepted value. Seeded at construction.
    value: T,
    /// Bumped once per accepted sample.
    version: u64,
    /// Equality policy: `true` means "unchanged, do not notify".
    unchanged: Comparator<T>,
    /// Active subscribers in activation order.
    active: Vec<ActiveEntry<T>>,
    /// Deferred subscribers in registration order.
    pending: Vec<PendingEntry<T>>,
    /// Next handle id.
    next_id: u64,
}

/// A step-driven, change-detecting signal broadcaster.
///
/// Cloning a `Broadcaster` creates a new handle to the **same** inner state.
///
/// # Invariants
///
/// 1. Exactly one driver calls `advance_step` then `sample` per step.
/// 2. Subscribers are notified in activation order.
/// 3. A sample equal to the stored value is a complete no-op.
pub struct Broadcaster<T> {
    inner: Rc<RefCell<BroadcasterInner<T>>>,
}

impl<T> Clone for Broadcaster<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Broadcaster<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Broadcaster")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("active", &inner.active.len())
            .field("pending", &inner.pending.len())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

impl<T: Clone + PartialEq + 'static> Broadcaster<T> {
    /// Create a broadcaster seeded with `initial`, using exact equality.
    ///
    /// The seed is the baseline for change detection: the first `sample`
    /// equal to it produces no notification.
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self::with_comparator(initial, compare::exact())
    }
}

impl<T: Clone + 'static> Broadcaster<T> {
    /// Create a broadcaster with a caller-supplied equality policy.
    ///
    /// `unchanged(previous, candidate)` returning `true` suppresses the
    /// notification. Float signals typically pass
    /// [`epsilon_f32`](crate::compare::epsilon_f32) here so that
    /// inconsequential per-step deltas do not fan out every frame.
    #[must_use]
    pub fn with_comparator(initial: T, unchanged: Comparator<T>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(BroadcasterInner {
                value: initial,
                version: 0,
                unchanged,
                active: Vec::new(),
                pending: Vec::new(),
                next_id: 0,
            })),
        }
    }
}

// ---------------------------------------------------------------------------
// Subscription management
// ---------------------------------------------------------------------------

impl<T: Clone + 'static> Broadcaster<T> {
    /// Add an active subscriber. It hears the next accepted sample.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> SubscriberHandle {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.active.push(ActiveEntry {
            id,
            callback: Rc::new(callback),
        });
        SubscriberHandle(id)
    }

    /// Add a subscriber that stays pending for `step_delay` steps.
    ///
    /// The subscriber is promoted during the `step_delay + 1`-th call to
    /// [`advance_step`](Self::advance_step); with the documented
    /// promote-then-sample ordering, the first value it can hear is that
    /// step's accepted sample. A `step_delay` of zero activates on the very
    /// next `advance_step`.
    pub fn subscribe_deferred(
        &self,
        callback: impl Fn(&T) + 'static,
        step_delay: u32,
    ) -> SubscriberHandle {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.pending.push(PendingEntry {
            id,
            callback: Rc::new(callback),
            remaining: step_delay,
        });
        SubscriberHandle(id)
    }

    /// Remove a subscriber, active or pending.
    ///
    /// Unknown (or already removed) handles are a no-op; returns whether a
    /// subscriber was actually removed. Safe to call during notification
    /// dispatch, including from the removed subscriber's own callback.
    pub fn unsubscribe(&self, handle: SubscriberHandle) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.active.len() + inner.pending.len();
        inner.active.retain(|e| e.id != handle.0);
        inner.pending.retain(|e| e.id != handle.0);
        inner.active.len() + inner.pending.len() < before
    }

    /// Wrap `handle` in an RAII [`Subscription`] that unsubscribes on drop.
    ///
    /// The guard holds a weak reference: dropping it after the broadcaster
    /// itself is gone is inert.
    #[must_use]
    pub fn guard(&self, handle: SubscriberHandle) -> Subscription {
        let weak = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                let mut inner = inner.borrow_mut();
                inner.active.retain(|e| e.id != handle.0);
                inner.pending.retain(|e| e.id != handle.0);
            }
        })
    }
}

// ---------------------------------------------------------------------------
// Step clock and sampling
// ---------------------------------------------------------------------------

impl<T: Clone + 'static> Broadcaster<T> {
    /// Advance the step clock, promoting pending subscribers whose delay has
    /// elapsed. Call once per step, strictly before that step's `sample`.
    pub fn advance_step(&self) {
        let mut inner = self.inner.borrow_mut();
        let mut i = 0;
        while i < inner.pending.len() {
            if inner.pending[i].remaining == 0 {
                let entry = inner.pending.remove(i);
                inner.active.push(ActiveEntry {
                    id: entry.id,
                    callback: entry.callback,
                });
            } else {
                inner.pending[i].remaining -= 1;
                i += 1;
            }
        }
    }

    /// Feed the freshly computed signal value for this step.
    ///
    /// If the equality policy reports the value unchanged, this is a no-op.
    /// Otherwise the value is stored, the version bumped, and every active
    /// subscriber notified in activation order with a reference to the new
    /// value. Dispatch iterates a snapshot of the active set; liveness is
    /// re-checked before each call so removal mid-dispatch takes effect
    /// immediately.
    pub fn sample(&self, value: T) {
        let snapshot: Vec<(u64, Callback<T>)> = {
            let mut inner = self.inner.borrow_mut();
            if (inner.unchanged)(&inner.value, &value) {
                return;
            }
            inner.value = value.clone();
            inner.version += 1;
            inner
                .active
                .iter()
                .map(|e| (e.id, Rc::clone(&e.callback)))
                .collect()
        };
        for (id, callback) in snapshot {
            let live = self.inner.borrow().active.iter().any(|e| e.id == id);
            if live {
                callback(&value);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Accessors
// ---------------------------------------------------------------------------

impl<T: Clone + 'static> Broadcaster<T> {
    /// Clone of the last accepted value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Access the last accepted value by reference without cloning.
    ///
    /// # Panics
    ///
    /// Panics if the closure re-enters this broadcaster (re-entrant borrow).
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Number of accepted samples so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().active.len()
    }

    /// Number of subscribers still waiting out their step delay.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.inner.borrow().pending.len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
