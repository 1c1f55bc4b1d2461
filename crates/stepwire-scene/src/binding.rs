#![forbid(unsafe_code)]

//! Broadcaster bindings over externally-owned scene state.
//!
//! Each binding holds provider closures that read positions or volumes owned
//! elsewhere (the binding never mutates them, and reads them exactly once per
//! step), derives its signal value, and feeds the result to an owned
//! [`Broadcaster`]. Subscribing happens through the broadcaster handle
//! returned by `signal()`.
//!
//! Drivers call [`SignalBinding::advance_step`] then
//! [`SignalBinding::sample`] once per step, in that order.

use glam::Vec3;

use stepwire_signal::{Broadcaster, Comparator, compare};

use crate::spatial::Aabb;

/// Per-step signal source driven by an external tick.
pub trait SignalBinding {
    /// Advance the broadcaster's step clock (pending-subscriber promotion).
    fn advance_step(&self);

    /// Read the providers, derive the value, and feed the broadcaster.
    fn sample(&self);
}

// ---------------------------------------------------------------------------
// Distance
// ---------------------------------------------------------------------------

/// Euclidean distance between two tracked points.
///
/// Seeded with the distance at construction time, so the signal only fires
/// once the points have actually moved relative to each other.
pub struct DistanceSignal {
    a: Box<dyn Fn() -> Vec3>,
    b: Box<dyn Fn() -> Vec3>,
    broadcaster: Broadcaster<f32>,
}

impl DistanceSignal {
    /// Bind two position providers with exact change detection.
    ///
    /// Exact inequality fires on every step once both points are moving;
    /// prefer [`with_epsilon`](Self::with_epsilon) for continuously animated
    /// inputs.
    #[must_use]
    pub fn new(a: impl Fn() -> Vec3 + 'static, b: impl Fn() -> Vec3 + 'static) -> Self {
        Self::with_comparator(a, b, compare::exact())
    }

    /// Bind two position providers, ignoring distance deltas within `epsilon`.
    #[must_use]
    pub fn with_epsilon(
        a: impl Fn() -> Vec3 + 'static,
        b: impl Fn() -> Vec3 + 'static,
        epsilon: f32,
    ) -> Self {
        Self::with_comparator(a, b, compare::epsilon_f32(epsilon))
    }

    /// Bind two position providers with a caller-supplied equality policy.
    #[must_use]
    pub fn with_comparator(
        a: impl Fn() -> Vec3 + 'static,
        b: impl Fn() -> Vec3 + 'static,
        unchanged: Comparator<f32>,
    ) -> Self {
        let initial = a().distance(b());
        Self {
            a: Box::new(a),
            b: Box::new(b),
            broadcaster: Broadcaster::with_comparator(initial, unchanged),
        }
    }

    /// Handle to the underlying broadcaster, for subscribing.
    #[must_use]
    pub fn signal(&self) -> Broadcaster<f32> {
        self.broadcaster.clone()
    }
}

impl SignalBinding for DistanceSignal {
    fn advance_step(&self) {
        self.broadcaster.advance_step();
    }

    fn sample(&self) {
        self.broadcaster.sample((self.a)().distance((self.b)()));
    }
}

impl std::fmt::Debug for DistanceSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DistanceSignal")
            .field("distance", &self.broadcaster.get())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Intersection
// ---------------------------------------------------------------------------

/// Whether two tracked volumes overlap.
///
/// Change detection lives in the broadcaster, so subscribers only hear
/// enter/leave transitions, never a steady state repeated every frame.
pub struct IntersectionSignal {
    a: Box<dyn Fn() -> Aabb>,
    b: Box<dyn Fn() -> Aabb>,
    broadcaster: Broadcaster<bool>,
}

impl IntersectionSignal {
    /// Bind two volume providers. Seeded with the overlap at construction.
    #[must_use]
    pub fn new(a: impl Fn() -> Aabb + 'static, b: impl Fn() -> Aabb + 'static) -> Self {
        let initial = a().intersects(&b());
        Self {
            a: Box::new(a),
            b: Box::new(b),
            broadcaster: Broadcaster::new(initial),
        }
    }

    /// Handle to the underlying broadcaster, for subscribing.
    #[must_use]
    pub fn signal(&self) -> Broadcaster<bool> {
        self.broadcaster.clone()
    }
}

impl SignalBinding for IntersectionSignal {
    fn advance_step(&self) {
        self.broadcaster.advance_step();
    }

    fn sample(&self) {
        self.broadcaster.sample((self.a)().intersects(&(self.b)()));
    }
}

impl std::fmt::Debug for IntersectionSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntersectionSignal")
            .field("intersecting", &self.broadcaster.get())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Proximity
// ---------------------------------------------------------------------------

/// Whether two tracked points are within a distance threshold.
///
/// The boolean form of [`DistanceSignal`]: subscribers hear only the
/// crossings of the threshold, in either direction.
pub struct ProximitySignal {
    a: Box<dyn Fn() -> Vec3>,
    b: Box<dyn Fn() -> Vec3>,
    threshold: f32,
    broadcaster: Broadcaster<bool>,
}

impl ProximitySignal {
    /// Bind two position providers with an inclusive distance threshold.
    #[must_use]
    pub fn new(
        a: impl Fn() -> Vec3 + 'static,
        b: impl Fn() -> Vec3 + 'static,
        threshold: f32,
    ) -> Self {
        let initial = a().distance(b()) <= threshold;
        Self {
            a: Box::new(a),
            b: Box::new(b),
            threshold,
            broadcaster: Broadcaster::new(initial),
        }
    }

    /// The configured threshold.
    #[must_use]
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Handle to the underlying broadcaster, for subscribing.
    #[must_use]
    pub fn signal(&self) -> Broadcaster<bool> {
        self.broadcaster.clone()
    }
}

impl SignalBinding for ProximitySignal {
    fn advance_step(&self) {
        self.broadcaster.advance_step();
    }

    fn sample(&self) {
        self.broadcaster
            .sample((self.a)().distance((self.b)()) <= self.threshold);
    }
}

impl std::fmt::Debug for ProximitySignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProximitySignal")
            .field("threshold", &self.threshold)
            .field("within", &self.broadcaster.get())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
