#![forbid(unsafe_code)]

//! Scene tick loop: drives every registered binding once per frame.
//!
//! A [`SceneTicker`] holds a collection of named [`SignalBinding`] members.
//! Each [`tick`](SceneTicker::tick) increments the frame counter and then,
//! for every member in registration order, calls `advance_step()` followed by
//! `sample()`. That ordering is the contract the whole signal layer is built
//! on: pending-subscriber promotion always precedes the same frame's sample.
//!
//! # Invariants
//!
//! 1. Each member has a unique string label; duplicate labels replace.
//! 2. Members tick in registration order.
//! 3. `frame_id()` counts completed `tick()` calls, starting at 0.
//!
//! # Failure Modes
//!
//! - Unknown label in `remove()`: returns `false`, no other effect.
//! - A subscriber callback panicking mid-tick unwinds through `tick()`;
//!   members later in the order are not sampled that frame.

use crate::binding::SignalBinding;

/// A named binding registered with the ticker.
struct TickerMember {
    label: String,
    binding: Box<dyn SignalBinding>,
}

/// Drives registered signal bindings once per frame, in registration order.
pub struct SceneTicker {
    members: Vec<TickerMember>,
    frame: u64,
}

impl std::fmt::Debug for SceneTicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneTicker")
            .field("bindings", &self.members.len())
            .field("frame", &self.frame)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Construction and membership
// ---------------------------------------------------------------------------

impl SceneTicker {
    /// Create an empty ticker at frame 0.
    #[must_use]
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
            frame: 0,
        }
    }

    /// Register a named binding (builder pattern).
    ///
    /// If `label` already exists, the previous binding is replaced in place.
    #[must_use]
    pub fn bind(mut self, label: &str, binding: impl SignalBinding + 'static) -> Self {
        self.insert(label, Box::new(binding));
        self
    }

    /// Register a named binding (mutating).
    ///
    /// If `label` already exists, the previous binding is replaced in place.
    pub fn insert(&mut self, label: &str, binding: Box<dyn SignalBinding>) {
        if let Some(existing) = self.members.iter_mut().find(|m| m.label == label) {
            existing.binding = binding;
        } else {
            self.members.push(TickerMember {
                label: label.to_string(),
                binding,
            });
        }
    }

    /// Remove a named binding. Returns `true` if found and removed.
    pub fn remove(&mut self, label: &str) -> bool {
        let len_before = self.members.len();
        self.members.retain(|m| m.label != label);
        self.members.len() < len_before
    }

    /// Number of registered bindings.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether no bindings are registered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Labels of all registered bindings, in registration order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|m| m.label.as_str())
    }
}

impl Default for SceneTicker {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tick loop
// ---------------------------------------------------------------------------

impl SceneTicker {
    /// Run one frame: advance every binding's step clock, then sample it.
    pub fn tick(&mut self) {
        self.frame += 1;
        tracing::trace!(frame = self.frame, bindings = self.members.len(), "tick");
        for member in &self.members {
            member.binding.advance_step();
            member.binding.sample();
        }
    }

    /// Frames completed so far.
    #[inline]
    #[must_use]
    pub fn frame_id(&self) -> u64 {
        self.frame
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
