#![forbid(unsafe_code)]

//! Scene-side signal sources: spatial predicates, broadcaster bindings, and
//! the per-step tick driver.
//!
//! A *binding* pairs externally-owned scene state (position or volume
//! providers) with a [`Broadcaster`](stepwire_signal::Broadcaster). The
//! binding reads its inputs once per step, derives a scalar or boolean
//! signal, and feeds it to the broadcaster, which handles change detection
//! and fan-out. [`SceneTicker`] drives every registered binding once per
//! frame in registration order.

pub mod binding;
pub mod spatial;
pub mod ticker;

pub use binding::{DistanceSignal, IntersectionSignal, ProximitySignal, SignalBinding};
pub use spatial::Aabb;
pub use ticker::SceneTicker;
