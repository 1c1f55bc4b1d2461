#![forbid(unsafe_code)]

//! StepWire public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users.

pub mod prelude {
    pub use stepwire_scene as scene;
    pub use stepwire_signal as signal;

    pub use stepwire_scene::{
        Aabb, DistanceSignal, IntersectionSignal, ProximitySignal, SceneTicker, SignalBinding,
    };
    pub use stepwire_signal::{Broadcaster, SubscriberHandle, Subscription};
}
