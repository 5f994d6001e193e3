//! # tulle-telemetry
//!
//! Event bus for simulation telemetry. The frame driver emits structured
//! events (frame boundaries, integration passes, energy, state changes)
//! that pluggable sinks consume: an in-memory log for tests and the
//! benchmark runner, or the `tracing` pipeline.

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{EventKind, SimulationEvent};
pub use sinks::{EventLog, EventSink, TracingSink, VecSink};
