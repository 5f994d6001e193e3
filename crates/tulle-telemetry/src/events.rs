//! Simulation event types.
//!
//! Structured events emitted by the frame driver. Events are lightweight
//! value types that carry just enough data to be useful for monitoring
//! and debugging.

use serde::{Deserialize, Serialize};

/// A simulation event, tagged with the frame it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationEvent {
    /// Frame number (0-indexed).
    pub frame: u64,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// Frame started.
    FrameBegin {
        /// Simulation time at the start of the frame (seconds).
        sim_time: f64,
    },

    /// Frame presented.
    FrameEnd {
        /// Wall-clock time for the entire frame (seconds).
        wall_time: f64,
    },

    /// An integration step finished.
    PassComplete {
        /// Integration scheme name.
        scheme: String,
        /// Number of data-parallel passes dispatched.
        passes: u32,
        /// Wall-clock time of the step (seconds).
        wall_time: f64,
    },

    /// Energy snapshot at current state.
    Energy {
        /// Kinetic energy (0.5 * m * v^2).
        kinetic: f64,
        /// Gravitational potential energy.
        potential: f64,
        /// Elastic spring energy.
        elastic: f64,
    },

    /// The frame driver changed state.
    StateTransition {
        from: String,
        to: String,
    },

    /// Custom event for extensibility.
    Custom {
        /// Arbitrary label.
        label: String,
        /// JSON-encoded payload.
        payload: String,
    },
}

impl SimulationEvent {
    /// Creates a new event for the given frame.
    pub fn new(frame: u64, kind: EventKind) -> Self {
        Self { frame, kind }
    }

    /// Short name of the event kind.
    pub fn label(&self) -> &str {
        match &self.kind {
            EventKind::FrameBegin { .. } => "frame_begin",
            EventKind::FrameEnd { .. } => "frame_end",
            EventKind::PassComplete { .. } => "pass_complete",
            EventKind::Energy { .. } => "energy",
            EventKind::StateTransition { .. } => "state_transition",
            EventKind::Custom { label, .. } => label,
        }
    }
}
