//! Inspection hooks for live debugging.
//!
//! Hooks are injected into the frame loop and called at specific points
//! (frame begin, after the integration step, frame end) to capture state
//! or metrics without touching the solver.

use tulle_compute::KinematicBuffers;
use tulle_telemetry::events::{EventKind, SimulationEvent};

/// Trait for frame inspection hooks.
///
/// # Lifecycle
///
/// ```text
/// for each frame:
///   hook.on_frame_begin(...)
///   hook.on_step(...)          // authoritative state after the corrector
///   hook.on_frame_end(...)
/// hook.on_simulation_end()
/// ```
pub trait InspectionHook: Send {
    /// Called at the beginning of each frame.
    fn on_frame_begin(&mut self, frame: u64, sim_time: f64) {
        let _ = (frame, sim_time);
    }

    /// Called once the integration step has finished, with read access
    /// to the authoritative state.
    fn on_step(&mut self, frame: u64, state: &KinematicBuffers) {
        let _ = (frame, state);
    }

    /// Called at the end of each frame.
    fn on_frame_end(&mut self, frame: u64, wall_time: f64) {
        let _ = (frame, wall_time);
    }

    /// Called when the simulation completes.
    fn on_simulation_end(&mut self) {}

    /// Returns the hook's name for logging.
    fn name(&self) -> &str;
}

/// Hook that records frame lifecycle calls as telemetry events.
///
/// Tracks the lowest node height seen after each step as a `Custom`
/// event, which is handy when chasing a sagging or exploding cloth.
#[derive(Debug, Default)]
pub struct TelemetryHook {
    events: Vec<SimulationEvent>,
}

impl TelemetryHook {
    /// Creates a new telemetry hook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains collected events for dispatch.
    pub fn drain_events(&mut self) -> Vec<SimulationEvent> {
        std::mem::take(&mut self.events)
    }
}

impl InspectionHook for TelemetryHook {
    fn on_frame_begin(&mut self, frame: u64, sim_time: f64) {
        self.events
            .push(SimulationEvent::new(frame, EventKind::FrameBegin { sim_time }));
    }

    fn on_step(&mut self, frame: u64, state: &KinematicBuffers) {
        let lowest = state
            .position
            .iter()
            .map(|p| p.z)
            .fold(f32::INFINITY, |min, z| {
                if min.is_nan() || z.is_nan() {
                    f32::NAN
                } else {
                    min.min(z)
                }
            });
        self.events.push(SimulationEvent::new(
            frame,
            EventKind::Custom {
                label: "lowest_node".into(),
                payload: format!("{{\"z\":{lowest}}}"),
            },
        ));
    }

    fn on_frame_end(&mut self, frame: u64, wall_time: f64) {
        self.events
            .push(SimulationEvent::new(frame, EventKind::FrameEnd { wall_time }));
    }

    fn name(&self) -> &str {
        "telemetry_hook"
    }
}
