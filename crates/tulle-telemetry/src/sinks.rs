//! Pluggable event sinks.
//!
//! Sinks consume events from the bus and process them (collect in memory,
//! forward to `tracing`, ...).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::events::SimulationEvent;

/// Trait for event consumers.
///
/// Implement this to create custom telemetry outputs.
pub trait EventSink: Send {
    /// Process a single event.
    fn handle(&mut self, event: &SimulationEvent);

    /// Called when the simulation ends. Flush buffers, close files, etc.
    fn finalize(&mut self) {}

    /// Returns a human-readable name for this sink.
    fn name(&self) -> &str;
}

/// Shared, inspectable list of events collected by a [`VecSink`].
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<SimulationEvent>>>,
    finalized: Arc<AtomicBool>,
}

impl EventLog {
    fn lock(&self) -> MutexGuard<'_, Vec<SimulationEvent>> {
        // Events are plain values, so a poisoned log is still consistent
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of every event collected so far.
    pub fn events(&self) -> Vec<SimulationEvent> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Number of events whose label is `label`.
    pub fn count(&self, label: &str) -> usize {
        self.lock().iter().filter(|e| e.label() == label).count()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Returns true once the owning sink has been finalized.
    pub fn is_finalized(&self) -> bool {
        self.finalized.load(Ordering::Acquire)
    }
}

/// A sink that collects events into a shared [`EventLog`].
///
/// Keep a clone of [`log`](VecSink::log) before boxing the sink to read
/// the events back later.
#[derive(Debug, Default)]
pub struct VecSink {
    log: EventLog,
}

impl VecSink {
    /// Creates an empty vec sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle on the collected events.
    pub fn log(&self) -> EventLog {
        self.log.clone()
    }
}

impl EventSink for VecSink {
    fn handle(&mut self, event: &SimulationEvent) {
        self.log.lock().push(event.clone());
    }

    fn finalize(&mut self) {
        self.log.finalized.store(true, Ordering::Release);
    }

    fn name(&self) -> &str {
        "vec_sink"
    }
}

/// A sink that logs events using the `tracing` crate.
pub struct TracingSink {
    level: tracing::Level,
}

impl TracingSink {
    /// Creates a new tracing sink at the given log level.
    pub fn new(level: tracing::Level) -> Self {
        Self { level }
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new(tracing::Level::DEBUG)
    }
}

impl EventSink for TracingSink {
    fn handle(&mut self, event: &SimulationEvent) {
        let frame = event.frame;
        let kind = &event.kind;
        if self.level == tracing::Level::ERROR {
            tracing::error!(frame, event = ?kind, "simulation_event");
        } else if self.level == tracing::Level::WARN {
            tracing::warn!(frame, event = ?kind, "simulation_event");
        } else if self.level == tracing::Level::INFO {
            tracing::info!(frame, event = ?kind, "simulation_event");
        } else if self.level == tracing::Level::DEBUG {
            tracing::debug!(frame, event = ?kind, "simulation_event");
        } else {
            tracing::trace!(frame, event = ?kind, "simulation_event");
        }
    }

    fn name(&self) -> &str {
        "tracing_sink"
    }
}
