//! Event bus feeding the registered sinks.
//!
//! Producers queue events on an `mpsc` channel (the frame driver through
//! [`EventBus::emit`], worker threads through a cloned [`EventBus::sender`]).
//! Nothing reaches a sink until [`EventBus::flush`], which the driver calls
//! once per frame, so sinks never run inside an integration pass.

use std::sync::mpsc::{self, Receiver, Sender};

use crate::events::SimulationEvent;
use crate::sinks::EventSink;

/// Queue of telemetry events plus the sinks they are delivered to.
pub struct EventBus {
    queue: Sender<SimulationEvent>,
    pending: Receiver<SimulationEvent>,
    sinks: Vec<Box<dyn EventSink>>,
    enabled: bool,
    /// Events delivered so far, across all flushes.
    dispatched: u64,
    /// Set by `finish`; sinks are finalized once.
    finished: bool,
}

impl EventBus {
    /// Creates an enabled bus with no sinks.
    pub fn new() -> Self {
        let (queue, pending) = mpsc::channel();
        Self {
            queue,
            pending,
            sinks: Vec::new(),
            enabled: true,
            dispatched: 0,
            finished: false,
        }
    }

    pub fn add_sink(&mut self, sink: Box<dyn EventSink>) {
        tracing::debug!(sink = sink.name(), "telemetry sink registered");
        self.sinks.push(sink);
    }

    /// A disabled bus drops emitted events.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Queues an event. Dropped when the bus is disabled or finished.
    pub fn emit(&self, event: SimulationEvent) {
        if self.enabled && !self.finished {
            // `pending` is owned by the bus, so the channel is never closed here
            let _ = self.queue.send(event);
        }
    }

    /// Sender for producers on other threads.
    pub fn sender(&self) -> Sender<SimulationEvent> {
        self.queue.clone()
    }

    /// Delivers queued events to every sink in emission order.
    ///
    /// Returns how many events were delivered.
    pub fn flush(&mut self) -> usize {
        let mut delivered = 0;
        for event in self.pending.try_iter() {
            for sink in self.sinks.iter_mut() {
                sink.handle(&event);
            }
            delivered += 1;
        }
        self.dispatched += delivered as u64;
        delivered
    }

    /// Final flush, then finalizes each sink. Later calls are no-ops.
    pub fn finish(&mut self) {
        if self.finished {
            return;
        }
        self.flush();
        for sink in self.sinks.iter_mut() {
            sink.finalize();
        }
        self.finished = true;
        tracing::debug!(events = self.dispatched, "telemetry finished");
    }

    /// Total events delivered since the bus was created.
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
