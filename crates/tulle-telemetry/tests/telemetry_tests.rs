//! Integration tests for tulle-telemetry.

use std::thread;

use tulle_telemetry::bus::EventBus;
use tulle_telemetry::events::{EventKind, SimulationEvent};
use tulle_telemetry::sinks::{TracingSink, VecSink};

#[test]
fn emit_and_flush() {
    let mut bus = EventBus::new();
    let sink = VecSink::new();
    let log = sink.log();
    bus.add_sink(Box::new(sink));

    bus.emit(SimulationEvent::new(0, EventKind::FrameBegin { sim_time: 0.0 }));
    bus.emit(SimulationEvent::new(0, EventKind::FrameEnd { wall_time: 0.001 }));
    assert!(log.is_empty());

    assert_eq!(bus.flush(), 2);
    let events = log.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].label(), "frame_begin");
    assert_eq!(events[1].label(), "frame_end");
}

#[test]
fn disabled_bus_drops_events() {
    let mut bus = EventBus::new();
    let sink = VecSink::new();
    let log = sink.log();
    bus.add_sink(Box::new(sink));

    bus.set_enabled(false);
    assert!(!bus.is_enabled());
    bus.emit(SimulationEvent::new(0, EventKind::FrameBegin { sim_time: 0.0 }));
    assert_eq!(bus.flush(), 0);
    assert!(log.is_empty());
}

#[test]
fn multiple_sinks_see_every_event() {
    let mut bus = EventBus::new();
    let a = VecSink::new();
    let b = VecSink::new();
    let (log_a, log_b) = (a.log(), b.log());
    bus.add_sink(Box::new(a));
    bus.add_sink(Box::new(b));
    bus.add_sink(Box::new(TracingSink::default()));
    assert_eq!(bus.sink_count(), 3);

    bus.emit(SimulationEvent::new(3, EventKind::FrameBegin { sim_time: 0.1 }));
    bus.flush();
    assert_eq!(log_a.len(), 1);
    assert_eq!(log_b.len(), 1);
}

#[test]
fn finish_flushes_and_finalizes() {
    let mut bus = EventBus::new();
    let sink = VecSink::new();
    let log = sink.log();
    bus.add_sink(Box::new(sink));

    bus.emit(SimulationEvent::new(1, EventKind::FrameEnd { wall_time: 0.0 }));
    bus.finish();
    assert_eq!(log.len(), 1);
    assert!(log.is_finalized());
}

#[test]
fn finish_is_idempotent_and_closes_the_bus() {
    let mut bus = EventBus::new();
    let sink = VecSink::new();
    let log = sink.log();
    bus.add_sink(Box::new(sink));

    bus.emit(SimulationEvent::new(0, EventKind::FrameBegin { sim_time: 0.0 }));
    bus.emit(SimulationEvent::new(0, EventKind::FrameEnd { wall_time: 0.0 }));
    bus.finish();
    bus.finish();
    assert!(bus.is_finished());
    assert_eq!(bus.dispatched(), 2);

    bus.emit(SimulationEvent::new(1, EventKind::FrameBegin { sim_time: 0.1 }));
    assert_eq!(bus.flush(), 0);
    assert_eq!(log.len(), 2);
}

#[test]
fn sender_emits_from_other_threads() {
    let mut bus = EventBus::new();
    let sink = VecSink::new();
    let log = sink.log();
    bus.add_sink(Box::new(sink));

    let sender = bus.sender();
    thread::spawn(move || {
        for frame in 0..5 {
            sender
                .send(SimulationEvent::new(frame, EventKind::FrameBegin { sim_time: 0.0 }))
                .unwrap();
        }
    })
    .join()
    .unwrap();

    bus.flush();
    assert_eq!(log.count("frame_begin"), 5);
}

#[test]
fn log_count_and_clear() {
    let mut bus = EventBus::new();
    let sink = VecSink::new();
    let log = sink.log();
    bus.add_sink(Box::new(sink));

    bus.emit(SimulationEvent::new(0, EventKind::FrameBegin { sim_time: 0.0 }));
    bus.emit(SimulationEvent::new(
        0,
        EventKind::Custom {
            label: "wind".into(),
            payload: "{}".into(),
        },
    ));
    bus.flush();
    assert_eq!(log.count("wind"), 1);
    assert_eq!(log.count("energy"), 0);

    log.clear();
    assert!(log.is_empty());
}

// ─── Serialization Tests ──────────────────────────────────────

#[test]
fn event_serialization() {
    let event = SimulationEvent::new(
        5,
        EventKind::Energy {
            kinetic: 1.0,
            potential: 2.0,
            elastic: 0.5,
        },
    );
    let json = serde_json::to_string(&event).unwrap();
    let recovered: SimulationEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, event);
}

#[test]
fn pass_and_transition_events() {
    let pass = SimulationEvent::new(
        10,
        EventKind::PassComplete {
            scheme: "predictor_corrector".into(),
            passes: 2,
            wall_time: 1e-4,
        },
    );
    assert_eq!(pass.label(), "pass_complete");

    let transition = SimulationEvent::new(
        0,
        EventKind::StateTransition {
            from: "Idle".into(),
            to: "Running".into(),
        },
    );
    let json = serde_json::to_string(&transition).unwrap();
    assert!(json.contains("Running"));
    assert_eq!(transition.label(), "state_transition");
}
