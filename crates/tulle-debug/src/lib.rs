//! # tulle-debug
//!
//! Inspection hooks and state snapshots for debugging simulation issues.
//! Snapshots serialize the authoritative kinematic state to a compact
//! binary file that `tulle inspect` can read back.

pub mod hooks;
pub mod snapshot;

pub use hooks::{InspectionHook, TelemetryHook};
pub use snapshot::StateSnapshot;
