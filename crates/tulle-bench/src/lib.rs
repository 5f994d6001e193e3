//! # tulle-bench
//!
//! Benchmark suite for the Tulle cloth engine.
//!
//! Provides 4 procedural benchmark scenarios, a runner that drives them
//! through the frame driver with a headless renderer, and CSV/JSON export
//! of the collected metrics for regression tracking.

pub mod metrics;
pub mod runner;
pub mod scenarios;

pub use metrics::BenchmarkMetrics;
pub use runner::BenchmarkRunner;
pub use scenarios::{Scenario, ScenarioKind};
