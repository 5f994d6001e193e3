//! # tulle-driver
//!
//! Owns the frame loop. A [`FrameDriver`] moves through
//! `Idle → Running → Closing → Terminated`; while running, every frame
//! acquires the shared buffers, runs exactly one integration step, hands
//! the result to the renderer, and checks whether to stop.
//!
//! [`SceneConfig`] describes a whole run in TOML: mesh source, material,
//! solver, compute backend, driver limits, and optional export.

pub mod config;
pub mod driver;
pub mod scene;

pub use config::DriverConfig;
pub use driver::{CloseReason, DriverState, FrameDriver, FrameOutcome, RunSummary, ShutdownHandle};
pub use scene::{ExportConfig, MaterialConfig, MeshSource, SceneConfig};
