//! # tulle-cli
//!
//! Command implementations behind the `tulle` binary: run a scene, run
//! the benchmark suite, inspect snapshots, validate inputs, and list the
//! material presets.

pub mod commands;
