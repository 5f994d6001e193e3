//! # tulle-types
//!
//! Shared error types and physical constants for the Tulle cloth engine.
//!
//! This crate has zero domain logic. It defines the vocabulary
//! that all other Tulle crates share.

pub mod constants;
pub mod error;

pub use error::{TulleError, TulleResult};
