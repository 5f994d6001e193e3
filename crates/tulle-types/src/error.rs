//! Error types for the Tulle engine.
//!
//! All crates return `TulleResult<T>` from fallible operations.

use thiserror::Error;

/// Unified error type for the Tulle engine.
#[derive(Debug, Error)]
pub enum TulleError {
    /// Mesh data is malformed or inconsistent.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// Spring-network topology violates a CSR invariant
    /// (self-loop, out-of-range neighbour, zero-length resting edge).
    #[error("Invalid topology: {0}")]
    InvalidTopology(String),

    /// Material parameter is out of valid range.
    #[error("Invalid material parameter: {0}")]
    InvalidMaterial(String),

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// An operation was requested in a lifecycle state that does not allow it.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Exclusive access to a shared buffer could not be obtained.
    #[error("Failed to acquire shared buffer '{0}'")]
    BufferAcquire(String),

    /// Compute dispatch failed.
    #[error("Compute error: {0}")]
    Compute(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for `Result<T, TulleError>`.
pub type TulleResult<T> = Result<T, TulleError>;
