//! Physical constants and simulation defaults.

/// Gravitational acceleration magnitude (m/s²).
pub const GRAVITY: f32 = 9.81;

/// Fraction of the critical time step used for integration.
///
/// `dt = DT_SAFETY_FACTOR * sqrt(m / K)`.
pub const DT_SAFETY_FACTOR: f32 = 0.8;

/// Homogeneous coordinate assigned to imported positions that carry none.
pub const DEFAULT_W: f32 = 1.0;

/// Length below which an edge counts as collapsed and exerts no force.
pub const EPSILON: f32 = 1.0e-7;
