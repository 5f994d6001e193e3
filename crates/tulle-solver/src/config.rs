//! Solver configuration and the immutable simulation constants.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tulle_material::MaterialParameters;
use tulle_mesh::GroupRef;
use tulle_types::constants::GRAVITY;
use tulle_types::{TulleError, TulleResult};

use crate::integrator::SchemeKind;

/// Configuration for the simulation solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Gravity vector [gx, gy, gz] in m/s². The membrane lies in the XY
    /// plane, so gravity points along -Z.
    pub gravity: [f32; 3],

    /// Group whose nodes are pinned.
    pub pinned: GroupRef,

    /// Group measured for the X spacing `dx`.
    pub side_x: GroupRef,

    /// Group measured for the Y spacing `dy`.
    pub side_y: GroupRef,

    /// Integration scheme.
    pub scheme: SchemeKind,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            gravity: [0.0, 0.0, -GRAVITY],
            pinned: GroupRef::BORDER,
            side_x: GroupRef::SIDE_X,
            side_y: GroupRef::SIDE_Y,
            scheme: SchemeKind::default(),
        }
    }
}

impl SolverConfig {
    /// Same defaults with gravity switched off.
    pub fn weightless() -> Self {
        Self {
            gravity: [0.0; 3],
            ..Default::default()
        }
    }

    pub fn validate(&self) -> TulleResult<()> {
        if self.gravity.iter().any(|g| !g.is_finite()) {
            return Err(TulleError::InvalidConfig(format!(
                "Gravity must be finite, got {:?}",
                self.gravity
            )));
        }
        Ok(())
    }
}

/// Global constants every kernel reads. Written once at setup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConstants {
    gravity: Vec3,
    mass: f32,
    damping: f32,
    dt: f32,
}

impl SimulationConstants {
    /// Builds the constants, rejecting non-positive mass or time step and
    /// negative damping.
    pub fn new(gravity: Vec3, mass: f32, damping: f32, dt: f32) -> TulleResult<Self> {
        if !gravity.is_finite() {
            return Err(TulleError::InvalidConfig(format!(
                "Gravity must be finite, got {gravity}"
            )));
        }
        if !(mass.is_finite() && mass > 0.0) {
            return Err(TulleError::InvalidMaterial(format!(
                "Node mass must be positive, got {mass}"
            )));
        }
        if !(damping.is_finite() && damping >= 0.0) {
            return Err(TulleError::InvalidMaterial(format!(
                "Damping must be non-negative, got {damping}"
            )));
        }
        if !(dt.is_finite() && dt > 0.0) {
            return Err(TulleError::InvalidMaterial(format!(
                "Time step must be positive, got {dt}"
            )));
        }
        Ok(Self {
            gravity,
            mass,
            damping,
            dt,
        })
    }

    /// Takes mass, damping, and time step from derived material parameters.
    pub fn from_parameters(gravity: Vec3, params: &MaterialParameters) -> TulleResult<Self> {
        Self::new(gravity, params.mass, params.damping, params.dt)
    }

    #[inline]
    pub fn gravity(&self) -> Vec3 {
        self.gravity
    }

    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    #[inline]
    pub fn damping(&self) -> f32 {
        self.damping
    }

    #[inline]
    pub fn dt(&self) -> f32 {
        self.dt
    }
}
