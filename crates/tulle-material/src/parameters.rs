//! Derived material constants for the spring network.

use serde::{Deserialize, Serialize};
use tulle_types::constants::DT_SAFETY_FACTOR;
use tulle_types::{TulleError, TulleResult};

use crate::properties::ClothProperties;
use crate::spacing::GridSpacing;

/// Scalar constants derived once before the frame loop.
///
/// All quantities are uniform: every node gets the same `mass`, every
/// spring the same `stiffness`. Stiffness uses the `dy/dx` ratio of a
/// single representative cell, so anisotropic spacing still yields one
/// isotropic constant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialParameters {
    /// Node mass `m = ρ·h·dx·dy` (kg).
    pub mass: f32,
    /// Spring stiffness `K = E·h·dy/dx` (N/m).
    pub stiffness: f32,
    /// Damping coefficient `B = μ·h·dx·dy` (N·s/m).
    pub damping: f32,
    /// Stability bound of the explicit oscillator, `sqrt(m/K)` (s).
    pub dt_critical: f32,
    /// Integration step, `0.8·dt_critical` (s).
    pub dt: f32,
}

impl MaterialParameters {
    /// Derives the constants from physical properties and node spacing.
    pub fn derive(props: &ClothProperties, spacing: GridSpacing) -> TulleResult<Self> {
        props.validate()?;

        let h = props.thickness;
        let GridSpacing { dx, dy } = spacing;

        let mass = props.density * h * dx * dy;
        let stiffness = props.young_modulus * h * dy / dx;
        let damping = props.viscosity * h * dx * dy;

        if !(mass.is_finite() && mass > 0.0) {
            return Err(TulleError::InvalidMaterial(format!(
                "Derived node mass must be positive, got {mass}"
            )));
        }
        if !(stiffness.is_finite() && stiffness > 0.0) {
            return Err(TulleError::InvalidMaterial(format!(
                "Derived stiffness must be positive, got {stiffness}"
            )));
        }

        let dt_critical = (mass / stiffness).sqrt();
        let dt = DT_SAFETY_FACTOR * dt_critical;

        let params = Self {
            mass,
            stiffness,
            damping,
            dt_critical,
            dt,
        };

        tracing::info!(
            material = %props.name,
            dx,
            dy,
            mass,
            stiffness,
            damping,
            dt_critical,
            dt,
            damping_steps = params.damping_steps(),
            "material parameters derived"
        );

        Ok(params)
    }

    /// Natural angular frequency of a single spring-mass pair, `sqrt(K/m)`.
    pub fn natural_frequency(&self) -> f32 {
        (self.stiffness / self.mass).sqrt()
    }

    /// Dashpot relaxation time `B/K` measured in time steps.
    ///
    /// A triangulated grid stays bounded at the fixed step for roughly
    /// 0.5 to 0.9. Below that the stiffest in-plane modes grow, above it
    /// the overdamped ones do.
    pub fn damping_steps(&self) -> f32 {
        self.damping / (self.stiffness * self.dt)
    }

    /// Damping ratio `B / (2·sqrt(K·m))` of a single spring-mass pair.
    pub fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}
