//! Physical cloth properties.
//!
//! These are the raw inputs to the material model. Units are SI throughout.

use serde::{Deserialize, Serialize};
use tulle_types::{TulleError, TulleResult};

/// Physical properties of a cloth sheet.
///
/// | Field | Symbol | Unit |
/// |---|---|---|
/// | `thickness` | h | m |
/// | `density` | ρ | kg/m³ |
/// | `young_modulus` | E | Pa |
/// | `viscosity` | μ | Pa·s |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClothProperties {
    /// Human-readable name (e.g., "membrane").
    pub name: String,

    /// Sheet thickness in meters.
    pub thickness: f32,

    /// Volumetric density in kg/m³.
    pub density: f32,

    /// Young's modulus in pascals. Controls spring stiffness.
    pub young_modulus: f32,

    /// Dynamic viscosity in pascal-seconds. Controls damping.
    /// Zero gives an undamped network.
    pub viscosity: f32,
}

impl ClothProperties {
    /// The reference membrane: 1 cm thick, water density, soft rubber modulus.
    pub fn membrane() -> Self {
        Self {
            name: "membrane".into(),
            thickness: 0.01,
            density: 1000.0,
            young_modulus: 100_000.0,
            viscosity: 700.0,
        }
    }

    /// The reference membrane with its viscosity raised to 56 kPa·s.
    ///
    /// Tuned for 0.1 m node spacing, where the dashpots hold the stiffest
    /// modes of a triangulated grid inside the predictor/corrector's stable
    /// region at the fixed time step. The usable viscosity scales with
    /// `1/dx`, so other resolutions need their own value.
    pub fn damped_membrane() -> Self {
        Self {
            name: "damped_membrane".into(),
            viscosity: 56_000.0,
            ..Self::membrane()
        }
    }

    /// Checks that every property is finite and physically meaningful.
    pub fn validate(&self) -> TulleResult<()> {
        let fields = [
            ("thickness", self.thickness),
            ("density", self.density),
            ("young_modulus", self.young_modulus),
            ("viscosity", self.viscosity),
        ];
        for (label, value) in fields {
            if !value.is_finite() {
                return Err(TulleError::InvalidMaterial(format!(
                    "{label} must be finite (material '{}')",
                    self.name
                )));
            }
        }

        for (label, value) in &fields[..3] {
            if *value <= 0.0 {
                return Err(TulleError::InvalidMaterial(format!(
                    "{label} must be positive, got {value} (material '{}')",
                    self.name
                )));
            }
        }

        if self.viscosity < 0.0 {
            return Err(TulleError::InvalidMaterial(format!(
                "viscosity must be non-negative, got {} (material '{}')",
                self.viscosity, self.name
            )));
        }

        Ok(())
    }

    /// Areal density ρ·h in kg/m².
    pub fn areal_density(&self) -> f32 {
        self.density * self.thickness
    }
}

impl Default for ClothProperties {
    fn default() -> Self {
        Self::membrane()
    }
}
