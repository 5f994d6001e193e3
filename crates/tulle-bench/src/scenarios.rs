//! Benchmark scenarios: procedural mesh + pinning + solver config.
//!
//! Four canonical scenarios for regression testing:
//! 1. **Hanging membrane**: Whole border pinned, interior sags under gravity
//! 2. **Corner pinned**: 3×3 grid held by a single corner
//! 3. **Curtain**: Top edge pinned, the rest swings down
//! 4. **Free fall**: Nothing pinned, the sheet drops as a rigid body
//!
//! Every scenario uses 0.1 m node spacing and the damped membrane, the
//! combination that stays bounded at the fixed time step.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use tulle_material::ClothProperties;
use tulle_mesh::generators::{square_grid, top_edge};
use tulle_mesh::{ClothMesh, GroupRef, PhysicalGroup};
use tulle_solver::{SchemeKind, SolverConfig};
use tulle_types::TulleError;

/// Group holding the nodes a scenario pins when it does not pin the border.
pub const SCENARIO_PINS: GroupRef = GroupRef::new(1, 4);

/// Which benchmark scenario to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    /// Square membrane pinned along its whole border.
    HangingMembrane,
    /// 3×3 grid pinned at node 0.
    CornerPinned,
    /// Square membrane pinned along the top edge.
    Curtain,
    /// Square membrane with no pinned nodes.
    FreeFall,
}

impl ScenarioKind {
    /// Returns all scenario kinds.
    pub fn all() -> &'static [ScenarioKind] {
        &[
            ScenarioKind::HangingMembrane,
            ScenarioKind::CornerPinned,
            ScenarioKind::Curtain,
            ScenarioKind::FreeFall,
        ]
    }

    /// Returns a human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::HangingMembrane => "hanging_membrane",
            ScenarioKind::CornerPinned => "corner_pinned",
            ScenarioKind::Curtain => "curtain",
            ScenarioKind::FreeFall => "free_fall",
        }
    }
}

impl FromStr for ScenarioKind {
    type Err = TulleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScenarioKind::all()
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = ScenarioKind::all().iter().map(|k| k.name()).collect();
                TulleError::InvalidConfig(format!(
                    "Unknown scenario '{s}' (available: {})",
                    names.join(", ")
                ))
            })
    }
}

/// A fully specified benchmark scenario.
#[derive(Debug, Clone)]
pub struct Scenario {
    /// Scenario type.
    pub kind: ScenarioKind,
    /// Cloth mesh, groups included.
    pub mesh: ClothMesh,
    /// Solver configuration (pinned group, gravity, scheme).
    pub config: SolverConfig,
    /// Material the constants are derived from.
    pub material: ClothProperties,
    /// Number of frames to run.
    pub frames: u64,
}

impl Scenario {
    /// Create the hanging membrane scenario.
    ///
    /// A 2m × 2m membrane at 20×20 resolution with its border pinned,
    /// run for 120 frames.
    pub fn hanging_membrane() -> Self {
        Self::new(ScenarioKind::HangingMembrane, square_grid(20, 20, 2.0, 2.0))
    }

    /// Create the corner pinned scenario.
    ///
    /// The smallest interesting cloth: 3×3 nodes 0.1 m apart, held by
    /// the bottom-left corner only.
    pub fn corner_pinned() -> Self {
        let mut mesh = square_grid(2, 2, 0.2, 0.2);
        mesh.add_group(PhysicalGroup::new(
            SCENARIO_PINS.dimension,
            SCENARIO_PINS.tag,
            "corner",
            vec![0],
        ));
        Self::new(ScenarioKind::CornerPinned, mesh).pinning(SCENARIO_PINS)
    }

    /// Create the curtain scenario.
    ///
    /// A 2m × 2m membrane at 20×20 resolution pinned along the top row.
    pub fn curtain() -> Self {
        let (cols, rows) = (20, 20);
        let mut mesh = square_grid(cols, rows, 2.0, 2.0);
        mesh.add_group(PhysicalGroup::new(
            SCENARIO_PINS.dimension,
            SCENARIO_PINS.tag,
            "top",
            top_edge(cols, rows),
        ));
        Self::new(ScenarioKind::Curtain, mesh).pinning(SCENARIO_PINS)
    }

    /// Create the free fall scenario.
    ///
    /// A 1m × 1m membrane at 10×10 resolution with an empty pin group.
    pub fn free_fall() -> Self {
        let mut mesh = square_grid(10, 10, 1.0, 1.0);
        mesh.add_group(PhysicalGroup::new(
            SCENARIO_PINS.dimension,
            SCENARIO_PINS.tag,
            "none",
            Vec::new(),
        ));
        Self::new(ScenarioKind::FreeFall, mesh).pinning(SCENARIO_PINS)
    }

    /// Create a scenario by kind.
    pub fn from_kind(kind: ScenarioKind) -> Self {
        match kind {
            ScenarioKind::HangingMembrane => Self::hanging_membrane(),
            ScenarioKind::CornerPinned => Self::corner_pinned(),
            ScenarioKind::Curtain => Self::curtain(),
            ScenarioKind::FreeFall => Self::free_fall(),
        }
    }

    /// Replaces the material.
    pub fn with_material(mut self, properties: ClothProperties) -> Self {
        self.material = properties;
        self
    }

    /// Replaces the integration scheme.
    pub fn with_scheme(mut self, scheme: SchemeKind) -> Self {
        self.config.scheme = scheme;
        self
    }

    /// Replaces the frame count.
    pub fn with_frames(mut self, frames: u64) -> Self {
        self.frames = frames;
        self
    }

    /// Nodes the scenario pins.
    pub fn pinned_count(&self) -> usize {
        self.mesh
            .physical_group(self.config.pinned)
            .map_or(0, |nodes| nodes.len())
    }

    fn new(kind: ScenarioKind, mesh: ClothMesh) -> Self {
        Self {
            kind,
            mesh,
            config: SolverConfig::default(),
            material: ClothProperties::damped_membrane(),
            frames: 120,
        }
    }

    fn pinning(mut self, group: GroupRef) -> Self {
        self.config.pinned = group;
        self
    }
}
