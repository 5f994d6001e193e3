//! Simulation setup and stepping.
//!
//! [`ClothSimulation::from_mesh`] runs the whole setup pipeline once:
//!
//! ```text
//! mesh ──► Topology ──► NeighbourTable (resting lengths, stiffness)
//!   │
//!   ├──► GridSpacing ──► MaterialParameters ──► SimulationConstants
//!   │
//!   └──► pinned group ──► FreedomMask
//! ```
//!
//! after which only [`ClothSimulation::step`] mutates anything.

use glam::{Vec3, Vec4};
use tulle_compute::{ComputeBackend, KinematicBuffers, SharedBuffer};
use tulle_material::{ClothProperties, GridSpacing, MaterialParameters};
use tulle_mesh::{ClothMesh, Topology};
use tulle_types::{TulleError, TulleResult};

use crate::boundary::FreedomMask;
use crate::config::{SimulationConstants, SolverConfig};
use crate::csr::NeighbourTable;
use crate::energy::EnergyReport;
use crate::integrator::{IntegrationScheme, StepResult};
use crate::state::KinematicsStore;

/// Read-only data shared by every kernel task.
#[derive(Debug, Clone)]
pub struct ClothModel {
    table: NeighbourTable,
    mask: FreedomMask,
    constants: SimulationConstants,
}

impl ClothModel {
    /// Bundles the network, the mask, and the constants.
    ///
    /// Fails with `InvalidTopology` if table and mask disagree on the
    /// node count.
    pub fn new(
        table: NeighbourTable,
        mask: FreedomMask,
        constants: SimulationConstants,
    ) -> TulleResult<Self> {
        if table.node_count() != mask.len() {
            return Err(TulleError::InvalidTopology(format!(
                "Neighbour table has {} nodes, freedom mask has {}",
                table.node_count(),
                mask.len()
            )));
        }
        Ok(Self {
            table,
            mask,
            constants,
        })
    }

    pub fn node_count(&self) -> usize {
        self.table.node_count()
    }

    pub fn table(&self) -> &NeighbourTable {
        &self.table
    }

    pub fn mask(&self) -> &FreedomMask {
        &self.mask
    }

    pub fn constants(&self) -> &SimulationConstants {
        &self.constants
    }
}

/// A configured cloth: model, state, and integration scheme.
pub struct ClothSimulation {
    model: ClothModel,
    store: KinematicsStore,
    scheme: Box<dyn IntegrationScheme>,
    parameters: Option<MaterialParameters>,
    rest_positions: Vec<Vec4>,
    frame: u64,
    sim_time: f64,
}

impl ClothSimulation {
    /// Builds a simulation from an imported mesh.
    ///
    /// Topology, material, and boundary errors are reported here, before
    /// any frame runs.
    pub fn from_mesh(
        mesh: &ClothMesh,
        props: &ClothProperties,
        config: &SolverConfig,
    ) -> TulleResult<Self> {
        mesh.validate()?;
        config.validate()?;

        let positions = mesh.positions();
        let topology = Topology::build(mesh);
        let spacing = GridSpacing::from_groups(mesh, config.side_x, config.side_y)?;
        let params = MaterialParameters::derive(props, spacing)?;

        let table = NeighbourTable::from_topology(&topology, &positions, params.stiffness)?;
        let mask = FreedomMask::classify(mesh.node_count(), mesh.physical_group(config.pinned)?)?;
        let constants =
            SimulationConstants::from_parameters(Vec3::from_array(config.gravity), &params)?;

        tracing::info!(
            nodes = mesh.node_count(),
            edges = table.edge_count(),
            pinned = mask.pinned_count(),
            dt = params.dt,
            scheme = ?config.scheme,
            "cloth simulation initialized"
        );

        let model = ClothModel::new(table, mask, constants)?;
        let mut sim = Self::from_model(model, positions, config.scheme.create())?;
        sim.parameters = Some(params);
        Ok(sim)
    }

    /// Builds a simulation from an already assembled model.
    pub fn from_model(
        model: ClothModel,
        positions: Vec<Vec4>,
        scheme: Box<dyn IntegrationScheme>,
    ) -> TulleResult<Self> {
        if positions.len() != model.node_count() {
            return Err(TulleError::InvalidMesh(format!(
                "{} positions for a model of {} nodes",
                positions.len(),
                model.node_count()
            )));
        }
        Ok(Self {
            model,
            store: KinematicsStore::at_rest(positions.clone()),
            scheme,
            parameters: None,
            rest_positions: positions,
            frame: 0,
            sim_time: 0.0,
        })
    }

    /// Replaces the integration scheme.
    pub fn set_scheme(&mut self, scheme: Box<dyn IntegrationScheme>) {
        self.scheme = scheme;
    }

    /// Advances by one time step.
    pub fn step(&mut self, backend: &dyn ComputeBackend) -> TulleResult<StepResult> {
        let result = self.store.advance(self.scheme.as_ref(), &self.model, backend)?;
        self.frame += 1;
        self.sim_time += self.model.constants().dt() as f64;
        tracing::debug!(
            frame = self.frame,
            wall_time = result.wall_time,
            "step complete"
        );
        Ok(result)
    }

    pub fn model(&self) -> &ClothModel {
        &self.model
    }

    pub fn store(&self) -> &KinematicsStore {
        &self.store
    }

    /// Shared handle on the authoritative state.
    pub fn shared_state(&self) -> &SharedBuffer<KinematicBuffers> {
        self.store.authoritative()
    }

    /// Copy of the authoritative state.
    pub fn snapshot(&self) -> TulleResult<KinematicBuffers> {
        self.store.snapshot()
    }

    /// Material parameters, when built from a mesh.
    pub fn parameters(&self) -> Option<&MaterialParameters> {
        self.parameters.as_ref()
    }

    /// Positions at import time.
    pub fn rest_positions(&self) -> &[Vec4] {
        &self.rest_positions
    }

    pub fn scheme_name(&self) -> &str {
        self.scheme.name()
    }

    pub fn node_count(&self) -> usize {
        self.model.node_count()
    }

    /// Number of steps taken.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Simulated time in seconds.
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    pub fn dt(&self) -> f32 {
        self.model.constants().dt()
    }

    /// Energy of the current authoritative state.
    pub fn energy(&self) -> TulleResult<EnergyReport> {
        let state = self.store.authoritative().read()?;
        Ok(EnergyReport::compute(&self.model, &state))
    }

    /// Fails with `InvalidState` when any node's position or velocity is
    /// no longer finite.
    pub fn check_finite(&self) -> TulleResult<()> {
        let state = self.store.authoritative().read()?;
        let diverged = (0..state.len())
            .find(|&i| !(state.position[i].is_finite() && state.velocity[i].is_finite()));
        match diverged {
            Some(node) => Err(TulleError::InvalidState(format!(
                "Node {node} is no longer finite after {} steps ({:.4}s simulated)",
                self.frame, self.sim_time
            ))),
            None => Ok(()),
        }
    }

    /// Largest distance any node has moved from its imported position.
    ///
    /// NaN once any node has diverged.
    pub fn max_displacement(&self) -> TulleResult<f32> {
        let state = self.store.authoritative().read()?;
        Ok(self.displacements(&state, |_| true))
    }

    /// Largest distance any pinned node has moved (zero when pins hold).
    pub fn max_pinned_drift(&self) -> TulleResult<f32> {
        let state = self.store.authoritative().read()?;
        let mask = self.model.mask();
        Ok(self.displacements(&state, |i| !mask.is_free(i)))
    }

    fn displacements(&self, state: &KinematicBuffers, include: impl Fn(usize) -> bool) -> f32 {
        self.rest_positions
            .iter()
            .enumerate()
            .filter(|(i, _)| include(*i))
            .map(|(i, rest)| (state.position3(i) - rest.truncate()).length())
            .fold(0.0, nan_max)
    }
}

/// `f32::max` that keeps a NaN instead of skipping it.
fn nan_max(acc: f32, d: f32) -> f32 {
    if acc.is_nan() || d.is_nan() {
        f32::NAN
    } else {
        acc.max(d)
    }
}

impl std::fmt::Debug for ClothSimulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClothSimulation")
            .field("nodes", &self.node_count())
            .field("scheme", &self.scheme.name())
            .field("frame", &self.frame)
            .field("sim_time", &self.sim_time)
            .finish()
    }
}
