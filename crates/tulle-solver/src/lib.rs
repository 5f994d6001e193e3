//! # tulle-solver
//!
//! Spring-network assembly and time integration.
//!
//! ## Key Types
//!
//! - [`NeighbourTable`]: Flattened (CSR) spring network with resting lengths
//! - [`FreedomMask`]: Per-node free/pinned flags
//! - [`SimulationConstants`]: Gravity, mass, damping, time step (write-once)
//! - [`KinematicsStore`]: Authoritative and intermediate state sets
//! - [`IntegrationScheme`]: Pluggable step (predictor/corrector, explicit Euler)
//! - [`ClothSimulation`]: Setup from an imported mesh plus the stepping loop

pub mod boundary;
pub mod config;
pub mod csr;
pub mod energy;
pub mod forces;
pub mod integrator;
pub mod simulation;
pub mod state;

pub use boundary::FreedomMask;
pub use config::{SimulationConstants, SolverConfig};
pub use csr::NeighbourTable;
pub use energy::EnergyReport;
pub use integrator::{
    CorrectorKernel, ExplicitEuler, IntegrationScheme, PredictorCorrector, PredictorKernel,
    SchemeKind, StepResult,
};
pub use simulation::{ClothModel, ClothSimulation};
pub use state::KinematicsStore;
