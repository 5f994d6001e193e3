//! Kinematics store: the two state sets the integrator alternates between.
//!
//! The authoritative set is the one the renderer draws. It lives in a
//! [`SharedBuffer`] and is only mutated under an acquire guard. The
//! intermediate set holds the predictor's output and is private to the
//! solver.

use glam::Vec4;
use tulle_compute::{ComputeBackend, KinematicBuffers, SharedBuffer};
use tulle_types::TulleResult;

use crate::integrator::{IntegrationScheme, StepResult};
use crate::simulation::ClothModel;

/// Attribute name under which positions are shared with the renderer.
pub const POSITION_ATTRIBUTE: &str = "voxel_center";

/// Authoritative and intermediate kinematic state.
#[derive(Debug)]
pub struct KinematicsStore {
    authoritative: SharedBuffer<KinematicBuffers>,
    intermediate: KinematicBuffers,
}

impl KinematicsStore {
    /// Starts every node at rest at the given position.
    pub fn at_rest(positions: Vec<Vec4>) -> Self {
        let intermediate = KinematicBuffers::at_rest(positions.clone());
        Self {
            authoritative: SharedBuffer::new(
                POSITION_ATTRIBUTE,
                KinematicBuffers::at_rest(positions),
            ),
            intermediate,
        }
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.intermediate.len()
    }

    /// Shared handle on the authoritative state (for the renderer).
    pub fn authoritative(&self) -> &SharedBuffer<KinematicBuffers> {
        &self.authoritative
    }

    /// Predictor output of the most recent step.
    pub fn intermediate(&self) -> &KinematicBuffers {
        &self.intermediate
    }

    /// Copy of the authoritative state.
    pub fn snapshot(&self) -> TulleResult<KinematicBuffers> {
        self.authoritative.snapshot()
    }

    /// Runs one step of `scheme` with the authoritative buffer acquired.
    ///
    /// The guard is dropped before returning, whether the step succeeds
    /// or not.
    pub fn advance(
        &mut self,
        scheme: &dyn IntegrationScheme,
        model: &ClothModel,
        backend: &dyn ComputeBackend,
    ) -> TulleResult<StepResult> {
        let mut state = self.authoritative.acquire()?;
        scheme.step(model, backend, &mut state, &mut self.intermediate)
    }
}
