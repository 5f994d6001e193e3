//! Two-phase explicit integration.
//!
//! A step is two data-parallel passes, one task per node:
//!
//! 1. **Predictor** reads the authoritative state `S` and writes the
//!    intermediate state `S*`:
//!    `a = F(S)/m`, `p* = p + v·dt`, `v* = v + a·dt`, `a* = a`.
//! 2. **Corrector** reads `S*` and updates its own authoritative slot
//!    (Heun's method):
//!    `a' = F(S*)/m`, `p += dt·(v + v*)/2`, `v += dt·(a* + a')/2`, `a = a'`.
//!
//! Pinned nodes are copied through by the predictor and skipped by the
//! corrector. The corrector starts only after every predictor task has
//! finished.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tulle_compute::{ComputeBackend, KinematicBuffers, NodeKernel, NodeSlot, TaskGrid};
use tulle_types::{TulleError, TulleResult};

use crate::forces::net_force;
use crate::simulation::ClothModel;

/// Result of one integration step.
#[derive(Debug, Clone, Copy)]
pub struct StepResult {
    /// Number of passes dispatched.
    pub passes: u32,
    /// Wall-clock time for this step (seconds).
    pub wall_time: f64,
}

/// Predictor pass: authoritative → intermediate.
pub struct PredictorKernel<'a> {
    model: &'a ClothModel,
    src: &'a KinematicBuffers,
}

impl<'a> PredictorKernel<'a> {
    pub fn new(model: &'a ClothModel, src: &'a KinematicBuffers) -> Self {
        Self { model, src }
    }
}

impl NodeKernel for PredictorKernel<'_> {
    fn name(&self) -> &str {
        "predictor"
    }

    fn run(&self, node: usize, slot: NodeSlot<'_>) {
        let (p, v, a) = self.src.node(node);

        if !self.model.mask().is_free(node) {
            *slot.position = p;
            *slot.velocity = v;
            *slot.acceleration = a;
            return;
        }

        let constants = self.model.constants();
        let dt = constants.dt();
        let accel = net_force(self.model.table(), constants, self.src, node) / constants.mass();

        *slot.position = (p.truncate() + v * dt).extend(p.w);
        *slot.velocity = v + accel * dt;
        *slot.acceleration = accel;
    }
}

/// Corrector pass: intermediate → authoritative, in place.
pub struct CorrectorKernel<'a> {
    model: &'a ClothModel,
    predicted: &'a KinematicBuffers,
}

impl<'a> CorrectorKernel<'a> {
    pub fn new(model: &'a ClothModel, predicted: &'a KinematicBuffers) -> Self {
        Self { model, predicted }
    }
}

impl NodeKernel for CorrectorKernel<'_> {
    fn name(&self) -> &str {
        "corrector"
    }

    fn run(&self, node: usize, slot: NodeSlot<'_>) {
        if !self.model.mask().is_free(node) {
            return;
        }

        let constants = self.model.constants();
        let dt = constants.dt();
        let corrected =
            net_force(self.model.table(), constants, self.predicted, node) / constants.mass();

        let v = *slot.velocity;
        let v_star = self.predicted.velocity[node];
        let a_star = self.predicted.acceleration[node];

        let p = *slot.position;
        *slot.position = (p.truncate() + dt * (v + v_star) * 0.5).extend(p.w);
        *slot.velocity = v + dt * (a_star + corrected) * 0.5;
        *slot.acceleration = corrected;
    }
}

/// A way of advancing the authoritative state by one time step.
///
/// `state` is the authoritative set (already acquired by the caller);
/// `scratch` is the intermediate set.
pub trait IntegrationScheme: Send + Sync {
    /// Scheme name.
    fn name(&self) -> &str;

    /// Advances `state` by one `dt`.
    fn step(
        &self,
        model: &ClothModel,
        backend: &dyn ComputeBackend,
        state: &mut KinematicBuffers,
        scratch: &mut KinematicBuffers,
    ) -> TulleResult<StepResult>;
}

/// The kernels index the authoritative set by node, so its length must
/// match the model before any pass is dispatched.
fn check_state(model: &ClothModel, state: &KinematicBuffers) -> TulleResult<()> {
    if state.len() != model.node_count() {
        return Err(TulleError::Compute(format!(
            "Authoritative state holds {} nodes, model has {}",
            state.len(),
            model.node_count()
        )));
    }
    Ok(())
}

/// Predictor followed by corrector. The production scheme.
#[derive(Debug, Default, Clone, Copy)]
pub struct PredictorCorrector;

impl IntegrationScheme for PredictorCorrector {
    fn name(&self) -> &str {
        "predictor_corrector"
    }

    fn step(
        &self,
        model: &ClothModel,
        backend: &dyn ComputeBackend,
        state: &mut KinematicBuffers,
        scratch: &mut KinematicBuffers,
    ) -> TulleResult<StepResult> {
        check_state(model, state)?;
        let start = Instant::now();
        let grid = TaskGrid::new(model.node_count());

        backend.execute(&PredictorKernel::new(model, state), grid, scratch)?;
        backend.execute(&CorrectorKernel::new(model, scratch), grid, state)?;

        Ok(StepResult {
            passes: 2,
            wall_time: start.elapsed().as_secs_f64(),
        })
    }
}

/// Predictor only, committed directly. Baseline for comparisons.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExplicitEuler;

impl IntegrationScheme for ExplicitEuler {
    fn name(&self) -> &str {
        "explicit_euler"
    }

    fn step(
        &self,
        model: &ClothModel,
        backend: &dyn ComputeBackend,
        state: &mut KinematicBuffers,
        scratch: &mut KinematicBuffers,
    ) -> TulleResult<StepResult> {
        check_state(model, state)?;
        let start = Instant::now();
        let grid = TaskGrid::new(model.node_count());

        backend.execute(&PredictorKernel::new(model, state), grid, scratch)?;
        state.copy_from(scratch)?;

        Ok(StepResult {
            passes: 1,
            wall_time: start.elapsed().as_secs_f64(),
        })
    }
}

/// Selects an [`IntegrationScheme`] from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemeKind {
    #[default]
    PredictorCorrector,
    ExplicitEuler,
}

impl SchemeKind {
    pub fn create(self) -> Box<dyn IntegrationScheme> {
        match self {
            SchemeKind::PredictorCorrector => Box::new(PredictorCorrector),
            SchemeKind::ExplicitEuler => Box::new(ExplicitEuler),
        }
    }
}

impl std::str::FromStr for SchemeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pc" | "predictor_corrector" => Ok(SchemeKind::PredictorCorrector),
            "euler" | "explicit_euler" => Ok(SchemeKind::ExplicitEuler),
            other => Err(format!("unknown scheme '{other}' (expected pc or euler)")),
        }
    }
}
