//! Energy diagnostics.

use serde::{Deserialize, Serialize};
use tulle_compute::KinematicBuffers;

use crate::simulation::ClothModel;

/// Energy of a state, in joules.
///
/// Potential energy is measured against the origin along the gravity
/// direction. Elastic energy halves the sum over directed edges, since
/// each spring is stored in both endpoints' blocks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EnergyReport {
    pub kinetic: f64,
    pub potential: f64,
    pub elastic: f64,
}

impl EnergyReport {
    pub fn compute(model: &ClothModel, state: &KinematicBuffers) -> Self {
        let constants = model.constants();
        let table = model.table();
        let m = constants.mass() as f64;
        let g = constants.gravity();

        let mut kinetic = 0.0;
        let mut potential = 0.0;
        let mut elastic = 0.0;

        for i in 0..state.len() {
            let p = state.position3(i);
            kinetic += 0.5 * m * state.velocity[i].length_squared() as f64;
            potential -= m * g.dot(p) as f64;

            for j in table.block(i) {
                let k = table.nearest()[j] as usize;
                let stretch = (state.position3(k) - p).length() - table.resting()[j];
                elastic += 0.25 * table.stiffness()[j] as f64 * (stretch * stretch) as f64;
            }
        }

        Self {
            kinetic,
            potential,
            elastic,
        }
    }

    pub fn total(&self) -> f64 {
        self.kinetic + self.potential + self.elastic
    }
}
