//! Force law of the spring network.
//!
//! For node `i` and each edge `j` of its block with neighbour `k`:
//!
//! ```text
//! d = p[k] - p[i],  L = |d|,  u = d / L
//! F += K[j]·(L - R[j])·u  +  B·((v[k] - v[i])·u)·u
//! ```
//!
//! followed by `F += m·g`.

use glam::Vec3;
use tulle_compute::KinematicBuffers;
use tulle_types::constants::EPSILON;

use crate::config::SimulationConstants;
use crate::csr::NeighbourTable;

/// Spring plus dashpot force of edge `j` acting on node `i`.
///
/// Returns zero when the edge has collapsed below `EPSILON`, since its
/// direction is undefined.
#[inline]
pub fn edge_force(
    table: &NeighbourTable,
    constants: &SimulationConstants,
    state: &KinematicBuffers,
    i: usize,
    j: usize,
) -> Vec3 {
    let k = table.nearest()[j] as usize;
    let d = state.position3(k) - state.position3(i);
    let length = d.length();
    if length < EPSILON {
        return Vec3::ZERO;
    }
    let u = d / length;
    let spring = table.stiffness()[j] * (length - table.resting()[j]);
    let relative = (state.velocity[k] - state.velocity[i]).dot(u);
    (spring + constants.damping() * relative) * u
}

/// Sum of spring and damping forces on node `i`, without gravity.
pub fn internal_force(
    table: &NeighbourTable,
    constants: &SimulationConstants,
    state: &KinematicBuffers,
    i: usize,
) -> Vec3 {
    table
        .block(i)
        .map(|j| edge_force(table, constants, state, i, j))
        .fold(Vec3::ZERO, |acc, f| acc + f)
}

/// Net force on node `i`: internal forces plus `m·g`.
///
/// A node with an empty block feels gravity only.
pub fn net_force(
    table: &NeighbourTable,
    constants: &SimulationConstants,
    state: &KinematicBuffers,
    i: usize,
) -> Vec3 {
    internal_force(table, constants, state, i) + constants.mass() * constants.gravity()
}
