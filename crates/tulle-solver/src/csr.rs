//! Flattened spring network (compressed sparse rows).
//!
//! Every node owns a contiguous block of directed edges. `offset[i]` is
//! the exclusive end of node `i`'s block, so the block is
//! `offset[i-1]..offset[i]` (starting at 0 for the first node). The
//! per-edge arrays `nearest`, `resting`, and `stiffness` share the
//! flattened edge index.
//!
//! ```text
//! node:     0          1        2
//! offset: [ 3,         5,       8 ]
//! nearest:[ 1, 3, 4 |  0, 2  |  1, 4, 5 ]
//! ```
//!
//! An undirected connection is stored twice, once in each endpoint's
//! block. Newton's third law holds because the two copies carry the same
//! resting length and stiffness ([`NeighbourTable::is_symmetric`]).

use std::ops::Range;

use glam::Vec4;
use tulle_mesh::Topology;
use tulle_types::{TulleError, TulleResult};

/// CSR spring table assembled once from per-node neighbour lists.
#[derive(Debug, Clone, PartialEq)]
pub struct NeighbourTable {
    offset: Vec<u32>,
    nearest: Vec<u32>,
    resting: Vec<f32>,
    stiffness: Vec<f32>,
}

impl NeighbourTable {
    /// Concatenates per-node neighbour lists into a CSR table.
    ///
    /// Neighbour order is kept exactly as received. Resting lengths are
    /// measured from `positions` (the `w` component is ignored), and every
    /// edge gets the same `stiffness`.
    ///
    /// # Errors
    /// `InvalidTopology` when the list count differs from the node count,
    /// a neighbour index is out of range, a node lists itself, or an edge
    /// has zero (or non-finite) resting length. `InvalidMaterial` for a
    /// non-positive stiffness.
    pub fn assemble<L: AsRef<[u32]>>(
        neighbours: &[L],
        positions: &[Vec4],
        stiffness: f32,
    ) -> TulleResult<Self> {
        let n = positions.len();
        if neighbours.len() != n {
            return Err(TulleError::InvalidTopology(format!(
                "{} neighbour lists for {} nodes",
                neighbours.len(),
                n
            )));
        }
        if !(stiffness.is_finite() && stiffness > 0.0) {
            return Err(TulleError::InvalidMaterial(format!(
                "Spring stiffness must be positive, got {stiffness}"
            )));
        }

        let total: usize = neighbours.iter().map(|l| l.as_ref().len()).sum();
        if total > u32::MAX as usize {
            return Err(TulleError::InvalidTopology(format!(
                "{total} directed edges exceed the table's index range"
            )));
        }

        let mut offset = Vec::with_capacity(n);
        let mut nearest = Vec::with_capacity(total);
        let mut resting = Vec::with_capacity(total);

        for (i, list) in neighbours.iter().enumerate() {
            let origin = positions[i].truncate();
            for &k in list.as_ref() {
                let ku = k as usize;
                if ku >= n {
                    return Err(TulleError::InvalidTopology(format!(
                        "Node {i} lists neighbour {k}, but there are only {n} nodes"
                    )));
                }
                if ku == i {
                    return Err(TulleError::InvalidTopology(format!(
                        "Node {i} lists itself as a neighbour"
                    )));
                }
                let length = (positions[ku].truncate() - origin).length();
                if !(length.is_finite() && length > 0.0) {
                    return Err(TulleError::InvalidTopology(format!(
                        "Edge {i} -> {k} has resting length {length}"
                    )));
                }
                nearest.push(k);
                resting.push(length);
            }
            offset.push(nearest.len() as u32);
        }

        let stiffness = vec![stiffness; nearest.len()];

        tracing::debug!(
            nodes = n,
            edges = nearest.len(),
            "neighbour table assembled"
        );

        Ok(Self {
            offset,
            nearest,
            resting,
            stiffness,
        })
    }

    /// Assembles the table from mesh topology (nodes sharing a triangle).
    pub fn from_topology(
        topology: &Topology,
        positions: &[Vec4],
        stiffness: f32,
    ) -> TulleResult<Self> {
        let lists: Vec<&[u32]> = (0..topology.node_count())
            .map(|i| topology.neighbours(i))
            .collect();
        Self::assemble(&lists, positions, stiffness)
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.offset.len()
    }

    /// Returns the number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.nearest.len()
    }

    /// Returns the flattened edge range owned by node `i`.
    #[inline]
    pub fn block(&self, i: usize) -> Range<usize> {
        let start = if i == 0 { 0 } else { self.offset[i - 1] as usize };
        start..self.offset[i] as usize
    }

    /// Returns the number of springs attached to node `i`.
    #[inline]
    pub fn degree(&self, i: usize) -> usize {
        self.block(i).len()
    }

    /// Returns the neighbours of node `i` in stored order.
    pub fn neighbours(&self, i: usize) -> &[u32] {
        &self.nearest[self.block(i)]
    }

    /// Returns the node whose block contains flattened edge `j`.
    ///
    /// `j` must be less than [`edge_count`](Self::edge_count).
    pub fn owner(&self, j: usize) -> usize {
        debug_assert!(j < self.edge_count());
        self.offset.partition_point(|&end| end as usize <= j)
    }

    /// Exclusive block ends, one per node.
    pub fn offset(&self) -> &[u32] {
        &self.offset
    }

    /// Neighbour index per flattened edge.
    pub fn nearest(&self) -> &[u32] {
        &self.nearest
    }

    /// Resting length per flattened edge.
    pub fn resting(&self) -> &[f32] {
        &self.resting
    }

    /// Stiffness per flattened edge.
    pub fn stiffness(&self) -> &[f32] {
        &self.stiffness
    }

    /// Returns true if every directed edge `i -> k` has a mirror `k -> i`
    /// with the same resting length and stiffness.
    pub fn is_symmetric(&self) -> bool {
        (0..self.node_count()).all(|i| {
            self.block(i).all(|j| {
                let k = self.nearest[j] as usize;
                self.block(k).any(|m| {
                    self.nearest[m] as usize == i
                        && self.resting[m] == self.resting[j]
                        && self.stiffness[m] == self.stiffness[j]
                })
            })
        })
    }
}
