//! Mesh topology queries.
//!
//! Builds adjacency data from the triangle index buffer. The per-node
//! neighbour lists are what the spring network is assembled from: two
//! nodes are connected by a spring when they share a triangle.

use std::collections::BTreeSet;

use crate::mesh::ClothMesh;

/// Precomputed topology information for a cloth mesh.
///
/// Built once after import. Neighbour lists keep first-encounter order
/// over the element list, so the same mesh always produces the same
/// flattened spring layout.
#[derive(Debug, Clone)]
pub struct Topology {
    /// For each node, the nodes it shares a triangle with.
    pub node_neighbours: Vec<Vec<u32>>,

    /// Unique edges as `[v_min, v_max]` pairs, sorted.
    pub edges: Vec<[u32; 2]>,
}

impl Topology {
    /// Build topology from a cloth mesh.
    pub fn build(mesh: &ClothMesh) -> Self {
        let mut node_neighbours: Vec<Vec<u32>> = vec![Vec::new(); mesh.node_count()];
        let mut edge_set: BTreeSet<[u32; 2]> = BTreeSet::new();

        for t in 0..mesh.triangle_count() {
            let tri = mesh.triangle(t);
            for (slot, &v) in tri.iter().enumerate() {
                // The other two corners, in winding order after `v`
                for step in 1..3 {
                    let other = tri[(slot + step) % 3];
                    let list = &mut node_neighbours[v as usize];
                    if !list.contains(&other) {
                        list.push(other);
                    }
                }
            }

            let [a, b, c] = tri;
            for (v0, v1) in [(a, b), (b, c), (c, a)] {
                edge_set.insert([v0.min(v1), v0.max(v1)]);
            }
        }

        Self {
            node_neighbours,
            edges: edge_set.into_iter().collect(),
        }
    }

    /// Returns the number of nodes the topology was built for.
    pub fn node_count(&self) -> usize {
        self.node_neighbours.len()
    }

    /// Returns the directly connected neighbours of node `i`.
    pub fn neighbours(&self, i: usize) -> &[u32] {
        &self.node_neighbours[i]
    }
}
