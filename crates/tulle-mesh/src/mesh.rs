//! Core cloth mesh type with SoA (Structure of Arrays) layout.
//!
//! Each coordinate channel is stored contiguously:
//! - `pos_x: [x0, x1, x2, ...]`
//! - `pos_y: [y0, y1, y2, ...]`
//! - `pos_z: [z0, z1, z2, ...]`
//! - `pos_w: [w0, w1, w2, ...]` (homogeneous coordinate, usually 1.0)

use std::path::Path;

use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};
use tulle_types::constants::DEFAULT_W;
use tulle_types::{TulleError, TulleResult};

use crate::groups::{GroupRef, PhysicalGroup};

/// An imported triangulated cloth surface.
///
/// Node data is stored in separate per-channel arrays. Triangle indices
/// reference into these arrays. Physical groups tag subsets of nodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClothMesh {
    // --- Node data (SoA) ---
    /// X coordinates of all nodes.
    pub pos_x: Vec<f32>,
    /// Y coordinates of all nodes.
    pub pos_y: Vec<f32>,
    /// Z coordinates of all nodes.
    pub pos_z: Vec<f32>,
    /// Homogeneous coordinate of all nodes. Empty on import means "all 1.0".
    #[serde(default)]
    pub pos_w: Vec<f32>,

    // --- Element data ---
    /// Triangle indices, stored flat: `[t0v0, t0v1, t0v2, t1v0, ...]`.
    pub indices: Vec<u32>,

    /// Physical groups (boundary curves, measurement edges, ...).
    #[serde(default)]
    pub groups: Vec<PhysicalGroup>,
}

impl ClothMesh {
    /// Creates an empty mesh with pre-allocated capacity.
    pub fn with_capacity(node_capacity: usize, triangle_capacity: usize) -> Self {
        Self {
            pos_x: Vec::with_capacity(node_capacity),
            pos_y: Vec::with_capacity(node_capacity),
            pos_z: Vec::with_capacity(node_capacity),
            pos_w: Vec::with_capacity(node_capacity),
            indices: Vec::with_capacity(triangle_capacity * 3),
            groups: Vec::new(),
        }
    }

    /// Returns the number of nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.pos_x.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns the position of node `i` as a `Vec3`.
    #[inline]
    pub fn position(&self, i: usize) -> Vec3 {
        Vec3::new(self.pos_x[i], self.pos_y[i], self.pos_z[i])
    }

    /// Returns the homogeneous position of node `i`.
    #[inline]
    pub fn position_homogeneous(&self, i: usize) -> Vec4 {
        let w = self.pos_w.get(i).copied().unwrap_or(DEFAULT_W);
        Vec4::new(self.pos_x[i], self.pos_y[i], self.pos_z[i], w)
    }

    /// Returns all homogeneous positions in node order.
    pub fn positions(&self) -> Vec<Vec4> {
        (0..self.node_count())
            .map(|i| self.position_homogeneous(i))
            .collect()
    }

    /// Returns the three node indices of triangle `t`.
    #[inline]
    pub fn triangle(&self, t: usize) -> [u32; 3] {
        let base = t * 3;
        [self.indices[base], self.indices[base + 1], self.indices[base + 2]]
    }

    /// Appends a node and returns its index.
    pub fn push_node(&mut self, x: f32, y: f32, z: f32) -> u32 {
        self.pos_x.push(x);
        self.pos_y.push(y);
        self.pos_z.push(z);
        self.pos_w.push(DEFAULT_W);
        (self.pos_x.len() - 1) as u32
    }

    /// Appends a triangle.
    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Adds a physical group, replacing any group with the same address.
    pub fn add_group(&mut self, group: PhysicalGroup) {
        self.groups
            .retain(|g| !(g.dimension == group.dimension && g.tag == group.tag));
        self.groups.push(group);
    }

    /// Returns the node set of the physical group at `(dimension, tag)`.
    pub fn physical(&self, dimension: u32, tag: u32) -> TulleResult<&[u32]> {
        self.physical_group(GroupRef::new(dimension, tag))
    }

    /// Returns the node set of the referenced physical group.
    pub fn physical_group(&self, group: GroupRef) -> TulleResult<&[u32]> {
        self.groups
            .iter()
            .find(|g| g.matches(&group))
            .map(|g| g.nodes.as_slice())
            .ok_or_else(|| {
                TulleError::InvalidMesh(format!("No physical group at {group}"))
            })
    }

    /// Returns the node set of the physical group with the given name.
    pub fn group(&self, name: &str) -> Option<&[u32]> {
        self.groups
            .iter()
            .find(|g| g.name == name)
            .map(|g| g.nodes.as_slice())
    }

    /// Validates mesh integrity.
    ///
    /// Checks:
    /// - All SoA arrays have the same length (an empty `pos_w` is allowed)
    /// - Coordinates are finite
    /// - Triangle indices are within bounds and not repeated
    /// - Group members are within bounds
    pub fn validate(&self) -> TulleResult<()> {
        let n = self.pos_x.len();

        if self.pos_y.len() != n || self.pos_z.len() != n {
            return Err(TulleError::InvalidMesh(
                "Position arrays have inconsistent lengths".into(),
            ));
        }
        if !self.pos_w.is_empty() && self.pos_w.len() != n {
            return Err(TulleError::InvalidMesh(format!(
                "Homogeneous coordinate count ({}) != node count ({})",
                self.pos_w.len(),
                n
            )));
        }

        let coords = self.pos_x.iter().chain(&self.pos_y).chain(&self.pos_z);
        if coords.into_iter().any(|c| !c.is_finite()) {
            return Err(TulleError::InvalidMesh(
                "Node coordinates must be finite".into(),
            ));
        }

        if self.indices.len() % 3 != 0 {
            return Err(TulleError::InvalidMesh(
                "Index count is not divisible by 3".into(),
            ));
        }

        for (i, &idx) in self.indices.iter().enumerate() {
            if idx as usize >= n {
                return Err(TulleError::InvalidMesh(format!(
                    "Index {} at position {} is out of range (node count: {})",
                    idx, i, n
                )));
            }
        }

        for t in 0..self.triangle_count() {
            let [a, b, c] = self.triangle(t);
            if a == b || b == c || a == c {
                return Err(TulleError::InvalidMesh(format!(
                    "Triangle {} has repeated node indices: [{}, {}, {}]",
                    t, a, b, c
                )));
            }
        }

        for group in &self.groups {
            if let Some(&bad) = group.nodes.iter().find(|&&v| v as usize >= n) {
                return Err(TulleError::InvalidMesh(format!(
                    "Group '{}' references node {} (node count: {})",
                    group.name, bad, n
                )));
            }
        }

        Ok(())
    }

    /// Parses a mesh from its JSON representation and validates it.
    ///
    /// A missing `pos_w` channel is filled with 1.0.
    pub fn from_json(json: &str) -> TulleResult<Self> {
        let mut mesh: ClothMesh = serde_json::from_str(json)
            .map_err(|e| TulleError::Serialization(format!("Mesh JSON: {e}")))?;
        if mesh.pos_w.is_empty() {
            mesh.pos_w = vec![DEFAULT_W; mesh.node_count()];
        }
        mesh.validate()?;
        tracing::debug!(
            nodes = mesh.node_count(),
            triangles = mesh.triangle_count(),
            groups = mesh.groups.len(),
            "mesh imported"
        );
        Ok(mesh)
    }

    /// Reads and parses a JSON mesh file.
    pub fn load(path: impl AsRef<Path>) -> TulleResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Serializes the mesh to JSON.
    pub fn to_json(&self) -> TulleResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| TulleError::Serialization(format!("Mesh JSON: {e}")))
    }
}
