//! Physical groups: named, tagged node sets attached to a mesh.
//!
//! A group is addressed the way mesh generators address them, by
//! `(dimension, tag)`: dimension 0 for points, 1 for curves, 2 for
//! surfaces. The engine uses curve groups to find the boundary that
//! gets pinned and the two edges that define the grid spacing.

use serde::{Deserialize, Serialize};

/// A tagged set of node indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhysicalGroup {
    /// Topological dimension of the entity the group was defined on.
    pub dimension: u32,
    /// Numeric tag, unique within a dimension.
    pub tag: u32,
    /// Human-readable name (e.g. "border").
    pub name: String,
    /// Node indices belonging to the group, in import order.
    pub nodes: Vec<u32>,
}

impl PhysicalGroup {
    /// Creates a group.
    pub fn new(dimension: u32, tag: u32, name: impl Into<String>, nodes: Vec<u32>) -> Self {
        Self {
            dimension,
            tag,
            name: name.into(),
            nodes,
        }
    }

    /// Returns true if this group answers to the given reference.
    pub fn matches(&self, group: &GroupRef) -> bool {
        self.dimension == group.dimension && self.tag == group.tag
    }
}

/// A `(dimension, tag)` address of a physical group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupRef {
    pub dimension: u32,
    pub tag: u32,
}

impl GroupRef {
    /// Creates a group reference.
    pub const fn new(dimension: u32, tag: u32) -> Self {
        Self { dimension, tag }
    }

    /// The boundary curve that is pinned by default.
    pub const BORDER: GroupRef = GroupRef::new(1, 1);
    /// The edge running along X, used to measure `dx`.
    pub const SIDE_X: GroupRef = GroupRef::new(1, 2);
    /// The edge running along Y, used to measure `dy`.
    pub const SIDE_Y: GroupRef = GroupRef::new(1, 3);
}

impl std::fmt::Display for GroupRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.dimension, self.tag)
    }
}
