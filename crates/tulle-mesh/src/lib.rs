//! # tulle-mesh
//!
//! The mesh-import side of the engine. A [`ClothMesh`] holds node
//! coordinates in Structure-of-Arrays layout, the triangle list, and the
//! physical groups used to locate the pinned boundary and the two edges
//! that define grid spacing.
//!
//! ## Key Types
//!
//! - [`ClothMesh`]: Node coordinates, triangles, physical groups.
//! - [`PhysicalGroup`]: A tagged node set (`dimension`, `tag`, `name`).
//! - [`Topology`]: Per-node neighbour lists and unique edges.
//! - Procedural generators for square membranes.

pub mod generators;
pub mod groups;
pub mod mesh;
pub mod topology;

pub use groups::{GroupRef, PhysicalGroup};
pub use mesh::ClothMesh;
pub use topology::Topology;
