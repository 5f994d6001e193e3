//! Representative node spacing measured from two edge groups.

use serde::{Deserialize, Serialize};
use tulle_mesh::{ClothMesh, GroupRef};
use tulle_types::{TulleError, TulleResult};

/// Node spacing along the two in-plane axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpacing {
    /// Spacing along X (m).
    pub dx: f32,
    /// Spacing along Y (m).
    pub dy: f32,
}

impl GridSpacing {
    /// Creates a spacing from explicit values.
    pub fn new(dx: f32, dy: f32) -> TulleResult<Self> {
        for (label, value) in [("dx", dx), ("dy", dy)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(TulleError::InvalidMesh(format!(
                    "Spacing {label} must be positive and finite, got {value}"
                )));
            }
        }
        Ok(Self { dx, dy })
    }

    /// Measures the spacing from two edge groups of `mesh`.
    ///
    /// `dx = (max x − min x) / (count − 1)` over the `side_x` group and
    /// `dy = (max y − min y) / (count − 1)` over the `side_y` group.
    pub fn from_groups(mesh: &ClothMesh, side_x: GroupRef, side_y: GroupRef) -> TulleResult<Self> {
        let dx = axis_spacing(&mesh.pos_x, mesh.physical_group(side_x)?, side_x)?;
        let dy = axis_spacing(&mesh.pos_y, mesh.physical_group(side_y)?, side_y)?;
        Self::new(dx, dy)
    }

    /// Returns `dy / dx`. Values other than 1.0 mean the mesh is anisotropic.
    pub fn aspect(&self) -> f32 {
        self.dy / self.dx
    }
}

fn axis_spacing(coords: &[f32], nodes: &[u32], group: GroupRef) -> TulleResult<f32> {
    if nodes.len() < 2 {
        return Err(TulleError::InvalidMesh(format!(
            "Spacing group {group} needs at least 2 nodes, has {}",
            nodes.len()
        )));
    }

    let (min, max) = nodes
        .iter()
        .map(|&i| coords[i as usize])
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), c| {
            (lo.min(c), hi.max(c))
        });

    let extent = max - min;
    if extent <= 0.0 {
        return Err(TulleError::InvalidMesh(format!(
            "Spacing group {group} has zero extent along its axis"
        )));
    }

    Ok(extent / (nodes.len() - 1) as f32)
}
