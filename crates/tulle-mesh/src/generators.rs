//! Procedural mesh generators for scenarios and testing.
//!
//! These generators produce deterministic, resolution-configurable
//! membranes together with the physical groups the engine expects:
//!
//! | Group | `(dim, tag)` | Nodes |
//! |---|---|---|
//! | `border` | `(1, 1)` | every node on the outer boundary |
//! | `side_x` | `(1, 2)` | the bottom edge, running along X |
//! | `side_y` | `(1, 3)` | the left edge, running along Y |

use crate::groups::{GroupRef, PhysicalGroup};
use crate::mesh::ClothMesh;

/// Generates a flat rectangular membrane in the XY plane at Z = 0.
///
/// The grid spans `[-width/2, width/2]` in X and `[-height/2, height/2]`
/// in Y. Nodes are numbered row by row starting at the bottom-left corner.
/// Each quad is split along its bottom-left to top-right diagonal.
///
/// # Arguments
/// - `cols`: Number of quads along X (node count = cols + 1).
/// - `rows`: Number of quads along Y (node count = rows + 1).
/// - `width`: Total width in meters.
/// - `height`: Total height in meters.
///
/// # Example
/// ```
/// use tulle_mesh::generators::square_grid;
/// let mesh = square_grid(2, 2, 2.0, 2.0);
/// assert_eq!(mesh.node_count(), 9);      // 3×3 nodes
/// assert_eq!(mesh.triangle_count(), 8);  // 2×2 quads × 2 tris each
/// assert_eq!(mesh.physical(1, 1).unwrap().len(), 8);
/// ```
pub fn square_grid(cols: usize, rows: usize, width: f32, height: f32) -> ClothMesh {
    let nodes_x = cols + 1;
    let nodes_y = rows + 1;
    let mut mesh = ClothMesh::with_capacity(nodes_x * nodes_y, cols * rows * 2);

    let half_w = width / 2.0;
    let half_h = height / 2.0;

    for j in 0..nodes_y {
        for i in 0..nodes_x {
            let u = i as f32 / cols.max(1) as f32;
            let v = j as f32 / rows.max(1) as f32;
            mesh.push_node(-half_w + u * width, -half_h + v * height, 0.0);
        }
    }

    for j in 0..rows {
        for i in 0..cols {
            let bot_left = (j * nodes_x + i) as u32;
            let bot_right = bot_left + 1;
            let top_left = bot_left + nodes_x as u32;
            let top_right = top_left + 1;

            mesh.push_triangle(bot_left, bot_right, top_right);
            mesh.push_triangle(bot_left, top_right, top_left);
        }
    }

    let index = |i: usize, j: usize| (j * nodes_x + i) as u32;

    let border: Vec<u32> = (0..nodes_y)
        .flat_map(|j| (0..nodes_x).map(move |i| (i, j)))
        .filter(|&(i, j)| i == 0 || j == 0 || i == cols || j == rows)
        .map(|(i, j)| index(i, j))
        .collect();
    let side_x: Vec<u32> = (0..nodes_x).map(|i| index(i, 0)).collect();
    let side_y: Vec<u32> = (0..nodes_y).map(|j| index(0, j)).collect();

    mesh.add_group(group(GroupRef::BORDER, "border", border));
    mesh.add_group(group(GroupRef::SIDE_X, "side_x", side_x));
    mesh.add_group(group(GroupRef::SIDE_Y, "side_y", side_y));

    mesh
}

/// Node indices of the top edge of a [`square_grid`] (largest Y).
pub fn top_edge(cols: usize, rows: usize) -> Vec<u32> {
    let nodes_x = cols + 1;
    (0..nodes_x).map(|i| (rows * nodes_x + i) as u32).collect()
}

fn group(address: GroupRef, name: &str, nodes: Vec<u32>) -> PhysicalGroup {
    PhysicalGroup::new(address.dimension, address.tag, name, nodes)
}
