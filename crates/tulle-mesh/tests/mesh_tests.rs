//! Integration tests for tulle-mesh.

use tulle_mesh::generators::{square_grid, top_edge};
use tulle_mesh::topology::Topology;
use tulle_mesh::{ClothMesh, GroupRef, PhysicalGroup};

// ─── ClothMesh Tests ──────────────────────────────────────────

fn make_single_triangle() -> ClothMesh {
    ClothMesh {
        pos_x: vec![0.0, 1.0, 0.0],
        pos_y: vec![0.0, 0.0, 1.0],
        pos_z: vec![0.0, 0.0, 0.0],
        pos_w: vec![1.0, 1.0, 1.0],
        indices: vec![0, 1, 2],
        groups: vec![PhysicalGroup::new(1, 1, "border", vec![0, 1, 2])],
    }
}

#[test]
fn basic_counts() {
    let mesh = make_single_triangle();
    assert_eq!(mesh.node_count(), 3);
    assert_eq!(mesh.triangle_count(), 1);
}

#[test]
fn position_access() {
    let mesh = make_single_triangle();
    assert_eq!(mesh.position(1).to_array(), [1.0, 0.0, 0.0]);
    assert_eq!(mesh.position_homogeneous(2).to_array(), [0.0, 1.0, 0.0, 1.0]);
}

#[test]
fn missing_w_defaults_to_one() {
    let mut mesh = make_single_triangle();
    mesh.pos_w.clear();
    assert!(mesh.validate().is_ok());
    assert_eq!(mesh.position_homogeneous(0).w, 1.0);
}

#[test]
fn validate_ok() {
    assert!(make_single_triangle().validate().is_ok());
}

#[test]
fn validate_catches_inconsistent_lengths() {
    let mut mesh = make_single_triangle();
    mesh.pos_y.push(99.0);
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_oob_index() {
    let mut mesh = make_single_triangle();
    mesh.indices[2] = 99;
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_degenerate() {
    let mut mesh = make_single_triangle();
    mesh.indices = vec![0, 0, 1];
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_bad_group_member() {
    let mut mesh = make_single_triangle();
    mesh.add_group(PhysicalGroup::new(1, 2, "side_x", vec![0, 7]));
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_nan() {
    let mut mesh = make_single_triangle();
    mesh.pos_z[1] = f32::NAN;
    assert!(mesh.validate().is_err());
}

#[test]
fn physical_group_lookup() {
    let mesh = make_single_triangle();
    assert_eq!(mesh.physical(1, 1).unwrap(), &[0, 1, 2]);
    assert!(mesh.physical(1, 9).is_err());
    assert_eq!(mesh.group("border").unwrap().len(), 3);
    assert!(mesh.group("nope").is_none());
}

#[test]
fn add_group_replaces_same_address() {
    let mut mesh = make_single_triangle();
    mesh.add_group(PhysicalGroup::new(1, 1, "border", vec![1]));
    assert_eq!(mesh.groups.len(), 1);
    assert_eq!(mesh.physical(1, 1).unwrap(), &[1]);
}

#[test]
fn json_round_trip() {
    let mesh = square_grid(2, 2, 1.0, 1.0);
    let json = mesh.to_json().unwrap();
    let recovered = ClothMesh::from_json(&json).unwrap();
    assert_eq!(recovered.node_count(), 9);
    assert_eq!(recovered.indices, mesh.indices);
    assert_eq!(recovered.groups, mesh.groups);
}

#[test]
fn json_without_w_channel() {
    let json = r#"{
        "pos_x": [0.0, 1.0, 0.0],
        "pos_y": [0.0, 0.0, 1.0],
        "pos_z": [0.0, 0.0, 0.0],
        "indices": [0, 1, 2]
    }"#;
    let mesh = ClothMesh::from_json(json).unwrap();
    assert_eq!(mesh.pos_w, vec![1.0, 1.0, 1.0]);
    assert!(mesh.groups.is_empty());
}

#[test]
fn json_rejects_garbage() {
    assert!(ClothMesh::from_json("{ not json").is_err());
}

// ─── Generator Tests ──────────────────────────────────────────

#[test]
fn square_grid_counts() {
    let mesh = square_grid(4, 3, 2.0, 1.5);
    assert_eq!(mesh.node_count(), 5 * 4);
    assert_eq!(mesh.triangle_count(), 4 * 3 * 2);
    assert!(mesh.validate().is_ok());
}

#[test]
fn square_grid_extent() {
    let mesh = square_grid(10, 10, 2.0, 2.0);
    let min_x = mesh.pos_x.iter().copied().fold(f32::INFINITY, f32::min);
    let max_x = mesh.pos_x.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    assert!((min_x + 1.0).abs() < 1e-6);
    assert!((max_x - 1.0).abs() < 1e-6);
    assert!(mesh.pos_z.iter().all(|&z| z == 0.0));
}

#[test]
fn square_grid_groups() {
    let mesh = square_grid(4, 4, 1.0, 1.0);
    let border = mesh.physical_group(GroupRef::BORDER).unwrap();
    assert_eq!(border.len(), 16); // 4 * (5 - 1)
    let side_x = mesh.physical_group(GroupRef::SIDE_X).unwrap();
    assert_eq!(side_x, &[0, 1, 2, 3, 4]);
    let side_y = mesh.physical_group(GroupRef::SIDE_Y).unwrap();
    assert_eq!(side_y, &[0, 5, 10, 15, 20]);
}

#[test]
fn top_edge_nodes() {
    assert_eq!(top_edge(2, 2), vec![6, 7, 8]);
}

// ─── Topology Tests ───────────────────────────────────────────

#[test]
fn topology_single_triangle() {
    let mesh = make_single_triangle();
    let topo = Topology::build(&mesh);
    assert_eq!(topo.edges.len(), 3);
    assert_eq!(topo.neighbours(0), &[1, 2]);
    assert_eq!(topo.neighbours(1), &[2, 0]);
}

#[test]
fn topology_grid_neighbours() {
    // 3×3 nodes:
    // 6 7 8
    // 3 4 5
    // 0 1 2
    let mesh = square_grid(2, 2, 2.0, 2.0);
    let topo = Topology::build(&mesh);

    assert_eq!(topo.neighbours(0), &[1, 4, 3]);
    // Center node touches every other node except the two anti-diagonal corners
    let mut center: Vec<u32> = topo.neighbours(4).to_vec();
    center.sort_unstable();
    assert_eq!(center, vec![0, 1, 3, 5, 7, 8]);
    assert_eq!(topo.neighbours(8).len(), 3);
}

#[test]
fn topology_neighbours_are_symmetric() {
    let mesh = square_grid(5, 4, 1.0, 1.0);
    let topo = Topology::build(&mesh);
    for i in 0..topo.node_count() {
        for &k in topo.neighbours(i) {
            assert!(
                topo.neighbours(k as usize).contains(&(i as u32)),
                "{} lists {} but not vice versa",
                i,
                k
            );
            assert_ne!(k as usize, i);
        }
    }
}

#[test]
fn topology_edge_count() {
    // 2×2 quads: 12 axis edges + 4 diagonals
    let mesh = square_grid(2, 2, 1.0, 1.0);
    let topo = Topology::build(&mesh);
    assert_eq!(topo.edges.len(), 16);
    assert!(topo.edges.windows(2).all(|w| w[0] < w[1]));
    assert!(topo.edges.iter().all(|[a, b]| a < b));
}

#[test]
fn topology_isolated_node() {
    let mut mesh = make_single_triangle();
    mesh.push_node(5.0, 5.0, 0.0);
    let topo = Topology::build(&mesh);
    assert!(topo.neighbours(3).is_empty());
}
