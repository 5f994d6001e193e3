//! Integration tests for tulle-solver.

use glam::{Vec3, Vec4};
use tulle_compute::{ComputeBackend, CpuFallback, KinematicBuffers, RayonBackend};
use tulle_material::ClothProperties;
use tulle_mesh::generators::{square_grid, top_edge};
use tulle_mesh::{ClothMesh, GroupRef, PhysicalGroup, Topology};
use tulle_solver::forces::{internal_force, net_force};
use tulle_solver::{
    ClothModel, ClothSimulation, EnergyReport, ExplicitEuler, FreedomMask, IntegrationScheme,
    NeighbourTable, PredictorCorrector, SchemeKind, SimulationConstants, SolverConfig,
};
use tulle_types::TulleError;

const G: f32 = 9.81;

/// 3×3 unit grid with only node 0 pinned.
fn corner_pinned_grid() -> ClothMesh {
    let mut mesh = square_grid(2, 2, 2.0, 2.0);
    mesh.add_group(PhysicalGroup::new(1, 1, "border", vec![0]));
    mesh
}

fn corner_pinned_sim(scheme: SchemeKind) -> ClothSimulation {
    let config = SolverConfig {
        scheme,
        ..Default::default()
    };
    ClothSimulation::from_mesh(&corner_pinned_grid(), &ClothProperties::membrane(), &config)
        .unwrap()
}

fn adjacency(blocks: &[&[u32]]) -> Vec<Vec<u32>> {
    blocks.iter().map(|l| l.to_vec()).collect()
}

fn points(coords: &[[f32; 3]]) -> Vec<Vec4> {
    coords
        .iter()
        .map(|c| Vec4::new(c[0], c[1], c[2], 1.0))
        .collect()
}

// ─── Neighbour Table Tests ────────────────────────────────────

#[test]
fn assemble_preserves_order_and_offsets() {
    let positions = points(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 2.0, 0.0]]);
    let lists = adjacency(&[&[2, 1], &[0], &[0]]);
    let table = NeighbourTable::assemble(&lists, &positions, 50.0).unwrap();

    assert_eq!(table.node_count(), 3);
    assert_eq!(table.edge_count(), 4);
    assert_eq!(table.offset(), &[2, 3, 4]);
    assert_eq!(table.nearest(), &[2, 1, 0, 0]);
    assert_eq!(table.resting(), &[2.0, 1.0, 1.0, 2.0]);
    assert!(table.stiffness().iter().all(|&k| k == 50.0));
    assert_eq!(table.block(0), 0..2);
    assert_eq!(table.block(2), 3..4);
    assert_eq!(table.neighbours(0), &[2, 1]);
}

#[test]
fn assemble_empty_block() {
    let positions = points(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [5.0, 5.0, 5.0]]);
    let lists = adjacency(&[&[1], &[], &[]]);
    let table = NeighbourTable::assemble(&lists, &positions, 1.0).unwrap();
    assert_eq!(table.offset(), &[1, 1, 1]);
    assert_eq!(table.degree(1), 0);
    assert_eq!(table.degree(2), 0);
    assert!(table.block(1).is_empty());
}

#[test]
fn assemble_rejects_out_of_range() {
    let positions = points(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]);
    let lists = adjacency(&[&[1], &[2]]);
    assert!(NeighbourTable::assemble(&lists, &positions, 1.0).is_err());
}

#[test]
fn assemble_rejects_self_loop() {
    let positions = points(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]);
    let lists = adjacency(&[&[0], &[]]);
    assert!(NeighbourTable::assemble(&lists, &positions, 1.0).is_err());
}

#[test]
fn assemble_rejects_coincident_nodes() {
    let positions = points(&[[1.0, 1.0, 0.0], [1.0, 1.0, 0.0]]);
    let lists = adjacency(&[&[1], &[0]]);
    assert!(NeighbourTable::assemble(&lists, &positions, 1.0).is_err());
}

#[test]
fn assemble_rejects_count_mismatch() {
    let positions = points(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]);
    let lists = adjacency(&[&[1]]);
    assert!(NeighbourTable::assemble(&lists, &positions, 1.0).is_err());
}

#[test]
fn assemble_rejects_bad_stiffness() {
    let positions = points(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]);
    let lists = adjacency(&[&[1], &[0]]);
    assert!(NeighbourTable::assemble(&lists, &positions, 0.0).is_err());
    assert!(NeighbourTable::assemble(&lists, &positions, f32::NAN).is_err());
}

#[test]
fn owner_of_edges() {
    let positions = points(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
    let lists = adjacency(&[&[1, 2], &[], &[0]]);
    let table = NeighbourTable::assemble(&lists, &positions, 1.0).unwrap();
    assert_eq!(table.owner(0), 0);
    assert_eq!(table.owner(1), 0);
    assert_eq!(table.owner(2), 2);
}

#[test]
fn grid_table_matches_topology() {
    let mesh = square_grid(2, 2, 2.0, 2.0);
    let topology = Topology::build(&mesh);
    let table = NeighbourTable::from_topology(&topology, &mesh.positions(), 1000.0).unwrap();

    // 16 undirected edges, each stored twice
    assert_eq!(table.edge_count(), 2 * topology.edges.len());
    assert_eq!(table.edge_count(), 32);
    assert_eq!(*table.offset().last().unwrap() as usize, table.edge_count());

    let mut far_corner = table.neighbours(8).to_vec();
    far_corner.sort_unstable();
    assert_eq!(far_corner, vec![4, 5, 7]);

    assert!(table.is_symmetric());
}

#[test]
fn diagonal_resting_length() {
    let mesh = square_grid(2, 2, 2.0, 2.0);
    let topology = Topology::build(&mesh);
    let table = NeighbourTable::from_topology(&topology, &mesh.positions(), 1.0).unwrap();

    for j in table.block(4) {
        let k = table.nearest()[j];
        let expected = (mesh.position(k as usize) - mesh.position(4)).length();
        assert_eq!(table.resting()[j], expected);
    }
    let diag = table
        .block(0)
        .find(|&j| table.nearest()[j] == 4)
        .unwrap();
    assert!((table.resting()[diag] - 2.0f32.sqrt()).abs() < 1e-6);
}

#[test]
fn one_sided_table_is_not_symmetric() {
    let positions = points(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]);
    let lists = adjacency(&[&[1], &[]]);
    let table = NeighbourTable::assemble(&lists, &positions, 1.0).unwrap();
    assert!(!table.is_symmetric());
}

// ─── Freedom Mask Tests ───────────────────────────────────────

#[test]
fn mask_classify() {
    let mask = FreedomMask::classify(5, &[1, 3, 3]).unwrap();
    assert_eq!(mask.as_slice(), &[1.0, 0.0, 1.0, 0.0, 1.0]);
    assert_eq!(mask.pinned_count(), 2);
    assert_eq!(mask.free_count(), 3);
    assert!(mask.is_free(0));
    assert!(!mask.is_free(3));
    assert_eq!(mask.flag(1), 0.0);
    assert_eq!(mask.pinned_nodes(), vec![1, 3]);
}

#[test]
fn mask_rejects_out_of_range() {
    assert!(FreedomMask::classify(3, &[3]).is_err());
}

#[test]
fn mask_empty_pin_list() {
    let mask = FreedomMask::classify(4, &[]).unwrap();
    assert_eq!(mask.free_count(), 4);
    assert_eq!(mask, FreedomMask::all_free(4));
}

#[test]
fn pins_follow_group_indices() {
    let mut mesh = square_grid(2, 2, 2.0, 2.0);
    mesh.add_group(PhysicalGroup::new(1, 1, "border", vec![8]));
    let sim =
        ClothSimulation::from_mesh(&mesh, &ClothProperties::membrane(), &SolverConfig::default())
            .unwrap();
    assert!(!sim.model().mask().is_free(8));
    assert!(sim.model().mask().is_free(0));
}

#[test]
fn curtain_pins_top_edge() {
    let mut mesh = square_grid(4, 4, 1.0, 1.0);
    mesh.add_group(PhysicalGroup::new(1, 4, "top", top_edge(4, 4)));
    let config = SolverConfig {
        pinned: GroupRef::new(1, 4),
        ..Default::default()
    };
    let sim = ClothSimulation::from_mesh(&mesh, &ClothProperties::membrane(), &config).unwrap();
    assert_eq!(sim.model().mask().pinned_count(), 5);
}

// ─── Config Tests ─────────────────────────────────────────────

#[test]
fn solver_config_defaults() {
    let config = SolverConfig::default();
    assert_eq!(config.gravity, [0.0, 0.0, -G]);
    assert_eq!(config.pinned, GroupRef::BORDER);
    assert_eq!(config.side_x, GroupRef::SIDE_X);
    assert_eq!(config.side_y, GroupRef::SIDE_Y);
    assert_eq!(config.scheme, SchemeKind::PredictorCorrector);
    assert!(config.validate().is_ok());
}

#[test]
fn solver_config_toml() {
    let text = r#"
        gravity = [0.0, -9.81, 0.0]
        scheme = "explicit_euler"
        pinned = { dimension = 1, tag = 7 }
    "#;
    let config: SolverConfig = toml::from_str(text).unwrap();
    assert_eq!(config.gravity, [0.0, -9.81, 0.0]);
    assert_eq!(config.scheme, SchemeKind::ExplicitEuler);
    assert_eq!(config.pinned, GroupRef::new(1, 7));
    assert_eq!(config.side_x, GroupRef::SIDE_X);

    let round: SolverConfig = toml::from_str(&toml::to_string(&config).unwrap()).unwrap();
    assert_eq!(round, config);
}

#[test]
fn solver_config_rejects_nan_gravity() {
    let config = SolverConfig {
        gravity: [0.0, f32::NAN, 0.0],
        ..Default::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn scheme_kind_parse() {
    assert_eq!("pc".parse::<SchemeKind>().unwrap(), SchemeKind::PredictorCorrector);
    assert_eq!("euler".parse::<SchemeKind>().unwrap(), SchemeKind::ExplicitEuler);
    assert!("rk4".parse::<SchemeKind>().is_err());
}

#[test]
fn constants_validation() {
    let g = Vec3::new(0.0, 0.0, -G);
    assert!(SimulationConstants::new(g, 1.0, 0.0, 0.01).is_ok());
    assert!(SimulationConstants::new(g, 0.0, 0.0, 0.01).is_err());
    assert!(SimulationConstants::new(g, 1.0, -1.0, 0.01).is_err());
    assert!(SimulationConstants::new(g, 1.0, 0.0, 0.0).is_err());
}

// ─── Setup Tests ──────────────────────────────────────────────

#[test]
fn setup_derives_reference_constants() {
    let sim = corner_pinned_sim(SchemeKind::PredictorCorrector);
    let c = sim.model().constants();
    assert!((c.mass() - 10.0).abs() < 1e-4);
    assert!((c.damping() - 7.0).abs() < 1e-4);
    assert!((c.dt() - 0.08).abs() < 1e-6);
    assert!(sim.model().table().stiffness().iter().all(|&k| (k - 1000.0).abs() < 1e-2));

    let params = sim.parameters().unwrap();
    assert_eq!(params.dt, 0.8 * (params.mass / params.stiffness).sqrt());
}

#[test]
fn setup_rejects_missing_pinned_group() {
    let mesh = square_grid(2, 2, 2.0, 2.0);
    let config = SolverConfig {
        pinned: GroupRef::new(1, 99),
        ..Default::default()
    };
    assert!(ClothSimulation::from_mesh(&mesh, &ClothProperties::membrane(), &config).is_err());
}

#[test]
fn setup_rejects_invalid_material() {
    let mut props = ClothProperties::membrane();
    props.density = -1.0;
    let mesh = square_grid(2, 2, 2.0, 2.0);
    assert!(ClothSimulation::from_mesh(&mesh, &props, &SolverConfig::default()).is_err());
}

#[test]
fn model_rejects_mask_mismatch() {
    let positions = points(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]);
    let table = NeighbourTable::assemble(&adjacency(&[&[1], &[0]]), &positions, 1.0).unwrap();
    let constants = SimulationConstants::new(Vec3::ZERO, 1.0, 0.0, 0.1).unwrap();
    assert!(ClothModel::new(table, FreedomMask::all_free(3), constants).is_err());
}

#[test]
fn zero_frames_keep_imported_positions() {
    let mesh = corner_pinned_grid();
    let sim =
        ClothSimulation::from_mesh(&mesh, &ClothProperties::membrane(), &SolverConfig::default())
            .unwrap();
    let state = sim.snapshot().unwrap();
    assert_eq!(state.position, mesh.positions());
    assert!(state.velocity.iter().all(|v| *v == Vec3::ZERO));
    assert_eq!(sim.frame(), 0);
}

// ─── Force Tests ──────────────────────────────────────────────

#[test]
fn rest_state_feels_only_gravity() {
    let sim = corner_pinned_sim(SchemeKind::PredictorCorrector);
    let state = sim.snapshot().unwrap();
    let model = sim.model();
    for i in 0..sim.node_count() {
        let f = net_force(model.table(), model.constants(), &state, i);
        let expected = model.constants().mass() * Vec3::new(0.0, 0.0, -G);
        assert!((f - expected).length() < 1e-3, "node {i}: {f}");
    }
}

#[test]
fn stretched_spring_pulls_together() {
    let positions = points(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]);
    let table = NeighbourTable::assemble(&adjacency(&[&[1], &[0]]), &positions, 100.0).unwrap();
    let constants = SimulationConstants::new(Vec3::ZERO, 1.0, 0.0, 0.01).unwrap();

    let mut state = KinematicBuffers::at_rest(positions);
    state.position[1].x = 1.5;

    let f0 = net_force(&table, &constants, &state, 0);
    let f1 = net_force(&table, &constants, &state, 1);
    assert!((f0 - Vec3::new(50.0, 0.0, 0.0)).length() < 1e-4);
    assert!((f0 + f1).length() < 1e-6);
}

#[test]
fn damping_opposes_separation() {
    let positions = points(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]);
    let table = NeighbourTable::assemble(&adjacency(&[&[1], &[0]]), &positions, 100.0).unwrap();
    let constants = SimulationConstants::new(Vec3::ZERO, 1.0, 2.0, 0.01).unwrap();

    let mut state = KinematicBuffers::at_rest(positions);
    state.velocity[1] = Vec3::new(3.0, 0.0, 0.0);
    // Transverse motion is not damped
    state.velocity[0] = Vec3::new(0.0, 4.0, 0.0);

    let f0 = net_force(&table, &constants, &state, 0);
    assert!((f0 - Vec3::new(6.0, 0.0, 0.0)).length() < 1e-5);
}

#[test]
fn collapsed_edge_contributes_nothing() {
    let positions = points(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]);
    let table = NeighbourTable::assemble(&adjacency(&[&[1], &[0]]), &positions, 100.0).unwrap();
    let constants = SimulationConstants::new(Vec3::ZERO, 1.0, 1.0, 0.01).unwrap();

    let mut state = KinematicBuffers::at_rest(positions);
    state.position[1] = state.position[0];
    let f = internal_force(&table, &constants, &state, 0);
    assert_eq!(f, Vec3::ZERO);
    assert!(f.is_finite());
}

#[test]
fn internal_forces_cancel() {
    let mesh = square_grid(4, 4, 1.0, 1.0);
    let topology = Topology::build(&mesh);
    let table = NeighbourTable::from_topology(&topology, &mesh.positions(), 500.0).unwrap();
    let constants = SimulationConstants::new(Vec3::ZERO, 0.1, 3.0, 0.01).unwrap();

    let mut state = KinematicBuffers::at_rest(mesh.positions());
    for i in 0..state.len() {
        let s = i as f32;
        state.position[i] += Vec4::new(
            0.01 * (s * 1.3).sin(),
            0.02 * (s * 0.7).cos(),
            0.05 * (s * 2.1).sin(),
            0.0,
        );
        state.velocity[i] = Vec3::new((s * 0.5).cos(), (s * 0.9).sin(), 0.3 * s.sin());
    }

    let total = (0..state.len())
        .map(|i| internal_force(&table, &constants, &state, i))
        .fold(Vec3::ZERO, |acc, f| acc + f);
    assert!(total.length() < 1e-2, "net internal force {total}");
}

// ─── Integrator Tests ─────────────────────────────────────────

#[test]
fn one_frame_corner_pinned() {
    let mut sim = corner_pinned_sim(SchemeKind::PredictorCorrector);
    let before = sim.snapshot().unwrap();
    let result = sim.step(&CpuFallback::new()).unwrap();
    assert_eq!(result.passes, 2);

    let after = sim.snapshot().unwrap();
    assert_eq!(after.position[0], before.position[0]);
    assert_eq!(after.velocity[0], before.velocity[0]);

    let dt = sim.dt();
    let drop = after.position[8].z - before.position[8].z;
    assert!(drop < 0.0);
    assert!((drop + 0.5 * G * dt * dt).abs() < 1e-5, "drop {drop}");
    assert!((after.velocity[8].z + G * dt).abs() < 1e-5);
    assert_eq!(after.position[8].w, 1.0);
    assert_eq!(sim.frame(), 1);
    assert!((sim.sim_time() - dt as f64).abs() < 1e-9);
}

#[test]
fn predictor_output_lands_in_intermediate() {
    let mut sim = corner_pinned_sim(SchemeKind::PredictorCorrector);
    sim.step(&CpuFallback::new()).unwrap();
    let dt = sim.dt();
    let predicted = sim.store().intermediate();
    // From rest: p* = p, v* = g·dt, a* = g
    assert_eq!(predicted.position[8], sim.rest_positions()[8]);
    assert!((predicted.velocity[8].z + G * dt).abs() < 1e-5);
    assert!((predicted.acceleration[8].z + G).abs() < 1e-4);
    assert_eq!(predicted.velocity[0], Vec3::ZERO);
}

#[test]
fn corrector_differs_from_explicit_euler() {
    let mut pc = corner_pinned_sim(SchemeKind::PredictorCorrector);
    let mut euler = corner_pinned_sim(SchemeKind::ExplicitEuler);
    let backend = CpuFallback::new();

    let r = euler.step(&backend).unwrap();
    assert_eq!(r.passes, 1);
    pc.step(&backend).unwrap();

    let a = pc.snapshot().unwrap();
    let b = euler.snapshot().unwrap();
    // Euler moves a resting node only through velocity, which is still zero
    assert_eq!(b.position[8], euler.rest_positions()[8]);
    assert!((a.position[8] - b.position[8]).length() > 1e-3);
    assert_eq!(pc.scheme_name(), "predictor_corrector");
    assert_eq!(euler.scheme_name(), "explicit_euler");
}

#[test]
fn isolated_node_falls_with_gravity() {
    let positions = points(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [3.0, 3.0, 0.0]]);
    let table = NeighbourTable::assemble(&adjacency(&[&[1], &[0], &[]]), &positions, 100.0).unwrap();
    let mask = FreedomMask::classify(3, &[0]).unwrap();
    let constants = SimulationConstants::new(Vec3::new(0.0, 0.0, -G), 2.0, 0.5, 0.01).unwrap();
    let model = ClothModel::new(table, mask, constants).unwrap();
    let mut sim = ClothSimulation::from_model(model, positions, Box::new(PredictorCorrector)).unwrap();

    let backend = CpuFallback::new();
    for _ in 0..5 {
        sim.step(&backend).unwrap();
        let state = sim.snapshot().unwrap();
        assert!((state.acceleration[2] - Vec3::new(0.0, 0.0, -G)).length() < 1e-5);
    }
}

#[test]
fn pinned_nodes_never_move() {
    let mesh = square_grid(6, 6, 1.0, 1.0);
    let mut sim =
        ClothSimulation::from_mesh(&mesh, &ClothProperties::membrane(), &SolverConfig::default())
            .unwrap();
    let pinned = sim.model().mask().pinned_nodes();
    assert_eq!(pinned.len(), 24);

    let backend = CpuFallback::new();
    for _ in 0..20 {
        sim.step(&backend).unwrap();
        let state = sim.snapshot().unwrap();
        for &p in &pinned {
            let i = p as usize;
            assert_eq!(state.position[i], mesh.positions()[i]);
            assert_eq!(state.velocity[i], Vec3::ZERO);
            assert_eq!(state.acceleration[i], Vec3::ZERO);
        }
    }
    assert_eq!(sim.max_pinned_drift().unwrap(), 0.0);
    assert!(sim.max_displacement().unwrap() > 0.0);
}

#[test]
fn resting_lengths_survive_motion() {
    let mut sim = corner_pinned_sim(SchemeKind::PredictorCorrector);
    let before = sim.model().table().resting().to_vec();
    let backend = CpuFallback::new();
    for _ in 0..5 {
        sim.step(&backend).unwrap();
    }
    assert_eq!(sim.model().table().resting(), before.as_slice());
}

#[test]
fn rayon_matches_cpu_bitwise() {
    let mesh = square_grid(8, 8, 1.0, 1.0);
    let props = ClothProperties::membrane();
    let config = SolverConfig::default();
    let mut cpu = ClothSimulation::from_mesh(&mesh, &props, &config).unwrap();
    let mut par = ClothSimulation::from_mesh(&mesh, &props, &config).unwrap();

    let cpu_backend = CpuFallback::new();
    let mut rayon_backend = RayonBackend::with_threads(3);
    rayon_backend.init().unwrap();

    for _ in 0..10 {
        cpu.step(&cpu_backend).unwrap();
        par.step(&rayon_backend).unwrap();
    }
    assert_eq!(cpu.snapshot().unwrap(), par.snapshot().unwrap());
}

#[test]
fn short_run_stays_finite() {
    let mesh = square_grid(10, 10, 2.0, 2.0);
    let mut sim =
        ClothSimulation::from_mesh(&mesh, &ClothProperties::membrane(), &SolverConfig::default())
            .unwrap();
    let backend = CpuFallback::new();
    for _ in 0..10 {
        sim.step(&backend).unwrap();
    }
    let state = sim.snapshot().unwrap();
    assert!(state.position.iter().all(|p| p.is_finite()));
    assert!(state.velocity.iter().all(|v| v.is_finite()));
}

#[test]
fn mismatched_state_is_rejected_before_dispatch() {
    for scheme in [SchemeKind::PredictorCorrector, SchemeKind::ExplicitEuler] {
        let mut sim = corner_pinned_sim(scheme);
        sim.shared_state()
            .write_all(KinematicBuffers::zeros(4))
            .unwrap();

        let err = sim.step(&CpuFallback::new()).unwrap_err();
        assert!(matches!(err, TulleError::Compute(_)), "{err}");
        assert_eq!(sim.frame(), 0);
        // The guard was released normally, not poisoned by a panic
        assert_eq!(sim.shared_state().read().unwrap().len(), 4);
    }
}

#[test]
fn diverged_state_is_not_reported_as_rest() {
    let mut sim = corner_pinned_sim(SchemeKind::PredictorCorrector);
    let mut state = sim.snapshot().unwrap();
    state.position[4].z = f32::NAN;
    sim.shared_state().write_all(state).unwrap();

    assert!(sim.max_displacement().unwrap().is_nan());
    assert_eq!(sim.max_pinned_drift().unwrap(), 0.0);
    assert!(matches!(sim.check_finite(), Err(TulleError::InvalidState(_))));
}

#[test]
fn diverged_pin_shows_in_drift() {
    let sim = corner_pinned_sim(SchemeKind::PredictorCorrector);
    let mut state = sim.snapshot().unwrap();
    state.position[0].x = f32::NAN;
    sim.shared_state().write_all(state).unwrap();

    assert!(sim.max_pinned_drift().unwrap().is_nan());
    assert!(sim.max_displacement().unwrap().is_nan());
}

#[test]
fn finite_state_passes_check() {
    let mut sim = corner_pinned_sim(SchemeKind::PredictorCorrector);
    sim.step(&CpuFallback::new()).unwrap();
    assert!(sim.check_finite().is_ok());
    assert!(sim.max_displacement().unwrap() > 0.0);
}

#[test]
fn schemes_are_swappable() {
    let mut sim = corner_pinned_sim(SchemeKind::PredictorCorrector);
    sim.set_scheme(Box::new(ExplicitEuler));
    assert_eq!(sim.scheme_name(), "explicit_euler");
    let scheme: Box<dyn IntegrationScheme> = SchemeKind::PredictorCorrector.create();
    assert_eq!(scheme.name(), "predictor_corrector");
}

// ─── Energy Tests ─────────────────────────────────────────────

#[test]
fn energy_at_rest() {
    let sim = corner_pinned_sim(SchemeKind::PredictorCorrector);
    let energy = sim.energy().unwrap();
    assert_eq!(energy.kinetic, 0.0);
    assert!(energy.elastic.abs() < 1e-9);
    // Nodes sit at z = 0
    assert!(energy.potential.abs() < 1e-9);
}

#[test]
fn energy_after_falling() {
    let mut sim = corner_pinned_sim(SchemeKind::PredictorCorrector);
    sim.step(&CpuFallback::new()).unwrap();
    let energy = sim.energy().unwrap();
    assert!(energy.kinetic > 0.0);
    assert!(energy.potential < 0.0);
    assert!((energy.total() - (energy.kinetic + energy.potential + energy.elastic)).abs() < 1e-12);
}

#[test]
fn elastic_energy_counts_each_spring_once() {
    let positions = points(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]);
    let table = NeighbourTable::assemble(&adjacency(&[&[1], &[0]]), &positions, 100.0).unwrap();
    let constants = SimulationConstants::new(Vec3::ZERO, 1.0, 0.0, 0.01).unwrap();
    let model = ClothModel::new(table, FreedomMask::all_free(2), constants).unwrap();

    let mut state = KinematicBuffers::at_rest(positions);
    state.position[1].x = 1.1;
    let energy = EnergyReport::compute(&model, &state);
    // ½·100·0.1²
    assert!((energy.elastic - 0.5).abs() < 1e-4);
}
