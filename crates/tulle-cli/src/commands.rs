//! CLI command implementations.

use std::error::Error;
use std::path::Path;

use tulle_bench::metrics::BenchmarkMetrics;
use tulle_bench::runner::BenchmarkRunner;
use tulle_bench::scenarios::{Scenario, ScenarioKind};
use tulle_compute::ComputeConfig;
use tulle_debug::StateSnapshot;
use tulle_driver::{FrameDriver, SceneConfig};
use tulle_material::{GridSpacing, MaterialDatabase, MaterialParameters};
use tulle_mesh::{ClothMesh, Topology};
use tulle_solver::{ClothSimulation, SchemeKind};
use tulle_telemetry::TracingSink;

pub type CommandResult = Result<(), Box<dyn Error>>;

/// Run a simulation from a scene file.
pub fn simulate(config_path: &Path, frames: Option<u64>) -> CommandResult {
    println!("Tulle Simulation");
    println!("────────────────");
    println!("Scene: {}", config_path.display());

    let mut scene = SceneConfig::load(config_path)?;
    if frames.is_some() {
        scene.driver.max_frames = frames;
    }

    let mut driver = FrameDriver::from_scene(&scene)?;
    driver.add_sink(Box::new(TracingSink::default()));

    let sim = driver.simulation();
    println!(
        "Nodes: {}  Scheme: {}  Backend: {}  dt: {:.6}s",
        sim.node_count(),
        sim.scheme_name(),
        driver.backend_name(),
        sim.dt()
    );
    println!();

    let summary = driver.run()?;

    println!("Frames:        {}", summary.frames);
    println!("Sim time:      {:.4}s", summary.sim_time);
    println!("Wall time:     {:.3}s", summary.wall_time);
    println!("Avg frame:     {:.3}ms", summary.avg_frame_time * 1000.0);
    println!("Final KE:      {:.6e}", summary.final_energy.kinetic);
    println!("Final energy:  {:.6e}", summary.final_energy.total());
    if let Some(reason) = summary.close_reason {
        println!("Stopped by:    {reason:?}");
    }
    if let Some(export) = &scene.export {
        println!("Frames written to: {}", export.path.display());
    }
    if let Some(path) = &scene.driver.snapshot_path {
        println!("Snapshot written to: {}", path.display());
    }
    Ok(())
}

/// Options of the `benchmark` command.
#[derive(Debug, Clone, Default)]
pub struct BenchmarkOptions<'a> {
    /// Scenario name or `all`.
    pub scenario: &'a str,
    /// CSV destination; stdout when unset.
    pub output: Option<&'a Path>,
    /// Material preset overriding the scenario default.
    pub material: Option<&'a str>,
    /// Integration scheme.
    pub scheme: SchemeKind,
    /// Frame count overriding the scenario default.
    pub frames: Option<u64>,
}

/// Run the benchmark suite.
pub fn benchmark(options: &BenchmarkOptions<'_>) -> CommandResult {
    println!("Tulle Benchmark Suite");
    println!("═════════════════════");
    println!();

    let material = match options.material {
        Some(name) => {
            let db = MaterialDatabase::with_defaults();
            let props = db.get(name).ok_or_else(|| {
                format!(
                    "Unknown material: '{name}'. Available: {}",
                    db.names().join(", ")
                )
            })?;
            println!("Material: {name}");
            Some(props.clone())
        }
        None => None,
    };
    println!("Scheme:   {:?}", options.scheme);
    println!();

    let kinds: Vec<ScenarioKind> = if options.scenario == "all" {
        ScenarioKind::all().to_vec()
    } else {
        vec![options.scenario.parse()?]
    };

    let compute = ComputeConfig::default();
    let mut all_metrics = Vec::with_capacity(kinds.len());

    for kind in kinds {
        let mut scenario = Scenario::from_kind(kind).with_scheme(options.scheme);
        if let Some(props) = &material {
            scenario = scenario.with_material(props.clone());
        }
        if let Some(frames) = options.frames {
            scenario = scenario.with_frames(frames);
        }

        println!(
            "Running: {} ({} nodes, {} pinned, {} frames)",
            kind.name(),
            scenario.mesh.node_count(),
            scenario.pinned_count(),
            scenario.frames,
        );

        let metrics = BenchmarkRunner::run(&scenario, &compute)
            .map_err(|e| format!("Benchmark failed: {e}"))?;

        println!("  Wall time:     {:.3}s", metrics.total_wall_time);
        println!("  Avg frame:     {:.3}ms", metrics.avg_frame_time * 1000.0);
        println!("  Final KE:      {:.6e}", metrics.final_kinetic_energy);
        println!("  Max displace:  {:.4}m", metrics.max_displacement);
        println!("  Pinned drift:  {:.4}m", metrics.max_pinned_drift);
        println!();

        all_metrics.push(metrics);
    }

    let csv = BenchmarkMetrics::to_csv(&all_metrics);
    match options.output {
        Some(path) => {
            std::fs::write(path, &csv)?;
            println!("Results written to: {}", path.display());
        }
        None => {
            println!("CSV Output:");
            println!("{csv}");
        }
    }
    Ok(())
}

/// Inspect a state snapshot.
pub fn inspect(path: &Path) -> CommandResult {
    println!("Tulle Snapshot Inspector");
    println!("────────────────────────");
    println!();

    let snapshot = StateSnapshot::load(path).map_err(|e| format!("Failed to read snapshot: {e}"))?;
    let state = snapshot.restore()?;

    println!("Frame:        {}", snapshot.frame);
    println!("Sim time:     {:.4}s", snapshot.sim_time);
    println!("Nodes:        {}", snapshot.node_count);

    if !state.is_empty() {
        let (min_z, max_z) = state
            .position
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.z), hi.max(p.z))
            });
        let max_speed = state
            .velocity
            .iter()
            .map(|v| v.length())
            .fold(0.0f32, |max, s| {
                if max.is_nan() || s.is_nan() {
                    f32::NAN
                } else {
                    max.max(s)
                }
            });
        let diverged = (0..state.len())
            .filter(|&i| !(state.position[i].is_finite() && state.velocity[i].is_finite()))
            .count();
        println!("Z range:      [{min_z:.4}, {max_z:.4}]");
        println!("Max speed:    {max_speed:.4} m/s");
        if diverged > 0 {
            println!("Non-finite:   {diverged} nodes");
            return Err(format!("Snapshot holds {diverged} non-finite nodes").into());
        }
    }
    Ok(())
}

/// Validate a scene (`.toml`) or mesh (`.json`).
pub fn validate(path: &Path) -> CommandResult {
    println!("Tulle Validator");
    println!("───────────────");
    println!();

    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => {
            println!("Validating scene: {}", path.display());
            let scene = SceneConfig::load(path)?;
            let mesh = scene.build_mesh()?;
            let props = scene.resolve_material()?;
            let sim = ClothSimulation::from_mesh(&mesh, &props, &scene.solver)?;
            println!(
                "✅ Scene is valid ({} nodes, {} springs, {} pinned, dt {:.6}s).",
                sim.node_count(),
                sim.model().table().edge_count() / 2,
                sim.model().mask().pinned_count(),
                sim.dt()
            );
        }
        Some("json") => {
            println!("Validating mesh: {}", path.display());
            let mesh = ClothMesh::load(path)?;
            let topology = Topology::build(&mesh);
            println!(
                "✅ Mesh is valid ({} nodes, {} tris, {} edges).",
                mesh.node_count(),
                mesh.triangle_count(),
                topology.edges.len()
            );
        }
        _ => {
            return Err("Unsupported file format. Use .toml (scene) or .json (mesh).".into());
        }
    }
    Ok(())
}

/// List the material presets with their constants at unit spacing.
pub fn materials() -> CommandResult {
    println!("Tulle Materials");
    println!("───────────────");
    println!();
    println!(
        "{:<12} {:>10} {:>10} {:>12} {:>10} {:>10}",
        "name", "h [m]", "ρ [kg/m³]", "E [Pa]", "μ [Pa·s]", "dt [s]"
    );

    let db = MaterialDatabase::with_defaults();
    let spacing = GridSpacing::new(1.0, 1.0)?;
    for name in db.names() {
        let Some(props) = db.get(name) else { continue };
        let params = MaterialParameters::derive(props, spacing)?;
        println!(
            "{:<12} {:>10.4} {:>10.1} {:>12.3e} {:>10.3} {:>10.6}",
            name, props.thickness, props.density, props.young_modulus, props.viscosity, params.dt
        );
    }
    Ok(())
}
