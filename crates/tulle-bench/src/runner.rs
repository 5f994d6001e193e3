//! Benchmark runner: drives scenarios through the frame driver and
//! collects metrics.

use std::time::Instant;

use tulle_compute::ComputeConfig;
use tulle_driver::{DriverConfig, FrameDriver};
use tulle_render::{HeadlessRenderer, NodePalette};
use tulle_solver::ClothSimulation;
use tulle_telemetry::TracingSink;
use tulle_types::TulleResult;

use crate::metrics::BenchmarkMetrics;
use crate::scenarios::{Scenario, ScenarioKind};

/// Runs benchmark scenarios and collects metrics.
pub struct BenchmarkRunner;

impl BenchmarkRunner {
    /// Run a single scenario on the configured backend.
    ///
    /// Returns metrics for the completed run.
    pub fn run(scenario: &Scenario, compute: &ComputeConfig) -> TulleResult<BenchmarkMetrics> {
        let sim = ClothSimulation::from_mesh(&scenario.mesh, &scenario.material, &scenario.config)?;
        let edge_count = sim.model().table().edge_count();
        let pinned_count = sim.model().mask().pinned_count();
        let node_count = sim.node_count();

        let config = DriverConfig {
            max_frames: Some(scenario.frames),
            energy_interval: 0,
            snapshot_path: None,
        };
        let mut driver = FrameDriver::new(
            scenario.mesh.clone(),
            sim,
            compute.create_backend()?,
            Box::new(HeadlessRenderer::new()),
            NodePalette::uniform(node_count, [1.0; 4]),
            config,
        )?;
        driver.add_sink(Box::new(TracingSink::new(tracing::Level::TRACE)));

        let total_start = Instant::now();
        let summary = driver.run()?;
        let total_wall_time = total_start.elapsed().as_secs_f64();

        let frame_times = driver.frame_times();
        let min_frame = if frame_times.is_empty() {
            0.0
        } else {
            frame_times.iter().copied().fold(f64::MAX, f64::min)
        };

        let sim = driver.simulation();
        let metrics = BenchmarkMetrics {
            scenario: scenario.kind.name().to_string(),
            scheme: sim.scheme_name().to_string(),
            node_count,
            edge_count,
            pinned_count,
            frames: summary.frames,
            total_wall_time,
            avg_frame_time: summary.avg_frame_time,
            min_frame_time: min_frame,
            max_frame_time: summary.max_frame_time,
            sim_time: summary.sim_time,
            final_kinetic_energy: summary.final_energy.kinetic,
            max_displacement: sim.max_displacement()?,
            max_pinned_drift: sim.max_pinned_drift()?,
        };

        tracing::info!(
            scenario = %metrics.scenario,
            frames = metrics.frames,
            wall_time = metrics.total_wall_time,
            "benchmark complete"
        );
        Ok(metrics)
    }

    /// Run all scenarios and return metrics for each.
    pub fn run_all(compute: &ComputeConfig) -> TulleResult<Vec<BenchmarkMetrics>> {
        ScenarioKind::all()
            .iter()
            .map(|&kind| Self::run(&Scenario::from_kind(kind), compute))
            .collect()
    }
}
