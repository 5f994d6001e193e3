//! Benchmark metrics: data collected during a benchmark run.

use serde::{Deserialize, Serialize};

/// Metrics collected from a benchmark scenario run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkMetrics {
    /// Scenario name.
    pub scenario: String,
    /// Integration scheme name.
    pub scheme: String,
    /// Node count.
    pub node_count: usize,
    /// Directed edge count (each spring counted from both ends).
    pub edge_count: usize,
    /// Pinned node count.
    pub pinned_count: usize,
    /// Number of frames executed.
    pub frames: u64,
    /// Total wall-clock time (seconds).
    pub total_wall_time: f64,
    /// Average wall-clock time per frame (seconds).
    pub avg_frame_time: f64,
    /// Minimum frame time.
    pub min_frame_time: f64,
    /// Maximum frame time.
    pub max_frame_time: f64,
    /// Simulated time covered (seconds).
    pub sim_time: f64,
    /// Final kinetic energy.
    pub final_kinetic_energy: f64,
    /// Maximum node displacement from the rest position.
    pub max_displacement: f32,
    /// Maximum displacement of any pinned node (should be exactly zero).
    pub max_pinned_drift: f32,
}

impl BenchmarkMetrics {
    /// CSV header row.
    pub fn to_csv_header() -> String {
        "scenario,scheme,node_count,edge_count,pinned_count,frames,total_wall_time_s,avg_frame_ms,min_frame_ms,max_frame_ms,sim_time_s,final_ke,max_displacement,max_pinned_drift".to_string()
    }

    /// Format this metrics instance as a CSV data row.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{},{:.6},{:.4},{:.4},{:.4},{:.6},{:.6e},{:.6},{:.6}",
            self.scenario,
            self.scheme,
            self.node_count,
            self.edge_count,
            self.pinned_count,
            self.frames,
            self.total_wall_time,
            self.avg_frame_time * 1000.0,
            self.min_frame_time * 1000.0,
            self.max_frame_time * 1000.0,
            self.sim_time,
            self.final_kinetic_energy,
            self.max_displacement,
            self.max_pinned_drift,
        )
    }

    /// Format multiple metrics as a complete CSV string.
    pub fn to_csv(metrics: &[BenchmarkMetrics]) -> String {
        let mut csv = Self::to_csv_header();
        for m in metrics {
            csv.push('\n');
            csv.push_str(&m.to_csv_row());
        }
        csv
    }
}
