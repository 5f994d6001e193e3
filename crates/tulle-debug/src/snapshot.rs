//! State snapshot serialization for replay and debugging.
//!
//! Snapshots capture the full kinematic state at a point in time,
//! enabling deterministic replay and diff-based debugging.

use std::path::Path;

use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};
use tulle_compute::KinematicBuffers;
use tulle_types::{TulleError, TulleResult};

/// A complete kinematic state snapshot.
///
/// Serialized with `bincode` for compact binary output. Holds everything
/// needed to resume the simulation from this point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Frame index when this snapshot was taken.
    pub frame: u64,
    /// Simulation time in seconds.
    pub sim_time: f64,
    /// Number of nodes.
    pub node_count: usize,
    /// Node positions (flat: [x0, y0, z0, w0, x1, ...]).
    pub positions: Vec<f32>,
    /// Node velocities (flat: [vx0, vy0, vz0, ...]).
    pub velocities: Vec<f32>,
    /// Node accelerations (flat: [ax0, ay0, az0, ...]).
    pub accelerations: Vec<f32>,
}

impl StateSnapshot {
    /// Captures a snapshot from kinematic buffers.
    pub fn capture(frame: u64, sim_time: f64, state: &KinematicBuffers) -> Self {
        Self {
            frame,
            sim_time,
            node_count: state.len(),
            positions: state.position.iter().flat_map(|p| p.to_array()).collect(),
            velocities: state.velocity.iter().flat_map(|v| v.to_array()).collect(),
            accelerations: state.acceleration.iter().flat_map(|a| a.to_array()).collect(),
        }
    }

    /// Rebuilds kinematic buffers from the snapshot.
    pub fn restore(&self) -> TulleResult<KinematicBuffers> {
        self.check_lengths()?;
        Ok(KinematicBuffers {
            position: self.positions.chunks_exact(4).map(Vec4::from_slice).collect(),
            velocity: self.velocities.chunks_exact(3).map(Vec3::from_slice).collect(),
            acceleration: self.accelerations.chunks_exact(3).map(Vec3::from_slice).collect(),
        })
    }

    /// Fails unless every channel holds exactly `node_count` entries.
    pub fn check_lengths(&self) -> TulleResult<()> {
        let n = self.node_count;
        if self.positions.len() != 4 * n
            || self.velocities.len() != 3 * n
            || self.accelerations.len() != 3 * n
        {
            return Err(TulleError::Serialization(format!(
                "Snapshot channel lengths ({}, {}, {}) do not match {n} nodes",
                self.positions.len(),
                self.velocities.len(),
                self.accelerations.len()
            )));
        }
        Ok(())
    }

    /// Position of node `i` (xyz), if the snapshot holds it.
    pub fn position(&self, i: usize) -> Option<Vec3> {
        self.positions.get(4 * i..4 * i + 3).map(Vec3::from_slice)
    }

    /// Largest position difference between two snapshots of equal size.
    ///
    /// NaN when either snapshot holds a NaN position.
    pub fn max_deviation(&self, other: &StateSnapshot) -> Option<f32> {
        if self.node_count != other.node_count {
            return None;
        }
        let mut max = 0.0f32;
        for i in 0..self.node_count {
            let d = (self.position(i)? - other.position(i)?).length();
            max = if max.is_nan() || d.is_nan() { f32::NAN } else { max.max(d) };
        }
        Some(max)
    }

    /// Serializes to compact binary format.
    pub fn to_bytes(&self) -> TulleResult<Vec<u8>> {
        bincode::serialize(self)
            .map_err(|e| TulleError::Serialization(format!("Snapshot serialization failed: {e}")))
    }

    /// Deserializes from binary format, rejecting inconsistent channels.
    pub fn from_bytes(data: &[u8]) -> TulleResult<Self> {
        let snapshot: Self = bincode::deserialize(data).map_err(|e| {
            TulleError::Serialization(format!("Snapshot deserialization failed: {e}"))
        })?;
        snapshot.check_lengths()?;
        Ok(snapshot)
    }

    /// Writes the snapshot to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> TulleResult<()> {
        std::fs::write(path, self.to_bytes()?)?;
        Ok(())
    }

    /// Reads a snapshot from a file.
    pub fn load(path: impl AsRef<Path>) -> TulleResult<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes(&data)
    }
}
