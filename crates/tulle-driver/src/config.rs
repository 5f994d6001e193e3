//! Frame driver configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tulle_types::{TulleError, TulleResult};

/// Limits and periodic work of the frame loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Stop after this many frames. `None` runs until the renderer or a
    /// shutdown handle asks to close.
    pub max_frames: Option<u64>,

    /// Emit an energy event every N frames (0 disables).
    pub energy_interval: u64,

    /// Write a binary state snapshot here on close.
    pub snapshot_path: Option<PathBuf>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            max_frames: Some(600),
            energy_interval: 60,
            snapshot_path: None,
        }
    }
}

impl DriverConfig {
    /// A config that stops after `frames` frames.
    pub fn frames(frames: u64) -> Self {
        Self {
            max_frames: Some(frames),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> TulleResult<()> {
        if let Some(path) = &self.snapshot_path {
            if path.as_os_str().is_empty() {
                return Err(TulleError::InvalidConfig(
                    "snapshot_path must not be empty".into(),
                ));
            }
        }
        Ok(())
    }
}
