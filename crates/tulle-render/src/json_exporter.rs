//! JSON frame exporter: writes per-frame node data for visual inspection.
//!
//! Implements the `Renderer` trait. Captures node positions every
//! `interval` frames plus the triangle indices and node colours, then
//! serializes the whole animation to a JSON file on `finalize()`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tulle_mesh::ClothMesh;
use tulle_types::{TulleError, TulleResult};

use crate::palette::Rgba;
use crate::renderer::{RenderFrame, Renderer};

/// A single captured frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameData {
    pub frame: u64,
    /// Interleaved [x0,y0,z0, x1,y1,z1, ...]
    pub positions: Vec<f32>,
}

/// Complete animation data for JSON export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationData {
    pub node_count: usize,
    pub triangle_count: usize,
    pub indices: Vec<u32>,
    pub colors: Vec<Rgba>,
    pub frames: Vec<FrameData>,
}

/// Exports presented frames to a JSON file.
///
/// Usage:
/// ```text
/// let mut exporter = JsonFrameExporter::new("output.json", 10);
/// exporter.init(&mesh)?;
/// // ... the frame driver calls present() every frame ...
/// exporter.finalize()?; // Writes the JSON file
/// ```
pub struct JsonFrameExporter {
    output_path: PathBuf,
    interval: u64,
    indices: Vec<u32>,
    node_count: usize,
    triangle_count: usize,
    colors: Vec<Rgba>,
    frames: Vec<FrameData>,
    presented: u64,
}

impl JsonFrameExporter {
    /// Creates an exporter that keeps every `interval`-th frame (at least 1).
    pub fn new(output_path: impl Into<PathBuf>, interval: u64) -> Self {
        Self {
            output_path: output_path.into(),
            interval: interval.max(1),
            indices: Vec::new(),
            node_count: 0,
            triangle_count: 0,
            colors: Vec::new(),
            frames: Vec::new(),
            presented: 0,
        }
    }

    /// Number of frames captured so far.
    pub fn captured(&self) -> usize {
        self.frames.len()
    }

    /// Builds the animation document without writing it.
    pub fn animation(&self) -> AnimationData {
        AnimationData {
            node_count: self.node_count,
            triangle_count: self.triangle_count,
            indices: self.indices.clone(),
            colors: self.colors.clone(),
            frames: self.frames.clone(),
        }
    }
}

impl Renderer for JsonFrameExporter {
    fn init(&mut self, mesh: &ClothMesh) -> TulleResult<()> {
        self.node_count = mesh.node_count();
        self.triangle_count = mesh.triangle_count();
        self.indices = mesh.indices.clone();
        Ok(())
    }

    fn present(&mut self, frame: &RenderFrame) -> TulleResult<()> {
        if frame.node_count() != self.node_count {
            return Err(TulleError::InvalidState(format!(
                "Frame has {} nodes, exporter was initialized with {}",
                frame.node_count(),
                self.node_count
            )));
        }
        self.presented += 1;

        if self.colors.is_empty() {
            self.colors = frame.colors.clone();
        }
        if frame.frame % self.interval == 0 {
            let positions = frame
                .positions
                .iter()
                .flat_map(|p| [p.x, p.y, p.z])
                .collect();
            self.frames.push(FrameData {
                frame: frame.frame,
                positions,
            });
        }
        Ok(())
    }

    fn finalize(&mut self) -> TulleResult<()> {
        let data = self.animation();
        let json = serde_json::to_string(&data)
            .map_err(|e| TulleError::Serialization(format!("JSON serialization failed: {e}")))?;
        std::fs::write(&self.output_path, json)?;
        tracing::info!(
            path = %self.output_path.display(),
            frames = data.frames.len(),
            "animation exported"
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "json_exporter"
    }

    fn frame_count(&self) -> u64 {
        self.presented
    }
}
