//! Renderer trait and HeadlessRenderer stub.
//!
//! The frame driver talks to a renderer in a fixed order every frame:
//! `clear`, `poll_events`, then (after the integration step) `present`.
//! The headless renderer draws nothing, serving as a no-op for
//! benchmarks and CI.

use glam::Vec4;
use tulle_mesh::ClothMesh;
use tulle_types::TulleResult;

use crate::palette::Rgba;

/// A single presented frame.
#[derive(Debug, Clone)]
pub struct RenderFrame {
    /// Frame index.
    pub frame: u64,
    /// Node positions (`voxel_center`).
    pub positions: Vec<Vec4>,
    /// Node colours (`voxel_color`).
    pub colors: Vec<Rgba>,
}

impl RenderFrame {
    /// Create a frame from the shared buffers' contents.
    pub fn new(frame: u64, positions: &[Vec4], colors: &[Rgba]) -> Self {
        Self {
            frame,
            positions: positions.to_vec(),
            colors: colors.to_vec(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.positions.len()
    }
}

/// User input gathered since the previous frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    /// The window was closed or the close key pressed.
    pub close_requested: bool,
}

/// Trait for rendering simulation output.
///
/// # Implementations
/// - [`HeadlessRenderer`]: Discards frames (benchmarks, CI)
/// - [`JsonFrameExporter`](crate::JsonFrameExporter): Records frames to a JSON file
pub trait Renderer: Send {
    /// Initialize the renderer with the mesh topology.
    fn init(&mut self, mesh: &ClothMesh) -> TulleResult<()>;

    /// Clear the target before a new frame.
    fn clear(&mut self) -> TulleResult<()> {
        Ok(())
    }

    /// Collect input events.
    fn poll_events(&mut self) -> InputState {
        InputState::default()
    }

    /// Draw (or record) a frame.
    fn present(&mut self, frame: &RenderFrame) -> TulleResult<()>;

    /// Finalize rendering (flush buffers, close files, etc.).
    fn finalize(&mut self) -> TulleResult<()>;

    /// Returns the renderer name.
    fn name(&self) -> &str;

    /// Returns the number of frames presented.
    fn frame_count(&self) -> u64;
}

/// Headless renderer: discards all frames.
///
/// Can simulate a user closing the window after a number of frames.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    frames: u64,
    close_after: Option<u64>,
    finalized: bool,
}

impl HeadlessRenderer {
    /// Creates a new headless renderer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests close once `frames` frames have been presented.
    pub fn closing_after(frames: u64) -> Self {
        Self {
            close_after: Some(frames),
            ..Self::default()
        }
    }

    /// Returns true once `finalize` has run.
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }
}

impl Renderer for HeadlessRenderer {
    fn init(&mut self, _mesh: &ClothMesh) -> TulleResult<()> {
        Ok(())
    }

    fn poll_events(&mut self) -> InputState {
        InputState {
            close_requested: self.close_after.is_some_and(|n| self.frames >= n),
        }
    }

    fn present(&mut self, _frame: &RenderFrame) -> TulleResult<()> {
        self.frames += 1;
        Ok(())
    }

    fn finalize(&mut self) -> TulleResult<()> {
        self.finalized = true;
        Ok(())
    }

    fn name(&self) -> &str {
        "headless"
    }

    fn frame_count(&self) -> u64 {
        self.frames
    }
}
