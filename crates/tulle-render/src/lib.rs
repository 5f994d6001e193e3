//! # tulle-render
//!
//! Pluggable rendering abstraction for Tulle.
//!
//! Provides a `Renderer` trait with a `HeadlessRenderer` stub, a
//! `JsonFrameExporter` that records frames for offline inspection, and
//! the per-node colour palette shared with the renderer under the
//! `voxel_color` attribute.

pub mod json_exporter;
pub mod palette;
pub mod renderer;

pub use json_exporter::JsonFrameExporter;
pub use palette::{NodePalette, Rgba, COLOR_ATTRIBUTE};
pub use renderer::{HeadlessRenderer, InputState, RenderFrame, Renderer};
