//! Per-node colours.
//!
//! Every node gets an RGBA colour once at setup. Channels are drawn from a
//! seeded ChaCha stream in steps of 0.01, so a given seed always yields
//! the same cloth.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tulle_compute::SharedBuffer;

/// Attribute name under which colours are shared with the renderer.
pub const COLOR_ATTRIBUTE: &str = "voxel_color";

/// RGBA colour, channels in `[0, 1]`.
pub type Rgba = [f32; 4];

/// Colour of every node, in node order.
#[derive(Debug, Clone, PartialEq)]
pub struct NodePalette {
    colors: Vec<Rgba>,
}

impl NodePalette {
    /// Random opaque colours from `seed`.
    pub fn random(node_count: usize, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut channel = move || 0.01 * rng.gen_range(0..100u32) as f32;
        let colors = (0..node_count)
            .map(|_| [channel(), channel(), channel(), 1.0])
            .collect();
        Self { colors }
    }

    /// The same colour for every node.
    pub fn uniform(node_count: usize, color: Rgba) -> Self {
        Self {
            colors: vec![color; node_count],
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn as_slice(&self) -> &[Rgba] {
        &self.colors
    }

    /// Moves the colours into a renderer-shared buffer.
    pub fn into_shared(self) -> SharedBuffer<Vec<Rgba>> {
        SharedBuffer::new(COLOR_ATTRIBUTE, self.colors)
    }
}
