//! Boundary classification: which nodes are free to move.

use tulle_types::{TulleError, TulleResult};

/// Per-node freedom flags: `1.0` for free nodes, `0.0` for pinned ones.
///
/// Set once before the frame loop and never changed. Kernels test
/// [`is_free`](FreedomMask::is_free) before touching a node.
#[derive(Debug, Clone, PartialEq)]
pub struct FreedomMask {
    flags: Vec<f32>,
}

impl FreedomMask {
    /// Marks the listed nodes as pinned and every other node as free.
    ///
    /// Duplicate entries are harmless. An index `>= node_count` is an
    /// `InvalidMesh` error.
    pub fn classify(node_count: usize, pinned: &[u32]) -> TulleResult<Self> {
        let mut flags = vec![1.0; node_count];
        for &p in pinned {
            let idx = p as usize;
            if idx >= node_count {
                return Err(TulleError::InvalidMesh(format!(
                    "Pinned node {p} out of range for {node_count} nodes"
                )));
            }
            flags[idx] = 0.0;
        }
        Ok(Self { flags })
    }

    /// Every node free.
    pub fn all_free(node_count: usize) -> Self {
        Self {
            flags: vec![1.0; node_count],
        }
    }

    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Returns true if the mask covers no nodes.
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    #[inline]
    pub fn is_free(&self, i: usize) -> bool {
        self.flags[i] != 0.0
    }

    /// Raw flag for node `i`.
    #[inline]
    pub fn flag(&self, i: usize) -> f32 {
        self.flags[i]
    }

    pub fn pinned_count(&self) -> usize {
        self.flags.iter().filter(|&&f| f == 0.0).count()
    }

    pub fn free_count(&self) -> usize {
        self.len() - self.pinned_count()
    }

    /// Indices of pinned nodes, ascending.
    pub fn pinned_nodes(&self) -> Vec<u32> {
        self.flags
            .iter()
            .enumerate()
            .filter(|(_, &f)| f == 0.0)
            .map(|(i, _)| i as u32)
            .collect()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.flags
    }
}
