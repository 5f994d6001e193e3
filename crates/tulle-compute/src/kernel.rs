//! Per-node kernels and the task grid they run over.

use tulle_types::{TulleError, TulleResult};

use crate::buffers::NodeSlot;

/// A one-dimensional task grid: one task per node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskGrid {
    size: usize,
}

impl TaskGrid {
    /// Creates a grid of `size` tasks.
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    /// Returns the number of tasks.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Checks that a destination of `len` slots matches the grid.
    pub fn check(&self, len: usize) -> TulleResult<()> {
        if len != self.size {
            return Err(TulleError::Compute(format!(
                "Destination has {} slots but the task grid has {}",
                len, self.size
            )));
        }
        Ok(())
    }
}

/// Work executed once per node within a pass.
///
/// A kernel borrows its input buffers immutably and receives a mutable
/// view of exactly one destination node. It may read that node's previous
/// value before overwriting it. Different nodes never alias.
pub trait NodeKernel: Sync {
    /// Kernel name, used in logs and telemetry.
    fn name(&self) -> &str;

    /// Runs the task for `node`.
    fn run(&self, node: usize, slot: NodeSlot<'_>);
}
