//! # tulle-compute
//!
//! Compute dispatch abstraction for the Tulle cloth engine.
//!
//! A pass is a [`NodeKernel`] run once per node over a fixed-size
//! [`TaskGrid`]. Each task writes only its own [`NodeSlot`] and reads
//! whatever immutable buffers the kernel borrowed, so tasks within a
//! pass never synchronize. A [`ComputeBackend`] executes the pass and
//! blocks until every task has finished:
//! - [`CpuFallback`]: Sequential reference implementation
//! - [`RayonBackend`]: Data-parallel execution on a rayon pool
//!
//! [`SharedBuffer`] wraps buffers that are also read by the renderer and
//! hands out scoped exclusive access.

pub mod backend;
pub mod buffers;
pub mod kernel;

pub use backend::{BackendKind, ComputeBackend, ComputeConfig, CpuFallback, RayonBackend};
pub use buffers::{KinematicBuffers, NodeSlot, SharedBuffer};
pub use kernel::{NodeKernel, TaskGrid};
