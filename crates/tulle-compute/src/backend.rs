//! Compute backend trait, the sequential reference backend, and the
//! rayon data-parallel backend.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tulle_types::{TulleError, TulleResult};

use crate::buffers::{KinematicBuffers, NodeSlot};
use crate::kernel::{NodeKernel, TaskGrid};

/// Trait for pass executors.
///
/// `execute` is blocking: when it returns, every task of the grid has
/// completed and its writes are visible to the caller.
///
/// # Implementations
/// - [`CpuFallback`]: Sequential reference (always available)
/// - [`RayonBackend`]: One rayon task per node
pub trait ComputeBackend: Send + Sync {
    /// Initialize the backend. Called once at startup.
    fn init(&mut self) -> TulleResult<()>;

    /// Returns the backend name (e.g., "cpu_fallback", "rayon").
    fn name(&self) -> &str;

    /// Runs `kernel` once for each task in `grid`, writing into `dst`.
    fn execute(
        &self,
        kernel: &dyn NodeKernel,
        grid: TaskGrid,
        dst: &mut KinematicBuffers,
    ) -> TulleResult<()>;

    /// Returns true if tasks run concurrently.
    fn is_parallel(&self) -> bool;
}

/// CPU fallback backend: sequential reference implementation.
///
/// Used for:
/// - Correctness validation (parallel results must match bit for bit)
/// - Small meshes where thread dispatch isn't worthwhile
#[derive(Debug, Default)]
pub struct CpuFallback;

impl CpuFallback {
    /// Creates a new CPU fallback backend.
    pub fn new() -> Self {
        Self
    }
}

impl ComputeBackend for CpuFallback {
    fn init(&mut self) -> TulleResult<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "cpu_fallback"
    }

    fn execute(
        &self,
        kernel: &dyn NodeKernel,
        grid: TaskGrid,
        dst: &mut KinematicBuffers,
    ) -> TulleResult<()> {
        grid.check(dst.len())?;
        dst.validate()?;

        for (node, slot) in dst.slots_mut().enumerate() {
            kernel.run(node, slot);
        }

        Ok(())
    }

    fn is_parallel(&self) -> bool {
        false
    }
}

/// Data-parallel backend on rayon.
///
/// Runs on the global rayon pool, or on a dedicated pool when a thread
/// count is given.
pub struct RayonBackend {
    threads: Option<usize>,
    pool: Option<rayon::ThreadPool>,
}

impl RayonBackend {
    /// Creates a backend that uses the global rayon pool.
    pub fn new() -> Self {
        Self {
            threads: None,
            pool: None,
        }
    }

    /// Creates a backend with a dedicated pool of `threads` workers.
    pub fn with_threads(threads: usize) -> Self {
        Self {
            threads: Some(threads),
            pool: None,
        }
    }

    /// Returns the number of worker threads tasks are spread over.
    pub fn thread_count(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }
}

impl Default for RayonBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ComputeBackend for RayonBackend {
    fn init(&mut self) -> TulleResult<()> {
        if let Some(threads) = self.threads {
            if threads == 0 {
                return Err(TulleError::InvalidConfig(
                    "Rayon backend needs at least one thread".into(),
                ));
            }
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .thread_name(|i| format!("tulle-compute-{i}"))
                .build()
                .map_err(|e| TulleError::Compute(format!("Thread pool: {e}")))?;
            self.pool = Some(pool);
        }
        tracing::debug!(threads = self.thread_count(), "rayon backend ready");
        Ok(())
    }

    fn name(&self) -> &str {
        "rayon"
    }

    fn execute(
        &self,
        kernel: &dyn NodeKernel,
        grid: TaskGrid,
        dst: &mut KinematicBuffers,
    ) -> TulleResult<()> {
        grid.check(dst.len())?;
        dst.validate()?;

        match &self.pool {
            Some(pool) => pool.install(|| run_parallel(kernel, dst)),
            None => run_parallel(kernel, dst),
        }

        Ok(())
    }

    fn is_parallel(&self) -> bool {
        true
    }
}

fn run_parallel(kernel: &dyn NodeKernel, dst: &mut KinematicBuffers) {
    dst.position
        .par_iter_mut()
        .zip(dst.velocity.par_iter_mut())
        .zip(dst.acceleration.par_iter_mut())
        .enumerate()
        .for_each(|(node, ((position, velocity), acceleration))| {
            kernel.run(
                node,
                NodeSlot {
                    position,
                    velocity,
                    acceleration,
                },
            );
        });
}

/// Which backend executes the passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Sequential reference.
    Cpu,
    /// Rayon data-parallel.
    #[default]
    Rayon,
}

/// Backend selection, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComputeConfig {
    /// Backend kind.
    pub backend: BackendKind,
    /// Dedicated worker count for the rayon backend (global pool if unset).
    pub threads: Option<usize>,
}

impl ComputeConfig {
    /// Builds and initializes the configured backend.
    pub fn create_backend(&self) -> TulleResult<Box<dyn ComputeBackend>> {
        let mut backend: Box<dyn ComputeBackend> = match self.backend {
            BackendKind::Cpu => Box::new(CpuFallback::new()),
            BackendKind::Rayon => match self.threads {
                Some(threads) => Box::new(RayonBackend::with_threads(threads)),
                None => Box::new(RayonBackend::new()),
            },
        };
        backend.init()?;
        Ok(backend)
    }
}
