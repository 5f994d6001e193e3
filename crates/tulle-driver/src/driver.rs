//! The frame driver state machine.
//!
//! ```text
//!   Idle ──start──► Running ──(close requested | limit)──► Closing ──close──► Terminated
//!                      │                                                        ▲
//!                      └──────────────── frame error ───────────────────────────┘
//! ```
//!
//! One running frame:
//! 1. `FrameBegin`, renderer `clear` and `poll_events`
//! 2. acquire `voxel_color`, then `voxel_center` (scoped guards)
//! 3. predictor and corrector through the integration scheme
//! 4. guards released, renderer `present` with read access
//! 5. `FrameEnd` (plus `Energy` every `energy_interval` frames)
//! 6. close check: renderer input, [`ShutdownHandle`], `max_frames`

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tulle_compute::{ComputeBackend, SharedBuffer};
use tulle_debug::{InspectionHook, StateSnapshot};
use tulle_mesh::ClothMesh;
use tulle_render::{
    HeadlessRenderer, InputState, JsonFrameExporter, NodePalette, RenderFrame, Renderer, Rgba,
};
use tulle_solver::{ClothSimulation, EnergyReport, StepResult};
use tulle_telemetry::{EventBus, EventKind, EventSink, SimulationEvent};
use tulle_types::{TulleError, TulleResult};

use crate::config::DriverConfig;
use crate::scene::SceneConfig;

/// Lifecycle state of a [`FrameDriver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Running,
    Closing,
    Terminated,
}

impl fmt::Display for DriverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DriverState::Idle => "Idle",
            DriverState::Running => "Running",
            DriverState::Closing => "Closing",
            DriverState::Terminated => "Terminated",
        };
        f.write_str(name)
    }
}

/// Why the frame loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// The renderer reported a close request.
    Input,
    /// A [`ShutdownHandle`] was triggered.
    Shutdown,
    /// `max_frames` was reached.
    FrameLimit,
}

/// Requests a graceful stop from outside the frame loop.
///
/// Checked between frames only; a frame in progress always completes.
#[derive(Debug, Clone, Default)]
pub struct ShutdownHandle {
    flag: Arc<AtomicBool>,
}

impl ShutdownHandle {
    pub fn request(&self) {
        self.flag.store(true, Ordering::Release);
    }

    pub fn is_requested(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

/// Result of one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameOutcome {
    /// Index of the frame that just ran.
    pub frame: u64,
    /// The integration step.
    pub step: StepResult,
    /// Wall-clock time of the whole frame (seconds).
    pub wall_time: f64,
    /// Set when the driver moved to `Closing` after this frame.
    pub close: Option<CloseReason>,
}

/// Summary of a completed run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub frames: u64,
    pub sim_time: f64,
    pub wall_time: f64,
    pub avg_frame_time: f64,
    pub max_frame_time: f64,
    pub close_reason: Option<CloseReason>,
    pub final_energy: EnergyReport,
}

/// Drives a [`ClothSimulation`] frame by frame and feeds a [`Renderer`].
pub struct FrameDriver {
    mesh: ClothMesh,
    sim: ClothSimulation,
    backend: Box<dyn ComputeBackend>,
    renderer: Box<dyn Renderer>,
    colors: SharedBuffer<Vec<Rgba>>,
    bus: EventBus,
    hooks: Vec<Box<dyn InspectionHook>>,
    config: DriverConfig,
    state: DriverState,
    shutdown: ShutdownHandle,
    frame_times: Vec<f64>,
    close_reason: Option<CloseReason>,
}

impl FrameDriver {
    /// Creates an idle driver.
    pub fn new(
        mesh: ClothMesh,
        sim: ClothSimulation,
        backend: Box<dyn ComputeBackend>,
        renderer: Box<dyn Renderer>,
        palette: NodePalette,
        config: DriverConfig,
    ) -> TulleResult<Self> {
        config.validate()?;
        if mesh.node_count() != sim.node_count() || palette.len() != sim.node_count() {
            return Err(TulleError::InvalidConfig(format!(
                "Mesh ({}), simulation ({}), and palette ({}) node counts differ",
                mesh.node_count(),
                sim.node_count(),
                palette.len()
            )));
        }
        Ok(Self {
            mesh,
            sim,
            backend,
            renderer,
            colors: palette.into_shared(),
            bus: EventBus::new(),
            hooks: Vec::new(),
            config,
            state: DriverState::Idle,
            shutdown: ShutdownHandle::default(),
            frame_times: Vec::new(),
            close_reason: None,
        })
    }

    /// Builds mesh, simulation, backend, and renderer from a scene.
    ///
    /// The renderer is a [`JsonFrameExporter`] when the scene asks for an
    /// export, headless otherwise.
    pub fn from_scene(scene: &SceneConfig) -> TulleResult<Self> {
        let mesh = scene.build_mesh()?;
        let props = scene.resolve_material()?;
        let sim = ClothSimulation::from_mesh(&mesh, &props, &scene.solver)?;
        let backend = scene.compute.create_backend()?;
        let renderer: Box<dyn Renderer> = match &scene.export {
            Some(export) => Box::new(JsonFrameExporter::new(export.path.clone(), export.interval)),
            None => Box::new(HeadlessRenderer::new()),
        };
        let palette = NodePalette::random(mesh.node_count(), scene.palette_seed);
        Self::new(mesh, sim, backend, renderer, palette, scene.driver.clone())
    }

    /// Registers a telemetry sink.
    pub fn add_sink(&mut self, sink: Box<dyn EventSink>) {
        self.bus.add_sink(sink);
    }

    /// Registers an inspection hook.
    pub fn add_hook(&mut self, hook: Box<dyn InspectionHook>) {
        self.hooks.push(hook);
    }

    /// Handle that stops the loop before the next frame.
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.shutdown.clone()
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Number of frames run so far.
    pub fn frames(&self) -> u64 {
        self.sim.frame()
    }

    pub fn simulation(&self) -> &ClothSimulation {
        &self.sim
    }

    pub fn renderer(&self) -> &dyn Renderer {
        self.renderer.as_ref()
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    pub fn close_reason(&self) -> Option<CloseReason> {
        self.close_reason
    }

    /// `Idle → Running`: initializes the renderer.
    pub fn start(&mut self) -> TulleResult<()> {
        self.expect_state(DriverState::Idle, "start")?;
        if let Err(e) = self.renderer.init(&self.mesh) {
            self.abort(&e);
            return Err(e);
        }
        tracing::info!(
            nodes = self.sim.node_count(),
            renderer = self.renderer.name(),
            backend = self.backend.name(),
            scheme = self.sim.scheme_name(),
            "frame driver started"
        );
        self.transition(DriverState::Running);
        Ok(())
    }

    /// Runs one frame. Only valid while `Running`.
    ///
    /// Any error terminates the driver and is returned.
    pub fn run_frame(&mut self) -> TulleResult<FrameOutcome> {
        self.expect_state(DriverState::Running, "run a frame")?;
        match self.frame() {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                self.abort(&e);
                Err(e)
            }
        }
    }

    fn frame(&mut self) -> TulleResult<FrameOutcome> {
        let frame = self.sim.frame();
        let start = Instant::now();

        self.bus.emit(SimulationEvent::new(
            frame,
            EventKind::FrameBegin {
                sim_time: self.sim.sim_time(),
            },
        ));
        for hook in &mut self.hooks {
            hook.on_frame_begin(frame, self.sim.sim_time());
        }

        self.renderer.clear()?;
        let input = self.renderer.poll_events();

        let step = {
            let _colors = self.colors.acquire()?;
            self.sim.step(self.backend.as_ref())?
        };
        self.bus.emit(SimulationEvent::new(
            frame,
            EventKind::PassComplete {
                scheme: self.sim.scheme_name().to_string(),
                passes: step.passes,
                wall_time: step.wall_time,
            },
        ));

        {
            let state = self.sim.shared_state().read()?;
            let colors = self.colors.read()?;
            for hook in &mut self.hooks {
                hook.on_step(frame, &state);
            }
            self.renderer
                .present(&RenderFrame::new(frame, &state.position, &colors))?;
        }

        let wall_time = start.elapsed().as_secs_f64();
        self.frame_times.push(wall_time);
        self.bus
            .emit(SimulationEvent::new(frame, EventKind::FrameEnd { wall_time }));

        let done = self.sim.frame();
        if self.config.energy_interval > 0 && done % self.config.energy_interval == 0 {
            let energy = self.sim.energy()?;
            self.bus.emit(SimulationEvent::new(
                frame,
                EventKind::Energy {
                    kinetic: energy.kinetic,
                    potential: energy.potential,
                    elastic: energy.elastic,
                },
            ));
        }
        for hook in &mut self.hooks {
            hook.on_frame_end(frame, wall_time);
        }
        self.bus.flush();

        tracing::debug!(frame, wall_time, passes = step.passes, "frame complete");

        let close = self.pending_close(input);
        if let Some(reason) = close {
            self.begin_closing(reason);
        }

        Ok(FrameOutcome {
            frame,
            step,
            wall_time,
            close,
        })
    }

    /// `Running | Closing → Terminated`: finalizes the renderer, flushes
    /// telemetry, and writes the configured snapshot.
    pub fn close(&mut self) -> TulleResult<()> {
        if !matches!(self.state, DriverState::Running | DriverState::Closing) {
            return Err(self.invalid("close"));
        }
        if self.state == DriverState::Running {
            self.transition(DriverState::Closing);
        }

        let result = self.finish();
        self.transition(DriverState::Terminated);
        self.bus.finish();
        result
    }

    fn finish(&mut self) -> TulleResult<()> {
        self.renderer.finalize()?;
        for hook in &mut self.hooks {
            hook.on_simulation_end();
        }
        if let Some(path) = &self.config.snapshot_path {
            let state = self.sim.shared_state().read()?;
            StateSnapshot::capture(self.sim.frame(), self.sim.sim_time(), &state).save(path)?;
            tracing::info!(path = %path.display(), "snapshot written");
        }
        Ok(())
    }

    /// Starts, runs frames until a close condition holds, and closes.
    pub fn run(&mut self) -> TulleResult<RunSummary> {
        let start = Instant::now();
        self.start()?;

        loop {
            if let Some(reason) = self.pending_close(InputState::default()) {
                self.begin_closing(reason);
                break;
            }
            if self.run_frame()?.close.is_some() {
                break;
            }
        }

        self.close()?;
        let summary = self.summary(start.elapsed().as_secs_f64())?;
        tracing::info!(
            frames = summary.frames,
            sim_time = summary.sim_time,
            wall_time = summary.wall_time,
            reason = ?summary.close_reason,
            "run complete"
        );
        Ok(summary)
    }

    /// Fails when the state diverged: a NaN cloth is not a result.
    fn summary(&self, wall_time: f64) -> TulleResult<RunSummary> {
        self.sim.check_finite()?;
        let n = self.frame_times.len();
        let avg_frame_time = if n == 0 {
            0.0
        } else {
            self.frame_times.iter().sum::<f64>() / n as f64
        };
        Ok(RunSummary {
            frames: self.sim.frame(),
            sim_time: self.sim.sim_time(),
            wall_time,
            avg_frame_time,
            max_frame_time: self.frame_times.iter().copied().fold(0.0, f64::max),
            close_reason: self.close_reason,
            final_energy: self.sim.energy()?,
        })
    }

    /// Per-frame wall times recorded so far.
    pub fn frame_times(&self) -> &[f64] {
        &self.frame_times
    }

    fn pending_close(&self, input: InputState) -> Option<CloseReason> {
        if input.close_requested {
            Some(CloseReason::Input)
        } else if self.shutdown.is_requested() {
            Some(CloseReason::Shutdown)
        } else if self
            .config
            .max_frames
            .is_some_and(|max| self.sim.frame() >= max)
        {
            Some(CloseReason::FrameLimit)
        } else {
            None
        }
    }

    fn begin_closing(&mut self, reason: CloseReason) {
        self.close_reason = Some(reason);
        tracing::info!(?reason, frame = self.sim.frame(), "close requested");
        self.transition(DriverState::Closing);
    }

    fn abort(&mut self, error: &TulleError) {
        tracing::warn!(%error, frame = self.sim.frame(), "frame driver terminated by error");
        if let Err(e) = self.renderer.finalize() {
            tracing::warn!(error = %e, "renderer finalize failed during abort");
        }
        self.transition(DriverState::Terminated);
        self.bus.finish();
    }

    fn transition(&mut self, to: DriverState) {
        let from = self.state;
        self.state = to;
        tracing::info!(%from, %to, "driver state");
        self.bus.emit(SimulationEvent::new(
            self.sim.frame(),
            EventKind::StateTransition {
                from: from.to_string(),
                to: to.to_string(),
            },
        ));
    }

    fn expect_state(&self, expected: DriverState, action: &str) -> TulleResult<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(self.invalid(action))
        }
    }

    fn invalid(&self, action: &str) -> TulleError {
        TulleError::InvalidState(format!("Cannot {action} while {}", self.state))
    }
}
