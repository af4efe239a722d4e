//! Simulation loop scheduler.
//!
//! A [`Session`] owns the particle store, the pointer state, and the
//! `Idle`/`Running` lifecycle. It never runs a loop of its own: it asks a
//! [`FrameHost`] for one frame at a time and the host calls [`Session::tick`]
//! when that frame fires. Each tick integrates every particle, presents the
//! frame, and requests the next one, so at most one frame is ever pending.
//!
//! ```text
//!   Idle --start--> Running --tick--> Running (next frame requested)
//!     ^                |
//!     +------stop------+   reconfigure / refresh = stop + start
//! ```

use crate::config::{FieldTuning, ParticleStyle, SimulationConfig, SurfaceSize};
use crate::integrator::{integrate, oscillation_offset};
use crate::particle::{Particle, ParticleStore};
use crate::pointer::PointerState;
use crate::resolver::resolve;
use liquid_lab_core::error::LabError;
use liquid_lab_core::{DVec2, DrawCommand, RenderSurface, Xorshift64};
use log::{debug, trace, warn};

/// Identifies one scheduled frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameToken(pub u64);

/// Something that can call back into a session once per frame.
///
/// `request_frame` schedules exactly one future call to [`Session::tick`]
/// carrying the returned token; `cancel_frame` withdraws it.
pub trait FrameHost {
    fn request_frame(&mut self) -> Result<FrameToken, LabError>;

    /// Cancelling an unknown or already-fired token is a no-op.
    fn cancel_frame(&mut self, token: FrameToken);
}

/// Lifecycle of a session's loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// No particles allocated, nothing scheduled.
    Idle,
    /// Particles allocated and exactly one frame pending.
    Running { pending: FrameToken },
}

/// Result of delivering a frame to [`Session::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The tick ran and the surface accepted the frame.
    Rendered,
    /// The tick ran but the surface rejected the frame; state still advanced.
    Dropped,
    /// The token was not the pending one (stale or cancelled loop).
    Ignored,
}

/// Counters over the lifetime of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub ticks: u64,
    pub dropped_frames: u64,
    /// Successful `start` calls, including the first.
    pub starts: u64,
}

/// One interactive simulation: particles, pointer, loop state, and the host
/// and surface it runs against.
pub struct Session<H: FrameHost, S: RenderSurface> {
    host: H,
    surface: S,
    tuning: FieldTuning,
    style: ParticleStyle,
    rng: Xorshift64,
    pointer: PointerState,
    config: SimulationConfig,
    surface_size: SurfaceSize,
    store: ParticleStore,
    state: LoopState,
    frame: Vec<DrawCommand>,
    stats: SessionStats,
}

impl<H: FrameHost, S: RenderSurface> Session<H, S> {
    /// Creates an idle session. Nothing is allocated until [`Session::start`].
    pub fn new(
        host: H,
        surface: S,
        surface_size: SurfaceSize,
        tuning: FieldTuning,
        seed: u64,
    ) -> Self {
        Self {
            host,
            surface,
            tuning,
            style: ParticleStyle::default(),
            rng: Xorshift64::new(seed),
            pointer: PointerState::new(tuning.influence_radius),
            config: SimulationConfig::default(),
            surface_size,
            store: ParticleStore::empty(),
            state: LoopState::Idle,
            frame: Vec::new(),
            stats: SessionStats::default(),
        }
    }

    /// Replaces the group colours used for draw commands.
    pub fn with_style(mut self, style: ParticleStyle) -> Self {
        self.style = style;
        self
    }

    /// Allocates a fresh particle collection and schedules the first frame.
    ///
    /// A running loop is stopped first, so at most one loop is ever active.
    /// If the host cannot schedule, the session is left `Idle`.
    pub fn start(
        &mut self,
        config: SimulationConfig,
        surface_size: SurfaceSize,
    ) -> Result<(), LabError> {
        self.stop();
        self.config = config;
        self.surface_size = surface_size;
        self.store = ParticleStore::initialize(
            config.particle_count,
            surface_size,
            &self.tuning,
            &mut self.rng,
        );
        match self.host.request_frame() {
            Ok(pending) => {
                self.state = LoopState::Running { pending };
                self.stats.starts += 1;
                debug!(
                    "started {} particles in {} mode on {}x{}",
                    self.store.len(),
                    config.mode,
                    surface_size.width(),
                    surface_size.height()
                );
                Ok(())
            }
            Err(e) => {
                self.store = ParticleStore::empty();
                Err(e)
            }
        }
    }

    /// Cancels the pending frame and releases the particles. No-op when idle.
    pub fn stop(&mut self) {
        if let LoopState::Running { pending } = self.state {
            self.host.cancel_frame(pending);
            debug!("stopped loop after {} ticks", self.stats.ticks);
        }
        self.state = LoopState::Idle;
        self.store = ParticleStore::empty();
    }

    /// Stops and restarts with `config` on the current surface.
    pub fn reconfigure(&mut self, config: SimulationConfig) -> Result<(), LabError> {
        self.start(config, self.surface_size)
    }

    /// Restarts with the current config and a freshly drawn layout.
    pub fn refresh(&mut self) -> Result<(), LabError> {
        self.start(self.config, self.surface_size)
    }

    /// Records a new surface size, restarting if the loop is running.
    pub fn resize(&mut self, surface_size: SurfaceSize) -> Result<(), LabError> {
        if self.is_running() {
            self.start(self.config, surface_size)
        } else {
            self.surface_size = surface_size;
            Ok(())
        }
    }

    /// Host entry point for a fired frame at `timestamp_ms`.
    ///
    /// Runs one tick if `token` is the pending frame, then requests the next
    /// frame. Any other token is ignored. A surface failure drops the frame
    /// but not the tick.
    pub fn tick(&mut self, token: FrameToken, timestamp_ms: f64) -> FrameOutcome {
        match self.state {
            LoopState::Running { pending } if pending == token => {}
            _ => {
                trace!("ignoring stale frame {token:?}");
                return FrameOutcome::Ignored;
            }
        }

        let outcome = self.advance(timestamp_ms);

        match self.host.request_frame() {
            Ok(pending) => self.state = LoopState::Running { pending },
            Err(e) => {
                warn!("could not schedule next frame, going idle: {e}");
                self.state = LoopState::Idle;
                self.store = ParticleStore::empty();
            }
        }
        outcome
    }

    /// The tick body: resolve, integrate, and present every particle.
    fn advance(&mut self, timestamp_ms: f64) -> FrameOutcome {
        let phase_time = timestamp_ms * self.tuning.oscillation_rate;
        let amplitude = self.tuning.oscillation_amplitude;
        self.frame.clear();
        for particle in self.store.particles_mut() {
            let delta = resolve(particle, &self.pointer, self.config.mode, &self.tuning);
            integrate(particle, delta, &self.tuning);
            let float_y = oscillation_offset(particle, phase_time, amplitude);
            self.frame.push(DrawCommand {
                center: particle.position() + DVec2::new(0.0, float_y),
                radius: particle.radius(),
                color: self.style.color_for(particle.group()),
            });
        }
        self.stats.ticks += 1;

        match self.surface.present(&self.frame) {
            Ok(()) => FrameOutcome::Rendered,
            Err(e) => {
                self.stats.dropped_frames += 1;
                warn!("dropping frame at tick {}: {e}", self.stats.ticks);
                FrameOutcome::Dropped
            }
        }
    }

    /// Pointer moved to `(x, y)` in simulation space.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.pointer.pointer_move(x, y);
    }

    /// Pointer left the surface.
    pub fn pointer_leave(&mut self) {
        self.pointer.pointer_leave();
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, LoopState::Running { .. })
    }

    pub fn config(&self) -> SimulationConfig {
        self.config
    }

    pub fn surface_size(&self) -> SurfaceSize {
        self.surface_size
    }

    pub fn tuning(&self) -> &FieldTuning {
        &self.tuning
    }

    pub fn particles(&self) -> &[Particle] {
        self.store.particles()
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Draw commands of the most recent tick.
    pub fn last_frame(&self) -> &[DrawCommand] {
        &self.frame
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

impl<H: FrameHost, S: RenderSurface> Drop for Session<H, S> {
    fn drop(&mut self) {
        self.stop();
    }
}
