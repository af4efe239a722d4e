//! Reproducible description of a simulation run.
//!
//! A [`Seed`] captures everything a headless run needs: surface size and
//! display density, particle count and mode, tuning overrides, the PRNG
//! seed, and how many frames to run at what interval. The same seed file
//! replays bit-identical particle trajectories.

use crate::config::{FieldMode, FieldTuning, SimulationConfig, SurfaceSize, DEFAULT_PARTICLE_COUNT};
use liquid_lab_core::error::{LabError, MAX_FRAME_MS};
use serde::{Deserialize, Serialize};

fn default_density() -> f64 {
    1.0
}

fn default_frame_ms() -> f64 {
    1000.0 / 60.0
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Seed {
    /// Surface width in display pixels.
    pub width: f64,
    /// Surface height in display pixels.
    pub height: f64,
    /// Display density (device pixel ratio).
    #[serde(default = "default_density")]
    pub density: f64,
    pub particle_count: usize,
    pub mode: FieldMode,
    /// Tuning overrides, read with [`FieldTuning::from_json`].
    #[serde(default)]
    pub tuning: serde_json::Value,
    pub seed: u64,
    pub ticks: usize,
    #[serde(default = "default_frame_ms")]
    pub frame_ms: f64,
}

impl Seed {
    /// A seed with default count, mode, tuning, density, and frame interval.
    pub fn new(width: f64, height: f64, seed: u64) -> Self {
        Self {
            width,
            height,
            density: default_density(),
            particle_count: DEFAULT_PARTICLE_COUNT,
            mode: FieldMode::default(),
            tuning: serde_json::Value::Object(serde_json::Map::new()),
            seed,
            ticks: 0,
            frame_ms: default_frame_ms(),
        }
    }

    /// Checks that the simulation surface is non-degenerate and the frame
    /// interval is usable.
    pub fn validate(&self) -> Result<(), LabError> {
        self.surface_size()?;
        if !(0.0..=MAX_FRAME_MS).contains(&self.frame_ms) {
            return Err(LabError::InvalidFrameInterval(self.frame_ms));
        }
        Ok(())
    }

    /// Density-scaled surface size in simulation space.
    pub fn surface_size(&self) -> Result<SurfaceSize, LabError> {
        SurfaceSize::new(self.width * self.density, self.height * self.density)
    }

    pub fn config(&self) -> SimulationConfig {
        SimulationConfig::new(self.particle_count, self.mode)
    }

    /// Overrides applied on top of the defaults, then scaled for density.
    pub fn field_tuning(&self) -> FieldTuning {
        FieldTuning::from_json(&self.tuning).scaled(self.density)
    }
}
