//! Particle records and the store that owns them.
//!
//! A particle's anchor, radius, responsiveness, phase, and group are fixed
//! when it is created; only position and velocity evolve. The store is
//! replaced wholesale on every (re)initialization, never patched.

use crate::config::{FieldTuning, SurfaceSize};
use liquid_lab_core::{DVec2, Xorshift64};

/// Two-valued render tag. Has no effect on motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParticleGroup {
    Primary,
    Secondary,
}

impl ParticleGroup {
    /// Groups alternate by index: even indices are `Primary`.
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 {
            ParticleGroup::Primary
        } else {
            ParticleGroup::Secondary
        }
    }
}

/// One simulated particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    anchor: DVec2,
    radius: f64,
    responsiveness: f64,
    phase: f64,
    group: ParticleGroup,
    pub(crate) position: DVec2,
    pub(crate) velocity: DVec2,
}

impl Particle {
    /// Creates a particle resting on its anchor with zero velocity.
    pub fn new(
        anchor: DVec2,
        radius: f64,
        responsiveness: f64,
        phase: f64,
        group: ParticleGroup,
    ) -> Self {
        Self {
            anchor,
            radius,
            responsiveness,
            phase,
            group,
            position: anchor,
            velocity: DVec2::ZERO,
        }
    }

    /// Same particle displaced to `position`.
    pub fn with_position(mut self, position: DVec2) -> Self {
        self.position = position;
        self
    }

    /// Same particle moving with `velocity`.
    pub fn with_velocity(mut self, velocity: DVec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn anchor(&self) -> DVec2 {
        self.anchor
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub fn velocity(&self) -> DVec2 {
        self.velocity
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// How strongly this particle reacts to the pointer field.
    pub fn responsiveness(&self) -> f64 {
        self.responsiveness
    }

    /// Oscillation phase offset in [0, 2π).
    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn group(&self) -> ParticleGroup {
        self.group
    }
}

/// Exclusive owner of a session's particles.
#[derive(Debug, Clone, Default)]
pub struct ParticleStore {
    particles: Vec<Particle>,
}

impl ParticleStore {
    /// An empty store.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Allocates `count` particles with anchors uniform over `surface`.
    ///
    /// Responsiveness and radius are drawn from the tuning ranges, phase from
    /// [0, 2π), and groups alternate by index. A count of 0 yields an empty
    /// store. Runs in O(count).
    pub fn initialize(
        count: usize,
        surface: SurfaceSize,
        tuning: &FieldTuning,
        rng: &mut Xorshift64,
    ) -> Self {
        let (r_min, r_max) = tuning.responsiveness_range;
        let (s_min, s_max) = tuning.radius_range;
        let particles = (0..count)
            .map(|i| {
                let anchor = DVec2::new(
                    rng.next_range(0.0, surface.width()),
                    rng.next_range(0.0, surface.height()),
                );
                let radius = rng.next_range(s_min, s_max);
                let responsiveness = rng.next_range(r_min, r_max);
                let phase = rng.next_angle();
                Particle::new(
                    anchor,
                    radius,
                    responsiveness,
                    phase,
                    ParticleGroup::for_index(i),
                )
            })
            .collect();
        Self { particles }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Read-only view of every particle, in allocation order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub(crate) fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }
}
