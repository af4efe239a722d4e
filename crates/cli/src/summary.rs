//! End-of-run measurements.

use liquid_lab_field::{FrameHost, Session};
use liquid_lab_core::RenderSurface;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub dropped_frames: u64,
    pub particles: usize,
    /// Mean distance of particles from their anchors.
    pub mean_displacement: f64,
    pub max_speed: f64,
}

impl RunSummary {
    pub fn measure<H: FrameHost, S: RenderSurface>(session: &Session<H, S>) -> Self {
        let particles = session.particles();
        let total: f64 = particles
            .iter()
            .map(|p| p.position().distance(p.anchor()))
            .sum();
        let max_speed = particles
            .iter()
            .map(|p| p.velocity().length())
            .fold(0.0, f64::max);
        let stats = session.stats();
        Self {
            ticks: stats.ticks,
            dropped_frames: stats.dropped_frames,
            particles: particles.len(),
            mean_displacement: if particles.is_empty() {
                0.0
            } else {
                total / particles.len() as f64
            },
            max_speed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use liquid_lab_core::NullSurface;
    use liquid_lab_field::{drive, FieldMode, FieldTuning, FrameQueue, SimulationConfig, SurfaceSize};

    fn session() -> Session<FrameQueue, NullSurface> {
        let size = SurfaceSize::new(400.0, 300.0).unwrap();
        Session::new(FrameQueue::new(16.0), NullSurface, size, FieldTuning::default(), 5)
    }

    #[test]
    fn idle_session_measures_zero() {
        let s = session();
        let summary = RunSummary::measure(&s);
        assert_eq!(summary.particles, 0);
        assert_eq!(summary.mean_displacement, 0.0);
        assert_eq!(summary.max_speed, 0.0);
    }

    #[test]
    fn undisturbed_particles_rest_on_anchors() {
        let mut s = session();
        s.start(SimulationConfig::new(40, FieldMode::Repel), s.surface_size()).unwrap();
        drive(&mut s, 10, false);
        let summary = RunSummary::measure(&s);
        assert_eq!(summary.ticks, 10);
        assert_eq!(summary.particles, 40);
        assert_eq!(summary.mean_displacement, 0.0);
    }

    #[test]
    fn pointer_displaces_particles() {
        let mut s = session();
        s.start(SimulationConfig::new(200, FieldMode::Repel), s.surface_size()).unwrap();
        s.pointer_move(200.0, 150.0);
        drive(&mut s, 5, false);
        let summary = RunSummary::measure(&s);
        assert!(summary.mean_displacement > 0.0);
        assert!(summary.max_speed > 0.0);
    }
}
