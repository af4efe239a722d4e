//! Per-particle motion step and the cosmetic oscillation.
//!
//! Velocity update order: field delta, then the anchor spring, then friction
//! over the whole velocity so damping also applies to this tick's forcing.
//! With `friction < 1` any unforced displacement decays geometrically.

use crate::config::FieldTuning;
use crate::particle::Particle;
use liquid_lab_core::DVec2;

/// Advances `particle` one tick in place under `field_delta`.
pub fn integrate(particle: &mut Particle, field_delta: DVec2, tuning: &FieldTuning) {
    let spring = (particle.anchor() - particle.position) * tuning.k_spring;
    particle.velocity = (particle.velocity + field_delta + spring) * tuning.friction;
    particle.position += particle.velocity;
}

/// Value form of [`integrate`].
pub fn step(mut particle: Particle, field_delta: DVec2, tuning: &FieldTuning) -> Particle {
    integrate(&mut particle, field_delta, tuning);
    particle
}

/// Vertical draw offset of the float effect at `phase_time` radians.
///
/// Render-only: never added to the particle's position.
pub fn oscillation_offset(particle: &Particle, phase_time: f64, amplitude: f64) -> f64 {
    (phase_time + particle.phase()).sin() * amplitude
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::ParticleGroup;

    fn resting(anchor: DVec2) -> Particle {
        Particle::new(anchor, 2.0, 10.0, 0.5, ParticleGroup::Primary)
    }

    #[test]
    fn particle_at_rest_on_anchor_stays_put() {
        let t = FieldTuning::default();
        let mut p = resting(DVec2::new(100.0, 100.0));
        for _ in 0..100 {
            integrate(&mut p, DVec2::ZERO, &t);
        }
        assert_eq!(p.position(), p.anchor());
        assert_eq!(p.velocity(), DVec2::ZERO);
    }

    #[test]
    fn one_step_matches_hand_computation() {
        let t = FieldTuning::default();
        let p = resting(DVec2::ZERO).with_position(DVec2::new(10.0, 0.0));
        let next = step(p, DVec2::new(1.0, 2.0), &t);
        // v = ((0 + 1 + (0 - 10) * 0.05), (0 + 2 + 0)) * 0.9 = (0.45, 1.8)
        assert!((next.velocity().x - 0.45).abs() < 1e-12);
        assert!((next.velocity().y - 1.8).abs() < 1e-12);
        assert!((next.position().x - 10.45).abs() < 1e-12);
        assert!((next.position().y - 1.8).abs() < 1e-12);
    }

    #[test]
    fn friction_damps_the_field_kick_of_the_same_tick() {
        let t = FieldTuning::default();
        let next = step(resting(DVec2::ZERO), DVec2::new(10.0, 0.0), &t);
        assert!((next.velocity().x - 9.0).abs() < 1e-12);
    }

    #[test]
    fn step_never_moves_the_anchor() {
        let t = FieldTuning::default();
        let mut p = resting(DVec2::new(7.0, 8.0));
        for i in 0..50 {
            integrate(&mut p, DVec2::new(i as f64, -(i as f64)), &t);
            assert_eq!(p.anchor(), DVec2::new(7.0, 8.0));
        }
    }

    #[test]
    fn displaced_particle_returns_to_anchor() {
        let t = FieldTuning::default();
        let anchor = DVec2::new(400.0, 300.0);
        let mut p = resting(anchor).with_position(anchor + DVec2::new(120.0, -80.0));
        let mut settled_at = None;
        for tick in 0..600 {
            integrate(&mut p, DVec2::ZERO, &t);
            if p.position().distance(anchor) < 1e-3 && p.velocity().length() < 1e-3 {
                settled_at = Some(tick);
                break;
            }
        }
        assert!(settled_at.is_some(), "particle did not settle: {:?}", p.position());
    }

    #[test]
    fn unforced_velocity_decays_at_friction_rate_without_spring() {
        let t = FieldTuning {
            k_spring: 0.0,
            ..FieldTuning::default()
        };
        let mut p = resting(DVec2::ZERO).with_velocity(DVec2::new(10.0, 0.0));
        for n in 1..=20 {
            integrate(&mut p, DVec2::ZERO, &t);
            let expected = 10.0 * t.friction.powi(n);
            assert!((p.velocity().x - expected).abs() < 1e-9, "tick {n}");
        }
    }

    #[test]
    fn oscillation_is_bounded_by_amplitude_and_phase_shifted() {
        let p = resting(DVec2::ZERO);
        for i in 0..100 {
            let off = oscillation_offset(&p, i as f64 * 0.1, 2.0);
            assert!(off.abs() <= 2.0 + 1e-12);
        }
        let at_zero = oscillation_offset(&p, 0.0, 2.0);
        assert!((at_zero - 0.5_f64.sin() * 2.0).abs() < 1e-12);
    }

    #[test]
    fn oscillation_does_not_touch_position() {
        let p = resting(DVec2::new(1.0, 1.0));
        let _ = oscillation_offset(&p, 3.0, 2.0);
        assert_eq!(p.position(), DVec2::new(1.0, 1.0));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn displacement_converges_within_bounded_ticks(
                dx in -500.0_f64..500.0,
                dy in -500.0_f64..500.0,
                ax in 0.0_f64..1000.0,
                ay in 0.0_f64..1000.0,
            ) {
                let t = FieldTuning::default();
                let anchor = DVec2::new(ax, ay);
                let mut p = resting(anchor).with_position(anchor + DVec2::new(dx, dy));
                for _ in 0..500 {
                    integrate(&mut p, DVec2::ZERO, &t);
                }
                prop_assert!(
                    p.position().distance(anchor) < 1e-3,
                    "still {} away after 500 ticks",
                    p.position().distance(anchor)
                );
            }

            #[test]
            fn bounded_forcing_keeps_velocity_bounded(
                fx in -10.0_f64..10.0,
                fy in -10.0_f64..10.0,
                ticks in 1_usize..400,
            ) {
                let t = FieldTuning::default();
                let mut p = resting(DVec2::ZERO);
                let forcing = DVec2::new(fx, fy);
                // Never faster than the spring-free terminal speed F * f / (1 - f).
                let bound = forcing.length() * t.friction / (1.0 - t.friction) + 1e-9;
                for _ in 0..ticks {
                    integrate(&mut p, forcing, &t);
                    prop_assert!(p.velocity().length() <= bound, "speed {} > {bound}", p.velocity().length());
                }
            }
        }
    }
}
