//! Force field resolver: pointer influence on one particle for one tick.

use crate::config::{FieldMode, FieldTuning};
use crate::particle::Particle;
use crate::pointer::PointerState;
use liquid_lab_core::DVec2;

/// Distances at or below this are treated as coincident.
const MIN_DISTANCE: f64 = 1e-9;

/// Linear falloff: 1 at the pointer, 0 at `influence_radius`, clamped to [0, 1].
pub fn falloff(distance: f64, influence_radius: f64) -> f64 {
    if influence_radius <= 0.0 {
        return 0.0;
    }
    ((influence_radius - distance) / influence_radius).clamp(0.0, 1.0)
}

/// Velocity delta the pointer field applies to `particle` this tick.
///
/// Measured from the particle's live position, not its anchor. Zero when the
/// pointer is disengaged, when the particle is at or beyond the influence
/// radius, or when it sits exactly on the pointer (no defined direction).
/// Attract pulls along the particle-to-pointer direction scaled by
/// `k_attract`; repel pushes the opposite way scaled by `k_repel`.
pub fn resolve(
    particle: &Particle,
    pointer: &PointerState,
    mode: FieldMode,
    tuning: &FieldTuning,
) -> DVec2 {
    if !pointer.engaged() {
        return DVec2::ZERO;
    }
    let offset = pointer.position() - particle.position();
    let distance = offset.length();
    if distance >= pointer.influence_radius() || distance <= MIN_DISTANCE {
        return DVec2::ZERO;
    }

    let direction = offset / distance;
    let magnitude = falloff(distance, pointer.influence_radius())
        * particle.responsiveness()
        * tuning.gain(mode);
    match mode {
        FieldMode::Attract => direction * magnitude,
        FieldMode::Repel => -direction * magnitude,
    }
}
