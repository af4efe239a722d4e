//! Last-known pointer position and engagement.

use liquid_lab_core::DVec2;

/// Pointer record read by the force field at the start of every tick.
///
/// Events overwrite it (last write wins); nothing is queued.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    position: DVec2,
    engaged: bool,
    influence_radius: f64,
}

impl PointerState {
    /// A disengaged pointer at the origin.
    pub fn new(influence_radius: f64) -> Self {
        Self {
            position: DVec2::ZERO,
            engaged: false,
            influence_radius,
        }
    }

    /// Records a move in simulation-space coordinates and engages the pointer.
    /// Scaling from screen space is the caller's job.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.position = DVec2::new(x, y);
        self.engaged = true;
    }

    /// The pointer left the surface. The last position is kept.
    pub fn pointer_leave(&mut self) {
        self.engaged = false;
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub fn engaged(&self) -> bool {
        self.engaged
    }

    pub fn influence_radius(&self) -> f64 {
        self.influence_radius
    }
}
