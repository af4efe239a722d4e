//! The seam between a simulation and whatever displays it.
//!
//! Once per tick the simulation builds one [`DrawCommand`] per particle and
//! hands the whole frame to a [`RenderSurface`]. Surfaces own every visual
//! effect (trail fade, compositing); nothing they do feeds back into the
//! simulation state.

use crate::color::Srgb;
use crate::error::LabError;
use glam::DVec2;

/// A filled disc to draw this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    /// Disc centre in simulation space, oscillation offset already applied.
    pub center: DVec2,
    pub radius: f64,
    pub color: Srgb,
}

/// Translucent fill painted over the previous frame before drawing a new one,
/// leaving fading motion trails behind moving particles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailFade {
    pub color: Srgb,
    /// Coverage in [0, 1]; 1 clears the frame completely.
    pub alpha: f64,
}

impl Default for TrailFade {
    fn default() -> Self {
        Self {
            // #020617
            color: Srgb {
                r: 2.0 / 255.0,
                g: 6.0 / 255.0,
                b: 23.0 / 255.0,
            },
            alpha: 0.15,
        }
    }
}

/// Consumer of per-frame draw commands.
///
/// Object-safe, so a session can hold a `Box<dyn RenderSurface>`.
pub trait RenderSurface {
    /// Presents one frame. An `Err` drops this frame only; callers keep
    /// ticking.
    fn present(&mut self, frame: &[DrawCommand]) -> Result<(), LabError>;
}

impl<S: RenderSurface + ?Sized> RenderSurface for Box<S> {
    fn present(&mut self, frame: &[DrawCommand]) -> Result<(), LabError> {
        (**self).present(frame)
    }
}

/// Surface that accepts and discards every frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSurface;

impl RenderSurface for NullSurface {
    fn present(&mut self, _frame: &[DrawCommand]) -> Result<(), LabError> {
        Ok(())
    }
}
