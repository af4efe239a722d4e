#![deny(unsafe_code)]
//! CPU render surface for headless runs.
//!
//! [`Raster`] keeps a persistent pixel buffer in simulation space. Each
//! presented frame first composites the trail fade over what is already
//! there, then paints every draw command as a filled disc, so moving
//! particles leave fading trails exactly as the canvas surface does.

pub mod pixel;

#[cfg(feature = "png")]
pub mod snapshot;

use liquid_lab_core::error::LabError;
use liquid_lab_core::{DVec2, DrawCommand, RenderSurface, Srgb, TrailFade};
use log::trace;

/// A width x height buffer of colours in row-major order.
#[derive(Debug, Clone)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<Srgb>,
    fade: TrailFade,
    frames: u64,
}

impl Raster {
    /// A raster cleared to the default trail colour.
    ///
    /// Returns `LabError::InvalidDimensions` if either side is zero.
    pub fn new(width: usize, height: usize) -> Result<Self, LabError> {
        Self::with_fade(width, height, TrailFade::default())
    }

    pub fn with_fade(width: usize, height: usize, fade: TrailFade) -> Result<Self, LabError> {
        if width == 0 || height == 0 {
            return Err(LabError::InvalidDimensions);
        }
        let len = width
            .checked_mul(height)
            .ok_or(LabError::InvalidDimensions)?;
        Ok(Self {
            width,
            height,
            pixels: vec![fade.color; len],
            fade,
            frames: 0,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[Srgb] {
        &self.pixels
    }

    /// Colour at `(x, y)`, or `None` outside the raster.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Srgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y * self.width + x).copied()
    }

    pub fn fade(&self) -> TrailFade {
        self.fade
    }

    /// Number of frames accepted so far.
    pub fn frames_presented(&self) -> u64 {
        self.frames
    }

    /// Resets every pixel to the trail colour.
    pub fn clear(&mut self) {
        self.pixels.fill(self.fade.color);
    }

    fn apply_fade(&mut self) {
        let TrailFade { color, alpha } = self.fade;
        for px in &mut self.pixels {
            *px = px.blend(color, alpha);
        }
    }

    /// Paints every pixel whose centre lies inside the disc. Parts outside
    /// the raster are clipped.
    fn fill_disc(&mut self, center: DVec2, radius: f64, color: Srgb) {
        let x0 = (center.x - radius).floor().max(0.0);
        let y0 = (center.y - radius).floor().max(0.0);
        let x1 = (center.x + radius).ceil().min(self.width as f64);
        let y1 = (center.y + radius).ceil().min(self.height as f64);
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        let r2 = radius * radius;
        for y in y0 as usize..y1 as usize {
            let dy = y as f64 + 0.5 - center.y;
            let row = y * self.width;
            for x in x0 as usize..x1 as usize {
                let dx = x as f64 + 0.5 - center.x;
                if dx * dx + dy * dy <= r2 {
                    self.pixels[row + x] = color;
                }
            }
        }
    }
}

impl RenderSurface for Raster {
    /// Rejects the whole frame, leaving the buffer untouched, if any command
    /// has a non-finite centre or radius.
    fn present(&mut self, frame: &[DrawCommand]) -> Result<(), LabError> {
        if let Some(bad) = frame
            .iter()
            .find(|c| !c.center.is_finite() || !c.radius.is_finite() || c.radius < 0.0)
        {
            return Err(LabError::Surface(format!(
                "degenerate draw command at {:?} radius {}",
                bad.center, bad.radius
            )));
        }
        self.apply_fade();
        for cmd in frame {
            self.fill_disc(cmd.center, cmd.radius, cmd.color);
        }
        self.frames += 1;
        trace!("raster frame {} with {} discs", self.frames, frame.len());
        Ok(())
    }
}
