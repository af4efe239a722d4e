#![deny(unsafe_code)]
//! Core types shared by the liquid-lab particle simulation.
//!
//! Provides the `LabError` type, the `Xorshift64` PRNG used for every
//! per-particle random draw, JSON parameter helpers, the `Srgb` colour type,
//! and the `RenderSurface` seam through which a simulation hands its
//! per-frame draw commands to whatever is displaying them.

pub mod color;
pub mod error;
pub mod params;
pub mod prng;
pub mod surface;

pub use color::Srgb;
pub use error::LabError;
pub use glam::DVec2;
pub use prng::Xorshift64;
pub use surface::{DrawCommand, NullSurface, RenderSurface, TrailFade};
