#![deny(unsafe_code)]
//! Pointer-driven particle force-field simulation.
//!
//! Particles rest on fixed anchors. Each tick the pointer's field pushes
//! (repel) or pulls (attract) the ones within its influence radius, a spring
//! draws every particle back toward its anchor, and friction damps the
//! result. A cosmetic vertical float is added to the drawn positions only.
//!
//! The [`Session`] owns the loop lifecycle and runs against any
//! [`FrameHost`] (see [`FrameQueue`] for the in-process one) and any
//! [`RenderSurface`](liquid_lab_core::RenderSurface).

pub mod config;
pub mod host;
pub mod integrator;
pub mod particle;
pub mod pointer;
pub mod resolver;
pub mod scheduler;
pub mod seed;

pub use config::{FieldMode, FieldTuning, ParticleStyle, SimulationConfig, SurfaceSize};
pub use host::{drive, drive_with, DriveReport, FrameQueue};
pub use particle::{Particle, ParticleGroup, ParticleStore};
pub use pointer::PointerState;
pub use scheduler::{FrameHost, FrameOutcome, FrameToken, LoopState, Session, SessionStats};
pub use seed::Seed;
