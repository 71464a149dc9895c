//! Particle Backdrop - animated proximity-graph background for a canvas
//!
//! Core modules:
//! - `sim`: Particle store, simulation step, viewport/pointer events
//! - `renderer`: Proximity graph renderer over a drawing `Surface`
//! - `driver`: Frame driver and the `Backdrop` component lifecycle
//! - `config`: Field constants and colors
//! - `web`: Browser binding (wasm32 only)

pub mod config;
pub mod driver;
pub mod error;
pub mod renderer;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::{FieldConfig, LineStyle, Rgba};
pub use driver::{Backdrop, DriverState, FrameDriver, FrameStats};
pub use error::BackdropError;
pub use renderer::{FrameReport, Surface, render_frame};
pub use sim::{FieldEvent, Particle, ParticleField, Viewport, seed, step};

/// Field constants used by the production component
pub mod consts {
    /// Particles per seeded population
    pub const PARTICLE_COUNT: usize = 100;
    /// Velocity scale; components are drawn from `(r - 0.5) * PARTICLE_SPEED`
    pub const PARTICLE_SPEED: f32 = 0.5;
    /// Particle radius range
    pub const PARTICLE_MIN_SIZE: f32 = 1.0;
    pub const PARTICLE_MAX_SIZE: f32 = 3.0;
    /// Particle-to-particle edge threshold (pixels, exclusive)
    pub const MAX_DISTANCE: f32 = 150.0;

    pub const PARTICLE_ALPHA: f32 = 0.6;
    pub const LINE_ALPHA: f32 = 0.1;
    pub const POINTER_LINE_ALPHA: f32 = 0.4;
    pub const LINE_WIDTH: f32 = 1.0;
    pub const POINTER_LINE_WIDTH: f32 = 1.4;
}
