//! Particle simulation
//!
//! Pure and platform independent:
//! - Seeded RNG only
//! - Stable iteration order (population order)
//! - No rendering or browser dependencies

pub mod event;
pub mod field;
pub mod particle;

pub use event::{EventQueue, FieldEvent};
pub use field::ParticleField;
pub use particle::{Particle, Viewport, seed, step};
