//! Particle record, seeding and the per-frame step

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::FieldConfig;

/// Drawing surface size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether `p` lies within `[0, width] x [0, height]`
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }
}

/// A simulated point, drawn as a circle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Position (pixels)
    pub pos: Vec2,
    /// Velocity (pixels per frame)
    pub vel: Vec2,
    /// Radius, fixed for the particle's lifetime
    pub size: f32,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, size: f32) -> Self {
        Self { pos, vel, size }
    }
}

/// Create a fresh population of `count` particles spread over the viewport
pub fn seed<R: Rng + ?Sized>(
    viewport: Viewport,
    count: usize,
    config: &FieldConfig,
    rng: &mut R,
) -> Vec<Particle> {
    let size_span = config.max_size - config.min_size;
    (0..count)
        .map(|_| {
            let x = rng.random::<f32>() * viewport.width;
            let y = rng.random::<f32>() * viewport.height;
            let size = rng.random::<f32>() * size_span + config.min_size;
            let vx = (rng.random::<f32>() - 0.5) * config.speed;
            let vy = (rng.random::<f32>() - 0.5) * config.speed;
            Particle::new(Vec2::new(x, y), Vec2::new(vx, vy), size)
        })
        .collect()
}

/// Advance one particle by one frame, reflecting off the viewport edges.
///
/// The bounds check runs on the already-moved position, so a particle may
/// sit up to one frame's velocity outside the viewport before it turns back.
#[inline]
pub fn step(particle: &mut Particle, viewport: Viewport) {
    particle.pos += particle.vel;
    if particle.pos.x < 0.0 || particle.pos.x > viewport.width {
        particle.vel.x = -particle.vel.x;
    }
    if particle.pos.y < 0.0 || particle.pos.y > viewport.height {
        particle.vel.y = -particle.vel.y;
    }
}
