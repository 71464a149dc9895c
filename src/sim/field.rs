//! Particle field state
//!
//! Everything the simulation needs between frames: the population, the
//! viewport it lives in, the pointer and the RNG used for reseeding.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::event::FieldEvent;
use super::particle::{Particle, Viewport, seed, step};
use crate::config::FieldConfig;

/// Particle population plus its inputs
#[derive(Debug, Clone)]
pub struct ParticleField {
    config: FieldConfig,
    viewport: Viewport,
    particles: Vec<Particle>,
    /// Pointer position, `None` while outside the surface
    pointer: Option<Vec2>,
    rng: Pcg32,
}

impl ParticleField {
    /// Create an empty field; call `reseed` to populate it
    pub fn new(viewport: Viewport, config: FieldConfig, rng_seed: u64) -> Self {
        Self {
            config,
            viewport,
            particles: Vec::new(),
            pointer: None,
            rng: Pcg32::seed_from_u64(rng_seed),
        }
    }

    /// Create a field with an explicit population (no reseed)
    pub fn with_particles(viewport: Viewport, config: FieldConfig, particles: Vec<Particle>) -> Self {
        let mut field = Self::new(viewport, config, 0);
        field.particles = particles;
        field
    }

    /// Replace the whole population with `config.count` fresh particles
    pub fn reseed(&mut self) {
        self.particles = seed(self.viewport, self.config.count, &self.config, &mut self.rng);
        log::debug!(
            "Seeded {} particles for {}x{}",
            self.particles.len(),
            self.viewport.width,
            self.viewport.height
        );
    }

    /// Track a new viewport size. Existing particles are discarded, not rescaled.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.reseed();
    }

    pub fn set_pointer(&mut self, pos: Vec2) {
        self.pointer = Some(pos);
    }

    pub fn clear_pointer(&mut self) {
        self.pointer = None;
    }

    /// Apply one host event
    pub fn apply(&mut self, event: FieldEvent) {
        match event {
            FieldEvent::Resize(viewport) => self.resize(viewport),
            FieldEvent::PointerMove(pos) => self.set_pointer(pos),
            FieldEvent::PointerLeave => self.clear_pointer(),
        }
    }

    /// Step every particle by one frame
    pub fn advance(&mut self) {
        let viewport = self.viewport;
        for particle in &mut self.particles {
            step(particle, viewport);
        }
    }

    /// Drop the population and pointer
    pub fn clear(&mut self) {
        self.particles.clear();
        self.pointer = None;
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }
}
