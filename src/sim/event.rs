//! Viewport and pointer events
//!
//! Host callbacks never touch the field directly. They push events here and
//! the frame driver applies them, in arrival order, at the start of the next
//! tick so a frame always renders fully-advanced state.

use std::collections::VecDeque;

use glam::Vec2;

use super::particle::Viewport;

/// Input from the host environment
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldEvent {
    /// Drawing surface resized; the population is reseeded
    Resize(Viewport),
    /// Pointer moved (viewport coordinates)
    PointerMove(Vec2),
    /// Pointer left the tracked surface
    PointerLeave,
}

/// Single-threaded FIFO of pending events
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<FieldEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: FieldEvent) {
        self.events.push_back(event);
    }

    /// Take all pending events, oldest first
    pub fn drain(&mut self) -> impl Iterator<Item = FieldEvent> + '_ {
        self.events.drain(..)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
