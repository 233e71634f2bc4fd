//! World-space position with a one-tick history for render interpolation.
//!
//! The movement system copies `current` into `previous` exactly once at the
//! start of every logic tick, before integrating. Render-rate systems blend
//! between the two with the scheduler's alpha so motion stays smooth when
//! the frame rate is higher than the tick rate.

use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Bottom-left corner of an entity, in world units (y grows upwards).
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Position {
    /// Position at the end of the latest logic tick.
    pub current: Vec2,
    /// Position at the start of the latest logic tick.
    pub previous: Vec2,
}

impl Position {
    /// Create a position with no motion history (`previous == current`).
    pub fn new(x: f32, y: f32) -> Self {
        let p = Vec2::new(x, y);
        Self {
            current: p,
            previous: p,
        }
    }

    /// Record the current position as the start-of-tick position.
    pub fn snapshot(&mut self) {
        self.previous = self.current;
    }

    /// Move to `p` without leaving an interpolation trail.
    pub fn teleport(&mut self, p: Vec2) {
        self.current = p;
        self.previous = p;
    }

    /// Blend between the previous and current tick positions.
    pub fn interpolated(&self, alpha: f32) -> Vec2 {
        self.previous + (self.current - self.previous) * alpha
    }
}
