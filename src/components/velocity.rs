//! Linear velocity component.
//!
//! Velocities are expressed in world units per second; the movement system
//! scales them by the fixed tick rate, so travelled distance does not depend
//! on how many ticks per second the simulation runs.

use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Velocity along the x and y axes, in world units per second.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct LinearVelocity {
    pub x: f32,
    pub y: f32,
}

impl LinearVelocity {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn set(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    pub fn set_zero(&mut self) {
        self.set(0.0, 0.0);
    }

    pub fn reverse_x(&mut self) {
        self.x = -self.x;
    }

    pub fn reverse_y(&mut self) {
        self.y = -self.y;
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl From<Vec2> for LinearVelocity {
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}
