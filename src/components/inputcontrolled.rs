//! Input-controlled horizontal movement.
//!
//! [`paddle_controller`](crate::systems::input::paddle_controller) reads the
//! per-tick [`InputState`](crate::resources::input::InputState) and drives the
//! x velocity of every entity carrying [`InputControlled`].

use bevy_ecs::prelude::Component;

/// Left/right movement intent derived from player input.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct InputControlled {
    /// Horizontal speed in world units per second while a direction is held.
    pub speed: f32,
}

impl InputControlled {
    pub fn new(speed: f32) -> Self {
        Self { speed }
    }
}
