//! Input-to-velocity controller for the paddle.
//!
//! Reads the per-tick [`InputState`](crate::resources::input::InputState)
//! and sets the horizontal velocity of entities with an
//! [`InputControlled`](crate::components::inputcontrolled::InputControlled)
//! component. The vertical velocity is left alone.
use bevy_ecs::prelude::*;

use crate::components::inputcontrolled::InputControlled;
use crate::components::velocity::LinearVelocity;
use crate::resources::input::InputState;

/// Set each controlled entity's `vx` to `speed` in the held direction.
pub fn input_simple_controller(
    mut query: Query<(&InputControlled, &mut LinearVelocity)>,
    input_state: Res<InputState>,
) {
    let axis = input_state.horizontal_axis();
    for (controlled, mut velocity) in query.iter_mut() {
        velocity.x = axis * controlled.speed;
    }
}
