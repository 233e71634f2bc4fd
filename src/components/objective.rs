//! Win/lose bookkeeping markers.
//!
//! - [`Target`]: must all be destroyed for the player to win (bricks).
//! - [`PlayerHealth`]: while any exist the player is alive (balls in play).
//!
//! [`track_game_outcome`](crate::systems::gamestate::track_game_outcome) counts
//! them every tick.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Target;

#[derive(Component, Clone, Copy, Debug, Default)]
pub struct PlayerHealth;
