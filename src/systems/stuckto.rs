//! Systems for entities riding along with another entity.
//!
//! The starting ball sits on the paddle until the player launches it.
//!
//! # Related
//!
//! - [`StuckTo`](crate::components::stuckto::StuckTo) – the attachment component

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::position::Position;
use crate::components::stuckto::StuckTo;
use crate::components::velocity::LinearVelocity;
use crate::resources::input::InputState;

/// Updates positions of entities with `StuckTo` to follow their targets.
///
/// Only `current` is written, so the follower interpolates along with its
/// target. Followers whose target is gone stay where they are.
pub fn stuck_to_entity_system(
    mut followers: Query<(&StuckTo, &mut Position)>,
    targets: Query<&Position, Without<StuckTo>>,
) {
    for (stuck_to, mut follower_pos) in followers.iter_mut() {
        if let Ok(target_pos) = targets.get(stuck_to.target) {
            if stuck_to.follow_x {
                follower_pos.current.x = target_pos.current.x + stuck_to.offset.x;
            }
            if stuck_to.follow_y {
                follower_pos.current.y = target_pos.current.y + stuck_to.offset.y;
            }
        }
    }
}

/// On a launch press, detach every stuck entity and give it its launch velocity.
pub fn launch_stuck_entities(
    input: Res<InputState>,
    mut stuck: Query<(Entity, &StuckTo, &mut LinearVelocity)>,
    mut commands: Commands,
) {
    if !input.launch.just_pressed {
        return;
    }
    for (entity, stuck_to, mut velocity) in stuck.iter_mut() {
        *velocity = stuck_to.launch_velocity.into();
        commands.entity(entity).remove::<StuckTo>();
        debug!("{entity:?} launched with {:?}", stuck_to.launch_velocity);
    }
}
