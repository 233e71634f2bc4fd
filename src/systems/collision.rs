//! Collision event dispatch.
//!
//! Called synchronously by the movement system for every classified contact.
//! One contact produces up to three side effects, each behind its own
//! cooldown:
//!
//! 1. the collidable's [`ImpactSound`], if the collider asks for impact sounds;
//! 2. the collider's own [`CollisionListener`];
//! 3. the collidable's [`CollisionListener`].
//!
//! Both listeners receive the same `(collider, collidable)` pair and fire
//! independently. A listener may despawn either entity; the next lookup then
//! simply finds nothing.

use std::time::Duration;

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::collision::CollisionListener;
use crate::components::impactsound::ImpactSound;
use crate::error::{SimError, SimResult};
use crate::resources::simclock::SimClock;
use crate::resources::simconfig::SimConfig;

/// Fire the sound and both listeners for one contact.
pub fn dispatch_collision(
    world: &mut World,
    collider: Entity,
    collidable: Entity,
    play_sound: bool,
) -> SimResult<()> {
    let now = world
        .get_resource::<SimClock>()
        .map(SimClock::now)
        .unwrap_or_default();
    let window = world
        .get_resource::<SimConfig>()
        .map(SimConfig::debounce)
        .unwrap_or_else(|| SimConfig::default().debounce());

    if play_sound && let Some(mut sound) = world.get_mut::<ImpactSound>(collidable) {
        sound.try_play(now, window);
    }

    notify(world, collider, collider, collidable, now, window)?;
    notify(world, collidable, collider, collidable, now, window)
}

fn notify(
    world: &mut World,
    owner: Entity,
    collider: Entity,
    collidable: Entity,
    now: Duration,
    window: Duration,
) -> SimResult<()> {
    let Some(callback) = world
        .get_mut::<CollisionListener>(owner)
        .and_then(|mut listener| listener.arm(now, window))
    else {
        return Ok(());
    };
    debug!("collision listener on {owner:?}: {collider:?} hit {collidable:?}");
    callback(collider, collidable, world).map_err(|source| SimError::Listener { owner, source })
}
