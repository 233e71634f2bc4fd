//! Removal of entities that left the world through the bottom.
//!
//! A ball that misses the paddle keeps falling forever unless something
//! removes it. [`despawn_below_world`] destroys every
//! [`Despawnable`] entity whose top edge went below `y = 0`, running its
//! `on_despawn` hook first. The hook sees the entity still alive.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::despawnable::{DespawnHook, Despawnable};
use crate::components::position::Position;
use crate::components::size::Size;
use crate::error::{SimError, SimResult};

/// Logic-rate system: destroy despawnables below the world.
pub fn despawn_below_world(world: &mut World) -> SimResult<()> {
    let doomed: Vec<(Entity, Option<DespawnHook>)> = world
        .query::<(Entity, &Position, Option<&Size>, &Despawnable)>()
        .iter(world)
        .filter(|(_, position, size, _)| {
            position.current.y < -size.map_or(0.0, |s| s.height)
        })
        .map(|(entity, _, _, despawnable)| (entity, despawnable.on_despawn.clone()))
        .collect();

    for (entity, hook) in doomed {
        // an earlier hook may have removed it already
        if world.get_entity(entity).is_err() {
            continue;
        }
        if let Some(hook) = hook {
            hook(entity, world).map_err(|source| SimError::DespawnHook { entity, source })?;
        }
        world.despawn(entity);
        debug!("{entity:?} fell out of the world");
    }
    Ok(())
}
