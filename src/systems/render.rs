//! Render-rate system producing the frame's draw list.
//!
//! Positions are blended between the last two ticks with the scheduler's
//! alpha, so a 144 Hz display shows smooth motion from a 60 Hz simulation.
//! Entities without a texture are skipped. Commands are ordered by
//! [`ZIndex`], lowest first; ties keep world iteration order.

use bevy_ecs::prelude::*;

use crate::components::position::Position;
use crate::components::size::Size;
use crate::components::sprite::Sprite;
use crate::components::zindex::ZIndex;
use crate::error::SimResult;
use crate::resources::drawlist::{DrawCommand, DrawList};

pub fn collect_draw_list(world: &mut World, alpha: f32) -> SimResult<()> {
    let mut commands: Vec<DrawCommand> = world
        .query::<(Entity, &Position, &Size, &Sprite, Option<&ZIndex>)>()
        .iter(world)
        .filter_map(|(entity, position, size, sprite, z)| {
            let texture = sprite.texture.clone()?;
            let at = position.interpolated(alpha);
            Some(DrawCommand {
                entity,
                texture,
                x: at.x,
                y: at.y,
                width: size.width,
                height: size.height,
                z: z.map_or(0, |z| z.0),
            })
        })
        .collect();
    commands.sort_by_key(|c| c.z);

    if let Some(mut list) = world.get_resource_mut::<DrawList>() {
        list.commands = commands;
        list.alpha = alpha;
    }
    Ok(())
}
