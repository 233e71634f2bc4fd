//! Frame output for the renderer.
//!
//! The render-rate system
//! [`collect_draw_list`](crate::systems::render::collect_draw_list) refills
//! [`DrawList`] once per frame with interpolated, z-sorted sprites. The host
//! turns each command into an actual draw call.

use bevy_ecs::prelude::{Entity, Resource};

use crate::components::sprite::TextureHandle;

#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub entity: Entity,
    pub texture: TextureHandle,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub z: i32,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
    /// Alpha the commands were interpolated with.
    pub alpha: f32,
}

impl DrawList {
    pub fn get(&self, entity: Entity) -> Option<&DrawCommand> {
        self.commands.iter().find(|c| c.entity == entity)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
