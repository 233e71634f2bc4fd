//! Component for riding along with another entity.
//!
//! The starting ball sits on the paddle: while it carries [`StuckTo`], the
//! [`stuck_to_entity_system`](crate::systems::stuckto::stuck_to_entity_system)
//! re-centres it on its target every tick. When the launch action is pressed
//! the component is removed and `launch_velocity` is applied.

use bevy_ecs::prelude::{Component, Entity};
use glam::Vec2;

#[derive(Debug, Clone, Component)]
pub struct StuckTo {
    /// The entity to follow.
    pub target: Entity,
    /// Offset from the target's position.
    pub offset: Vec2,
    /// If true, follow the target on the X axis.
    pub follow_x: bool,
    /// If true, follow the target on the Y axis.
    pub follow_y: bool,
    /// Velocity given to the entity when it is released.
    pub launch_velocity: Vec2,
}

impl StuckTo {
    /// Follow both axes.
    pub fn new(target: Entity) -> Self {
        Self {
            target,
            offset: Vec2::ZERO,
            follow_x: true,
            follow_y: true,
            launch_velocity: Vec2::ZERO,
        }
    }

    /// Follow the X axis only.
    pub fn follow_x_only(target: Entity) -> Self {
        Self {
            follow_y: false,
            ..Self::new(target)
        }
    }

    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_launch_velocity(mut self, velocity: Vec2) -> Self {
        self.launch_velocity = velocity;
        self
    }
}
