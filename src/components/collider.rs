//! Collision roles.
//!
//! A [`Collider`] is a moving probe: after every movement pass it is tested
//! against the [`Collidable`] population and pushed back out of anything it
//! entered. A [`Collidable`] is an obstacle registered in the spatial grid.
//! One entity may carry both (the paddle is pushed by walls and bounces
//! balls).

use bevy_ecs::prelude::Component;

use crate::components::size::Aabb;

/// Probe side of a collision.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Collider {
    /// Move through obstacles; listeners and sounds still fire.
    pub ghosted: bool,
    /// Reverse the hit axis velocity instead of zeroing it.
    pub bounce: bool,
    /// Trigger the obstacle's [`ImpactSound`](super::impactsound::ImpactSound) on contact.
    pub play_impact_sound: bool,
}

impl Collider {
    /// A solid collider that stops on contact.
    pub fn solid() -> Self {
        Self::default()
    }

    /// A solid collider that bounces and plays impact sounds (a ball).
    pub fn bouncy() -> Self {
        Self {
            ghosted: false,
            bounce: true,
            play_impact_sound: true,
        }
    }

    /// A collider that only reports contacts.
    pub fn ghost() -> Self {
        Self {
            ghosted: true,
            ..Self::default()
        }
    }

    pub fn with_bounce(mut self, bounce: bool) -> Self {
        self.bounce = bounce;
        self
    }

    pub fn with_impact_sound(mut self, play: bool) -> Self {
        self.play_impact_sound = play;
        self
    }
}

/// Obstacle side of a collision. Occupies cells of the spatial grid.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Collidable;

/// Face of the obstacle that a collider ran into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContactSide {
    /// Moving right, hit the obstacle's left face.
    Left,
    /// Moving left, hit the obstacle's right face.
    Right,
    /// Moving up, hit the obstacle's bottom face.
    Bottom,
    /// Moving down, landed on the obstacle's top face.
    Top,
}

impl ContactSide {
    /// Classify a contact from the collider's box *before* the movement step.
    ///
    /// Branches are tested left, right, bottom, top; the first match wins so
    /// corner hits resolve on a single axis. Returns `None` when the collider
    /// already overlapped the obstacle before the step.
    pub fn classify(before: &Aabb, obstacle: &Aabb) -> Option<Self> {
        if before.right <= obstacle.left {
            Some(Self::Left)
        } else if before.left >= obstacle.right {
            Some(Self::Right)
        } else if before.top <= obstacle.bottom {
            Some(Self::Bottom)
        } else if before.bottom >= obstacle.top {
            Some(Self::Top)
        } else {
            None
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}
