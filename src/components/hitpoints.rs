//! Hit points for destructible entities.
//!
//! Negative values mark an invulnerable entity: [`Hitpoints::hit`] leaves it
//! untouched. Whoever reduces the value to zero is responsible for
//! despawning the entity (the brick listener does it immediately).

use std::time::Duration;

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hitpoints {
    pub value: i32,
    /// Hit points the entity started with.
    pub max: i32,
    pub last_hit: Option<Duration>,
}

impl Hitpoints {
    pub fn new(value: i32) -> Self {
        Self {
            value,
            max: value,
            last_hit: None,
        }
    }

    pub fn invulnerable() -> Self {
        Self::new(-1)
    }

    pub fn is_invulnerable(&self) -> bool {
        self.value < 0
    }

    pub fn is_depleted(&self) -> bool {
        self.value == 0
    }

    /// Remove one hit point. Returns `true` when this hit depleted the entity.
    pub fn hit(&mut self, now: Duration) -> bool {
        if self.value <= 0 {
            return false;
        }
        self.value -= 1;
        self.last_hit = Some(now);
        self.value == 0
    }

    /// Remaining hit points as a fraction of the starting value, in `[0, 1]`.
    pub fn fraction(&self) -> f32 {
        if self.max <= 0 {
            return 1.0;
        }
        (self.value.max(0) as f32 / self.max as f32).min(1.0)
    }
}
