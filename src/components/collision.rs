//! Collision listener component.
//!
//! A [`CollisionListener`] attaches a reaction to an entity. The dispatcher
//! calls it whenever that entity takes part in a contact, on either side:
//! as the moving collider or as the obstacle that was hit. The callback
//! receives `(collider, collidable)` plus mutable access to the world, so it
//! can damage, despawn or spawn entities on the spot.
//!
//! Callbacks must capture entity ids only and look everything else up
//! through the world when they run. Entities may already be gone by then;
//! `World::get` returns `None` for them.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use bevy_ecs::prelude::{Component, Entity, World};

use crate::error::BoxError;
use crate::resources::simclock::Cooldown;

/// Reaction invoked with `(collider, collidable, world)`.
pub type CollisionCallback =
    Arc<dyn Fn(Entity, Entity, &mut World) -> Result<(), BoxError> + Send + Sync>;

#[derive(Component, Clone, Default)]
pub struct CollisionListener {
    /// `None` behaves like no listener at all.
    pub callback: Option<CollisionCallback>,
    pub cooldown: Cooldown,
}

impl CollisionListener {
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(Entity, Entity, &mut World) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        Self {
            callback: Some(Arc::new(callback)),
            cooldown: Cooldown::default(),
        }
    }

    /// Hand out the callback if present and off cooldown, starting a new
    /// cooldown window. Nothing is recorded when there is no callback.
    pub fn arm(&mut self, now: Duration, window: Duration) -> Option<CollisionCallback> {
        let callback = self.callback.as_ref()?;
        if self.cooldown.try_fire(now, window) {
            Some(Arc::clone(callback))
        } else {
            None
        }
    }
}

impl fmt::Debug for CollisionListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollisionListener")
            .field("callback", &self.callback.as_ref().map(|_| "<fn>"))
            .field("cooldown", &self.cooldown)
            .finish()
    }
}
