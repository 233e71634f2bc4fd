//! Entities removed once they fall below the bottom of the world.
//!
//! See [`despawn_below_world`](crate::systems::despawn::despawn_below_world).

use std::fmt;
use std::sync::Arc;

use bevy_ecs::prelude::{Component, Entity, World};

use crate::error::BoxError;

/// Hook run once right before the entity is destroyed.
pub type DespawnHook = Arc<dyn Fn(Entity, &mut World) -> Result<(), BoxError> + Send + Sync>;

#[derive(Component, Clone, Default)]
pub struct Despawnable {
    pub on_despawn: Option<DespawnHook>,
}

impl Despawnable {
    pub fn with_hook<F>(hook: F) -> Self
    where
        F: Fn(Entity, &mut World) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        Self {
            on_despawn: Some(Arc::new(hook)),
        }
    }
}

impl fmt::Debug for Despawnable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Despawnable")
            .field("on_despawn", &self.on_despawn.as_ref().map(|_| "<fn>"))
            .finish()
    }
}
