//! Sound played when a collider hits this entity.
//!
//! The core never decodes or mixes audio. A [`SoundHandle`] is an opaque,
//! cheaply clonable reference to something that knows how to play itself;
//! the audio collaborator provides the [`SoundTrigger`] implementation.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use bevy_ecs::prelude::Component;

use crate::resources::simclock::Cooldown;

/// Implemented by the audio backend.
pub trait SoundTrigger: Send + Sync {
    fn trigger(&self);
}

/// Opaque shared sound reference.
#[derive(Clone)]
pub struct SoundHandle(Arc<dyn SoundTrigger>);

impl SoundHandle {
    pub fn new(sound: impl SoundTrigger + 'static) -> Self {
        Self(Arc::new(sound))
    }

    pub fn trigger(&self) {
        self.0.trigger();
    }
}

impl fmt::Debug for SoundHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SoundHandle(..)")
    }
}

/// Impact sound on the obstacle side of a collision, debounced per instance.
#[derive(Component, Clone, Debug, Default)]
pub struct ImpactSound {
    /// Missing sound is a silent no-op.
    pub sound: Option<SoundHandle>,
    pub cooldown: Cooldown,
}

impl ImpactSound {
    pub fn new(sound: SoundHandle) -> Self {
        Self {
            sound: Some(sound),
            cooldown: Cooldown::default(),
        }
    }

    /// Trigger the sound unless it played within `window`. Returns whether it played.
    pub fn try_play(&mut self, now: Duration, window: Duration) -> bool {
        let Some(sound) = &self.sound else {
            return false;
        };
        if self.cooldown.try_fire(now, window) {
            sound.trigger();
            true
        } else {
            false
        }
    }
}
