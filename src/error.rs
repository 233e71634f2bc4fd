//! Error types for the simulation core.
//!
//! Configuration problems are fatal and reported when a [`Simulation`] is
//! built. Errors raised by user callbacks or systems are never swallowed:
//! they travel out of [`Simulation::tick`] unchanged, leaving the world in
//! whatever state the interrupted tick produced.
//!
//! [`Simulation`]: crate::simulation::Simulation
//! [`Simulation::tick`]: crate::simulation::Simulation::tick

use bevy_ecs::prelude::Entity;
use thiserror::Error;

/// Boxed error returned by user callbacks (collision listeners, despawn hooks).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result alias used across the crate.
pub type SimResult<T> = Result<T, SimError>;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid tick rate {0}: seconds per tick must be finite and > 0")]
    InvalidTickRate(f32),

    #[error("invalid cell size {0}: grid cells must be finite and > 0")]
    InvalidCellSize(f32),

    #[error("invalid pass count {0}: at least one movement pass is required")]
    InvalidPasses(u32),

    #[error("invalid cap multiplier {0}: must be finite and > 0")]
    InvalidCapMultiplier(f32),

    #[error("invalid debounce window {0}: must be finite and >= 0")]
    InvalidDebounceWindow(f32),

    #[error("failed to load config file: {0}")]
    ConfigLoad(String),

    #[error("failed to save config file: {0}")]
    ConfigSave(String),

    #[error("unknown system `{0}`")]
    UnknownSystem(String),

    #[error("collision listener on {owner:?} failed")]
    Listener {
        owner: Entity,
        #[source]
        source: BoxError,
    },

    #[error("despawn hook on {entity:?} failed")]
    DespawnHook {
        entity: Entity,
        #[source]
        source: BoxError,
    },

    #[error("system `{name}` failed")]
    System {
        name: String,
        #[source]
        source: BoxError,
    },
}
