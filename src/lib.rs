//! ricochet library.
//!
//! Fixed-timestep 2D AABB collision core for a breakout-style game, built on
//! `bevy_ecs`. Exposes the components, resources, systems and the
//! [`Simulation`](simulation::Simulation) aggregate for hosts and
//! integration tests.

pub mod components;
pub mod error;
pub mod prefabs;
pub mod resources;
pub mod scheduler;
pub mod simulation;
pub mod systems;

pub use bevy_ecs::entity::Entity;
