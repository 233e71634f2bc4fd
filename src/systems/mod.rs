//! Simulation systems.
//!
//! Logic-rate systems run once per fixed tick in the order
//! [`Simulation::with_default_systems`](crate::simulation::Simulation::with_default_systems)
//! registers them; render-rate systems run once per frame.
//!
//! Submodules overview
//! - [`collision`] – debounced listener and impact sound dispatch for one contact
//! - [`despawn`] – remove entities that fell below the world
//! - [`gamestate`] – decide won/lost from the remaining targets and balls
//! - [`input`] – react to discrete actions (pause)
//! - [`inputsimplecontroller`] – translate input state into paddle velocity
//! - [`movement`] – multi-pass integration and AABB collision resolution
//! - [`render`] – interpolated draw list for the host renderer
//! - [`stuckto`] – ball riding on the paddle until launch

pub mod collision;
pub mod despawn;
pub mod gamestate;
pub mod input;
pub mod inputsimplecontroller;
pub mod movement;
pub mod render;
pub mod stuckto;
