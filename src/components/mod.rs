//! ECS components for simulated entities.
//!
//! Components are plain data attached to entities in the `bevy_ecs` world;
//! all behavior lives in [`systems`](crate::systems).
//!
//! Submodules overview:
//! - [`collider`] – collision roles ([`Collider`](collider::Collider), [`Collidable`](collider::Collidable)) and contact classification
//! - [`collision`] – per-entity collision listener callbacks
//! - [`despawnable`] – removal below the world with an optional hook
//! - [`hitpoints`] – damage counter for destructible entities
//! - [`impactsound`] – debounced sound played when hit
//! - [`inputcontrolled`] – input-driven horizontal movement
//! - [`objective`] – win/lose markers
//! - [`position`] – current and previous-tick position
//! - [`size`] – extents and AABB helpers
//! - [`sprite`] – opaque texture reference for drawing
//! - [`stuckto`] – follow another entity until launched
//! - [`velocity`] – linear velocity in units per second
//! - [`zindex`] – draw order hint

pub mod collider;
pub mod collision;
pub mod despawnable;
pub mod hitpoints;
pub mod impactsound;
pub mod inputcontrolled;
pub mod objective;
pub mod position;
pub mod size;
pub mod sprite;
pub mod stuckto;
pub mod velocity;
pub mod zindex;
