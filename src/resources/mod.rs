//! ECS resources made available to systems.
//!
//! Long-lived, world-global data injected into the ECS world and read or
//! written by systems during a tick.
//!
//! Overview
//! - `drawlist` – interpolated draw commands produced once per frame
//! - `gamestate` – round outcome (playing / won / lost)
//! - `input` – per-tick input snapshot and the raw events feeding it
//! - `simclock` – monotonic clock and cooldowns for debouncing
//! - `simconfig` – tick rate, passes, grid cell size and other tunables
//! - `spatialgrid` – broad-phase hash grid of collidable entities
//! - `systemsstore` – registry of systems by name
//! - `worldtime` – tick counter, fixed delta and interpolation alpha
pub mod drawlist;
pub mod gamestate;
pub mod input;
pub mod simclock;
pub mod simconfig;
pub mod spatialgrid;
pub mod systemsstore;
pub mod worldtime;
