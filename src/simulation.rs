//! The simulation aggregate.
//!
//! [`Simulation`] owns the ECS [`World`] (components and resources) and the
//! [`FixedTimestep`] scheduler. It is the single composition root: hosts
//! spawn entities through it, feed it input, call [`Simulation::frame`] or
//! [`Simulation::tick`] once per rendered frame and read the
//! [`DrawList`] back.
//!
//! # Default systems
//!
//! [`Simulation::with_default_systems`] registers, in this order:
//!
//! | name | rate | does |
//! |------|------|------|
//! | `controls` | logic | paddle velocity from input, ball launch, pause toggle |
//! | `movement_collision` | logic | grid rebuild, sub-stepped movement, contact resolution |
//! | `follow` | logic | stuck balls follow the paddle |
//! | `despawn_below_world` | logic | remove entities that fell out |
//! | `game_outcome` | logic | decide won/lost |
//! | `draw_list` | render | interpolated draw commands |

use std::time::Instant;

use bevy_ecs::component::Mutable;
use bevy_ecs::prelude::*;
use log::info;

use crate::components::collision::CollisionListener;
use crate::error::{BoxError, SimError, SimResult};
use crate::resources::drawlist::DrawList;
use crate::resources::gamestate::GameOutcome;
use crate::resources::input::{InputAction, InputState, PendingInput};
use crate::resources::simclock::SimClock;
use crate::resources::simconfig::SimConfig;
use crate::resources::spatialgrid::SpatialGrid;
use crate::resources::systemsstore::SystemsStore;
use crate::resources::worldtime::WorldTime;
use crate::scheduler::{FixedTimestep, SystemHandle, TickReport};
use crate::systems::despawn::despawn_below_world;
use crate::systems::gamestate::track_game_outcome;
use crate::systems::input::toggle_pause;
use crate::systems::inputsimplecontroller::input_simple_controller;
use crate::systems::movement::movement_collision;
use crate::systems::render::collect_draw_list;
use crate::systems::stuckto::{launch_stuck_entities, stuck_to_entity_system};

pub struct Simulation {
    world: World,
    scheduler: FixedTimestep,
}

impl Simulation {
    /// Build an empty simulation with no systems registered.
    pub fn new(config: SimConfig) -> SimResult<Self> {
        config.validate()?;
        let scheduler = FixedTimestep::new(config.tick_rate, config.cap_multiplier)?;

        let mut world = World::new();
        world.insert_resource(SpatialGrid::new(config.cell_size)?);
        world.insert_resource(WorldTime::with_delta(config.tick_rate));
        world.insert_resource(SimClock::monotonic());
        world.insert_resource(InputState::default());
        world.insert_resource(PendingInput::default());
        world.insert_resource(DrawList::default());
        world.insert_resource(GameOutcome::new());
        world.insert_resource(SystemsStore::new());
        info!(
            "Simulation ready: {:.4}s/tick, {} passes, cell size {}",
            config.tick_rate, config.passes, config.cell_size
        );
        world.insert_resource(config);

        Ok(Self { world, scheduler })
    }

    /// Build a simulation running the breakout systems.
    pub fn with_default_systems(config: SimConfig) -> SimResult<Self> {
        let mut sim = Self::new(config)?;

        let mut controls = Schedule::default();
        controls.add_systems((input_simple_controller, launch_stuck_entities, toggle_pause).chain());
        sim.register_logic_schedule("controls", controls);
        sim.register_logic_system("movement_collision", movement_collision);
        let mut follow = Schedule::default();
        follow.add_systems(stuck_to_entity_system);
        sim.register_logic_schedule("follow", follow);
        sim.register_logic_system("despawn_below_world", despawn_below_world);
        let mut outcome = Schedule::default();
        outcome.add_systems(track_game_outcome);
        sim.register_logic_schedule("game_outcome", outcome);
        sim.register_render_system("draw_list", collect_draw_list);

        Ok(sim)
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn config(&self) -> &SimConfig {
        self.world.resource::<SimConfig>()
    }

    /// Replace the debounce clock (tests use [`SimClock::manual`]).
    pub fn set_clock(&mut self, clock: SimClock) {
        self.world.insert_resource(clock);
    }

    pub fn clock_mut(&mut self) -> Mut<'_, SimClock> {
        self.world.resource_mut::<SimClock>()
    }

    // --- entities ---

    pub fn spawn<B: Bundle>(&mut self, bundle: B) -> Entity {
        self.world.spawn(bundle).id()
    }

    /// Destroy an entity. Returns `false` if it was already gone.
    pub fn destroy(&mut self, entity: Entity) -> bool {
        self.world.despawn(entity)
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.world.get_entity(entity).is_ok()
    }

    pub fn get<C: Component>(&self, entity: Entity) -> Option<&C> {
        self.world.get::<C>(entity)
    }

    pub fn get_mut<C: Component<Mutability = Mutable>>(&mut self, entity: Entity) -> Option<Mut<'_, C>> {
        self.world.get_mut::<C>(entity)
    }

    /// Add or replace components on a live entity. Returns `false` if it is gone.
    pub fn insert<B: Bundle>(&mut self, entity: Entity, bundle: B) -> bool {
        match self.world.get_entity_mut(entity) {
            Ok(mut e) => {
                e.insert(bundle);
                true
            }
            Err(_) => false,
        }
    }

    /// Attach (or replace) the collision reaction of `entity`.
    pub fn set_collision_listener<F>(&mut self, entity: Entity, callback: F) -> bool
    where
        F: Fn(Entity, Entity, &mut World) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.insert(entity, CollisionListener::new(callback))
    }

    pub fn resource<R: Resource>(&self) -> &R {
        self.world.resource::<R>()
    }

    // --- input ---

    pub fn press(&mut self, action: InputAction) {
        self.world.resource_mut::<PendingInput>().press(action);
    }

    pub fn release(&mut self, action: InputAction) {
        self.world.resource_mut::<PendingInput>().release(action);
    }

    // --- systems ---

    pub fn register_logic_system<F>(&mut self, name: &str, system: F) -> SystemHandle
    where
        F: FnMut(&mut World) -> SimResult<()> + 'static,
    {
        let handle = self.scheduler.add_logic(name, Box::new(system));
        self.world.resource_mut::<SystemsStore>().insert(name, handle);
        handle
    }

    pub fn register_render_system<F>(&mut self, name: &str, system: F) -> SystemHandle
    where
        F: FnMut(&mut World, f32) -> SimResult<()> + 'static,
    {
        let handle = self.scheduler.add_render(name, Box::new(system));
        self.world.resource_mut::<SystemsStore>().insert(name, handle);
        handle
    }

    /// Run a bevy schedule as one logic system. Its commands are applied
    /// when the schedule finishes.
    pub fn register_logic_schedule(&mut self, name: &str, mut schedule: Schedule) -> SystemHandle {
        self.register_logic_system(name, move |world: &mut World| {
            schedule.run(world);
            Ok(())
        })
    }

    pub fn set_enabled(&mut self, handle: SystemHandle, enabled: bool) -> SimResult<()> {
        self.scheduler.set_enabled(handle, enabled)
    }

    pub fn set_enabled_by_name(&mut self, name: &str, enabled: bool) -> SimResult<()> {
        let handle = self
            .world
            .resource::<SystemsStore>()
            .get(name)
            .ok_or_else(|| SimError::UnknownSystem(name.to_string()))?;
        self.scheduler.set_enabled(handle, enabled)
    }

    pub fn is_enabled(&self, handle: SystemHandle) -> Option<bool> {
        self.scheduler.is_enabled(handle)
    }

    pub fn system(&self, name: &str) -> Option<SystemHandle> {
        self.world.resource::<SystemsStore>().get(name)
    }

    // --- time ---

    /// Advance by `frame_delta` seconds of real time.
    pub fn tick(&mut self, frame_delta: f32) -> SimResult<TickReport> {
        self.scheduler.advance(&mut self.world, frame_delta)
    }

    /// Advance by the time elapsed since the previous call to `frame`.
    pub fn frame(&mut self, now: Instant) -> SimResult<TickReport> {
        let delta = self.scheduler.delta_since_last(now);
        self.tick(delta)
    }

    pub fn accumulator(&self) -> f32 {
        self.scheduler.accumulator()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::position::Position;
    use crate::components::velocity::LinearVelocity;

    #[test]
    fn rejects_invalid_config() {
        assert!(matches!(
            Simulation::new(SimConfig::default().with_tick_rate(0.0)),
            Err(SimError::InvalidTickRate(_))
        ));
        assert!(matches!(
            Simulation::new(SimConfig::default().with_cell_size(0.0)),
            Err(SimError::InvalidCellSize(_))
        ));
        assert!(matches!(
            Simulation::new(SimConfig::default().with_passes(0)),
            Err(SimError::InvalidPasses(0))
        ));
    }

    #[test]
    fn destroyed_ids_stay_dead() {
        let mut sim = Simulation::new(SimConfig::default()).unwrap();
        let e = sim.spawn(Position::new(0.0, 0.0));
        assert!(sim.destroy(e));
        assert!(!sim.destroy(e));
        assert!(!sim.is_alive(e));
        assert!(sim.get::<Position>(e).is_none());
        assert!(!sim.insert(e, LinearVelocity::zero()));
        // a recycled slot gets a new generation
        let f = sim.spawn(Position::new(1.0, 1.0));
        assert_ne!(e, f);
        assert!(!sim.is_alive(e));
    }

    #[test]
    fn default_systems_are_named() {
        let mut sim = Simulation::with_default_systems(SimConfig::default()).unwrap();
        for name in ["controls", "movement_collision", "follow", "despawn_below_world", "game_outcome", "draw_list"] {
            assert!(sim.system(name).is_some(), "{name}");
        }
        sim.set_enabled_by_name("movement_collision", false).unwrap();
        let h = sim.system("movement_collision").unwrap();
        assert_eq!(sim.is_enabled(h), Some(false));
        assert!(matches!(
            sim.set_enabled_by_name("nope", true),
            Err(SimError::UnknownSystem(_))
        ));
    }

    #[test]
    fn frame_uses_elapsed_time() {
        let mut sim = Simulation::with_default_systems(SimConfig::default()).unwrap();
        let t0 = Instant::now();
        assert_eq!(sim.frame(t0).unwrap().ticks, 0);
        let report = sim.frame(t0 + std::time::Duration::from_millis(60)).unwrap();
        assert_eq!(report.ticks, 3);
    }
}
