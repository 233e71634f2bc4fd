//! Multi-pass movement and AABB collision resolution.
//!
//! Once per tick [`movement_collision`]:
//!
//! 1. snapshots `Position::previous` for render interpolation;
//! 2. rebuilds the [`SpatialGrid`] from every `Position + Size + Collidable`;
//! 3. moves each `Position + LinearVelocity` entity in `passes` equal
//!    sub-steps, so a fast ball cannot skip over a thin brick between ticks;
//! 4. after each sub-step, tests entities that also carry a [`Collider`] and
//!    a [`Size`] against the obstacles sharing a grid cell with them.
//!
//! Contacts are resolved on one axis. The face that was hit is decided from
//! the collider's box *before* the sub-step (see [`ContactSide::classify`]);
//! a non-ghosted collider is snapped flush against that face and the velocity
//! on that axis is reversed (bounce) or zeroed. Every contact is reported to
//! [`dispatch_collision`], ghosted or not.
//!
//! Listeners run in the middle of this loop and may despawn anything. Mover
//! and candidate ids are snapshots; each one is looked up again before use
//! and silently skipped once gone.

use bevy_ecs::prelude::*;
use log::trace;

use crate::components::collider::{Collidable, Collider, ContactSide};
use crate::components::position::Position;
use crate::components::size::{Aabb, Size};
use crate::components::velocity::LinearVelocity;
use crate::error::SimResult;
use crate::resources::simconfig::SimConfig;
use crate::resources::spatialgrid::SpatialGrid;
use crate::resources::worldtime::WorldTime;
use crate::systems::collision::dispatch_collision;

/// Logic-rate system: integrate, detect and resolve one tick of motion.
pub fn movement_collision(world: &mut World) -> SimResult<()> {
    for mut position in world.query::<&mut Position>().iter_mut(world) {
        position.snapshot();
    }
    if world.get_resource::<WorldTime>().is_some_and(|t| t.paused) {
        return Ok(());
    }

    let (passes, tick_rate) = match world.get_resource::<SimConfig>() {
        Some(config) => (config.passes.max(1), config.tick_rate),
        None => {
            let config = SimConfig::default();
            (config.passes, config.tick_rate)
        }
    };
    let step = tick_rate / passes as f32;

    rebuild_grid(world);

    let movers: Vec<Entity> = world
        .query_filtered::<Entity, (With<Position>, With<LinearVelocity>)>()
        .iter(world)
        .collect();

    let mut scratch = Vec::new();
    for mover in movers {
        for _ in 0..passes {
            if !step_once(world, mover, step, &mut scratch)? {
                break;
            }
        }
    }
    Ok(())
}

/// Refill the grid from the current Collidable population.
pub fn rebuild_grid(world: &mut World) {
    let obstacles: Vec<(Entity, Aabb)> = world
        .query_filtered::<(Entity, &Position, &Size), With<Collidable>>()
        .iter(world)
        .map(|(entity, position, size)| (entity, size.aabb(position.current)))
        .collect();
    if let Some(mut grid) = world.get_resource_mut::<SpatialGrid>() {
        grid.rebuild(obstacles);
    }
}

/// One sub-step for one entity. Returns `false` once the entity is gone.
fn step_once(
    world: &mut World,
    mover: Entity,
    step: f32,
    scratch: &mut Vec<Entity>,
) -> SimResult<bool> {
    let Some(velocity) = world.get::<LinearVelocity>(mover).map(LinearVelocity::as_vec2) else {
        return Ok(false);
    };
    let size = world.get::<Size>(mover).copied();
    let collider = world.get::<Collider>(mover).copied();
    let Some(mut position) = world.get_mut::<Position>(mover) else {
        return Ok(false);
    };
    let before = position.current;
    position.current += velocity * step;
    let after = position.current;

    let (Some(size), Some(collider)) = (size, collider) else {
        return Ok(true);
    };
    let pre = size.aabb(before);
    let post = size.aabb(after);

    match world.get_resource::<SpatialGrid>() {
        Some(grid) => grid.query(&post, scratch),
        None => return Ok(true),
    }
    let candidates = std::mem::take(scratch);
    for &candidate in &candidates {
        if candidate == mover {
            continue;
        }
        if world.get_entity(mover).is_err() {
            return Ok(false);
        }
        resolve_contact(world, mover, candidate, &pre, &post, size, collider)?;
    }
    *scratch = candidates;
    Ok(world.get_entity(mover).is_ok())
}

fn resolve_contact(
    world: &mut World,
    mover: Entity,
    candidate: Entity,
    pre: &Aabb,
    post: &Aabb,
    size: Size,
    collider: Collider,
) -> SimResult<()> {
    if world.get::<Collidable>(candidate).is_none() {
        return Ok(());
    }
    let (Some(position), Some(other)) = (
        world.get::<Position>(candidate),
        world.get::<Size>(candidate),
    ) else {
        return Ok(());
    };
    let obstacle = other.aabb(position.current);
    if !post.overlaps(&obstacle) {
        return Ok(());
    }
    let Some(side) = ContactSide::classify(pre, &obstacle) else {
        return Ok(());
    };
    trace!("{mover:?} hit {candidate:?} on its {side:?} face");

    if !collider.ghosted {
        push_out(world, mover, side, &obstacle, size, collider.bounce);
    }
    dispatch_collision(world, mover, candidate, collider.play_impact_sound)
}

/// Snap `mover` against the hit face and fix up the velocity on that axis.
fn push_out(world: &mut World, mover: Entity, side: ContactSide, obstacle: &Aabb, size: Size, bounce: bool) {
    if let Some(mut position) = world.get_mut::<Position>(mover) {
        match side {
            ContactSide::Left => position.current.x = obstacle.left - size.width,
            ContactSide::Right => position.current.x = obstacle.right,
            ContactSide::Bottom => position.current.y = obstacle.bottom - size.height,
            ContactSide::Top => position.current.y = obstacle.top,
        }
    }
    if let Some(mut velocity) = world.get_mut::<LinearVelocity>(mover) {
        match (side.is_horizontal(), bounce) {
            (true, true) => velocity.reverse_x(),
            (true, false) => velocity.x = 0.0,
            (false, true) => velocity.reverse_y(),
            (false, false) => velocity.y = 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::simclock::SimClock;

    const TICK: f32 = 1.0 / 60.0;
    const EPSILON: f32 = 1e-4;

    fn world(passes: u32) -> World {
        let mut world = World::new();
        let config = SimConfig::default().with_tick_rate(TICK).with_passes(passes);
        world.insert_resource(SpatialGrid::new(config.cell_size).unwrap());
        world.insert_resource(WorldTime::with_delta(TICK));
        world.insert_resource(SimClock::manual());
        world.insert_resource(config);
        world
    }

    fn wall(world: &mut World, x: f32, y: f32, w: f32, h: f32) -> Entity {
        world
            .spawn((Position::new(x, y), Size::new(w, h), Collidable))
            .id()
    }

    #[test]
    fn snapshot_before_integration() {
        let mut w = world(4);
        let e = w
            .spawn((Position::new(1.0, 2.0), LinearVelocity::new(60.0, 0.0)))
            .id();
        movement_collision(&mut w).unwrap();
        let p = w.get::<Position>(e).unwrap();
        assert_eq!(p.previous.x, 1.0);
        assert!((p.current.x - 2.0).abs() < EPSILON);
    }

    #[test]
    fn paused_world_does_not_move() {
        let mut w = world(4);
        w.resource_mut::<WorldTime>().paused = true;
        let e = w
            .spawn((Position::new(0.0, 0.0), LinearVelocity::new(60.0, 60.0)))
            .id();
        movement_collision(&mut w).unwrap();
        assert_eq!(w.get::<Position>(e).unwrap().current.x, 0.0);
    }

    #[test]
    fn right_face_hit_snaps_to_obstacle_right() {
        let mut w = world(1);
        wall(&mut w, 0.0, 0.0, 2.0, 10.0);
        let ball = w
            .spawn((
                Position::new(2.5, 1.0),
                Size::new(1.0, 1.0),
                LinearVelocity::new(-60.0, 0.0),
                Collider::solid(),
            ))
            .id();
        movement_collision(&mut w).unwrap();
        assert_eq!(w.get::<Position>(ball).unwrap().current.x, 2.0);
        assert_eq!(w.get::<LinearVelocity>(ball).unwrap().x, 0.0);
    }

    #[test]
    fn bottom_face_bounce_reverses_vy() {
        let mut w = world(1);
        wall(&mut w, 0.0, 5.0, 10.0, 1.0);
        let ball = w
            .spawn((
                Position::new(4.0, 3.5),
                Size::new(1.0, 1.0),
                LinearVelocity::new(0.0, 60.0),
                Collider::bouncy(),
            ))
            .id();
        movement_collision(&mut w).unwrap();
        assert_eq!(w.get::<Position>(ball).unwrap().current.y, 4.0);
        assert_eq!(w.get::<LinearVelocity>(ball).unwrap().y, -60.0);
    }

    #[test]
    fn ghost_passes_through() {
        let mut w = world(1);
        wall(&mut w, 2.0, 0.0, 1.0, 10.0);
        let ghost = w
            .spawn((
                Position::new(0.5, 1.0),
                Size::new(1.0, 1.0),
                LinearVelocity::new(60.0, 0.0),
                Collider::ghost(),
            ))
            .id();
        movement_collision(&mut w).unwrap();
        assert!((w.get::<Position>(ghost).unwrap().current.x - 1.5).abs() < EPSILON);
        assert_eq!(w.get::<LinearVelocity>(ghost).unwrap().x, 60.0);
    }

    #[test]
    fn collidable_does_not_hit_itself() {
        let mut w = world(4);
        let paddle = w
            .spawn((
                Position::new(0.0, 0.0),
                Size::new(4.0, 1.0),
                LinearVelocity::new(60.0, 0.0),
                Collider::solid(),
                Collidable,
            ))
            .id();
        movement_collision(&mut w).unwrap();
        assert_eq!(w.get::<LinearVelocity>(paddle).unwrap().x, 60.0);
        assert!((w.get::<Position>(paddle).unwrap().current.x - 1.0).abs() < EPSILON);
    }

    #[test]
    fn overlapping_at_start_reports_nothing() {
        let mut w = world(1);
        wall(&mut w, 0.0, 0.0, 4.0, 4.0);
        let ball = w
            .spawn((
                Position::new(1.0, 1.0),
                Size::new(1.0, 1.0),
                LinearVelocity::new(6.0, 0.0),
                Collider::solid(),
            ))
            .id();
        movement_collision(&mut w).unwrap();
        assert!((w.get::<Position>(ball).unwrap().current.x - 1.1).abs() < EPSILON);
    }

    #[test]
    fn grid_is_rebuilt_from_collidables() {
        let mut w = world(1);
        wall(&mut w, 0.0, 0.0, 1.0, 1.0);
        w.spawn((Position::new(50.0, 50.0), Size::new(1.0, 1.0)));
        rebuild_grid(&mut w);
        assert_eq!(w.resource::<SpatialGrid>().entity_count(), 1);
    }
}
