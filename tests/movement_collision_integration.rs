//! Movement and collision integration tests driven through `Simulation`.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use bevy_ecs::prelude::*;

use ricochet::components::collider::{Collidable, Collider};
use ricochet::components::collision::CollisionListener;
use ricochet::components::impactsound::{ImpactSound, SoundHandle, SoundTrigger};
use ricochet::components::position::Position;
use ricochet::components::size::Size;
use ricochet::components::velocity::LinearVelocity;
use ricochet::error::SimError;
use ricochet::resources::simclock::SimClock;
use ricochet::resources::simconfig::SimConfig;
use ricochet::simulation::Simulation;
use ricochet::systems::movement::movement_collision;

const TICK: f32 = 1.0 / 60.0;
const EPSILON: f32 = 1e-4;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn make_sim(passes: u32) -> Simulation {
    let config = SimConfig::default().with_tick_rate(TICK).with_passes(passes);
    let mut sim = Simulation::new(config).unwrap();
    sim.set_clock(SimClock::manual());
    sim.register_logic_system("movement_collision", movement_collision);
    sim
}

fn spawn_wall(sim: &mut Simulation, x: f32, y: f32, w: f32, h: f32) -> Entity {
    sim.spawn((Position::new(x, y), Size::new(w, h), Collidable))
}

fn counter() -> Arc<AtomicUsize> {
    Arc::new(AtomicUsize::new(0))
}

fn counting_listener(count: &Arc<AtomicUsize>) -> CollisionListener {
    let count = count.clone();
    CollisionListener::new(move |_, _, _| {
        count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    })
}

struct CountingSound(Arc<AtomicUsize>);

impl SoundTrigger for CountingSound {
    fn trigger(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn movement_only_entity_is_independent_of_passes() {
    for passes in [1, 2, 4, 8] {
        let mut sim = make_sim(passes);
        let e = sim.spawn((
            Position::new(1.0, 2.0),
            LinearVelocity::new(30.0, -12.0),
            Size::new(1.0, 1.0),
        ));
        for _ in 0..10 {
            sim.tick(TICK).unwrap();
        }
        let p = sim.get::<Position>(e).unwrap().current;
        assert!(approx_eq(p.x, 1.0 + 30.0 * 10.0 * TICK), "passes={passes} x={}", p.x);
        assert!(approx_eq(p.y, 2.0 - 12.0 * 10.0 * TICK), "passes={passes} y={}", p.y);
    }
}

#[test]
fn previous_is_start_of_tick_position() {
    let mut sim = make_sim(4);
    let e = sim.spawn((Position::new(0.0, 0.0), LinearVelocity::new(60.0, 0.0)));
    sim.tick(TICK).unwrap();
    sim.tick(TICK).unwrap();
    let p = sim.get::<Position>(e).unwrap();
    assert!(approx_eq(p.previous.x, 1.0));
    assert!(approx_eq(p.current.x, 2.0));
}

/// Ball of size 1 moving 2.5 units per tick towards a wall 1 unit wide.
fn tunneling_hit(passes: u32) -> bool {
    let mut sim = make_sim(passes);
    let hits = counter();
    let wall = spawn_wall(&mut sim, 1.2, -5.0, 1.0, 10.0);
    sim.insert(wall, counting_listener(&hits));
    sim.spawn((
        Position::new(0.0, 0.0),
        Size::new(1.0, 1.0),
        LinearVelocity::new(150.0, 0.0),
        Collider::solid(),
    ));
    sim.tick(TICK).unwrap();
    hits.load(Ordering::SeqCst) > 0
}

#[test]
fn sub_stepping_prevents_tunneling() {
    assert!(!tunneling_hit(1), "a single pass jumps over the wall");
    let mut previous = false;
    for passes in [2, 4, 8] {
        let hit = tunneling_hit(passes);
        assert!(hit, "passes={passes} missed the wall");
        assert!(hit >= previous);
        previous = hit;
    }
}

#[test]
fn bounce_negates_hit_axis_only() {
    let mut sim = make_sim(4);
    spawn_wall(&mut sim, 1.5, -10.0, 1.0, 20.0);
    let ball = sim.spawn((
        Position::new(0.0, 0.0),
        Size::new(1.0, 1.0),
        LinearVelocity::new(60.0, 30.0),
        Collider::bouncy(),
    ));
    sim.tick(TICK).unwrap();
    let v = *sim.get::<LinearVelocity>(ball).unwrap();
    assert_eq!(v.x, -60.0);
    assert_eq!(v.y, 30.0);
}

#[test]
fn stop_zeroes_velocity_and_snaps_flush() {
    let mut sim = make_sim(4);
    spawn_wall(&mut sim, 1.5, -10.0, 1.0, 20.0);
    let ball = sim.spawn((
        Position::new(0.0, 0.0),
        Size::new(1.0, 1.0),
        LinearVelocity::new(60.0, 0.0),
        Collider::solid(),
    ));
    sim.tick(TICK).unwrap();
    assert_eq!(sim.get::<LinearVelocity>(ball).unwrap().x, 0.0);
    assert_eq!(sim.get::<Position>(ball).unwrap().current.x, 1.5 - 1.0);
}

#[test]
fn ball_bounces_off_paddle_top() {
    let mut sim = make_sim(4);
    let paddle = spawn_wall(&mut sim, 54.0, 10.0, 12.0, 2.4);
    // Half a unit per pass: the fourth pass lands inside the paddle.
    let ball = sim.spawn((
        Position::new(60.0, 14.2),
        Size::new(1.3, 1.3),
        LinearVelocity::new(0.0, -120.0),
        Collider::bouncy(),
    ));
    sim.tick(TICK).unwrap();
    assert_eq!(sim.get::<LinearVelocity>(ball).unwrap().y, 120.0);
    let paddle_top = sim.get::<Position>(paddle).unwrap().current.y + 2.4;
    assert_eq!(sim.get::<Position>(ball).unwrap().current.y, paddle_top);
}

#[test]
fn ghost_reports_but_never_moves_back() {
    let mut sim = make_sim(4);
    let hits = counter();
    let wall = spawn_wall(&mut sim, 1.5, -10.0, 1.0, 20.0);
    sim.insert(wall, counting_listener(&hits));
    let ghost = sim.spawn((
        Position::new(0.0, 0.0),
        Size::new(1.0, 1.0),
        LinearVelocity::new(60.0, 0.0),
        Collider::ghost(),
    ));
    sim.tick(TICK).unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert_eq!(sim.get::<LinearVelocity>(ghost).unwrap().x, 60.0);
    assert!(approx_eq(sim.get::<Position>(ghost).unwrap().current.x, 1.0));
}

#[test]
fn debounce_suppresses_sustained_contact() {
    let mut sim = make_sim(4);
    let wall_hits = counter();
    let ball_hits = counter();
    let plays = counter();
    let wall = spawn_wall(&mut sim, 1.5, -10.0, 1.0, 20.0);
    sim.insert(
        wall,
        (
            counting_listener(&wall_hits),
            ImpactSound::new(SoundHandle::new(CountingSound(plays.clone()))),
        ),
    );
    let ball = sim.spawn((
        Position::new(0.5, 0.0),
        Size::new(1.0, 1.0),
        LinearVelocity::zero(),
        Collider::solid().with_impact_sound(true),
        counting_listener(&ball_hits),
    ));
    // Runs after movement: every following tick starts with the ball pushing into the wall.
    sim.register_logic_system("push", move |world: &mut World| {
        if let Some(mut v) = world.get_mut::<LinearVelocity>(ball) {
            v.x = 60.0;
        }
        Ok(())
    });

    sim.tick(TICK).unwrap();
    sim.tick(TICK).unwrap();
    assert_eq!(wall_hits.load(Ordering::SeqCst), 1);
    assert_eq!(ball_hits.load(Ordering::SeqCst), 1);
    assert_eq!(plays.load(Ordering::SeqCst), 1);

    sim.clock_mut().advance(Duration::from_millis(50));
    sim.tick(TICK).unwrap();
    assert_eq!(wall_hits.load(Ordering::SeqCst), 1);
    assert_eq!(plays.load(Ordering::SeqCst), 1);

    sim.clock_mut().advance(Duration::from_millis(60));
    sim.tick(TICK).unwrap();
    assert_eq!(wall_hits.load(Ordering::SeqCst), 2);
    assert_eq!(ball_hits.load(Ordering::SeqCst), 2);
    assert_eq!(plays.load(Ordering::SeqCst), 2);
}

#[test]
fn sound_needs_collider_opt_in() {
    let mut sim = make_sim(4);
    let plays = counter();
    let wall = spawn_wall(&mut sim, 1.5, -10.0, 1.0, 20.0);
    sim.insert(wall, ImpactSound::new(SoundHandle::new(CountingSound(plays.clone()))));
    sim.spawn((
        Position::new(0.0, 0.0),
        Size::new(1.0, 1.0),
        LinearVelocity::new(60.0, 0.0),
        Collider::solid(),
    ));
    sim.tick(TICK).unwrap();
    assert_eq!(plays.load(Ordering::SeqCst), 0);
}

#[test]
fn listener_may_delete_another_candidate_mid_pass() {
    let mut sim = make_sim(1);
    let fired = counter();
    let left = spawn_wall(&mut sim, 0.0, 5.0, 2.0, 1.0);
    let right = spawn_wall(&mut sim, 2.0, 5.0, 2.0, 1.0);
    for (me, other) in [(left, right), (right, left)] {
        let fired = fired.clone();
        sim.set_collision_listener(me, move |_, _, world| {
            fired.fetch_add(1, Ordering::SeqCst);
            world.despawn(other);
            Ok(())
        });
    }
    // straddles both bricks when it arrives
    sim.spawn((
        Position::new(1.5, 3.5),
        Size::new(1.0, 1.0),
        LinearVelocity::new(0.0, 60.0),
        Collider::bouncy(),
    ));
    sim.tick(TICK).unwrap();
    assert_eq!(fired.load(Ordering::SeqCst), 1);
    assert!(sim.is_alive(left) != sim.is_alive(right));
}

#[test]
fn collider_deleted_by_own_listener_stops_resolving() {
    let mut sim = make_sim(4);
    let brick_hits = counter();
    let left = spawn_wall(&mut sim, 0.0, 5.0, 2.0, 1.0);
    let right = spawn_wall(&mut sim, 2.0, 5.0, 2.0, 1.0);
    sim.insert(left, counting_listener(&brick_hits));
    sim.insert(right, counting_listener(&brick_hits));
    let ball = sim.spawn((
        Position::new(1.5, 3.9),
        Size::new(1.0, 1.0),
        LinearVelocity::new(0.0, 60.0),
        Collider::bouncy(),
        CollisionListener::new(|collider, _, world| {
            world.despawn(collider);
            Ok(())
        }),
    ));
    sim.tick(TICK).unwrap();
    assert!(!sim.is_alive(ball));
    // the collidable side of the first contact still reacts, the second brick is never reached
    assert_eq!(brick_hits.load(Ordering::SeqCst), 1);
}

#[test]
fn listener_error_propagates_out_of_tick() {
    let mut sim = make_sim(4);
    let wall = spawn_wall(&mut sim, 1.5, -10.0, 1.0, 20.0);
    sim.set_collision_listener(wall, |_, _, _| Err("wall exploded".into()));
    sim.spawn((
        Position::new(0.0, 0.0),
        Size::new(1.0, 1.0),
        LinearVelocity::new(60.0, 0.0),
        Collider::solid(),
    ));
    let err = sim.tick(TICK).unwrap_err();
    assert!(matches!(err, SimError::Listener { owner, .. } if owner == wall));
}

#[test]
fn destroyed_entities_are_skipped() {
    let mut sim = make_sim(4);
    let wall = spawn_wall(&mut sim, 1.5, -10.0, 1.0, 20.0);
    let ball = sim.spawn((
        Position::new(0.0, 0.0),
        Size::new(1.0, 1.0),
        LinearVelocity::new(60.0, 0.0),
        Collider::solid(),
    ));
    assert!(sim.destroy(wall));
    sim.tick(TICK).unwrap();
    assert!(approx_eq(sim.get::<Position>(ball).unwrap().current.x, 1.0));
    assert!(sim.destroy(ball));
    sim.tick(TICK).unwrap();
    assert!(sim.get::<Position>(ball).is_none());
}

#[test]
fn entity_that_is_collider_and_collidable_pushes_others() {
    let mut sim = make_sim(4);
    let border = spawn_wall(&mut sim, 10.0, 0.0, 5.0, 20.0);
    let paddle = sim.spawn((
        Position::new(8.5, 5.0),
        Size::new(1.0, 1.0),
        LinearVelocity::new(120.0, 0.0),
        Collider::solid(),
        Collidable,
    ));
    sim.tick(TICK).unwrap();
    assert_eq!(sim.get::<Position>(paddle).unwrap().current.x, 9.0);
    assert!(sim.is_alive(border));

    let ball = sim.spawn((
        Position::new(9.0, 7.8),
        Size::new(1.0, 1.0),
        LinearVelocity::new(0.0, -120.0),
        Collider::bouncy(),
    ));
    sim.tick(TICK).unwrap();
    assert_eq!(sim.get::<Position>(ball).unwrap().current.y, 6.0);
    assert_eq!(sim.get::<LinearVelocity>(ball).unwrap().y, 120.0);
}
