//! Breakout entity prefabs.
//!
//! Each spawner attaches a complete component set before returning, so
//! systems never observe a half-built entity. Listeners capture entity ids
//! and shared handles only; everything else is looked up through the world
//! when they fire.
//!
//! Layout (y grows upwards):
//!
//! ```text
//!  +------------------ top border -------------------+
//!  |  [brick][brick][brick] ...                       |
//!  |  [brick][brick][brick] ...                       |
//! left                                              right
//! border                  o  <- starting ball       border
//!  |                  [=paddle=]                      |
//!  +------------- (open: balls fall out) -------------+
//! ```

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::info;

use crate::components::collider::{Collidable, Collider};
use crate::components::collision::CollisionListener;
use crate::components::despawnable::Despawnable;
use crate::components::hitpoints::Hitpoints;
use crate::components::impactsound::{ImpactSound, SoundHandle};
use crate::components::inputcontrolled::InputControlled;
use crate::components::objective::{PlayerHealth, Target};
use crate::components::position::Position;
use crate::components::size::Size;
use crate::components::sprite::{Sprite, TextureHandle};
use crate::components::stuckto::StuckTo;
use crate::components::velocity::LinearVelocity;
use crate::components::zindex::ZIndex;
use crate::resources::gamestate::GameOutcome;
use crate::resources::simclock::SimClock;

/// Thickness of the invisible world borders.
const BORDER_SIZE: f32 = 100.0;

/// Dimensions and speeds of a level, in world units.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelLayout {
    pub world_width: f32,
    pub world_height: f32,
    pub brick_size: f32,
    pub brick_columns: u32,
    pub brick_rows: u32,
    pub ball_size: f32,
    pub paddle_x: f32,
    pub paddle_y: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_speed: f32,
    /// Velocity of the starting ball when launched.
    pub launch_velocity: Vec2,
}

impl Default for LevelLayout {
    fn default() -> Self {
        Self {
            world_width: 120.0,
            world_height: 100.0,
            brick_size: 4.0,
            brick_columns: 30,
            brick_rows: 8,
            ball_size: 1.3,
            paddle_x: 54.0,
            paddle_y: 10.0,
            paddle_width: 12.0,
            paddle_height: 2.4,
            paddle_speed: 60.0,
            launch_velocity: Vec2::new(30.0, 60.0),
        }
    }
}

/// Texture and sound handles used by the prefabs.
#[derive(Debug, Clone)]
pub struct BreakoutAssets {
    pub paddle: TextureHandle,
    pub ball: TextureHandle,
    pub green_brick: TextureHandle,
    pub yellow_brick: TextureHandle,
    pub red_brick: TextureHandle,
    pub grey_brick: TextureHandle,
    pub bounce: Option<SoundHandle>,
}

impl Default for BreakoutAssets {
    fn default() -> Self {
        Self {
            paddle: TextureHandle::new("paddle"),
            ball: TextureHandle::new("ball"),
            green_brick: TextureHandle::new("brick_green"),
            yellow_brick: TextureHandle::new("brick_yellow"),
            red_brick: TextureHandle::new("brick_red"),
            grey_brick: TextureHandle::new("brick_grey"),
            bounce: None,
        }
    }
}

impl BreakoutAssets {
    pub fn with_bounce_sound(mut self, sound: SoundHandle) -> Self {
        self.bounce = Some(sound);
        self
    }

    fn impact_sound(&self) -> ImpactSound {
        ImpactSound {
            sound: self.bounce.clone(),
            ..ImpactSound::default()
        }
    }

    /// Brick colour for its remaining hit points.
    ///
    /// Bricks of up to three hit points go green, yellow, red as they count
    /// down. Tougher bricks use the remaining fraction instead.
    pub fn brick_texture(&self, hitpoints: &Hitpoints) -> TextureHandle {
        if hitpoints.is_invulnerable() {
            return self.grey_brick.clone();
        }
        let texture = if hitpoints.max > 3 {
            let left = hitpoints.fraction();
            if left > 0.6 {
                &self.green_brick
            } else if left > 0.3 {
                &self.yellow_brick
            } else {
                &self.red_brick
            }
        } else {
            match hitpoints.value {
                v if v >= 3 => &self.green_brick,
                2 => &self.yellow_brick,
                _ => &self.red_brick,
            }
        };
        texture.clone()
    }
}

/// Entities created by [`spawn_level`].
#[derive(Debug, Clone)]
pub struct LevelEntities {
    pub paddle: Entity,
    pub ball: Entity,
    pub borders: Vec<Entity>,
    pub bricks: Vec<Entity>,
}

pub fn spawn_paddle(world: &mut World, layout: &LevelLayout, assets: &BreakoutAssets) -> Entity {
    world
        .spawn((
            Position::new(layout.paddle_x, layout.paddle_y),
            LinearVelocity::zero(),
            Size::new(layout.paddle_width, layout.paddle_height),
            Sprite::new(assets.paddle.clone()),
            ZIndex(1),
            Collider::solid(),
            Collidable,
            assets.impact_sound(),
            InputControlled::new(layout.paddle_speed),
        ))
        .id()
}

fn ball_bundle(layout: &LevelLayout, assets: &BreakoutAssets, at: Vec2, velocity: Vec2) -> impl Bundle {
    (
        Position::new(at.x, at.y),
        LinearVelocity::from(velocity),
        Size::new(layout.ball_size, layout.ball_size),
        Sprite::new(assets.ball.clone()),
        ZIndex(2),
        Collider::bouncy(),
        PlayerHealth,
        Despawnable::default(),
    )
}

/// A free ball already in play.
pub fn spawn_ball(
    world: &mut World,
    layout: &LevelLayout,
    assets: &BreakoutAssets,
    at: Vec2,
    velocity: Vec2,
) -> Entity {
    world.spawn(ball_bundle(layout, assets, at, velocity)).id()
}

/// A ball resting on top of `paddle`, centred, until launched.
pub fn spawn_starting_ball(
    world: &mut World,
    layout: &LevelLayout,
    assets: &BreakoutAssets,
    paddle: Entity,
) -> Entity {
    let offset = Vec2::new(
        layout.paddle_width / 2.0 - layout.ball_size / 2.0,
        layout.paddle_height,
    );
    let at = Vec2::new(layout.paddle_x, layout.paddle_y) + offset;
    world
        .spawn((
            ball_bundle(layout, assets, at, Vec2::ZERO),
            StuckTo::follow_x_only(paddle)
                .with_offset(offset)
                .with_launch_velocity(layout.launch_velocity),
        ))
        .id()
}

/// Invisible wall.
pub fn spawn_border(world: &mut World, assets: &BreakoutAssets, x: f32, y: f32, width: f32, height: f32) -> Entity {
    world
        .spawn((
            Position::new(x, y),
            Size::new(width, height),
            Collidable,
            assets.impact_sound(),
        ))
        .id()
}

/// A brick with `hitpoints` hits left; negative means indestructible and
/// zero is treated as one.
///
/// Destructible bricks are [`Target`]s. Each (debounced) hit removes one hit
/// point and recolours the brick; the hit that empties it despawns it.
pub fn spawn_brick(
    world: &mut World,
    layout: &LevelLayout,
    assets: &BreakoutAssets,
    x: f32,
    y: f32,
    hitpoints: i32,
) -> Entity {
    let hp = if hitpoints < 0 {
        Hitpoints::invulnerable()
    } else {
        Hitpoints::new(hitpoints.max(1))
    };
    let brick = world
        .spawn((
            Position::new(x, y),
            Size::new(layout.brick_size, layout.brick_size),
            Sprite::new(assets.brick_texture(&hp)),
            Collidable,
            assets.impact_sound(),
            hp,
        ))
        .id();
    if hp.is_invulnerable() {
        return brick;
    }

    let assets = assets.clone();
    world.entity_mut(brick).insert((
        Target,
        CollisionListener::new(move |_collider, _collidable, world: &mut World| {
            let now = world
                .get_resource::<SimClock>()
                .map(SimClock::now)
                .unwrap_or_default();
            let (depleted, hp) = {
                let Some(mut hp) = world.get_mut::<Hitpoints>(brick) else {
                    return Ok(());
                };
                (hp.hit(now), *hp)
            };
            if depleted {
                world.despawn(brick);
            } else if let Some(mut sprite) = world.get_mut::<Sprite>(brick) {
                sprite.texture = Some(assets.brick_texture(&hp));
            }
            Ok(())
        }),
    ));
    brick
}

/// Spawn a full level: borders on three sides, paddle, starting ball and a
/// wall of bricks with 1 to 3 hit points drawn from `rng`. Arms the
/// [`GameOutcome`] tracker.
pub fn spawn_level(
    world: &mut World,
    layout: &LevelLayout,
    assets: &BreakoutAssets,
    rng: &mut fastrand::Rng,
) -> LevelEntities {
    let (w, h) = (layout.world_width, layout.world_height);
    let borders = vec![
        spawn_border(world, assets, -BORDER_SIZE, h, w + BORDER_SIZE * 2.0, BORDER_SIZE),
        spawn_border(world, assets, -BORDER_SIZE, 0.0, BORDER_SIZE, h),
        spawn_border(world, assets, w, 0.0, BORDER_SIZE, h),
    ];
    let paddle = spawn_paddle(world, layout, assets);
    let ball = spawn_starting_ball(world, layout, assets, paddle);

    let mut bricks = Vec::with_capacity((layout.brick_columns * layout.brick_rows) as usize);
    for column in 0..layout.brick_columns {
        for row in 0..layout.brick_rows {
            let x = column as f32 * layout.brick_size;
            let y = h - (row + 1) as f32 * layout.brick_size;
            bricks.push(spawn_brick(world, layout, assets, x, y, rng.i32(1..=3)));
        }
    }

    if let Some(mut outcome) = world.get_resource_mut::<GameOutcome>() {
        outcome.reset();
        outcome.arm();
    }
    info!("Level spawned: {} bricks", bricks.len());

    LevelEntities {
        paddle,
        ball,
        borders,
        bricks,
    }
}
