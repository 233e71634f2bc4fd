//! ricochet main entry point.
//!
//! Runs a breakout level headlessly: no window, no audio device. A simple
//! autopilot steers the paddle under the ball, frames are fed to the
//! simulation at a fixed display rate, and the round outcome is logged.
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run --release -- --frames 3600 --fps 144 --seed 42
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{debug, error, info};

use ricochet::components::impactsound::{SoundHandle, SoundTrigger};
use ricochet::components::position::Position;
use ricochet::error::SimResult;
use ricochet::prefabs::{BreakoutAssets, LevelLayout, spawn_level};
use ricochet::resources::drawlist::DrawList;
use ricochet::resources::gamestate::{GameOutcome, Outcome};
use ricochet::resources::input::InputAction;
use ricochet::resources::simconfig::SimConfig;
use ricochet::simulation::Simulation;

#[derive(Parser)]
#[command(version, about = "Headless breakout run on the ricochet collision core")]
struct Cli {
    /// Number of display frames to simulate.
    #[arg(long, default_value_t = 3600)]
    frames: u32,

    /// Display refresh rate driving the frame deltas.
    #[arg(long, default_value_t = 144.0)]
    fps: f32,

    /// INI file with a `[simulation]` section.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Seed for brick hit points.
    #[arg(long)]
    seed: Option<u64>,
}

struct LoggedSound(&'static str);

impl SoundTrigger for LoggedSound {
    fn trigger(&self) {
        debug!("sound: {}", self.0);
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(Outcome::Lost) => ExitCode::from(1),
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Simulation failed: {e}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> SimResult<Outcome> {
    let config = match &cli.config {
        Some(path) => SimConfig::from_file(path)?,
        None => SimConfig::default(),
    };
    let mut sim = Simulation::with_default_systems(config)?;

    let seed = cli.seed.unwrap_or_else(|| fastrand::u64(..));
    info!("Brick seed: {seed}");
    let mut rng = fastrand::Rng::with_seed(seed);
    let layout = LevelLayout::default();
    let assets = BreakoutAssets::default().with_bounce_sound(SoundHandle::new(LoggedSound("bounce")));
    let level = spawn_level(sim.world_mut(), &layout, &assets, &mut rng);

    let frame_delta = 1.0 / cli.fps.max(1.0);
    let mut ticks = 0u64;
    sim.press(InputAction::Launch);
    for frame in 0..cli.frames {
        if frame == 1 {
            sim.release(InputAction::Launch);
        }
        steer(&mut sim, level.paddle, level.ball, layout.paddle_width);

        ticks += u64::from(sim.tick(frame_delta)?.ticks);

        let outcome = sim.resource::<GameOutcome>().get();
        if outcome != Outcome::Playing {
            info!("Round over after {frame} frames / {ticks} ticks: {outcome:?}");
            return Ok(outcome);
        }
    }

    let bricks_left = level.bricks.iter().filter(|&&b| sim.is_alive(b)).count();
    info!(
        "Stopped after {} frames / {ticks} ticks, {bricks_left} bricks left, {} sprites drawn",
        cli.frames,
        sim.resource::<DrawList>().len()
    );
    Ok(Outcome::Playing)
}

/// Hold left or right so the paddle centre chases the ball.
fn steer(sim: &mut Simulation, paddle: ricochet::Entity, ball: ricochet::Entity, paddle_width: f32) {
    let (Some(paddle_pos), Some(ball_pos)) = (
        sim.get::<Position>(paddle).map(|p| p.current),
        sim.get::<Position>(ball).map(|p| p.current),
    ) else {
        sim.release(InputAction::Left);
        sim.release(InputAction::Right);
        return;
    };
    let offset = ball_pos.x - (paddle_pos.x + paddle_width / 2.0);
    if offset < -1.0 {
        sim.release(InputAction::Right);
        sim.press(InputAction::Left);
    } else if offset > 1.0 {
        sim.release(InputAction::Left);
        sim.press(InputAction::Right);
    } else {
        sim.release(InputAction::Left);
        sim.release(InputAction::Right);
    }
}
