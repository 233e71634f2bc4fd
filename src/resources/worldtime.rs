//! Simulation time resource.
//!
//! Written by the scheduler only: `tick_count`/`elapsed` advance once per
//! logic tick, `alpha` and `frame_count` once per frame before render
//! systems run.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct WorldTime {
    /// Simulated seconds (`tick_count * delta`).
    pub elapsed: f32,
    /// Fixed seconds per tick.
    pub delta: f32,
    /// Fraction of a tick left in the accumulator after the last frame.
    pub alpha: f32,
    pub tick_count: u64,
    pub frame_count: u64,
    /// While paused the movement system leaves positions untouched.
    pub paused: bool,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            alpha: 0.0,
            tick_count: 0,
            frame_count: 0,
            paused: false,
        }
    }
}

impl WorldTime {
    pub fn with_delta(delta: f32) -> Self {
        Self {
            delta,
            ..Self::default()
        }
    }

    pub(crate) fn advance_tick(&mut self) {
        self.tick_count += 1;
        self.elapsed = self.tick_count as f32 * self.delta;
    }

    pub(crate) fn finish_frame(&mut self, alpha: f32) {
        self.alpha = alpha;
        self.frame_count += 1;
    }
}
