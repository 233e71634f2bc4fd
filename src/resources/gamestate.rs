//! Round outcome resource.
//!
//! [`track_game_outcome`](crate::systems::gamestate::track_game_outcome) moves
//! the outcome from `Playing` to `Won` or `Lost`. Screen transitions are the
//! host's business; it polls [`GameOutcome::get`] after each frame.

use bevy_ecs::prelude::Resource;

/// Discrete outcomes of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Outcome {
    #[default]
    Playing,
    Won,
    Lost,
}

#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct GameOutcome {
    current: Outcome,
    /// Only an armed tracker decides the round. Arm it once the level is populated.
    armed: bool,
}

impl GameOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Outcome {
        self.current
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn arm(&mut self) {
        self.armed = true;
    }

    /// Record a final outcome and disarm. Returns `false` if already decided.
    pub fn decide(&mut self, outcome: Outcome) -> bool {
        if self.current != Outcome::Playing {
            return false;
        }
        self.current = outcome;
        self.armed = false;
        true
    }

    /// Back to `Playing`, disarmed (new round).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
