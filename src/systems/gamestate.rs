//! Round outcome tracking.
//!
//! The round is won once no [`Target`] is left and lost once no
//! [`PlayerHealth`] is left. Winning is checked first, so destroying the last
//! brick with the last ball still counts as a win. Nothing is decided until
//! the [`GameOutcome`] resource has been armed.

use bevy_ecs::prelude::*;
use log::info;

use crate::components::objective::{PlayerHealth, Target};
use crate::resources::gamestate::{GameOutcome, Outcome};

pub fn track_game_outcome(
    mut outcome: ResMut<GameOutcome>,
    targets: Query<(), With<Target>>,
    players: Query<(), With<PlayerHealth>>,
) {
    if !outcome.is_armed() {
        return;
    }
    if targets.is_empty() {
        if outcome.decide(Outcome::Won) {
            info!("All targets destroyed, round won");
        }
    } else if players.is_empty() && outcome.decide(Outcome::Lost) {
        info!("No player entity left, round lost");
    }
}
