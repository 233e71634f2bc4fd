//! Reactions to discrete input actions.
//!
//! Hardware polling lives in the host; it feeds
//! [`Simulation::press`](crate::simulation::Simulation::press) and
//! [`Simulation::release`](crate::simulation::Simulation::release), and the
//! scheduler turns those events into the [`InputState`] seen here.

use bevy_ecs::prelude::*;
use log::info;

use crate::resources::input::InputState;
use crate::resources::worldtime::WorldTime;

/// Toggle [`WorldTime::paused`] whenever the pause action is pressed.
pub fn toggle_pause(input: Res<InputState>, mut time: ResMut<WorldTime>) {
    if input.pause.just_pressed {
        time.paused = !time.paused;
        info!("{}", if time.paused { "Paused" } else { "Resumed" });
    }
}
