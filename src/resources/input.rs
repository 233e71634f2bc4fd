//! Per-tick input snapshot.
//!
//! The host pushes raw press/release events into [`PendingInput`] whenever
//! they happen. Once per logic tick, before any logic system runs, the
//! scheduler folds them into the [`InputState`] resource; every system in
//! that tick then sees the same state no matter how many events arrived in
//! between. A press-and-release that happens entirely between two ticks still
//! shows up as `just_pressed` (and `just_released`) for one tick.

use bevy_ecs::prelude::*;
use rustc_hash::FxHashSet;

/// Actions the game reacts to. Keyboard/gamepad bindings live in the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    Left,
    Right,
    Launch,
    Pause,
}

impl InputAction {
    pub const ALL: [InputAction; 4] = [
        InputAction::Left,
        InputAction::Right,
        InputAction::Launch,
        InputAction::Pause,
    ];
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Boolean action state for one tick.
pub struct BoolState {
    /// Whether the action is held at the start of this tick.
    pub active: bool,
    /// Whether the action was pressed since the previous tick.
    pub just_pressed: bool,
    /// Whether the action was released since the previous tick.
    pub just_released: bool,
}

/// Resource capturing the input state observed by every system of a tick.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: BoolState,
    pub right: BoolState,
    pub launch: BoolState,
    pub pause: BoolState,
}

impl InputState {
    pub fn get(&self, action: InputAction) -> &BoolState {
        match action {
            InputAction::Left => &self.left,
            InputAction::Right => &self.right,
            InputAction::Launch => &self.launch,
            InputAction::Pause => &self.pause,
        }
    }

    fn get_mut(&mut self, action: InputAction) -> &mut BoolState {
        match action {
            InputAction::Left => &mut self.left,
            InputAction::Right => &mut self.right,
            InputAction::Launch => &mut self.launch,
            InputAction::Pause => &mut self.pause,
        }
    }

    /// Horizontal intent: -1, 0 or 1. Holding both directions cancels out.
    pub fn horizontal_axis(&self) -> f32 {
        match (self.left.active, self.right.active) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Raw events accumulated between two ticks.
#[derive(Resource, Debug, Clone, Default)]
pub struct PendingInput {
    held: FxHashSet<InputAction>,
    pressed: FxHashSet<InputAction>,
    released: FxHashSet<InputAction>,
}

impl PendingInput {
    pub fn press(&mut self, action: InputAction) {
        if self.held.insert(action) {
            self.pressed.insert(action);
        }
    }

    pub fn release(&mut self, action: InputAction) {
        if self.held.remove(&action) {
            self.released.insert(action);
        }
    }

    pub fn is_held(&self, action: InputAction) -> bool {
        self.held.contains(&action)
    }

    /// Fold the pending events into `state` and start a new collection window.
    pub fn capture_into(&mut self, state: &mut InputState) {
        for action in InputAction::ALL {
            let s = state.get_mut(action);
            s.active = self.held.contains(&action);
            s.just_pressed = self.pressed.contains(&action);
            s.just_released = self.released.contains(&action);
        }
        self.pressed.clear();
        self.released.clear();
    }
}
