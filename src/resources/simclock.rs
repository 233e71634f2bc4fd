//! Wall-clock source used for debouncing collision side effects.
//!
//! Debounce windows are measured in real time, not in ticks: several ticks
//! can run back to back in one frame while catching up, and a listener must
//! still not fire more than once per window. [`SimClock`] wraps a monotonic
//! [`Instant`]; tests swap it for a manual clock they can step explicitly.

use std::time::{Duration, Instant};

use bevy_ecs::prelude::Resource;

#[derive(Debug, Clone, Copy)]
enum ClockSource {
    Monotonic(Instant),
    Manual(Duration),
}

/// Monotonic clock resource; `now()` is the time elapsed since creation.
#[derive(Resource, Debug, Clone, Copy)]
pub struct SimClock {
    source: ClockSource,
}

impl Default for SimClock {
    fn default() -> Self {
        Self::monotonic()
    }
}

impl SimClock {
    pub fn monotonic() -> Self {
        Self {
            source: ClockSource::Monotonic(Instant::now()),
        }
    }

    /// A clock that only moves when [`advance`](Self::advance) or
    /// [`set`](Self::set) is called.
    pub fn manual() -> Self {
        Self {
            source: ClockSource::Manual(Duration::ZERO),
        }
    }

    pub fn now(&self) -> Duration {
        match self.source {
            ClockSource::Monotonic(origin) => origin.elapsed(),
            ClockSource::Manual(now) => now,
        }
    }

    /// Step a manual clock forward. No effect on a monotonic clock.
    pub fn advance(&mut self, by: Duration) {
        if let ClockSource::Manual(now) = &mut self.source {
            *now += by;
        }
    }

    /// Jump a manual clock to `at`. No effect on a monotonic clock.
    pub fn set(&mut self, at: Duration) {
        if let ClockSource::Manual(now) = &mut self.source {
            *now = at;
        }
    }

    pub fn is_manual(&self) -> bool {
        matches!(self.source, ClockSource::Manual(_))
    }
}

/// Per-component debounce state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cooldown {
    last_fired: Option<Duration>,
}

impl Cooldown {
    /// Whether more than `window` has passed since the last firing.
    /// A cooldown that never fired is always ready.
    pub fn is_ready(&self, now: Duration, window: Duration) -> bool {
        match self.last_fired {
            None => true,
            Some(last) => now.saturating_sub(last) > window,
        }
    }

    /// Mark as fired at `now` if ready. Returns whether it fired.
    pub fn try_fire(&mut self, now: Duration, window: Duration) -> bool {
        if self.is_ready(now, window) {
            self.last_fired = Some(now);
            true
        } else {
            false
        }
    }

    pub fn last_fired(&self) -> Option<Duration> {
        self.last_fired
    }
}
