//! Fixed-timestep scheduler.
//!
//! Logic systems run at a fixed rate of one call per `tick_rate` seconds of
//! accumulated frame time, in registration order. Render systems run once per
//! frame afterwards and receive `alpha`, the fraction of a tick left over in
//! the accumulator, to interpolate positions between the last two ticks.
//!
//! A long stall (debugger, window drag, slow frame) would otherwise make the
//! next frame run hundreds of ticks to catch up, making the following frame
//! slower still. Each frame may therefore add at most
//! `tick_rate * cap_multiplier` seconds to the accumulator; the simulation
//! runs slower than real time instead of spiralling.
//!
//! Errors returned by a system are not handled here. They abort the frame
//! and travel to the caller of [`FixedTimestep::advance`].

use std::time::Instant;

use bevy_ecs::prelude::*;
use log::{trace, warn};

use crate::error::{SimError, SimResult};
use crate::resources::input::{InputState, PendingInput};
use crate::resources::worldtime::WorldTime;

/// A logic-rate system: runs once per tick.
pub type LogicFn = Box<dyn FnMut(&mut World) -> SimResult<()>>;
/// A render-rate system: runs once per frame with the interpolation alpha.
pub type RenderFn = Box<dyn FnMut(&mut World, f32) -> SimResult<()>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemBucket {
    Logic,
    Render,
}

/// Identifies a registered system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SystemHandle {
    bucket: SystemBucket,
    index: usize,
}

impl SystemHandle {
    pub fn bucket(&self) -> SystemBucket {
        self.bucket
    }
}

struct Entry<F> {
    name: String,
    enabled: bool,
    run: F,
}

/// What a call to [`FixedTimestep::advance`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// Logic ticks run this frame.
    pub ticks: u32,
    /// Interpolation factor handed to render systems, in `[0, 1)`.
    pub alpha: f32,
    /// Seconds actually added to the accumulator.
    pub accepted_delta: f32,
    /// Whether the frame delta hit the catch-up cap.
    pub clamped: bool,
}

pub struct FixedTimestep {
    tick_rate: f32,
    max_frame_delta: f32,
    accumulator: f32,
    previous_timestamp: Option<Instant>,
    logic: Vec<Entry<LogicFn>>,
    render: Vec<Entry<RenderFn>>,
}

impl FixedTimestep {
    pub fn new(tick_rate: f32, cap_multiplier: f32) -> SimResult<Self> {
        if !(tick_rate.is_finite() && tick_rate > 0.0) {
            return Err(SimError::InvalidTickRate(tick_rate));
        }
        if !(cap_multiplier.is_finite() && cap_multiplier > 0.0) {
            return Err(SimError::InvalidCapMultiplier(cap_multiplier));
        }
        Ok(Self {
            tick_rate,
            max_frame_delta: tick_rate * cap_multiplier,
            accumulator: 0.0,
            previous_timestamp: None,
            logic: Vec::new(),
            render: Vec::new(),
        })
    }

    pub fn tick_rate(&self) -> f32 {
        self.tick_rate
    }

    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    pub fn add_logic(&mut self, name: impl Into<String>, run: LogicFn) -> SystemHandle {
        self.logic.push(Entry {
            name: name.into(),
            enabled: true,
            run,
        });
        SystemHandle {
            bucket: SystemBucket::Logic,
            index: self.logic.len() - 1,
        }
    }

    pub fn add_render(&mut self, name: impl Into<String>, run: RenderFn) -> SystemHandle {
        self.render.push(Entry {
            name: name.into(),
            enabled: true,
            run,
        });
        SystemHandle {
            bucket: SystemBucket::Render,
            index: self.render.len() - 1,
        }
    }

    pub fn set_enabled(&mut self, handle: SystemHandle, enabled: bool) -> SimResult<()> {
        let slot = match handle.bucket {
            SystemBucket::Logic => self.logic.get_mut(handle.index).map(|e| &mut e.enabled),
            SystemBucket::Render => self.render.get_mut(handle.index).map(|e| &mut e.enabled),
        };
        match slot {
            Some(flag) => {
                *flag = enabled;
                Ok(())
            }
            None => Err(SimError::UnknownSystem(format!("{handle:?}"))),
        }
    }

    pub fn is_enabled(&self, handle: SystemHandle) -> Option<bool> {
        match handle.bucket {
            SystemBucket::Logic => self.logic.get(handle.index).map(|e| e.enabled),
            SystemBucket::Render => self.render.get(handle.index).map(|e| e.enabled),
        }
    }

    pub fn name(&self, handle: SystemHandle) -> Option<&str> {
        match handle.bucket {
            SystemBucket::Logic => self.logic.get(handle.index).map(|e| e.name.as_str()),
            SystemBucket::Render => self.render.get(handle.index).map(|e| e.name.as_str()),
        }
    }

    /// Frame delta since the previous call; the first call yields zero.
    pub fn delta_since_last(&mut self, now: Instant) -> f32 {
        let delta = self
            .previous_timestamp
            .map(|prev| now.saturating_duration_since(prev).as_secs_f32())
            .unwrap_or(0.0);
        self.previous_timestamp = Some(now);
        delta
    }

    /// Run one frame worth of ticks, then the render systems.
    pub fn advance(&mut self, world: &mut World, frame_delta: f32) -> SimResult<TickReport> {
        let frame_delta = if frame_delta.is_finite() { frame_delta.max(0.0) } else { 0.0 };
        let clamped = frame_delta > self.max_frame_delta;
        let accepted_delta = frame_delta.min(self.max_frame_delta);
        if clamped {
            warn!(
                "Frame took {:.3}s, simulating only {:.3}s to catch up",
                frame_delta, accepted_delta
            );
        }
        self.accumulator += accepted_delta;

        let mut ticks = 0;
        while self.accumulator >= self.tick_rate {
            self.accumulator -= self.tick_rate;
            begin_tick(world);
            for entry in self.logic.iter_mut().filter(|e| e.enabled) {
                trace!("tick: running {}", entry.name);
                (entry.run)(world)?;
            }
            ticks += 1;
        }

        let alpha = (self.accumulator / self.tick_rate).clamp(0.0, 1.0);
        if let Some(mut time) = world.get_resource_mut::<WorldTime>() {
            time.finish_frame(alpha);
        }
        for entry in self.render.iter_mut().filter(|e| e.enabled) {
            (entry.run)(world, alpha)?;
        }

        Ok(TickReport {
            ticks,
            alpha,
            accepted_delta,
            clamped,
        })
    }
}

/// Capture input and advance tick time before logic systems run.
fn begin_tick(world: &mut World) {
    if let Some(mut pending) = world.remove_resource::<PendingInput>() {
        if let Some(mut state) = world.get_resource_mut::<InputState>() {
            pending.capture_into(&mut state);
        }
        world.insert_resource(pending);
    }
    if let Some(mut time) = world.get_resource_mut::<WorldTime>() {
        time.advance_tick();
    }
}
