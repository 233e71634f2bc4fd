//! Simulation configuration resource.
//!
//! Holds the tunables of the fixed-timestep loop and the collision engine.
//! Defaults are safe to run with; values can be overridden from an INI file.
//! Every constructor path ends in [`SimConfig::validate`], and a
//! [`Simulation`](crate::simulation::Simulation) refuses to start with an
//! invalid configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [simulation]
//! ticks_per_second = 60
//! passes = 4
//! cell_size = 8
//! cap_multiplier = 25
//! debounce_window = 0.1
//! ```
//!
//! `seconds_per_tick` may be given instead of `ticks_per_second`; when both
//! are present `seconds_per_tick` wins.

use std::path::{Path, PathBuf};
use std::time::Duration;

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;

use crate::error::{SimError, SimResult};

/// Default safe values for startup
const DEFAULT_TICK_RATE: f32 = 1.0 / 60.0;
const DEFAULT_PASSES: u32 = 4;
const DEFAULT_CELL_SIZE: f32 = 8.0;
const DEFAULT_CAP_MULTIPLIER: f32 = 25.0;
const DEFAULT_DEBOUNCE_WINDOW: f32 = 0.1;
const DEFAULT_CONFIG_PATH: &str = "./ricochet.ini";

const SECTION: &str = "simulation";

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Seconds simulated by one logic tick.
    pub tick_rate: f32,
    /// Movement sub-steps per tick (tunneling protection).
    pub passes: u32,
    /// Edge length of a spatial grid cell, in world units.
    pub cell_size: f32,
    /// A frame may add at most `tick_rate * cap_multiplier` to the accumulator.
    pub cap_multiplier: f32,
    /// Minimum seconds between two firings of one listener or impact sound.
    pub debounce_window: f32,
    /// Path used by [`load_from_file`](Self::load_from_file) and
    /// [`save_to_file`](Self::save_to_file).
    pub config_path: PathBuf,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SimConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            tick_rate: DEFAULT_TICK_RATE,
            passes: DEFAULT_PASSES,
            cell_size: DEFAULT_CELL_SIZE,
            cap_multiplier: DEFAULT_CAP_MULTIPLIER,
            debounce_window: DEFAULT_DEBOUNCE_WINDOW,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    pub fn with_tick_rate(mut self, seconds_per_tick: f32) -> Self {
        self.tick_rate = seconds_per_tick;
        self
    }

    pub fn with_passes(mut self, passes: u32) -> Self {
        self.passes = passes;
        self
    }

    pub fn with_cell_size(mut self, cell_size: f32) -> Self {
        self.cell_size = cell_size;
        self
    }

    pub fn with_cap_multiplier(mut self, cap_multiplier: f32) -> Self {
        self.cap_multiplier = cap_multiplier;
        self
    }

    pub fn with_debounce_window(mut self, seconds: f32) -> Self {
        self.debounce_window = seconds;
        self
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> SimResult<()> {
        if !(self.tick_rate.is_finite() && self.tick_rate > 0.0) {
            return Err(SimError::InvalidTickRate(self.tick_rate));
        }
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(SimError::InvalidCellSize(self.cell_size));
        }
        if self.passes == 0 {
            return Err(SimError::InvalidPasses(self.passes));
        }
        if !(self.cap_multiplier.is_finite() && self.cap_multiplier > 0.0) {
            return Err(SimError::InvalidCapMultiplier(self.cap_multiplier));
        }
        if !(self.debounce_window.is_finite() && self.debounce_window >= 0.0) {
            return Err(SimError::InvalidDebounceWindow(self.debounce_window));
        }
        Ok(())
    }

    /// Largest frame delta the accumulator accepts in one frame.
    pub fn max_frame_delta(&self) -> f32 {
        self.tick_rate * self.cap_multiplier
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_secs_f32(self.debounce_window)
    }

    /// Load configuration from the INI file at `config_path`.
    ///
    /// Missing values retain their current values. The merged result is validated.
    pub fn load_from_file(&mut self) -> SimResult<()> {
        let mut ini = Ini::new();
        ini.load(&self.config_path).map_err(SimError::ConfigLoad)?;
        self.apply(&ini)?;
        info!(
            "Loaded config from {:?}: tick_rate={:.5}s passes={} cell_size={} cap={} debounce={}s",
            self.config_path,
            self.tick_rate,
            self.passes,
            self.cell_size,
            self.cap_multiplier,
            self.debounce_window
        );
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> SimResult<()> {
        let mut ini = Ini::new();
        ini.read(text.to_string()).map_err(SimError::ConfigLoad)?;
        self.apply(&ini)
    }

    /// Convenience: defaults overridden by the file at `path`.
    pub fn from_file(path: impl AsRef<Path>) -> SimResult<Self> {
        let mut config = Self::with_path(path.as_ref());
        config.load_from_file()?;
        Ok(config)
    }

    fn apply(&mut self, ini: &Ini) -> SimResult<()> {
        if let Some(tps) = ini.getfloat(SECTION, "ticks_per_second").map_err(SimError::ConfigLoad)? {
            self.tick_rate = (1.0 / tps) as f32;
        }
        if let Some(spt) = ini.getfloat(SECTION, "seconds_per_tick").map_err(SimError::ConfigLoad)? {
            self.tick_rate = spt as f32;
        }
        if let Some(passes) = ini.getuint(SECTION, "passes").map_err(SimError::ConfigLoad)? {
            self.passes = u32::try_from(passes).map_err(|_| SimError::InvalidPasses(u32::MAX))?;
        }
        if let Some(cell) = ini.getfloat(SECTION, "cell_size").map_err(SimError::ConfigLoad)? {
            self.cell_size = cell as f32;
        }
        if let Some(cap) = ini.getfloat(SECTION, "cap_multiplier").map_err(SimError::ConfigLoad)? {
            self.cap_multiplier = cap as f32;
        }
        if let Some(window) = ini.getfloat(SECTION, "debounce_window").map_err(SimError::ConfigLoad)? {
            self.debounce_window = window as f32;
        }
        self.validate()
    }

    /// Save configuration to the INI file. Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> SimResult<()> {
        let mut ini = Ini::new();
        ini.set(SECTION, "seconds_per_tick", Some(self.tick_rate.to_string()));
        ini.set(SECTION, "passes", Some(self.passes.to_string()));
        ini.set(SECTION, "cell_size", Some(self.cell_size.to_string()));
        ini.set(SECTION, "cap_multiplier", Some(self.cap_multiplier.to_string()));
        ini.set(SECTION, "debounce_window", Some(self.debounce_window.to_string()));
        ini.write(&self.config_path)
            .map_err(|e| SimError::ConfigSave(e.to_string()))?;
        info!("Saved config to {:?}", self.config_path);
        Ok(())
    }
}
