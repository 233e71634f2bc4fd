//! Registry of named systems.
//!
//! Maps human-readable names to the [`SystemHandle`]s returned by the
//! scheduler, so a system can be paused or resumed by name without keeping
//! the handle around.

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;

use crate::scheduler::SystemHandle;

/// Map of names to system handles.
#[derive(Resource, Debug, Default)]
pub struct SystemsStore {
    pub map: FxHashMap<String, SystemHandle>,
}

impl SystemsStore {
    /// Create an empty store.
    pub fn new() -> Self {
        SystemsStore {
            map: FxHashMap::default(),
        }
    }

    /// Insert a handle under a name, replacing any previous one.
    pub fn insert(&mut self, name: impl Into<String>, handle: SystemHandle) {
        self.map.insert(name.into(), handle);
    }

    /// Retrieve a handle by name, if present.
    pub fn get(&self, name: impl AsRef<str>) -> Option<SystemHandle> {
        self.map.get(name.as_ref()).copied()
    }
}
