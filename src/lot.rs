//! Thread-safe handle over the Registry.
//!
//! `ParkingLot` owns the single Registry of a process behind one mutex. Every
//! read and every mutation runs under that lock, so a caller never observes a
//! half-applied operation and copies handed out are always consistent.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::config::Config;
use crate::registry::Registry;
use crate::snapshot;

/// Shared parking lot state plus where it is persisted
#[derive(Debug)]
pub struct ParkingLot {
    registry: Mutex<Registry>,
    data_file: PathBuf,
    autosave: bool,
}

impl ParkingLot {
    /// Open the lot configured by `config`, loading its snapshot if present.
    pub fn open(config: &Config) -> Self {
        let mut lot = Self::open_path(config.data_file());
        lot.autosave = config.autosave();
        lot
    }

    /// Open the lot stored at `data_file`. Autosave is off.
    pub fn open_path(data_file: impl Into<PathBuf>) -> Self {
        let data_file = data_file.into();
        let registry = snapshot::load_or_default(&data_file);
        Self::with_registry(registry, data_file)
    }

    /// Wrap an existing registry that will be saved to `data_file`.
    pub fn with_registry(registry: Registry, data_file: impl Into<PathBuf>) -> Self {
        Self {
            registry: Mutex::new(registry),
            data_file: data_file.into(),
            autosave: false,
        }
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    pub fn autosave(&self) -> bool {
        self.autosave
    }

    pub fn set_autosave(&mut self, enabled: bool) {
        self.autosave = enabled;
    }

    // A panic inside a closure leaves the Registry as the closure left it.
    // Every Registry operation completes its invariants before returning, so
    // the state is still usable.
    fn lock(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run a query against the registry.
    pub fn read<R>(&self, f: impl FnOnce(&Registry) -> R) -> R {
        let registry = self.lock();
        f(&registry)
    }

    /// Run a mutation against the registry, saving afterwards when autosave is on.
    pub fn write<R>(&self, f: impl FnOnce(&mut Registry) -> R) -> R {
        let mut registry = self.lock();
        let result = f(&mut registry);
        if self.autosave {
            self.save_locked(&registry);
        }
        result
    }

    /// Copy of the whole registry
    pub fn snapshot(&self) -> Registry {
        self.read(Registry::clone)
    }

    /// Persist the registry. Failures are logged and reported as `false`.
    pub fn save(&self) -> bool {
        let registry = self.lock();
        self.save_locked(&registry)
    }

    fn save_locked(&self, registry: &Registry) -> bool {
        match snapshot::save(registry, &self.data_file) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Failed to save {}: {}", self.data_file.display(), e);
                false
            }
        }
    }

    /// Replace the in-memory state with the snapshot on disk.
    ///
    /// Keeps the current state and returns `false` when the snapshot cannot be read.
    pub fn reload(&self) -> bool {
        match snapshot::load(&self.data_file) {
            Ok(loaded) => {
                *self.lock() = loaded;
                true
            }
            Err(e) => {
                tracing::warn!("Failed to reload {}: {}", self.data_file.display(), e);
                false
            }
        }
    }
}
