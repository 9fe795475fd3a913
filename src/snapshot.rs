//! Whole-registry persistence.
//!
//! The snapshot is the JSON encoding of the entire [`Registry`]. Saving writes a
//! sibling `.tmp` file and renames it over the target, so a concurrent reader
//! sees either the old snapshot or the new one.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ParkingResult;
use crate::registry::Registry;

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write the registry to `path`, replacing any previous snapshot.
pub fn save(registry: &Registry, path: &Path) -> ParkingResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(registry)?;
    let tmp = temp_path(path);
    fs::write(&tmp, content)?;
    fs::rename(&tmp, path)?;
    tracing::debug!("Saved snapshot to {}", path.display());
    Ok(())
}

/// Read a registry from `path`.
pub fn load(path: &Path) -> ParkingResult<Registry> {
    let content = fs::read_to_string(path)?;
    let registry = serde_json::from_str(&content)?;
    tracing::debug!("Loaded snapshot from {}", path.display());
    Ok(registry)
}

/// Read a registry from `path`, or start empty when it is missing or unreadable.
pub fn load_or_default(path: &Path) -> Registry {
    if !path.exists() {
        tracing::info!("No snapshot at {}, starting empty", path.display());
        return Registry::new();
    }
    match load(path) {
        Ok(registry) => registry,
        Err(e) => {
            tracing::warn!("Could not load snapshot {}: {}", path.display(), e);
            Registry::new()
        }
    }
}
