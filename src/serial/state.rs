//! TOML-backed serial stores and the lock that guards them.
//!
//! Per-project counters live next to the project file in
//! `<project>.autosave-state.toml`; the global override counter lives in
//! `~/.autosave-render/state.toml`. A missing file reads as all-zero.
//!
//! ```toml
//! total_render_time = 1234.56
//!
//! [serials]
//! output_file_serial = 3
//! file_serial = 12
//! ```

use anyhow::{Context, Result};
use fs4::fs_std::FileExt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::SerialStore;
use crate::constants::{GLOBAL_DIR_NAME, GLOBAL_STATE_FILE, PROJECT_STATE_SUFFIX};
use crate::core::AutosaveError;
use crate::render::round_hundredths;
use crate::utils::{ensure_dir, get_home_dir, write_toml_file};

/// Counters and accumulated render time for one project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectState {
    /// Seconds rendered over the project's lifetime
    pub total_render_time: f64,
    pub serials: BTreeMap<String, u64>,
}

impl ProjectState {
    /// State file path for a project file, e.g. `shot.blend -> shot.autosave-state.toml`.
    #[must_use]
    pub fn path_for(project_dir: &Path, project_name: &str) -> PathBuf {
        project_dir.join(format!("{project_name}{PROJECT_STATE_SUFFIX}"))
    }

    /// Load from `path`, or return the default state when it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        load_state(path)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        debug!("Saving project state to {}", path.display());
        write_toml_file(path, self)
    }

    /// Add `seconds` to the lifetime total and return the new total.
    pub fn add_render_time(&mut self, seconds: f64) -> f64 {
        if seconds.is_finite() && seconds > 0.0 {
            self.total_render_time = round_hundredths(self.total_render_time + seconds);
        }
        self.total_render_time
    }
}

impl SerialStore for ProjectState {
    fn get(&self, key: &str) -> Option<u64> {
        self.serials.get(key).copied()
    }

    fn set(&mut self, key: &str, value: u64) {
        self.serials.insert(key.to_string(), value);
    }
}

/// Counters shared by every project on this machine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalState {
    pub serials: BTreeMap<String, u64>,
}

impl GlobalState {
    /// `~/.autosave-render/state.toml`
    pub fn default_path() -> Result<PathBuf, AutosaveError> {
        Ok(get_home_dir()?.join(GLOBAL_DIR_NAME).join(GLOBAL_STATE_FILE))
    }

    pub fn load(path: &Path) -> Result<Self> {
        load_state(path)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        debug!("Saving global state to {}", path.display());
        write_toml_file(path, self)
    }
}

impl SerialStore for GlobalState {
    fn get(&self, key: &str) -> Option<u64> {
        self.serials.get(key).copied()
    }

    fn set(&mut self, key: &str, value: u64) {
        self.serials.insert(key.to_string(), value);
    }
}

fn load_state<T>(path: &Path) -> Result<T>
where
    T: Default + serde::de::DeserializeOwned,
{
    if !path.exists() {
        debug!("No state file at {}, starting from zero", path.display());
        return Ok(T::default());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read state file: {}", path.display()))?;
    let state = toml::from_str(&content).map_err(|e| AutosaveError::StateParseError {
        file: path.display().to_string(),
        reason: e.message().to_string(),
    })?;
    Ok(state)
}

/// Exclusive advisory lock held around one read-modify-write of a state file.
///
/// The lock file sits next to the state file (`<state>.lock`) and is released
/// when the guard is dropped.
pub struct StateLock {
    file: File,
    path: PathBuf,
}

impl StateLock {
    /// Block until the lock for `state_path` is acquired.
    ///
    /// The blocking wait runs on tokio's blocking pool.
    pub async fn acquire(state_path: &Path) -> Result<Self> {
        let lock_path = lock_path_for(state_path);
        if let Some(parent) = lock_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            ensure_dir(parent)?;
        }

        let path = lock_path.clone();
        let file = tokio::task::spawn_blocking(move || -> Result<File> {
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&path)
                .map_err(|e| AutosaveError::StateLockFailed {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })?;
            file.lock_exclusive().map_err(|e| AutosaveError::StateLockFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
            Ok(file)
        })
        .await
        .context("Failed to spawn blocking task for state lock")??;

        debug!("Acquired state lock {}", lock_path.display());
        Ok(Self {
            file,
            path: lock_path,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StateLock {
    #[allow(unstable_name_collisions)]
    fn drop(&mut self) {
        if let Err(e) = self.file.unlock() {
            tracing::warn!("Failed to unlock {}: {}", self.path.display(), e);
        }
    }
}

fn lock_path_for(state_path: &Path) -> PathBuf {
    let mut name = state_path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".lock");
    state_path.with_file_name(name)
}
