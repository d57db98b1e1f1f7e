//! User-wide preferences stored in `~/.autosave-render/config.toml`.
//!
//! Preferences control the start-of-render path rewriting, the external
//! render time log, and the global overrides that replace per-project
//! autosave settings. Every key is optional; missing keys take the defaults
//! shown below.
//!
//! ```toml
//! filter_output_file_path = true
//! filter_output_file_nodes = true
//! external_render_time = false
//! external_log_name = "{project}-TotalRenderTime.txt"
//!
//! enable_autosave_render_override = false
//! file_location_override = false
//! file_location_global = "/"
//! file_name_override = false
//! file_name_type_global = "SERIAL"
//! file_name_custom_global = "{project}-{serial}"
//! file_format_override = false
//! file_format_global = "JPEG"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::constants::{
    DEFAULT_FILE_LOCATION, DEFAULT_FILE_NAME_CUSTOM_GLOBAL, DEFAULT_LOG_NAME, GLOBAL_CONFIG_FILE,
    GLOBAL_DIR_NAME,
};
use crate::core::AutosaveError;
use crate::naming::FileNameMode;
use crate::render::FileFormatChoice;
use crate::utils::{atomic_write, get_home_dir};

/// Global preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Expand variables in the render output path when a render starts
    pub filter_output_file_path: bool,
    /// Expand variables in compositor file output nodes when a render starts
    pub filter_output_file_nodes: bool,

    /// Keep a running total of render time in a file next to the project
    pub external_render_time: bool,
    /// Name of that file; `{project}` is replaced with the project name
    pub external_log_name: String,

    /// Autosave every render, even for projects that disabled it
    pub enable_autosave_render_override: bool,

    /// Use `file_location_global` instead of the project's location
    pub file_location_override: bool,
    pub file_location_global: String,

    /// Use the global naming mode and template instead of the project's
    pub file_name_override: bool,
    pub file_name_type_global: FileNameMode,
    pub file_name_custom_global: String,

    /// Use `file_format_global` instead of the project's format
    pub file_format_override: bool,
    pub file_format_global: FileFormatChoice,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            filter_output_file_path: true,
            filter_output_file_nodes: true,
            external_render_time: false,
            external_log_name: DEFAULT_LOG_NAME.to_string(),
            enable_autosave_render_override: false,
            file_location_override: false,
            file_location_global: DEFAULT_FILE_LOCATION.to_string(),
            file_name_override: false,
            file_name_type_global: FileNameMode::Serial,
            file_name_custom_global: DEFAULT_FILE_NAME_CUSTOM_GLOBAL.to_string(),
            file_format_override: false,
            file_format_global: FileFormatChoice::Jpeg,
        }
    }
}

impl Preferences {
    /// Load from the default location, or defaults when the file is missing.
    pub async fn load() -> Result<Self> {
        Self::load_with_optional(None).await
    }

    /// Load from `path` if given, the default location otherwise.
    ///
    /// A missing file yields the defaults; an unreadable or invalid one is an error.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => Self::default_path()?,
        };
        if path.exists() {
            Self::load_from(&path).await
        } else {
            debug!("No preferences at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read preferences from {}", path.display()))?;

        let preferences = toml::from_str(&content).map_err(|e| AutosaveError::ConfigParseError {
            file: path.display().to_string(),
            reason: e.message().to_string(),
        })?;
        debug!("Loaded preferences from {}", path.display());
        Ok(preferences)
    }

    /// Save to the default location.
    pub async fn save(&self) -> Result<()> {
        let path = Self::default_path()?;
        self.save_to(&path).await
    }

    /// Save to `path`, creating parent directories as needed.
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize preferences")?;
        let path_buf = path.to_path_buf();
        tokio::task::spawn_blocking(move || atomic_write(&path_buf, content.as_bytes()))
            .await
            .context("Failed to spawn blocking task for preferences write")?
            .with_context(|| format!("Failed to write preferences to {}", path.display()))
    }

    /// `~/.autosave-render/config.toml`
    pub fn default_path() -> Result<PathBuf, AutosaveError> {
        Ok(get_home_dir()?.join(GLOBAL_DIR_NAME).join(GLOBAL_CONFIG_FILE))
    }

    /// Preferences written by `config init`: the defaults with the render time log on.
    #[must_use]
    pub fn init_example() -> Self {
        Self {
            external_render_time: true,
            ..Self::default()
        }
    }
}
