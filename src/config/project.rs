//! Per-project autosave settings stored in `autosave.toml` next to the project file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::constants::{DEFAULT_FILE_LOCATION, DEFAULT_FILE_NAME_CUSTOM, PROJECT_SETTINGS_FILE};
use crate::core::AutosaveError;
use crate::naming::FileNameMode;
use crate::render::FileFormatChoice;

/// Autosave settings for one project.
///
/// ```toml
/// enable_autosave_render = true
/// file_location = "//renders/{camera}"
/// file_name_type = "CUSTOM"
/// file_name_custom = "{project}-{serial}-{renderengine}-{rendertime}"
/// file_format = "PNG"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSettings {
    pub enable_autosave_render: bool,
    /// Target folder; one character or less means `<project dir>/<project>`
    pub file_location: String,
    pub file_name_type: FileNameMode,
    pub file_name_custom: String,
    pub file_format: FileFormatChoice,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            enable_autosave_render: true,
            file_location: DEFAULT_FILE_LOCATION.to_string(),
            file_name_type: FileNameMode::Serial,
            file_name_custom: DEFAULT_FILE_NAME_CUSTOM.to_string(),
            file_format: FileFormatChoice::Jpeg,
        }
    }
}

impl ProjectSettings {
    #[must_use]
    pub fn path_for(project_dir: &Path) -> PathBuf {
        project_dir.join(PROJECT_SETTINGS_FILE)
    }

    /// Load the settings beside a project, falling back to defaults.
    pub async fn load_for(project_dir: &Path) -> Result<Self> {
        let path = Self::path_for(project_dir);
        if !path.exists() {
            debug!("No project settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read project settings {}", path.display()))?;
        let settings = toml::from_str(&content).map_err(|e| AutosaveError::ConfigParseError {
            file: path.display().to_string(),
            reason: e.message().to_string(),
        })?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_defaults_when_missing() {
        let temp = TempDir::new().unwrap();
        let settings = ProjectSettings::load_for(temp.path()).await.unwrap();
        assert!(settings.enable_autosave_render);
        assert_eq!(settings.file_location, "/");
        assert_eq!(settings.file_name_custom, "{project}-{serial}-{renderengine}-{rendertime}");
        assert_eq!(settings.file_format, FileFormatChoice::Jpeg);
    }

    #[tokio::test]
    async fn test_load_overrides() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            ProjectSettings::path_for(temp.path()),
            "file_location = \"//out\"\nfile_name_type = \"DATE\"\nfile_format = \"SCENE\"\n",
        )
        .unwrap();
        let settings = ProjectSettings::load_for(temp.path()).await.unwrap();
        assert_eq!(settings.file_location, "//out");
        assert_eq!(settings.file_name_type, FileNameMode::Date);
        assert_eq!(settings.file_format, FileFormatChoice::Scene);
        assert!(settings.enable_autosave_render);
    }
}
