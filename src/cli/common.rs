//! Helpers shared by the subcommands: locating files and loading state.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::config::{Preferences, ProjectSettings};
use crate::constants::GLOBAL_STATE_FILE;
use crate::core::AutosaveError;
use crate::scene::SceneSnapshot;
use crate::serial::{GlobalState, ProjectState};

/// Where the user-wide files live for this invocation.
///
/// With `--config <FILE>` the global state sits next to that file, which keeps
/// scripted and test runs away from the real home directory.
#[derive(Debug, Clone)]
pub struct GlobalPaths {
    pub config: PathBuf,
    pub state: PathBuf,
}

impl GlobalPaths {
    pub fn resolve(config_path: Option<&Path>) -> Result<Self> {
        match config_path {
            Some(config) => {
                let dir = config.parent().unwrap_or_else(|| Path::new("."));
                Ok(Self {
                    config: config.to_path_buf(),
                    state: dir.join(GLOBAL_STATE_FILE),
                })
            }
            None => Ok(Self {
                config: Preferences::default_path()?,
                state: GlobalState::default_path()?,
            }),
        }
    }

    pub async fn preferences(&self) -> Result<Preferences> {
        Preferences::load_with_optional(Some(self.config.clone())).await
    }
}

/// Load the scene snapshot named on the command line, or an empty one.
pub fn load_scene(path: Option<&Path>) -> Result<SceneSnapshot> {
    match path {
        Some(path) => SceneSnapshot::load(path),
        None => Ok(SceneSnapshot::default()),
    }
}

/// Project directory and name; fails for unsaved projects.
pub fn project_location(scene: &SceneSnapshot) -> Result<(PathBuf, String), AutosaveError> {
    let dir = scene.project_dir().ok_or(AutosaveError::ProjectNotSaved)?;
    if !scene.is_saved() {
        return Err(AutosaveError::ProjectNotSaved);
    }
    Ok((dir.to_path_buf(), scene.project_name()))
}

/// Project state file for the scene's project.
pub fn project_state_path(scene: &SceneSnapshot) -> Result<PathBuf, AutosaveError> {
    let (dir, name) = project_location(scene)?;
    Ok(ProjectState::path_for(&dir, &name))
}

/// Project settings beside the scene's project file.
pub async fn project_settings(scene: &SceneSnapshot) -> Result<ProjectSettings> {
    let (dir, _) = project_location(scene)?;
    ProjectSettings::load_for(&dir)
        .await
        .with_context(|| format!("Failed to load project settings in {}", dir.display()))
}

/// Parse a render time given either as seconds (`12.5`) or `H:MM:SS.cc`.
pub fn parse_render_time(value: &str) -> Result<f64, AutosaveError> {
    let seconds = if value.contains(':') {
        crate::render::readable_to_seconds(value)?
    } else {
        value.trim().parse::<f64>().map_err(|_| AutosaveError::InvalidRenderTime {
            value: value.to_string(),
        })?
    };
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(AutosaveError::InvalidRenderTime {
            value: value.to_string(),
        });
    }
    Ok(seconds)
}
