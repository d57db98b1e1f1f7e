//! Configuration for autosave-render
//!
//! Two layers of settings decide where and how a finished render is saved:
//!
//! 1. **Preferences** (`~/.autosave-render/config.toml`) - user-wide, see [`Preferences`]
//! 2. **Project settings** (`autosave.toml` next to the project file) - see [`ProjectSettings`]
//!
//! Each global `*_override` flag replaces the matching project setting.
//! [`AutosaveSettings::resolve`] folds both layers into the values a render
//! cycle actually uses, including which serial counter numbers the location
//! and the file name.

mod global;
mod project;

pub use global::Preferences;
pub use project::ProjectSettings;

use crate::naming::FileNameMode;
use crate::render::FileFormatChoice;
use crate::serial::SerialScope;

/// Autosave settings after applying global overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutosaveSettings {
    pub enabled: bool,
    pub location: String,
    /// Counter used by `{serial}` in the location
    pub location_scope: SerialScope,
    pub name_mode: FileNameMode,
    pub name_custom: String,
    /// Counter used by `{serial}` in the file name
    pub name_scope: SerialScope,
    pub format: FileFormatChoice,
}

impl AutosaveSettings {
    #[must_use]
    pub fn resolve(preferences: &Preferences, project: &ProjectSettings) -> Self {
        let (location, location_scope) = if preferences.file_location_override {
            (preferences.file_location_global.clone(), SerialScope::Global)
        } else {
            (project.file_location.clone(), SerialScope::Project)
        };

        let (name_mode, name_custom, name_scope) = if preferences.file_name_override {
            (
                preferences.file_name_type_global,
                preferences.file_name_custom_global.clone(),
                SerialScope::Global,
            )
        } else {
            (project.file_name_type, project.file_name_custom.clone(), SerialScope::Project)
        };

        let format = if preferences.file_format_override {
            preferences.file_format_global
        } else {
            project.file_format
        };

        Self {
            enabled: project.enable_autosave_render || preferences.enable_autosave_render_override,
            location,
            location_scope,
            name_mode,
            name_custom,
            name_scope,
            format,
        }
    }
}
