//! Platform helpers: host identification and path resolution.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::constants::PROJECT_RELATIVE_PREFIX;
use crate::core::AutosaveError;

/// The user's home directory.
pub fn get_home_dir() -> Result<PathBuf, AutosaveError> {
    dirs::home_dir().ok_or_else(|| AutosaveError::DirectoryUnavailable {
        kind: "home".to_string(),
    })
}

/// Short host name: everything before the first `.` of the system host name.
#[must_use]
pub fn host_name() -> String {
    let full = gethostname::gethostname().to_string_lossy().into_owned();
    full.split('.').next().unwrap_or_default().to_string()
}

/// Operating system and architecture, e.g. `Linux-x86_64` or `macOS-aarch64`.
#[must_use]
pub fn platform_name() -> String {
    let os = match std::env::consts::OS {
        "linux" => "Linux",
        "macos" => "macOS",
        "windows" => "Windows",
        "freebsd" => "FreeBSD",
        other => other,
    };
    format!("{os}-{}", std::env::consts::ARCH)
}

/// Expand `~` and environment variables in a path.
pub fn resolve_path(path: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(path).with_context(|| {
        format!(
            "Failed to expand environment variables in path: {path}\n\n\
            Use $VAR or ${{VAR}} for variables that are defined in the environment"
        )
    })?;
    Ok(PathBuf::from(expanded.as_ref()))
}

/// Expand `~` and environment variables in a user-written location template.
///
/// Runs before `{variable}` substitution so scene values are never expanded.
/// A template that cannot be expanded is kept as written.
#[must_use]
pub fn expand_env(template: &str) -> String {
    match resolve_path(template) {
        Ok(expanded) => expanded.to_string_lossy().into_owned(),
        Err(e) => {
            warn!("Keeping location as written: {e:#}");
            template.to_string()
        }
    }
}

/// Anchor an output location at the project directory the way the host does.
///
/// A leading `//` is relative to the project directory, absolute paths are
/// kept and other relative paths are joined to `project_dir`. No expansion
/// happens here.
#[must_use]
pub fn resolve_location(location: &str, project_dir: &Path) -> PathBuf {
    if let Some(relative) = location.strip_prefix(PROJECT_RELATIVE_PREFIX) {
        return project_dir.join(relative);
    }
    let path = Path::new(location);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_dir.join(path)
    }
}
