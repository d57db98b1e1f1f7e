//! Directory-scan serial numbers.
//!
//! The "project name + serial" naming mode does not use a persisted counter.
//! Instead the target directory is listed and the next number is derived from
//! the images already saved there, so deleting the newest image frees its
//! number again. Nothing here touches [`crate::serial`] counters.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

use crate::core::AutosaveError;
use crate::serial::format_serial;

/// Trailing run of four or more digits.
static SUFFIX_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4,}$").expect("suffix pattern is valid"));

/// Highest numeric suffix among the project's images in `dir`.
///
/// An entry counts when its name starts with `project`, its extension is one of
/// `extensions` (compared case-insensitively), and the part of its stem after
/// the last occurrence of `project` ends in at least four digits. Digits
/// elsewhere in the name are ignored.
///
/// # Errors
///
/// [`AutosaveError::DirectoryUnreadable`] when `dir` cannot be listed. The
/// probe does not create directories.
pub fn highest_serial(
    dir: &Path,
    project: &str,
    extensions: &[&str],
) -> Result<Option<u64>, AutosaveError> {
    let unreadable = |e: std::io::Error| AutosaveError::DirectoryUnreadable {
        path: dir.display().to_string(),
        reason: e.to_string(),
    };

    let mut highest: Option<u64> = None;
    for entry in std::fs::read_dir(dir).map_err(unreadable)? {
        let entry = entry.map_err(unreadable)?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if let Some(serial) = serial_from_name(name, project, extensions) {
            debug!("Found serial {} in {}", serial, name);
            highest = highest.max(Some(serial));
        }
    }
    Ok(highest)
}

/// Next free serial in `dir`, formatted for a file name.
///
/// Returns `max + 1` padded to four digits, or `0001` when no image matches.
pub fn next_free_serial(
    dir: &Path,
    project: &str,
    extensions: &[&str],
) -> Result<String, AutosaveError> {
    let next = match highest_serial(dir, project, extensions)? {
        Some(max) => max.saturating_add(1),
        None => 1,
    };
    let serial = format_serial(next);
    debug!("Next free serial in {} for '{}': {}", dir.display(), project, serial);
    Ok(serial)
}

fn serial_from_name(name: &str, project: &str, extensions: &[&str]) -> Option<u64> {
    if !name.starts_with(project) {
        return None;
    }
    let (stem, extension) = name.rsplit_once('.')?;
    if !extensions.iter().any(|known| known.eq_ignore_ascii_case(extension)) {
        return None;
    }
    let tail = if project.is_empty() {
        stem
    } else {
        stem.rsplit(project).next().unwrap_or(stem)
    };
    // Suffixes too large for u64 are not serials we could have written
    SUFFIX_PATTERN.find(tail)?.as_str().parse().ok()
}
