//! File system helpers: directory creation and atomic writes.
//!
//! State files and the render time log are rewritten on every render, so a
//! crash in the middle of a write must never leave a truncated file behind.
//! Writes go to a temporary file in the same directory which is then renamed
//! over the target.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use crate::core::AutosaveError;

/// Create `path` and its parents if missing.
///
/// Fails with [`AutosaveError::DirectoryCreationFailed`] when creation fails
/// or when the path exists but is not a directory.
pub fn ensure_dir(path: &Path) -> Result<(), AutosaveError> {
    if path.is_dir() {
        return Ok(());
    }
    if path.exists() {
        return Err(AutosaveError::DirectoryCreationFailed {
            path: path.display().to_string(),
            reason: "path exists but is not a directory".to_string(),
        });
    }
    std::fs::create_dir_all(path).map_err(|e| AutosaveError::DirectoryCreationFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Write `content` to `path` atomically, creating the parent directory.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    ensure_dir(parent)?;

    let mut temp = NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create temp file in {}", parent.display()))?;
    temp.write_all(content)
        .with_context(|| format!("Failed to write temp file for {}", path.display()))?;
    temp.as_file()
        .sync_all()
        .with_context(|| format!("Failed to sync temp file for {}", path.display()))?;
    temp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to move temp file into place at {}", path.display()))?;

    Ok(())
}

/// Serialize `data` as pretty TOML and write it atomically.
pub fn write_toml_file<T>(path: &Path, data: &T) -> Result<()>
where
    T: serde::Serialize,
{
    let content = toml::to_string_pretty(data)
        .with_context(|| format!("Failed to serialize {}", path.display()))?;
    atomic_write(path, content.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_dir_creates_nested() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a").join("b").join("c");
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
        // Second call is a no-op
        ensure_dir(&nested).unwrap();
    }

    #[test]
    fn test_ensure_dir_rejects_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("file");
        std::fs::write(&file, "x").unwrap();
        let err = ensure_dir(&file).unwrap_err();
        assert!(matches!(err, AutosaveError::DirectoryCreationFailed { .. }));
    }

    #[test]
    fn test_atomic_write_replaces_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("sub").join("state.toml");
        atomic_write(&path, b"first").unwrap();
        atomic_write(&path, b"second").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");

        // No temp files left behind
        let leftovers = std::fs::read_dir(path.parent().unwrap()).unwrap().count();
        assert_eq!(leftovers, 1);
    }
}
