//! Snapshot of the host state a render cycle works from.
//!
//! The host (a bridge script running inside Blender, or a farm worker that
//! inspected the .blend file) writes the snapshot as TOML or JSON. Every
//! field has a default so partial snapshots are accepted.
//!
//! ```toml
//! blend_file = "/projects/forest/forest.blend"
//! scene = "Scene"
//! camera = "Camera.001"
//! frame = 12
//! image_format = "PNG"
//! render_output = "//frames/{camera}/{serial}-"
//!
//! [engine]
//! engine = "cycles"
//! device = "GPU"
//! samples = 512
//!
//! [[file_output_nodes]]
//! name = "File Output"
//! base_path = "//passes/{scene}"
//! slots = ["depth-{frame}", "normal-{frame}"]
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::AutosaveError;
use crate::render::{EngineSettings, ImageFormat};

/// A compositor File Output node: a base path plus one sub-path per slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileOutputNode {
    pub name: String,
    #[serde(default)]
    pub base_path: String,
    #[serde(default)]
    pub slots: Vec<String>,
}

/// Output paths the host writes render results to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputTargets {
    /// `scene.render.filepath`
    #[serde(default)]
    pub render_output: String,
    /// Compositor file output nodes; only present when compositing is enabled
    #[serde(default)]
    pub file_output_nodes: Vec<FileOutputNode>,
}

/// Host state captured at render time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSnapshot {
    /// Path of the project (.blend) file; `None` while unsaved
    pub blend_file: Option<PathBuf>,
    pub scene: String,
    pub collection: String,
    pub camera: String,
    /// Active object, if any
    pub item: Option<String>,
    /// Active material of the active object, if any
    pub material: Option<String>,
    /// Node currently being rendered by batch tools, if any
    pub node: Option<String>,
    pub engine: EngineSettings,
    pub frame: i64,
    pub frame_start: i64,
    pub frame_end: i64,
    /// Index within a batch render, when one is running
    pub batch_index: Option<u64>,
    /// Host application version, e.g. `4.2.1-release`
    pub app_version: String,
    /// Overrides the detected host name
    pub host: Option<String>,
    /// Scene output format
    pub image_format: ImageFormat,
    #[serde(flatten)]
    pub outputs: OutputTargets,
}

impl SceneSnapshot {
    /// Load a snapshot from a `.json` file, or TOML for any other extension.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene snapshot {}", path.display()))?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let parsed = if is_json {
            serde_json::from_str(&content).map_err(|e| e.to_string())
        } else {
            toml::from_str(&content).map_err(|e| e.to_string())
        };

        parsed.map_err(|reason| {
            AutosaveError::SnapshotParseError {
                file: path.display().to_string(),
                reason,
            }
            .into()
        })
    }

    /// File stem of the project file; empty while the project is unsaved.
    #[must_use]
    pub fn project_name(&self) -> String {
        self.blend_file
            .as_deref()
            .and_then(Path::file_stem)
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Directory holding the project file.
    #[must_use]
    pub fn project_dir(&self) -> Option<&Path> {
        self.blend_file.as_deref().and_then(Path::parent)
    }

    /// Whether the project has been saved to disk.
    #[must_use]
    pub fn is_saved(&self) -> bool {
        self.blend_file.as_ref().is_some_and(|path| !path.as_os_str().is_empty())
    }
}
