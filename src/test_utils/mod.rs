//! Test utilities for autosave-render
//!
//! Helpers shared by unit tests and the integration suite:
//! - [`init_test_logging`] - opt-in tracing output for a test run
//! - [`SceneFixture`] - build and write scene snapshots for a temporary project
//!
//! # Example
//!
//! ```rust,no_run
//! use autosave_render::test_utils::SceneFixture;
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! let scene_file = SceneFixture::new(temp.path(), "shot")
//!     .camera("Cam")
//!     .render_output("//frames/{camera}-{serial}")
//!     .write()
//!     .unwrap();
//! ```

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::render::{EngineSettings, ImageFormat};
use crate::scene::{FileOutputNode, SceneSnapshot};

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Uses `level` when given, otherwise `RUST_LOG`; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=autosave_render=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}

/// Builder for a scene snapshot belonging to `<dir>/<project>.blend`.
///
/// The project file itself is never created; only its path matters.
#[derive(Debug, Clone)]
pub struct SceneFixture {
    dir: PathBuf,
    scene: SceneSnapshot,
}

impl SceneFixture {
    pub fn new(dir: &Path, project: &str) -> Self {
        let scene = SceneSnapshot {
            blend_file: Some(dir.join(format!("{project}.blend"))),
            scene: "Scene".to_string(),
            collection: "Collection".to_string(),
            camera: "Camera".to_string(),
            frame: 1,
            frame_start: 1,
            frame_end: 250,
            app_version: "4.2.0".to_string(),
            host: Some("testhost".to_string()),
            ..SceneSnapshot::default()
        };
        Self {
            dir: dir.to_path_buf(),
            scene,
        }
    }

    /// Snapshot of a project that was never saved.
    pub fn unsaved(dir: &Path) -> Self {
        let mut fixture = Self::new(dir, "untitled");
        fixture.scene.blend_file = None;
        fixture
    }

    #[must_use]
    pub fn camera(mut self, camera: &str) -> Self {
        self.scene.camera = camera.to_string();
        self
    }

    #[must_use]
    pub fn frame(mut self, frame: i64) -> Self {
        self.scene.frame = frame;
        self
    }

    #[must_use]
    pub fn engine(mut self, engine: EngineSettings) -> Self {
        self.scene.engine = engine;
        self
    }

    #[must_use]
    pub fn image_format(mut self, format: ImageFormat) -> Self {
        self.scene.image_format = format;
        self
    }

    #[must_use]
    pub fn render_output(mut self, path: &str) -> Self {
        self.scene.outputs.render_output = path.to_string();
        self
    }

    #[must_use]
    pub fn file_output_node(mut self, name: &str, base_path: &str, slots: &[&str]) -> Self {
        self.scene.outputs.file_output_nodes.push(FileOutputNode {
            name: name.to_string(),
            base_path: base_path.to_string(),
            slots: slots.iter().map(|slot| (*slot).to_string()).collect(),
        });
        self
    }

    /// The snapshot as built so far.
    pub fn snapshot(&self) -> &SceneSnapshot {
        &self.scene
    }

    /// Write the snapshot as `scene.json` in the fixture directory.
    pub fn write(&self) -> Result<PathBuf> {
        let path = self.dir.join("scene.json");
        let content =
            serde_json::to_string_pretty(&self.scene).context("Failed to serialize scene")?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write scene fixture {}", path.display()))?;
        Ok(path)
    }
}
