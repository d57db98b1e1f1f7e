//! Shared helpers for the integration suite.

#![allow(dead_code)]

use assert_cmd::Command;
use autosave_render::test_utils::SceneFixture;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary home with a project directory and its own preferences file.
///
/// Every command runs with `--config` pointing inside the temp dir, so the
/// global state never touches the real home directory.
pub struct TestProject {
    _temp_dir: TempDir, // Keep alive for RAII cleanup
    root: PathBuf,
    project_dir: PathBuf,
    config_path: PathBuf,
}

impl TestProject {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let root = temp_dir.path().to_path_buf();
        let project_dir = root.join("project");
        fs::create_dir_all(&project_dir).expect("create project dir");

        Self {
            config_path: root.join(".autosave-render").join("config.toml"),
            _temp_dir: temp_dir,
            root,
            project_dir,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn project_path(&self) -> &Path {
        &self.project_dir
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Scene fixture for `<project>/shot.blend`.
    pub fn scene(&self) -> SceneFixture {
        SceneFixture::new(&self.project_dir, "shot")
    }

    /// Write the preferences file.
    pub fn write_preferences(&self, content: &str) {
        let parent = self.config_path.parent().expect("config has a parent");
        fs::create_dir_all(parent).expect("create config dir");
        fs::write(&self.config_path, content).expect("write preferences");
    }

    /// Write `autosave.toml` next to the project file.
    pub fn write_project_settings(&self, content: &str) {
        fs::write(self.project_dir.join("autosave.toml"), content).expect("write project settings");
    }

    /// The binary, configured for this project.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("autosave-render").expect("binary is built");
        cmd.current_dir(&self.project_dir)
            .env("HOME", &self.root)
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .arg("--config")
            .arg(&self.config_path);
        cmd
    }

    /// Run the binary and return stdout, asserting success.
    pub fn run(&self, args: &[&str]) -> String {
        let output = self.cmd().args(args).output().expect("run binary");
        assert!(
            output.status.success(),
            "Command {:?} failed with code {:?}\nStderr: {}",
            args,
            output.status.code(),
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).into_owned()
    }
}

/// Path as a `&str` argument.
pub fn arg(path: &Path) -> &str {
    path.to_str().expect("temp paths are valid UTF-8")
}

/// Create empty files named `names` in `dir`.
pub fn touch_all(dir: &Path, names: &[&str]) {
    fs::create_dir_all(dir).expect("create dir");
    for name in names {
        fs::write(dir.join(name), b"").expect("touch file");
    }
}
