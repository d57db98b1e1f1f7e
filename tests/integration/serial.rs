use predicates::prelude::*;

use crate::common::{TestProject, arg};

#[test]
fn test_serial_show_defaults_to_zero() {
    let project = TestProject::new();
    let scene = project.scene().write().unwrap();

    let stdout = project.run(&["serial", "show", "--scene", arg(&scene)]);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["output   0000", "project  0000", "global   0000"]);
}

#[test]
fn test_serial_set_and_reset_project_counter() {
    let project = TestProject::new();
    let scene = project.scene().write().unwrap();

    project
        .cmd()
        .args(["serial", "set", "120", "--scene", arg(&scene)])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set project serial to 0120"));

    let stdout = project.run(&["serial", "show", "--scene", arg(&scene), "--scope", "project"]);
    assert_eq!(stdout.trim(), "project  0120");
    assert!(project.project_path().join("shot.autosave-state.toml").exists());

    project.run(&["serial", "reset", "--scene", arg(&scene)]);
    let stdout = project.run(&["serial", "show", "--scene", arg(&scene), "--scope", "project"]);
    assert_eq!(stdout.trim(), "project  0000");
}

#[test]
fn test_serial_global_counter_without_scene() {
    let project = TestProject::new();

    project.run(&["serial", "set", "42", "--scope", "global"]);
    let stdout = project.run(&["serial", "show", "--scope", "global"]);
    assert_eq!(stdout.trim(), "global   0042");

    let state = project.config_path().with_file_name("state.toml");
    assert!(state.exists(), "global state should sit beside the preferences");
}

#[test]
fn test_serial_scopes_are_independent() {
    let project = TestProject::new();
    let scene = project.scene().write().unwrap();

    project.run(&["serial", "set", "5", "--scene", arg(&scene), "--scope", "output"]);
    project.run(&["serial", "set", "9", "--scope", "global"]);

    let stdout = project.run(&["serial", "show", "--scene", arg(&scene)]);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["output   0005", "project  0000", "global   0009"]);
}

#[test]
fn test_serial_project_scope_requires_scene() {
    let project = TestProject::new();

    project
        .cmd()
        .args(["serial", "set", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--scene is required for the project counter"));

    project
        .cmd()
        .args(["serial", "show", "--scope", "output"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--scene is required for the output counter"));
}

#[test]
fn test_serial_rejects_unknown_scope() {
    let project = TestProject::new();
    project
        .cmd()
        .args(["serial", "show", "--scope", "weekly"])
        .assert()
        .failure();
}
