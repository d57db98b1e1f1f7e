use predicates::prelude::*;

use crate::common::{TestProject, arg};

#[test]
fn test_render_time_add_accumulates_in_log() {
    let project = TestProject::new();
    let scene = project.scene().write().unwrap();

    project
        .cmd()
        .args(["render-time", "add", "95.5", "--scene", arg(&scene)])
        .assert()
        .success()
        .stdout(predicate::str::contains("now at 0:01:35.50"));

    project
        .cmd()
        .args(["render-time", "add", "1:00:00", "--scene", arg(&scene)])
        .assert()
        .success()
        .stdout(predicate::str::contains("now at 1:01:35.50"));

    let log = std::fs::read_to_string(project.project_path().join("shot-TotalRenderTime.txt")).unwrap();
    assert_eq!(log.trim(), "Total Render Time: 1:01:35.50");
}

#[test]
fn test_render_time_log_name_from_preferences() {
    let project = TestProject::new();
    project.write_preferences("external_log_name = \"render-log.txt\"\n");
    let scene = project.scene().write().unwrap();

    project.run(&["render-time", "add", "10", "--scene", arg(&scene)]);
    assert!(project.project_path().join("render-log.txt").exists());
}

#[test]
fn test_render_time_show() {
    let project = TestProject::new();
    let scene = project.scene().write().unwrap();

    project
        .cmd()
        .args(["render-time", "show", "--scene", arg(&scene)])
        .assert()
        .success()
        .stdout(predicate::str::contains("Project total: 0:00:00.00"))
        .stdout(predicate::str::contains("no log yet"));

    project.run(&["finish", "--scene", arg(&scene), "--render-time", "90"]);
    project.run(&["render-time", "add", "30", "--scene", arg(&scene)]);

    project
        .cmd()
        .args(["render-time", "show", "--scene", arg(&scene)])
        .assert()
        .success()
        .stdout(predicate::str::contains("Render time for shot"))
        .stdout(predicate::str::contains("Project total: 0:01:30.00"))
        .stdout(predicate::str::contains("Log total:     0:00:30.00"));
}

#[test]
fn test_render_time_requires_saved_project() {
    let project = TestProject::new();
    let scene = autosave_render::test_utils::SceneFixture::unsaved(project.project_path())
        .write()
        .unwrap();

    project
        .cmd()
        .args(["render-time", "add", "10", "--scene", arg(&scene)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("has not been saved"));
}

#[test]
fn test_render_time_estimate() {
    let project = TestProject::new();

    let stdout = project.run(&[
        "render-time",
        "estimate",
        "--elapsed",
        "100",
        "--start",
        "1",
        "--current",
        "10",
        "--end",
        "20",
    ]);
    assert_eq!(stdout.trim(), "0:01:40.00");

    let stdout = project.run(&[
        "render-time",
        "estimate",
        "--elapsed",
        "100",
        "--start",
        "1",
        "--current",
        "20",
        "--end",
        "20",
    ]);
    assert_eq!(stdout.trim(), "No frames left to estimate");
}
