use predicates::prelude::*;

use crate::common::{TestProject, arg};

#[test]
fn test_expand_project_variables_and_serial() {
    let project = TestProject::new();
    let scene = project.scene().camera("Cam").write().unwrap();

    let stdout = project.run(&["expand", "{project}-{serial}-{camera}", "--scene", arg(&scene), "--serial", "7"]);
    assert_eq!(stdout.trim(), "shot-0007-Cam");
}

#[test]
fn test_expand_leaves_unknown_and_unavailable_tokens() {
    let project = TestProject::new();
    let scene = project.scene().write().unwrap();

    let stdout = project.run(&["expand", "{nope}/{project}-{serial}-{duration}", "--scene", arg(&scene)]);
    assert_eq!(stdout.trim(), "{nope}/shot-{serial}-{duration}");
}

#[test]
fn test_expand_render_time_variables() {
    let project = TestProject::new();

    let stdout = project.run(&["expand", "{duration} {rendertime} {rtime}", "--render-time", "3725.5"]);
    assert_eq!(stdout.trim(), "3725.5s 3725.5s 1-02-05");

    let stdout = project.run(&["expand", "{rtime}", "--render-time", "0:00:12.50"]);
    assert_eq!(stdout.trim(), "0-00-12");
}

#[test]
fn test_expand_rejects_bad_render_time() {
    let project = TestProject::new();
    project
        .cmd()
        .args(["expand", "{duration}", "--render-time", "soon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid render time 'soon'"));
}

#[test]
fn test_expand_host_override_from_scene() {
    let project = TestProject::new();
    let scene = project.scene().write().unwrap();

    let stdout = project.run(&["expand", "{host}", "--scene", arg(&scene)]);
    assert_eq!(stdout.trim(), "testhost");
}

#[test]
fn test_check_reports_unknown_with_suggestion() {
    let project = TestProject::new();
    project
        .cmd()
        .args(["check", "{projcet}-{date}"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Unknown variable {projcet}"))
        .stdout(predicate::str::contains("{project}"))
        .stderr(predicate::str::contains("1 unknown variable(s)"));
}

#[test]
fn test_check_accepts_aliases() {
    let project = TestProject::new();
    project
        .cmd()
        .args(["check", "{year}-{month}-{day} {engine} {rendertime}"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All variables"));
}

#[test]
fn test_variables_lists_groups() {
    let project = TestProject::new();
    project
        .cmd()
        .arg("variables")
        .assert()
        .success()
        .stdout(predicate::str::contains("Project"))
        .stdout(predicate::str::contains("Identifiers"))
        .stdout(predicate::str::contains("{renderengine}"))
        .stdout(predicate::str::contains("{engine}"));
}
