use predicates::prelude::*;

use crate::common::{TestProject, arg, touch_all};

#[test]
fn test_probe_next_after_highest() {
    let project = TestProject::new();
    let renders = project.project_path().join("renders");
    touch_all(&renders, &["Proj-0001.png", "Proj-0007.jpg", "Other-0099.png", "Proj-notes.txt"]);

    let stdout = project.run(&["probe", arg(&renders), "--project", "Proj"]);
    assert_eq!(stdout.trim(), "0008");
}

#[test]
fn test_probe_empty_directory_starts_at_one() {
    let project = TestProject::new();
    let renders = project.project_path().join("empty");
    std::fs::create_dir_all(&renders).unwrap();

    let stdout = project.run(&["probe", arg(&renders), "--project", "Proj"]);
    assert_eq!(stdout.trim(), "0001");
}

#[test]
fn test_probe_custom_extensions() {
    let project = TestProject::new();
    let renders = project.project_path().join("renders");
    touch_all(&renders, &["Proj-0004.PNG", "Proj-0010.webp"]);

    let stdout = project.run(&["probe", arg(&renders), "--project", "Proj", "--ext", "webp"]);
    assert_eq!(stdout.trim(), "0011");

    let stdout = project.run(&["probe", arg(&renders), "--project", "Proj"]);
    assert_eq!(stdout.trim(), "0005");
}

#[test]
fn test_probe_missing_directory_fails() {
    let project = TestProject::new();
    let missing = project.project_path().join("missing");

    project
        .cmd()
        .args(["probe", arg(&missing), "--project", "Proj"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot read directory"));
}
