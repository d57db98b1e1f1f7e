use predicates::prelude::*;

use crate::common::TestProject;

#[test]
fn test_config_init_creates_preferences() {
    let project = TestProject::new();

    project
        .cmd()
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created preferences at:"))
        .stdout(predicate::str::contains("external_render_time = true"));

    let content = std::fs::read_to_string(project.config_path()).unwrap();
    assert!(content.contains("file_name_type_global = \"SERIAL\""));
}

#[test]
fn test_config_init_keeps_existing_without_force() {
    let project = TestProject::new();
    project.write_preferences("file_location_override = true\n");

    project
        .cmd()
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Preferences already exist"));
    let content = std::fs::read_to_string(project.config_path()).unwrap();
    assert_eq!(content, "file_location_override = true\n");

    project.run(&["config", "init", "--force"]);
    let content = std::fs::read_to_string(project.config_path()).unwrap();
    assert!(content.contains("file_location_override = false"));
}

#[test]
fn test_config_show_defaults_when_missing() {
    let project = TestProject::new();

    project
        .cmd()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("file not found, showing defaults"))
        .stdout(predicate::str::contains("filter_output_file_path = true"));
}

#[test]
fn test_config_show_merges_partial_file() {
    let project = TestProject::new();
    project.write_preferences("file_format_override = true\nfile_format_global = \"OPEN_EXR\"\n");

    project
        .cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("file_format_global = \"OPEN_EXR\""))
        .stdout(predicate::str::contains("external_log_name = \"{project}-TotalRenderTime.txt\""))
        .stdout(predicate::str::contains("file not found").not());
}

#[test]
fn test_config_invalid_file_is_reported() {
    let project = TestProject::new();
    project.write_preferences("file_name_type_global = \"WEEKLY\"\n");

    project
        .cmd()
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn test_config_path_prints_both_files() {
    let project = TestProject::new();

    let stdout = project.run(&["config", "path"]);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], project.config_path().to_str().unwrap());
    assert!(lines[1].ends_with("state.toml"));
}
