use predicates::prelude::*;
use serde_json::Value;

use crate::common::{TestProject, arg, touch_all};

fn finish_json(project: &TestProject, scene: &std::path::Path, render_time: &str) -> Value {
    let stdout =
        project.run(&["finish", "--scene", arg(scene), "--render-time", render_time, "--json"]);
    serde_json::from_str(&stdout).expect("finish --json prints JSON")
}

#[test]
fn test_start_numbers_outputs_and_advances_once() {
    let project = TestProject::new();
    let scene = project
        .scene()
        .camera("Cam")
        .render_output("//frames/{serial}-{camera}/")
        .file_output_node("File Output", "//passes/{serial}", &["depth-{frame}"])
        .write()
        .unwrap();

    let stdout = project.run(&["start", "--scene", arg(&scene), "--json"]);
    let targets: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(targets["render_output"], "//frames/0000-Cam/");
    assert_eq!(targets["file_output_nodes"][0]["base_path"], "//passes/0000");
    assert_eq!(targets["file_output_nodes"][0]["slots"][0], "depth-0001");

    project
        .cmd()
        .args(["start", "--scene", arg(&scene)])
        .assert()
        .success()
        .stdout(predicate::str::contains("Render output: //frames/0001-Cam/"));

    let stdout = project.run(&["serial", "show", "--scene", arg(&scene), "--scope", "output"]);
    assert_eq!(stdout.trim(), "output   0002");
}

#[test]
fn test_start_without_serial_leaves_counter() {
    let project = TestProject::new();
    let scene = project.scene().render_output("//frames/{camera}/").write().unwrap();

    project.run(&["start", "--scene", arg(&scene)]);
    let stdout = project.run(&["serial", "show", "--scene", arg(&scene), "--scope", "output"]);
    assert_eq!(stdout.trim(), "output   0000");
}

#[test]
fn test_start_respects_filter_preferences() {
    let project = TestProject::new();
    project.write_preferences("filter_output_file_path = false\n");
    let scene = project.scene().render_output("//frames/{camera}-{serial}").write().unwrap();

    let stdout = project.run(&["start", "--scene", arg(&scene), "--json"]);
    let targets: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(targets["render_output"], "//frames/{camera}-{serial}");
}

#[test]
fn test_finish_serial_mode_scans_project_folder() {
    let project = TestProject::new();
    let scene = project.scene().render_output("//frames/{serial}").write().unwrap();

    let report = finish_json(&project, &scene, "12.3456");
    assert_eq!(report["render_time"], 12.35);
    assert_eq!(report["autosave"]["file_name"], "shot-0001");
    assert_eq!(report["autosave"]["format"], "JPEG");
    assert_eq!(report["restored"]["render_output"], "//frames/{serial}");

    let folder = project.project_path().join("shot");
    assert!(folder.is_dir(), "autosave folder is created");
    touch_all(&folder, &["shot-0001.jpg"]);

    let report = finish_json(&project, &scene, "1");
    assert_eq!(report["autosave"]["file_name"], "shot-0002");
    assert_eq!(report["total_render_time"], 13.35);
}

#[test]
fn test_finish_custom_mode_uses_project_counter() {
    let project = TestProject::new();
    project.write_project_settings(
        r#"
file_location = "//renders"
file_name_type = "CUSTOM"
file_name_custom = "{project}-{serial}-{duration}"
file_format = "PNG"
"#,
    );
    let scene = project.scene().write().unwrap();

    let report = finish_json(&project, &scene, "2.5");
    assert_eq!(report["autosave"]["file_name"], "shot-0000-2.5s");
    let expected = project.project_path().join("renders").join("shot-0000-2.5s.png");
    assert_eq!(report["autosave"]["path"], expected.to_str().unwrap());

    let report = finish_json(&project, &scene, "0:00:03.00");
    assert_eq!(report["autosave"]["file_name"], "shot-0001-3.0s");

    let stdout = project.run(&["serial", "show", "--scene", arg(&scene), "--scope", "project"]);
    assert_eq!(stdout.trim(), "project  0002");
}

#[test]
fn test_finish_global_name_override_uses_global_counter() {
    let project = TestProject::new();
    project.write_preferences(
        r#"
file_name_override = true
file_name_type_global = "CUSTOM"
file_name_custom_global = "{project}-{serial}"
"#,
    );
    let scene = project.scene().write().unwrap();
    project.run(&["serial", "set", "99", "--scope", "global"]);

    let report = finish_json(&project, &scene, "4");
    assert_eq!(report["autosave"]["file_name"], "shot-0099");

    let stdout = project.run(&["serial", "show", "--scene", arg(&scene)]);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["output   0000", "project  0000", "global   0100"]);
}

#[test]
fn test_finish_disabled_project_skips_autosave() {
    let project = TestProject::new();
    project.write_project_settings("enable_autosave_render = false\n");
    let scene = project.scene().write().unwrap();

    let report = finish_json(&project, &scene, "10");
    assert!(report["autosave"].is_null());
    assert_eq!(report["skipped"], "disabled");
    assert_eq!(report["total_render_time"], 10.0);

    project.write_preferences("enable_autosave_render_override = true\n");
    let report = finish_json(&project, &scene, "10");
    assert!(report["skipped"].is_null());
    assert_eq!(report["total_render_time"], 20.0);
}

#[test]
fn test_finish_unsaved_project_persists_nothing() {
    let project = TestProject::new();
    let scene = autosave_render::test_utils::SceneFixture::unsaved(project.project_path())
        .write()
        .unwrap();

    project
        .cmd()
        .args(["finish", "--scene", arg(&scene), "--render-time", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Render time: 0:00:05.00"))
        .stdout(predicate::str::contains("Project not saved"));

    assert!(!project.config_path().with_file_name("state.toml").exists());
}

#[test]
fn test_finish_updates_render_time_log() {
    let project = TestProject::new();
    project.write_preferences("external_render_time = true\n");
    let scene = project.scene().write().unwrap();

    finish_json(&project, &scene, "30");
    let report = finish_json(&project, &scene, "0:00:30.00");
    assert_eq!(report["log_total"], 60.0);

    let log = std::fs::read_to_string(project.project_path().join("shot-TotalRenderTime.txt")).unwrap();
    assert_eq!(log.trim(), "Total Render Time: 0:01:00.00");
}

#[test]
fn test_finish_text_report() {
    let project = TestProject::new();
    let scene = project.scene().render_output("//frames/").write().unwrap();

    project
        .cmd()
        .args(["finish", "--scene", arg(&scene), "--render-time", "61.5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Render time: 0:01:01.50 (total 0:01:01.50)"))
        .stdout(predicate::str::contains("Autosave to:"))
        .stdout(predicate::str::contains("shot-0001.jpg"))
        .stdout(predicate::str::contains("Restore render output to: //frames/"));
}

#[test]
fn test_finish_rejects_negative_render_time() {
    let project = TestProject::new();
    let scene = project.scene().write().unwrap();

    project
        .cmd()
        .args(["finish", "--scene", arg(&scene), "--render-time=-3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid render time"));
}
