#![allow(deprecated)]

//! End-to-end tests of the `aerosuite` binary

use assert_cmd::Command;
use predicates::prelude::*;
mod common;

fn aerosuite(config_path: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("aerosuite").unwrap();
    cmd.env_remove("AEROSUITE_GATEWAY_API_KEY")
        .env_remove("AEROSUITE_GEMINI_API_KEY")
        .env_remove("AEROSUITE_ANALYSIS_ENDPOINT")
        .env_remove("AEROSUITE_STORAGE_PATH")
        .env_remove("AEROSUITE_PROVIDER")
        .arg("--config")
        .arg(config_path);
    cmd
}

#[test]
fn test_tools_lists_workbenches() {
    let (_dir, config) = common::temp_config_with_storage();
    aerosuite(&config)
        .arg("tools")
        .assert()
        .success()
        .stdout(predicate::str::contains("Part Design Workbench"))
        .stdout(predicate::str::contains("DMU Kinematics"));
}

#[test]
fn test_report_nvh() {
    let (_dir, config) = common::temp_config_with_storage();
    aerosuite(&config)
        .args(["report", "nvh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Over Target"))
        .stdout(predicate::str::contains("Add acoustic barrier in firewall"))
        .stdout(predicate::str::contains("Ergonomic").not());
}

#[test]
fn test_report_materials_summary() {
    let (_dir, config) = common::temp_config_with_storage();
    aerosuite(&config)
        .args(["report", "materials"])
        .assert()
        .success()
        .stdout(predicate::str::contains("498 kg"))
        .stdout(predicate::str::contains("$2000"))
        .stdout(predicate::str::contains("61%"));
}

#[test]
fn test_upload_blend_is_rejected_with_hint() {
    let (dir, config) = common::temp_config_with_storage();
    let file = common::write_file(&dir, "car.blend", b"BLENDER-v300");
    aerosuite(&config)
        .arg("upload")
        .arg(file)
        .arg("--no-analyze")
        .assert()
        .failure()
        .stderr(predicate::str::contains("BLEND files must be exported"));
}

#[test]
fn test_upload_then_current_and_view() {
    let (dir, config) = common::temp_config_with_storage();
    let file = common::write_file(&dir, "quad.obj", common::QUAD_OBJ.as_bytes());

    aerosuite(&config)
        .arg("upload")
        .arg(&file)
        .arg("--no-analyze")
        .assert()
        .success()
        .stdout(predicate::str::contains("quad.obj"));

    let output = aerosuite(&config)
        .args(["current", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let current: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(current["fileName"], "quad.obj");
    assert_eq!(current["fileType"], "obj");

    let output = aerosuite(&config).args(["view", "--json"]).output().unwrap();
    assert!(output.status.success());
    let view: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(view["state"], "ready");
    assert_eq!(view["stats"]["triangles"], 2);

    aerosuite(&config).arg("clear").assert().success();
    aerosuite(&config)
        .args(["current", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("null"));
}

#[test]
fn test_upload_with_unusable_store_is_session_only() {
    let (dir, _) = common::temp_config_with_storage();
    let blocker = common::write_file(&dir, "blocked.db", b"plain file");
    let (_config_dir, config) =
        common::temp_config_file(&format!("storage:\n  path: {}\n", blocker.display()));
    let file = common::write_file(&dir, "quad.obj", common::QUAD_OBJ.as_bytes());

    aerosuite(&config)
        .arg("upload")
        .arg(&file)
        .arg("--no-analyze")
        .assert()
        .success()
        .stdout(predicate::str::contains("Uploaded"))
        .stdout(predicate::str::contains("available for this session only"));
}

#[test]
fn test_analyze_without_key_uses_fallback() {
    let (_dir, config) = common::temp_config_with_storage();
    let output = aerosuite(&config)
        .args(["analyze", "--file-name", "coupe.glb", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let analysis: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(analysis["source"], "fallback");
    let cd = analysis["drag_coefficient"].as_f64().unwrap();
    assert!((0.30..0.45).contains(&cd));
}

#[test]
fn test_ask_without_key_prompts_for_key() {
    let (_dir, config) = common::temp_config_with_storage();
    aerosuite(&config)
        .args(["ask", "What is a Pad?"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Please enter your Gemini API key"));
}

#[test]
fn test_missing_config_file_is_logged() {
    let dir = tempfile::TempDir::new().unwrap();
    aerosuite(&dir.path().join("absent.yaml"))
        .env_remove("RUST_LOG")
        .env("AEROSUITE_STORAGE_PATH", dir.path().join("models.db"))
        .arg("tools")
        .assert()
        .success()
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn test_invalid_provider_in_config_fails_validation() {
    let (_dir, config) = common::temp_config_file("provider:\n  type: watson\n");
    aerosuite(&config)
        .arg("tools")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid provider type"));
}
