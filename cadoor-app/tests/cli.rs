use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests/data");
    path.push(name);
    path
}

/// 在空的临时目录中运行，避免读到仓库里的配置。
fn cadoor(workdir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cadoor").expect("binary should be built");
    cmd.current_dir(workdir.path()).env_remove("CADOOR_CONFIG").env_remove("RUST_LOG");
    cmd
}

#[test]
fn missing_subcommand_exits_with_one() {
    let dir = tempfile::tempdir().expect("create temp dir");
    cadoor(&dir).assert().code(1);
}

#[test]
fn missing_path_exits_with_one() {
    let dir = tempfile::tempdir().expect("create temp dir");
    cadoor(&dir).arg("run").assert().code(1);
}

#[test]
fn help_exits_with_zero() {
    let dir = tempfile::tempdir().expect("create temp dir");
    cadoor(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"));
}

#[test]
fn missing_file_reports_error() {
    let dir = tempfile::tempdir().expect("create temp dir");
    cadoor(&dir)
        .args(["run", "nowhere.dxf"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Error: file not found"));
}

#[test]
fn non_dxf_file_is_rejected() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let drawing = dir.path().join("plan.dwg");
    fs::write(&drawing, b"AC1027").expect("write dwg stub");
    cadoor(&dir)
        .arg("run")
        .arg(&drawing)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("only DXF files are supported"));
}

#[test]
fn malformed_dxf_exits_with_one() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let drawing = dir.path().join("broken.dxf");
    fs::write(&drawing, "  0\nSECTION\n  2\nENTITIES\n  0\nARC\n 10\nabc\n").expect("write dxf");
    cadoor(&dir).arg("run").arg(&drawing).assert().code(1);
}

#[test]
fn json_output_by_default() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let output = cadoor(&dir)
        .arg("run")
        .arg(fixture("doors_plan.dxf"))
        .output()
        .expect("run cadoor");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(json["totalDoors"], 2);
    assert_eq!(json["metadata"]["filename"], "doors_plan.dxf");
    assert_eq!(json["metadata"]["units"], "Centimeters");
    assert_eq!(json["doors"][0]["mark"], "D-12");
    assert_eq!(json["doors"][0]["doorType"], "EXTERIOR_SINGLE");
    assert_eq!(json["doors"][0]["width"], "90.0cm");
    assert!(json["doors"][0]["height"].is_null());
    assert_eq!(json["doors"][1]["fullLocation"], "F1 - Baño - D-7");
    assert!(json.get("hardware").is_none());
}

#[test]
fn text_output_lists_doors() {
    let dir = tempfile::tempdir().expect("create temp dir");
    cadoor(&dir)
        .arg("run")
        .arg(fixture("doors_plan.dxf"))
        .args(["--output", "text"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Found 2 doors in"))
        .stdout(predicate::str::contains("  - D-12: EXTERIOR_SINGLE at (100.0, 100.0)"))
        .stdout(predicate::str::contains("  - D-7: INTERIOR_SINGLE at (500.0, 500.0)"))
        .stdout(predicate::str::contains("Average confidence: 0.70"));
}

#[test]
fn hardware_flag_adds_summary() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let output = cadoor(&dir)
        .arg("run")
        .arg(fixture("doors_plan.dxf"))
        .arg("--hardware")
        .output()
        .expect("run cadoor");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    let hardware = json["hardware"].as_array().expect("hardware array");
    assert_eq!(hardware[0]["itemType"], "HINGE");
    assert_eq!(hardware[0]["brand"], "Schlage");
    assert!(hardware.iter().any(|line| line["productName"] == "Pomo Interior"));
}

#[test]
fn config_file_sets_defaults() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let config = dir.path().join("cadoor.toml");
    fs::write(
        &config,
        "[output]\ndefault_format = \"text\"\n\n[detection]\nannotation_radius = 10.0\n",
    )
    .expect("write config");

    cadoor(&dir)
        .arg("run")
        .arg(fixture("doors_plan.dxf"))
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("  - DOOR-X: INTERIOR_SINGLE at (500.0, 500.0)"));
}

#[test]
fn discovered_config_is_read_from_working_directory() {
    let dir = tempfile::tempdir().expect("create temp dir");
    fs::create_dir(dir.path().join("config")).expect("create config dir");
    fs::write(
        dir.path().join("config").join("default.toml"),
        "[output]\ninclude_hardware = true\n",
    )
    .expect("write config");

    let output = cadoor(&dir)
        .arg("run")
        .arg(fixture("doors_plan.dxf"))
        .output()
        .expect("run cadoor");
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert!(json["hardware"].is_array());
}

#[test]
fn broken_config_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let config = dir.path().join("broken.toml");
    fs::write(&config, "[output\n").expect("write config");

    let output = cadoor(&dir)
        .arg("run")
        .arg(fixture("doors_plan.dxf"))
        .arg("--config")
        .arg(&config)
        .output()
        .expect("run cadoor");
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(json["totalDoors"], 2);
}
