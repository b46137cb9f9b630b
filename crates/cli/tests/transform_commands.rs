use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn mdr(config_home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("mdr"));
    cmd.env("XDG_CONFIG_HOME", config_home);
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn format_dry_run_prints_and_keeps_file() {
    let tmp = tempdir().unwrap();
    let note = tmp.path().join("note.md");
    fs::write(&note, "# A\n## B\n\n4. x\n5. y\n").unwrap();

    mdr(tmp.path())
        .args(["format", "--dry-run"])
        .arg(&note)
        .assert()
        .success()
        .stdout("# 1. A\n\n## 1.1. B\n\n1. x\n2. y\n");

    assert_eq!(fs::read_to_string(&note).unwrap(), "# A\n## B\n\n4. x\n5. y\n");
}

#[test]
fn heading_to_list_rewrites_in_place() {
    let tmp = tempdir().unwrap();
    let note = tmp.path().join("note.md");
    fs::write(&note, "# A\n## B\ntext\n## C\n").unwrap();

    mdr(tmp.path())
        .args(["heading-to-list", "--line", "1"])
        .arg(&note)
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated:"));

    assert_eq!(fs::read_to_string(&note).unwrap(), "1. A\n\t1. B\n\t\t1. text\n\t2. C\n");
}

#[test]
fn list_to_heading_lifts_items() {
    let tmp = tempdir().unwrap();
    let note = tmp.path().join("note.md");
    fs::write(&note, "# Top\n\n- a\n- b\n").unwrap();

    mdr(tmp.path())
        .args(["--index-from", "7", "list-to-heading", "--line", "3", "--dry-run"])
        .arg(&note)
        .assert()
        .success()
        .stdout("# Top\n\n## a\n\n## b\n");
}

#[test]
fn heading_depth_cascades() {
    let tmp = tempdir().unwrap();
    let note = tmp.path().join("note.md");
    fs::write(&note, "# A\n## B\n### C\n# D\n").unwrap();

    mdr(tmp.path())
        .args(["--index-from", "7", "heading-depth", "--line", "1", "--depth", "2", "--dry-run"])
        .arg(&note)
        .assert()
        .success()
        .stdout("## A\n\n### B\n\n#### C\n\n# D\n");
}

#[test]
fn heading_depth_rejects_out_of_range_depth() {
    let tmp = tempdir().unwrap();
    let note = tmp.path().join("note.md");
    fs::write(&note, "# A\n").unwrap();

    mdr(tmp.path())
        .args(["heading-depth", "--line", "1", "--depth", "9"])
        .arg(&note)
        .assert()
        .failure();
}

#[test]
fn unchanged_file_is_reported() {
    let tmp = tempdir().unwrap();
    let note = tmp.path().join("note.md");
    fs::write(&note, "# 1. A\n\ntext\n").unwrap();

    mdr(tmp.path())
        .arg("format")
        .arg(&note)
        .assert()
        .success()
        .stdout(predicate::str::contains("Unchanged:"));
}

#[test]
fn missing_file_fails() {
    let tmp = tempdir().unwrap();

    mdr(tmp.path())
        .arg("format")
        .arg(tmp.path().join("nope.md"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error reading"));
}

#[test]
fn state_reports_json() {
    let tmp = tempdir().unwrap();
    let note = tmp.path().join("note.md");
    fs::write(&note, "# A\n## B\n\n- x\n  - y\n").unwrap();

    let output = mdr(tmp.path())
        .args(["state", "--line", "5", "--json"])
        .arg(&note)
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["node_kind"], "list");
    assert_eq!(value["heading_index"], "1.1");
    assert_eq!(value["list_depth"], 2);
    assert_eq!(value["list_index"], serde_json::json!([1, 1]));
}

#[test]
fn state_on_blank_line_is_null() {
    let tmp = tempdir().unwrap();
    let note = tmp.path().join("note.md");
    fs::write(&note, "# A\n\ntext\n").unwrap();

    mdr(tmp.path())
        .args(["state", "--line", "2", "--json"])
        .arg(&note)
        .assert()
        .success()
        .stdout("null\n");
}
