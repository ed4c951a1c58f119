//! CLI smoke tests for build-report.
//!
//! These run the binary against a build-info file and check the output and
//! exit status of each kind of report.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

const BUILD_INFO: &str = r#"{
  "path": "example.com/app",
  "main_module": { "path": "example.com/app", "version": "v1.0.0", "checksum": "h1:app=" },
  "dependencies": [
    { "path": "other.org/lib", "version": "v0.2.0", "checksum": "h1:lib=" }
  ],
  "toolchain_version": "rust1.80.0",
  "settings": [{ "key": "profile", "value": "release" }]
}"#;

fn report_cmd() -> Command {
    cargo_bin_cmd!("build-report")
}

/// A temp directory holding `info.json`.
fn temp_build_info() -> TempDir {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("info.json"), BUILD_INFO).unwrap();
    temp
}

#[test]
fn test_nothing_requested() {
    report_cmd()
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Nothing to show"));
}

#[test]
fn test_short_main_module() {
    let temp = temp_build_info();
    report_cmd()
        .arg("--version-part-short")
        .arg("--build-info")
        .arg(temp.path().join("info.json"))
        .assert()
        .success()
        .stdout("v1.0.0\n");
}

#[test]
fn test_repeated_parts_shown_once() {
    let temp = temp_build_info();
    report_cmd()
        .args(["--version-part", "path,go,path"])
        .arg("--build-info")
        .arg(temp.path().join("info.json"))
        .assert()
        .success()
        .stdout("Path: example.com/app\nToolchain Version: rust1.80.0\n");
}

#[test]
fn test_parts_follow_command_line_order() {
    let temp = temp_build_info();
    report_cmd()
        .args(["--version-part", "path", "--version"])
        .arg("--build-info")
        .arg(temp.path().join("info.json"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Path: example.com/app\nToolchain Version: rust1.80.0\nVersion: v1.0.0\nModules:",
        ));

    report_cmd()
        .args(["--version", "--version-part", "path"])
        .arg("--build-info")
        .arg(temp.path().join("info.json"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Toolchain Version: rust1.80.0\nPath: example.com/app\nVersion: v1.0.0\n",
        ));
}

#[test]
fn test_module_filter_implies_modules() {
    let temp = temp_build_info();
    report_cmd()
        .args(["--version-module-exclude", "^other", "--version-part-short"])
        .arg("--build-info")
        .arg(temp.path().join("info.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("M example.com/app"))
        .stdout(predicate::str::contains("other.org").not());
}

#[test]
fn test_raw() {
    let temp = temp_build_info();
    report_cmd()
        .args(["--version-part", "raw"])
        .arg("--build-info")
        .arg(temp.path().join("info.json"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("toolchain\trust1.80.0\npath\texample.com/app\n"));
}

#[test]
fn test_unknown_part_fails() {
    let temp = temp_build_info();
    report_cmd()
        .args(["--version-part", "bogus"])
        .arg("--build-info")
        .arg(temp.path().join("info.json"))
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("bad version part: bogus"));
}

#[test]
fn test_missing_build_info_fails() {
    let temp = TempDir::new().unwrap();
    report_cmd()
        .arg("--version")
        .arg("--build-info")
        .arg(temp.path().join("missing.json"))
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Build information not available"));
}

#[test]
fn test_bad_filter_fails() {
    let temp = temp_build_info();
    report_cmd()
        .args(["--version-build-filter", "("])
        .arg("--build-info")
        .arg(temp.path().join("info.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("bad build-setting filter"));
}

#[test]
fn test_describes_itself_without_build_info() {
    report_cmd()
        .args(["--version-part", "path", "--version-part-short"])
        .assert()
        .success()
        .stdout("build-report\n");
}
