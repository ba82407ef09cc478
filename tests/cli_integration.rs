//! CLI integration tests for bomsmith.
//!
//! These tests drive the binary against reactor descriptors written to a
//! temporary directory, from settings validation through install.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

const REACTOR: &str = r#"
[root]
group = "org.acme"
artifact = "acme-parent"
version = "1.0"
packaging = "pom"
name = "Acme Parent"
modules = ["core", "acme-maven-plugin"]

[[module]]
group = "org.acme"
artifact = "core"
version = "1.0"
dependencies = [{ group = "org.slf4j", artifact = "slf4j-api", version = "2.0.9" }]

[[module]]
group = "org.acme"
artifact = "acme-maven-plugin"
version = "1.0"
packaging = "maven-plugin"

[[external]]
group = "org.slf4j"
artifact = "slf4j-api"
version = "2.0.9"
"#;

/// Get the bomsmith binary command.
fn bomsmith() -> Command {
    Command::cargo_bin("bomsmith").unwrap()
}

/// Create a temporary run with the acme reactor descriptor.
fn acme_run() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("Reactor.toml"), REACTOR).unwrap();
    tmp
}

fn write_settings(dir: &Path, contents: &str) {
    fs::write(dir.join("Bom.toml"), contents).unwrap();
}

// ============================================================================
// bomsmith generate
// ============================================================================

#[test]
fn test_generate_default_bom() {
    let tmp = acme_run();

    bomsmith()
        .args(["generate", "--local-repository", "repo"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated acme-parent-bom"))
        .stdout(predicate::str::contains("ran: install"));

    let manifest = tmp.path().join("target/classes/acme-parent-bom/pom.xml");
    let pom = fs::read_to_string(&manifest).unwrap();
    assert!(pom.contains("<artifactId>acme-parent-bom</artifactId>"));
    assert!(pom.contains("<packaging>pom</packaging>"));
    assert!(pom.contains("<artifactId>core</artifactId>"));
    assert!(pom.contains("<pluginManagement>"));
    // Without dependency includes only the modules themselves are managed
    assert!(!pom.contains("slf4j-api"));
    assert!(pom.contains("<artifactId>acme-maven-plugin</artifactId>"));

    let installed = tmp
        .path()
        .join("repo/org/acme/acme-parent-bom/1.0/acme-parent-bom-1.0.pom");
    assert_eq!(fs::read_to_string(installed).unwrap(), pom);
}

#[test]
fn test_generate_configured_boms() {
    let tmp = acme_run();
    write_settings(
        tmp.path(),
        r#"
[[bom]]
artifact-id = "acme-libs-bom"
dependencies = { includes = ["org.slf4j:*"] }

[[bom]]
artifact-id = "acme-modules-bom"
goals = { excludes = ["install"] }
"#,
    );

    bomsmith()
        .args(["generate", "--local-repository", "repo"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated acme-libs-bom"))
        .stdout(predicate::str::contains("Generated acme-modules-bom"))
        .stdout(predicate::str::contains("no tasks run"));

    let modules =
        fs::read_to_string(tmp.path().join("target/classes/acme-modules-bom/pom.xml")).unwrap();
    assert!(!modules.contains("slf4j-api"));
    assert!(tmp
        .path()
        .join("repo/org/acme/acme-libs-bom/1.0/acme-libs-bom-1.0.pom")
        .exists());
    assert!(!tmp.path().join("repo/org/acme/acme-modules-bom").exists());
}

#[test]
fn test_generate_json_report() {
    let tmp = acme_run();

    let output = bomsmith()
        .args(["generate", "--json", "--local-repository", "repo", "--goal", "verify"])
        .current_dir(tmp.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let bom = &report["generated"][0];
    assert_eq!(bom["artifact_id"], "acme-parent-bom");
    assert_eq!(bom["state"]["injected"]["success"], true);
    assert_eq!(bom["selection"]["plugins"][0]["artifact"], "acme-maven-plugin");
    assert!(!tmp.path().join("repo").exists());
}

#[test]
fn test_generate_without_modules_does_nothing() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("Reactor.toml"),
        r#"
[root]
group = "org.acme"
artifact = "single"
version = "1.0"
"#,
    )
    .unwrap();

    bomsmith()
        .args(["generate", "--local-repository", "repo"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to generate"));

    assert!(!tmp.path().join("target").exists());
}

#[test]
fn test_generate_invalid_pattern_fails() {
    let tmp = acme_run();
    write_settings(
        tmp.path(),
        r#"
[[bom]]
artifact-id = "broken-bom"
modules = { includes = ["nocolon"] }

[[bom]]
artifact-id = "good-bom"
"#,
    );

    bomsmith()
        .args(["generate", "--local-repository", "repo"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken-bom"));

    // The valid config still ran
    assert!(tmp.path().join("target/classes/good-bom/pom.xml").exists());
    assert!(!tmp.path().join("target/classes/broken-bom").exists());
}

#[test]
fn test_generate_missing_reactor() {
    let tmp = TempDir::new().unwrap();

    bomsmith()
        .args(["generate"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Reactor.toml"));
}

// ============================================================================
// bomsmith select
// ============================================================================

#[test]
fn test_select_lists_buckets() {
    let tmp = acme_run();

    write_settings(
        tmp.path(),
        r#"
[[bom]]
artifact-id = "acme-parent-bom"
dependencies = { includes = ["org.slf4j:*"] }
"#,
    );

    bomsmith()
        .args(["select"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("acme-parent-bom"))
        .stdout(predicate::str::contains("org.slf4j:slf4j-api:2.0.9"))
        .stdout(predicate::str::contains("plugins:"));

    // Selection alone writes nothing
    assert!(!tmp.path().join("target").exists());
}

#[test]
fn test_select_json() {
    let tmp = acme_run();
    write_settings(
        tmp.path(),
        r#"
[[bom]]
artifact-id = "acme-bom"
modules = { includes = ["org.acme:core"] }
dependencies = { includes = ["*:*"] }
"#,
    );

    let output = bomsmith()
        .args(["select", "--json"])
        .current_dir(tmp.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let selected: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(selected[0]["artifact_id"], "acme-bom");
    let libraries = selected[0]["libraries"].as_array().unwrap();
    let names: Vec<&str> = libraries
        .iter()
        .map(|c| c["artifact"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["core", "slf4j-api"]);
    assert!(selected[0]["plugins"].as_array().unwrap().is_empty());
}

// ============================================================================
// bomsmith check
// ============================================================================

#[test]
fn test_check_accepts_valid_settings() {
    let tmp = TempDir::new().unwrap();
    write_settings(
        tmp.path(),
        r#"
[[bom]]
artifact-id = "acme-bom"
modules = { includes = ["org.acme:*"], excludes = ["org.acme:*-test"] }
"#,
    );

    bomsmith()
        .args(["check"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("ok acme-bom"));
}

#[test]
fn test_check_rejects_bad_pattern() {
    let tmp = TempDir::new().unwrap();
    write_settings(
        tmp.path(),
        r#"
[[bom]]
artifact-id = "broken-bom"
dependencies = { includes = ["nocolon"] }
"#,
    );

    bomsmith()
        .args(["check", "--no-color"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken-bom"))
        .stderr(predicate::str::contains("group:artifact"));
}

#[test]
fn test_check_warns_on_duplicate_ids() {
    let tmp = TempDir::new().unwrap();
    write_settings(
        tmp.path(),
        r#"
[[bom]]
artifact-id = "acme-bom"

[[bom]]
artifact-id = "acme-bom"
"#,
    );

    bomsmith()
        .args(["check"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("configured more than once"));
}

#[test]
fn test_check_missing_settings() {
    let tmp = TempDir::new().unwrap();

    bomsmith()
        .args(["check"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read settings"));
}
