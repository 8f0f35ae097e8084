//! CLI integration tests using the real quiver binary

mod common;

use common::{TestEnv, Upstream, quiver_cmd};
use predicates::prelude::*;

#[test]
fn test_help_output() {
    quiver_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("repo"))
        .stdout(predicate::str::contains("install"))
        .stdout(predicate::str::contains("uninstall"))
        .stdout(predicate::str::contains("browse"))
        .stdout(predicate::str::contains("search"));
}

#[test]
fn test_version_output() {
    quiver_cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("quiver"))
        .stdout(predicate::str::contains("Build info"))
        .stdout(predicate::str::contains("libgit2"));
}

#[test]
fn test_completions_bash() {
    quiver_cmd()
        .args(["completions", "--shell", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("quiver"));
}

#[test]
fn test_missing_subcommand_fails() {
    quiver_cmd().assert().failure();
}

#[test]
fn test_install_requires_spec() {
    quiver_cmd()
        .arg("install")
        .assert()
        .failure()
        .stderr(predicate::str::contains("<SPEC>"));
}

#[test]
fn test_empty_environment_lists_nothing() {
    let env = TestEnv::new();

    env.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No packages installed."));
    env.cmd()
        .args(["repo", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No repositories registered."));

    assert_eq!(env.json(&["list"]), serde_json::json!([]));
    assert_eq!(env.json(&["repo", "list"]), serde_json::json!([]));
}

#[test]
fn test_errors_exit_nonzero_with_prefix() {
    let env = TestEnv::new();

    env.cmd()
        .args(["install", "no-colon-here"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with("Error: Invalid install spec"));

    env.cmd()
        .args(["info", "acme-tool--greeter"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("is not installed"));
}

#[test]
fn test_home_flag_overrides_environment() {
    let env = TestEnv::new();
    let upstream = Upstream::with_sample_content();
    let other = env.temp.path().join("other-home");

    env.cmd()
        .args(["repo", "add", &upstream.url(), "--home"])
        .arg(&other)
        .assert()
        .success();

    assert!(other.join("repos.json").is_file());
    assert!(other.join("repos").join("acme-tool").is_dir());
    assert!(!env.home.join("repos.json").exists());
}
