//
//  spotctl
//  tests/cli.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Black-box tests of the `spotctl` binary. None of them reach the network.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A `spotctl` command isolated from the user's config and environment.
fn spotctl(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("spotctl").unwrap();
    for var in [
        "SPOTCTL_REFRESH_TOKEN",
        "SPOTCTL_BASE_URL",
        "SPOTCTL_NAMESPACE",
        "SPOTCTL_TIMEOUT",
        "SPOTCTL_DEBUG",
        "SPOTCTL_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd.env("SPOTCTL_CONFIG", dir.path().join("config.toml"));
    cmd
}

#[test]
fn test_version() {
    let dir = TempDir::new().unwrap();
    spotctl(&dir)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("spotctl version "));
}

#[test]
fn test_help_lists_resources() {
    let dir = TempDir::new().unwrap();
    spotctl(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("cloudspaces"))
        .stdout(predicate::str::contains("spotnodepool"))
        .stdout(predicate::str::contains("serverclasses"));
}

#[test]
fn test_missing_refresh_token_is_usage_error() {
    let dir = TempDir::new().unwrap();
    spotctl(&dir)
        .args(["regions", "list"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("refresh token is required"));
}

#[test]
fn test_missing_namespace_is_usage_error() {
    let dir = TempDir::new().unwrap();
    spotctl(&dir)
        .args(["--refresh-token", "tok", "cloudspaces", "list"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("namespace is required"));
}

#[test]
fn test_edit_rejects_malformed_patch_file() {
    let dir = TempDir::new().unwrap();
    let patch = dir.path().join("patch.json");
    fs::write(&patch, r#"[{"op": "replace", "path": "/spec/desired"}]"#).unwrap();

    spotctl(&dir)
        .args(["--refresh-token", "tok", "-n", "org-abc", "spotnodepool", "edit", "pool-a", "--yes", "--file"])
        .arg(&patch)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid patch operation 1"));
}

#[test]
fn test_edit_with_empty_patch_is_noop() {
    let dir = TempDir::new().unwrap();
    let patch = dir.path().join("patch.json");
    fs::write(&patch, "[]").unwrap();

    // unroutable base URL: any request would fail the command
    spotctl(&dir)
        .args(["--refresh-token", "tok", "--base-url", "http://127.0.0.1:9", "-n", "org-abc"])
        .args(["cloudspaces", "edit", "prod", "--file"])
        .arg(&patch)
        .assert()
        .success()
        .stdout(predicate::str::contains("No patch operations to apply."));
}

#[test]
fn test_create_without_required_flags() {
    let dir = TempDir::new().unwrap();
    spotctl(&dir)
        .args(["--refresh-token", "tok", "-n", "org-abc", "cloudspaces", "create", "prod"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("region is required"));
}

#[test]
fn test_config_set_get_and_show_masks_token() {
    let dir = TempDir::new().unwrap();

    spotctl(&dir)
        .args(["config", "set", "refresh-token", "abcdefghijklmnop"])
        .assert()
        .success();
    spotctl(&dir)
        .args(["config", "set", "namespace", "org-abc"])
        .assert()
        .success();

    spotctl(&dir)
        .args(["config", "get", "namespace"])
        .assert()
        .success()
        .stdout("org-abc\n");

    spotctl(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("abcdefgh***"))
        .stdout(predicate::str::contains("abcdefghijklmnop").not());
}

#[test]
fn test_config_set_rejects_bad_timeout() {
    let dir = TempDir::new().unwrap();
    spotctl(&dir)
        .args(["config", "set", "timeout", "soon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("timeout"));
    assert!(!dir.path().join("config.toml").exists());
}

#[test]
fn test_config_path_honours_override() {
    let dir = TempDir::new().unwrap();
    spotctl(&dir)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_completion_bash() {
    let dir = TempDir::new().unwrap();
    spotctl(&dir)
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("spotctl"));
}
