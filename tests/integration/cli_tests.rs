//! CLI structure, argument parsing, and startup failure paths.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn agent() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("runbook-agent"))
}

// --- Help and version tests ---

#[test]
fn test_cli_no_args_shows_help_and_exits_two() {
    // clap with arg_required_else_help shows help on stderr and exits 2
    agent().assert().code(2).stderr(predicate::str::contains(
        "Remote execution agent for controller-dispatched automation jobs",
    ));
}

#[test]
fn test_cli_help_flag_shows_help() {
    agent()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"));
}

#[test]
fn test_cli_version_flag_shows_version() {
    agent()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("runbook-agent"));
}

#[test]
fn test_version_command_shows_version() {
    agent()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("runbook-agent 0.1.0"));
}

#[test]
fn test_help_shows_run_command() {
    agent()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"));
}

#[test]
fn test_run_help_documents_config_flag() {
    agent()
        .args(["run", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--config"));
}

// --- Error handling tests ---

#[test]
fn test_unknown_command_exits_with_error() {
    agent()
        .arg("nonexistent")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_run_with_malformed_config_exits_one() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir.path().join("config.yaml");
    std::fs::write(&config, "controller_url: [not, a, string\n").expect("write config");

    agent()
        .args(["run", "--config"])
        .arg(&config)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_run_with_empty_controller_url_exits_one() {
    // Validation rejects the config before any network call.
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir.path().join("config.yaml");
    std::fs::write(&config, "controller_url: \"\"\n").expect("write config");

    agent()
        .args(["run", "--config"])
        .arg(&config)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("controller_url"));
}

#[test]
fn test_run_with_unreachable_controller_exits_one() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir.path().join("config.yaml");
    std::fs::write(
        &config,
        "controller_url: \"http://127.0.0.1:1\"\nregistration_secret: \"s\"\n",
    )
    .expect("write config");

    agent()
        .args(["run", "--config"])
        .arg(&config)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("registration failed"));
}
