//! `ScriptExecutor` behavior against real subprocesses.
//!
//! Scripts are tiny `sh` fixtures in temp directories; the interpreter
//! table routes `.sh` through `sh`, so no executable bit is needed.

#![allow(clippy::expect_used)]

use std::time::Duration;

use runbook_agent::application::executor::ScriptExecutor;
use runbook_agent::application::ports::JobExecutor;
use runbook_agent::domain::job::JobStatus;
use runbook_agent::domain::sanitize::SanitizeEngine;
use runbook_agent::infra::command_runner::TokioCommandRunner;
use runbook_agent::infra::scripts::DirScriptStore;
use serde_json::json;
use tempfile::TempDir;

use crate::helpers::{job, write_script};
use crate::mocks::StubSnapshotter;

const TIMEOUT: Duration = Duration::from_secs(30);

fn executor(
    dir: &TempDir,
    engine: Option<SanitizeEngine>,
    timeout: Duration,
) -> ScriptExecutor<TokioCommandRunner, DirScriptStore, StubSnapshotter> {
    ScriptExecutor::new(
        TokioCommandRunner::new(),
        DirScriptStore::new(dir.path()),
        StubSnapshotter,
        engine,
        timeout,
    )
}

#[tokio::test]
async fn test_successful_script_reports_success() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_script(dir.path(), "hello.sh", "echo ok\n");
    let executor = executor(&dir, None, TIMEOUT);

    let result = executor.execute(&job("j1", "hello.sh", json!({}))).await;

    assert_eq!(result.status, JobStatus::Success);
    assert_eq!(result.exit_code, Some(0));
    assert_eq!(result.stdout.as_deref(), Some("ok\n"));
    assert_eq!(result.stderr.as_deref(), Some(""));
    assert!(result.env_snapshot.is_some());
    assert!(result.error.is_none());
    assert!(result.duration >= 0.0);
}

#[tokio::test]
async fn test_nonzero_exit_reports_failed() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_script(dir.path(), "fail.sh", "exit 3\n");
    let executor = executor(&dir, None, TIMEOUT);

    let result = executor.execute(&job("j1", "fail.sh", json!({}))).await;

    assert_eq!(result.status, JobStatus::Failed);
    assert_eq!(result.exit_code, Some(3));
    assert!(result.error.is_none());
    assert!(result.env_snapshot.is_some());
}

#[tokio::test]
async fn test_stderr_is_captured_separately() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_script(dir.path(), "noisy.sh", "echo out\necho err >&2\n");
    let executor = executor(&dir, None, TIMEOUT);

    let result = executor.execute(&job("j1", "noisy.sh", json!({}))).await;

    assert_eq!(result.stdout.as_deref(), Some("out\n"));
    assert_eq!(result.stderr.as_deref(), Some("err\n"));
}

#[tokio::test]
async fn test_timeout_kills_and_classifies() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_script(dir.path(), "slow.sh", "sleep 5\necho done\n");
    let executor = executor(&dir, None, Duration::from_millis(200));

    let start = std::time::Instant::now();
    let result = executor.execute(&job("j1", "slow.sh", json!({}))).await;

    assert!(start.elapsed() < Duration::from_secs(4), "child was not killed promptly");
    assert_eq!(result.status, JobStatus::Timeout);
    assert!(result.exit_code.is_none());
    assert!(result.stdout.is_none());
    assert!(result.env_snapshot.is_none());
    let message = result.error.expect("timeout message");
    assert!(message.contains("timed out"), "unexpected message: {message}");
}

#[cfg(unix)]
#[tokio::test]
async fn test_timeout_kills_script_spawned_children() {
    let dir = tempfile::tempdir().expect("tempdir");
    let marker = dir.path().join("survivor");
    // The backgrounded subshell would outlive a kill that only reaches
    // the interpreter; it stays in the interpreter's process group, so
    // the group kill takes it down before it can write the marker.
    write_script(
        dir.path(),
        "spawner.sh",
        "( sleep 1; echo alive > \"$2\" ) &\nsleep 30\n",
    );
    let executor = executor(&dir, None, Duration::from_millis(200));

    let result = executor
        .execute(&job(
            "j1",
            "spawner.sh",
            json!({"marker": marker.to_string_lossy().into_owned()}),
        ))
        .await;

    assert_eq!(result.status, JobStatus::Timeout);
    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert!(
        !marker.exists(),
        "script-spawned child survived the timeout kill"
    );
}

#[tokio::test]
async fn test_unknown_script_reports_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let executor = executor(&dir, None, TIMEOUT);

    let result = executor.execute(&job("j1", "ghost.sh", json!({}))).await;

    assert_eq!(result.status, JobStatus::Error);
    assert!(result.exit_code.is_none());
    let message = result.error.expect("error message");
    assert!(message.contains("not found"), "unexpected message: {message}");
}

#[tokio::test]
async fn test_invalid_script_id_reports_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let executor = executor(&dir, None, TIMEOUT);

    let result = executor.execute(&job("j1", "../etc/passwd", json!({}))).await;

    assert_eq!(result.status, JobStatus::Error);
    assert!(result.error.is_some());
}

#[tokio::test]
async fn test_output_is_sanitized_when_engine_present() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_script(dir.path(), "leak.sh", "echo \"password=hunter2\"\n");
    let executor = executor(&dir, Some(SanitizeEngine::with_default_rules()), TIMEOUT);

    let result = executor.execute(&job("j1", "leak.sh", json!({}))).await;

    assert_eq!(result.stdout.as_deref(), Some("password=***REDACTED***\n"));
}

#[tokio::test]
async fn test_output_passes_through_without_engine() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_script(dir.path(), "leak.sh", "echo \"password=hunter2\"\n");
    let executor = executor(&dir, None, TIMEOUT);

    let result = executor.execute(&job("j1", "leak.sh", json!({}))).await;

    assert_eq!(result.stdout.as_deref(), Some("password=hunter2\n"));
}

#[tokio::test]
async fn test_parameters_arrive_in_wire_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_script(dir.path(), "args.sh", "echo \"$@\"\n");
    let executor = executor(&dir, None, TIMEOUT);

    let result = executor
        .execute(&job("j1", "args.sh", json!({"a": "1", "b": "two"})))
        .await;

    assert_eq!(result.status, JobStatus::Success);
    assert_eq!(result.stdout.as_deref(), Some("-a 1 -b two\n"));
}
