//! Job and result wire types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::snapshot::EnvSnapshot;

/// A unit of work retrieved from the controller: a script reference
/// plus parameters, to be run once.
///
/// `parameters` keeps wire order (serde_json `preserve_order`), which
/// is the order the command builder renders them in.
#[derive(Debug, Clone, Deserialize)]
pub struct Job {
    pub id: String,
    #[serde(rename = "scriptId")]
    pub script_id: String,
    #[serde(default)]
    pub parameters: Map<String, Value>,
}

/// Outcome classification for one job. Exactly one holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Success,
    Failed,
    Timeout,
    Error,
}

/// Result of one job execution, serialized and sent to the controller,
/// then discarded.
///
/// Invariants (enforced by the constructors): `success` ⇔ exit code 0;
/// `failed` ⇔ exit code present and non-zero; `timeout`/`error` carry
/// no exit code and no output, only an error message. The environment
/// snapshot is present only when execution actually started.
#[derive(Debug, Clone, Serialize)]
pub struct JobResult {
    pub job_id: String,
    pub status: JobStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    pub duration: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env_snapshot: Option<EnvSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stdout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl JobResult {
    /// Result for a process that ran to completion with an exit code.
    #[must_use]
    pub fn completed(
        job_id: &str,
        exit_code: i32,
        duration: f64,
        snapshot: EnvSnapshot,
        stdout: String,
        stderr: String,
    ) -> Self {
        Self {
            job_id: job_id.to_string(),
            status: if exit_code == 0 {
                JobStatus::Success
            } else {
                JobStatus::Failed
            },
            exit_code: Some(exit_code),
            duration,
            env_snapshot: Some(snapshot),
            stdout: Some(stdout),
            stderr: Some(stderr),
            error: None,
        }
    }

    /// Result for a process killed at the timeout deadline. Partial
    /// output is discarded: a timed-out process's state is not
    /// trustworthy.
    #[must_use]
    pub fn timeout(job_id: &str, duration: f64, message: impl Into<String>) -> Self {
        Self {
            job_id: job_id.to_string(),
            status: JobStatus::Timeout,
            exit_code: None,
            duration,
            env_snapshot: None,
            stdout: None,
            stderr: None,
            error: Some(message.into()),
        }
    }

    /// Result for a job that never produced an exit code: launch
    /// failure, unresolvable script, or a signal-killed process.
    #[must_use]
    pub fn error(job_id: &str, duration: f64, message: impl Into<String>) -> Self {
        Self {
            job_id: job_id.to_string(),
            status: JobStatus::Error,
            exit_code: None,
            duration,
            env_snapshot: None,
            stdout: None,
            stderr: None,
            error: Some(message.into()),
        }
    }
}
