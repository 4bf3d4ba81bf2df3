//! Port trait definitions for the application layer.
//!
//! Ports are the contracts infrastructure must fulfill. Production
//! implementations live in `crate::infra`; unit tests substitute
//! canned implementations without touching the network or forking.

use std::path::PathBuf;
use std::process::Output;
use std::time::Duration;

use anyhow::Result;
use serde::Serialize;

use crate::domain::command::CommandLine;
use crate::domain::error::{RunError, ScriptError};
use crate::domain::job::{Job, JobResult};
use crate::domain::snapshot::EnvSnapshot;

/// Registration payload sent to the controller.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub hostname: String,
    pub secret: String,
}

/// The controller HTTP contract the agent depends on.
#[allow(async_fn_in_trait)]
pub trait ControllerClient {
    /// Register this agent; returns the assigned agent id.
    async fn register(&self, request: &RegisterRequest) -> Result<String>;
    /// Announce liveness. Any 2xx response counts as success.
    async fn heartbeat(&self, agent_id: &str) -> Result<()>;
    /// Poll for queued jobs. An empty list is a normal response.
    async fn fetch_jobs(&self, agent_id: &str) -> Result<Vec<Job>>;
    /// Report one job result.
    async fn report_result(&self, agent_id: &str, result: &JobResult) -> Result<()>;
}

/// Process execution with a hard deadline and guaranteed kill.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a command with captured output. On timeout the child is
    /// killed and reaped before the error returns.
    async fn run(&self, command: &CommandLine, timeout: Duration) -> Result<Output, RunError>;
}

/// Resolves a script reference from the controller to a local path.
pub trait ScriptStore {
    /// # Errors
    ///
    /// Returns an error for malformed ids or unknown scripts.
    fn resolve(&self, script_id: &str) -> Result<PathBuf, ScriptError>;
}

/// Captures host/runtime facts. Total: individual probe failures leave
/// fields absent.
#[allow(async_fn_in_trait)]
pub trait Snapshotter {
    async fn capture(&self) -> EnvSnapshot;
}

/// Executes one job. Total: every failure mode becomes a `JobResult`,
/// nothing propagates past this boundary.
#[allow(async_fn_in_trait)]
pub trait JobExecutor {
    async fn execute(&self, job: &Job) -> JobResult;
}
