//! Job execution service — one job in, exactly one result out.

use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, error, info};

use crate::application::ports::{CommandRunner, JobExecutor, ScriptStore, Snapshotter};
use crate::domain::command::build_command;
use crate::domain::error::RunError;
use crate::domain::job::{Job, JobResult};
use crate::domain::sanitize::SanitizeEngine;

/// Runs a job's script as a subprocess: snapshot, resolve, build,
/// launch with a deadline, sanitize, classify.
pub struct ScriptExecutor<R, S, P> {
    runner: R,
    scripts: S,
    snapshotter: P,
    engine: Option<SanitizeEngine>,
    job_timeout: Duration,
}

impl<R, S, P> ScriptExecutor<R, S, P> {
    pub fn new(
        runner: R,
        scripts: S,
        snapshotter: P,
        engine: Option<SanitizeEngine>,
        job_timeout: Duration,
    ) -> Self {
        Self {
            runner,
            scripts,
            snapshotter,
            engine,
            job_timeout,
        }
    }

    fn sanitize(&self, text: &str) -> String {
        match &self.engine {
            Some(engine) => engine.sanitize(text),
            None => text.to_string(),
        }
    }
}

impl<R, S, P> JobExecutor for ScriptExecutor<R, S, P>
where
    R: CommandRunner,
    S: ScriptStore,
    P: Snapshotter,
{
    async fn execute(&self, job: &Job) -> JobResult {
        info!(job_id = %job.id, script_id = %job.script_id, "executing job");

        let snapshot = self.snapshotter.capture().await;

        let script_path = match self.scripts.resolve(&job.script_id) {
            Ok(path) => path,
            Err(err) => {
                error!(job_id = %job.id, %err, "script resolution failed");
                return JobResult::error(&job.id, 0.0, err.to_string());
            }
        };

        let command = build_command(&script_path, &job.parameters);
        debug!(job_id = %job.id, command = %command.display(), "running command");

        let start = Instant::now();
        match self.runner.run(&command, self.job_timeout).await {
            Ok(output) => {
                let duration = start.elapsed().as_secs_f64();
                let stdout = self.sanitize(&String::from_utf8_lossy(&output.stdout));
                let stderr = self.sanitize(&String::from_utf8_lossy(&output.stderr));
                if !stdout.is_empty() {
                    debug!(job_id = %job.id, "job output:\n{stdout}");
                }
                if !stderr.is_empty() {
                    debug!(job_id = %job.id, "job stderr:\n{stderr}");
                }
                match output.status.code() {
                    Some(code) => {
                        info!(job_id = %job.id, exit_code = code, duration, "job finished");
                        JobResult::completed(&job.id, code, duration, snapshot, stdout, stderr)
                    }
                    None => {
                        error!(job_id = %job.id, "job process terminated by signal");
                        JobResult::error(&job.id, duration, "process terminated by signal")
                    }
                }
            }
            Err(RunError::Timeout(limit)) => {
                let duration = start.elapsed().as_secs_f64();
                error!(job_id = %job.id, limit_secs = limit.as_secs(), "job timed out");
                JobResult::timeout(
                    &job.id,
                    duration,
                    format!("job execution timed out after {}s", limit.as_secs()),
                )
            }
            Err(err) => {
                let duration = start.elapsed().as_secs_f64();
                error!(job_id = %job.id, %err, "job failed to start");
                JobResult::error(&job.id, duration, err.to_string())
            }
        }
    }
}
