//! Agent lifecycle — registration and the heartbeat/poll loop.

use std::time::Duration;

use anyhow::{Context, Result};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::application::ports::{ControllerClient, JobExecutor, RegisterRequest};

/// Lifecycle states. `Stopped` is terminal: reached by cancellation or
/// an unrecoverable startup failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentState {
    Unregistered,
    Registering,
    Registered,
    Running,
    Stopped,
}

/// Identity and cadence settings, fixed at process start.
#[derive(Debug, Clone)]
pub struct AgentSettings {
    pub display_name: String,
    pub hostname: String,
    pub registration_secret: String,
    pub heartbeat_interval: Duration,
    pub poll_interval: Duration,
}

/// The agent state machine. Single control loop, one job at a time,
/// no concurrent network calls.
pub struct Agent<C, E> {
    settings: AgentSettings,
    controller: C,
    executor: E,
    agent_id: Option<String>,
    state: AgentState,
    last_heartbeat: Option<Instant>,
}

impl<C, E> Agent<C, E>
where
    C: ControllerClient,
    E: JobExecutor,
{
    pub fn new(settings: AgentSettings, controller: C, executor: E) -> Self {
        Self {
            settings,
            controller,
            executor,
            agent_id: None,
            state: AgentState::Unregistered,
            last_heartbeat: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> AgentState {
        self.state
    }

    #[must_use]
    pub fn agent_id(&self) -> Option<&str> {
        self.agent_id.as_deref()
    }

    /// Register with the controller. The assigned id is stored exactly
    /// once; failure is fatal to the agent and never retried here.
    ///
    /// # Errors
    ///
    /// Returns the underlying network/protocol error. The caller is
    /// expected to exit the process with a non-zero status.
    pub async fn register(&mut self) -> Result<()> {
        self.state = AgentState::Registering;
        let request = RegisterRequest {
            name: self.settings.display_name.clone(),
            hostname: self.settings.hostname.clone(),
            secret: self.settings.registration_secret.clone(),
        };
        info!(name = %request.name, hostname = %request.hostname, "registering agent");

        match self.controller.register(&request).await {
            Ok(id) => {
                info!(agent_id = %id, "agent registered");
                self.agent_id = Some(id);
                self.state = AgentState::Registered;
                Ok(())
            }
            Err(err) => {
                error!(error = %format!("{err:#}"), "agent registration failed");
                self.state = AgentState::Stopped;
                Err(err.context("agent registration failed"))
            }
        }
    }

    /// The heartbeat/poll loop. Runs until `cancel` fires. Transient
    /// heartbeat, poll, and report failures are logged and never stop
    /// the loop; heartbeat and poll failures are independent within an
    /// iteration. Jobs run sequentially: each result is reported before
    /// the next job starts.
    ///
    /// # Errors
    ///
    /// Returns an error only when called before successful registration.
    pub async fn run(&mut self, cancel: CancellationToken) -> Result<()> {
        let agent_id = self
            .agent_id
            .clone()
            .context("agent is not registered, cannot enter poll loop")?;
        self.state = AgentState::Running;
        info!(agent_id = %agent_id, "entering poll loop");

        while !cancel.is_cancelled() {
            if self.heartbeat_due() {
                match self.controller.heartbeat(&agent_id).await {
                    Ok(()) => debug!("heartbeat sent"),
                    Err(err) => warn!(agent_id = %agent_id, %err, "heartbeat failed"),
                }
                // Advance the timestamp even on failure: the cadence
                // holds and the next interval retries.
                self.last_heartbeat = Some(Instant::now());
            }

            match self.controller.fetch_jobs(&agent_id).await {
                Ok(jobs) => {
                    for job in jobs {
                        if cancel.is_cancelled() {
                            break;
                        }
                        info!(job_id = %job.id, script_id = %job.script_id, "received job");
                        let result = self.executor.execute(&job).await;
                        match self.controller.report_result(&agent_id, &result).await {
                            Ok(()) => {
                                info!(job_id = %job.id, status = ?result.status, "reported job result");
                            }
                            Err(err) => {
                                warn!(job_id = %job.id, %err, "failed to report job result");
                            }
                        }
                    }
                }
                Err(err) => warn!(agent_id = %agent_id, %err, "job poll failed"),
            }

            tokio::select! {
                () = cancel.cancelled() => break,
                () = tokio::time::sleep(self.settings.poll_interval) => {}
            }
        }

        self.state = AgentState::Stopped;
        info!("agent stopped");
        Ok(())
    }

    fn heartbeat_due(&self) -> bool {
        self.last_heartbeat
            .is_none_or(|sent| sent.elapsed() >= self.settings.heartbeat_interval)
    }
}
