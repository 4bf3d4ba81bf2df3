//! The `run` command — wires configuration to the infrastructure and
//! drives the agent lifecycle.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::application::executor::ScriptExecutor;
use crate::application::lifecycle::{Agent, AgentSettings};
use crate::infra;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::controller::HttpController;
use crate::infra::scripts::DirScriptStore;
use crate::infra::snapshot::{HostSnapshotter, detect_hostname};

/// Arguments for the run command.
#[derive(Args)]
pub struct RunArgs {
    /// Path to the agent configuration file
    #[arg(long, default_value = "config.yaml", env = "RUNBOOK_AGENT_CONFIG")]
    pub config: PathBuf,
}

/// # Errors
///
/// Returns an error when the configuration is unreadable or invalid,
/// or when registration fails — both fatal, mapped to exit status 1.
pub async fn execute(args: &RunArgs) -> Result<()> {
    let config = infra::config::load(&args.config)?;
    config.validate()?;

    let runner = TokioCommandRunner::new();
    let hostname = detect_hostname(&runner)
        .await
        .unwrap_or_else(|| "unknown-host".to_string());

    let settings = AgentSettings {
        display_name: config.name.clone().unwrap_or_else(|| hostname.clone()),
        hostname,
        registration_secret: config.registration_secret.clone(),
        heartbeat_interval: Duration::from_secs(config.heartbeat_interval),
        poll_interval: Duration::from_secs(config.poll_interval),
    };

    let executor = ScriptExecutor::new(
        runner,
        DirScriptStore::new(&config.scripts_dir),
        HostSnapshotter::new(TokioCommandRunner::new()),
        config.sanitize_engine(),
        Duration::from_secs(config.job_timeout),
    );
    let controller = HttpController::new(&config.controller_url);
    let mut agent = Agent::new(settings, controller, executor);

    agent.register().await?;

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received, shutting down");
            signal_cancel.cancel();
        }
    });

    agent.run(cancel).await
}
