//! Agent configuration schema and validators.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::sanitize::SanitizeEngine;

/// Top-level agent configuration, loaded from a YAML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Controller base URL.
    pub controller_url: String,
    /// Display name; defaults to the host name when unset.
    pub name: Option<String>,
    /// Shared secret sent with registration.
    pub registration_secret: String,
    /// Seconds between heartbeats.
    pub heartbeat_interval: u64,
    /// Seconds between job polls.
    pub poll_interval: u64,
    /// Hard wall-clock limit per job, in seconds.
    pub job_timeout: u64,
    /// Directory script ids resolve against.
    pub scripts_dir: PathBuf,
    /// Whether captured output is sanitized before reporting.
    pub sanitize_output: bool,
    /// Custom redaction patterns; empty means the built-in rule set.
    pub sanitize_patterns: Vec<String>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            controller_url: default_controller_url(),
            name: None,
            registration_secret: String::new(),
            heartbeat_interval: default_heartbeat_interval(),
            poll_interval: default_poll_interval(),
            job_timeout: default_job_timeout(),
            scripts_dir: default_scripts_dir(),
            sanitize_output: true,
            sanitize_patterns: Vec::new(),
        }
    }
}

fn default_controller_url() -> String {
    "http://localhost:3001".to_string()
}

fn default_heartbeat_interval() -> u64 {
    30
}

fn default_poll_interval() -> u64 {
    5
}

fn default_job_timeout() -> u64 {
    3600
}

fn default_scripts_dir() -> PathBuf {
    PathBuf::from("scripts")
}

impl AgentConfig {
    /// # Errors
    ///
    /// Returns an error if any interval is zero or the controller URL
    /// is empty.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(!self.controller_url.is_empty(), "controller_url must not be empty");
        anyhow::ensure!(self.heartbeat_interval > 0, "heartbeat_interval must be at least 1 second");
        anyhow::ensure!(self.poll_interval > 0, "poll_interval must be at least 1 second");
        anyhow::ensure!(self.job_timeout > 0, "job_timeout must be at least 1 second");
        Ok(())
    }

    /// Sanitization engine per the config: `None` when sanitization is
    /// disabled, the default rule set when no patterns are configured.
    #[must_use]
    pub fn sanitize_engine(&self) -> Option<SanitizeEngine> {
        if !self.sanitize_output {
            return None;
        }
        if self.sanitize_patterns.is_empty() {
            Some(SanitizeEngine::with_default_rules())
        } else {
            Some(SanitizeEngine::from_patterns(&self.sanitize_patterns))
        }
    }
}
