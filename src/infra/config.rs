//! Configuration loading from a YAML file on disk.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;

use crate::domain::config::AgentConfig;

/// Load the agent configuration. A missing file is not an error: the
/// agent starts with defaults, matching a freshly provisioned host.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load(path: &Path) -> Result<AgentConfig> {
    if !path.exists() {
        warn!(path = %path.display(), "config file not found, using defaults");
        return Ok(AgentConfig::default());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    serde_yaml::from_str(&content).with_context(|| format!("cannot parse {}", path.display()))
}
