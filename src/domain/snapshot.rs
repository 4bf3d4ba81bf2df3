//! Environment snapshot — best-effort host facts captured at
//! job-execution time for reproducibility.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Environment variables worth recording for reproduction. Everything
/// else stays on the host.
pub const ENV_ALLOWLIST: &[&str] = &["PATH", "PYTHONPATH", "KRB5CCNAME", "TEMP", "TMP", "LANG"];

/// A record of host/runtime facts. Every optional field is populated by
/// an independently fallible probe; absence is a valid, expected state,
/// never an error.
#[derive(Debug, Clone, Serialize)]
pub struct EnvSnapshot {
    /// Capture time, not job-start time.
    pub timestamp: DateTime<Utc>,
    pub os: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    pub runtime_version: String,
    pub env_vars: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub packages: Option<Vec<String>>,
}

impl EnvSnapshot {
    /// Snapshot with only the facts that cannot fail: timestamp, OS
    /// name, and the agent's own version. Probes fill in the rest.
    #[must_use]
    pub fn bare() -> Self {
        Self {
            timestamp: Utc::now(),
            os: std::env::consts::OS.to_string(),
            os_version: None,
            hostname: None,
            runtime_version: format!("runbook-agent {}", env!("CARGO_PKG_VERSION")),
            env_vars: BTreeMap::new(),
            shell_version: None,
            packages: None,
        }
    }
}
