//! Host environment probes behind the `Snapshotter` port.
//!
//! Every probe is independently fallible: a missing binary, a non-zero
//! exit, or a timeout leaves that field absent and never fails the
//! snapshot. Probes go through the `CommandRunner` port so tests never
//! fork.

use std::time::Duration;

use crate::application::ports::{CommandRunner, Snapshotter};
use crate::domain::command::CommandLine;
use crate::domain::snapshot::{ENV_ALLOWLIST, EnvSnapshot};

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);
const PACKAGES_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

pub struct HostSnapshotter<R> {
    runner: R,
}

impl<R> HostSnapshotter<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl<R: CommandRunner> Snapshotter for HostSnapshotter<R> {
    async fn capture(&self) -> EnvSnapshot {
        let mut snapshot = EnvSnapshot::bare();

        snapshot.os_version = probe(&self.runner, "uname", &["-r"], PROBE_TIMEOUT).await;
        snapshot.hostname = detect_hostname(&self.runner).await;
        snapshot.shell_version = probe(
            &self.runner,
            "pwsh",
            &["-NoProfile", "-Command", "$PSVersionTable.PSVersion.ToString()"],
            PROBE_TIMEOUT,
        )
        .await;
        // Jobs are predominantly Python/PowerShell scripts; the Python
        // package set is what matters for reproducing a run.
        snapshot.packages = probe(
            &self.runner,
            "python3",
            &["-m", "pip", "freeze"],
            PACKAGES_PROBE_TIMEOUT,
        )
        .await
        .map(|listing| listing.lines().map(str::to_string).collect());

        for name in ENV_ALLOWLIST {
            if let Ok(value) = std::env::var(name) {
                snapshot.env_vars.insert((*name).to_string(), value);
            }
        }

        snapshot
    }
}

/// Host name via the `hostname` binary, falling back to the
/// environment. `None` when the host offers neither.
pub async fn detect_hostname<R: CommandRunner>(runner: &R) -> Option<String> {
    match probe(runner, "hostname", &[], PROBE_TIMEOUT).await {
        Some(name) => Some(name),
        None => ["HOSTNAME", "COMPUTERNAME"]
            .iter()
            .find_map(|var| std::env::var(var).ok().filter(|value| !value.is_empty())),
    }
}

async fn probe<R: CommandRunner>(
    runner: &R,
    program: &str,
    args: &[&str],
    timeout: Duration,
) -> Option<String> {
    let command = CommandLine {
        program: program.to_string(),
        args: args.iter().map(|arg| (*arg).to_string()).collect(),
    };
    match runner.run(&command, timeout).await {
        Ok(output) if output.status.success() => {
            let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
            (!text.is_empty()).then_some(text)
        }
        _ => None,
    }
}
