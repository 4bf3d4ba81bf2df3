//! Production `CommandRunner` — tokio process execution with a hard
//! deadline and guaranteed kill on all platforms.
//!
//! On Windows, `tokio::time::timeout` around `.output().await` does
//! not kill the child when the timeout fires — the future is dropped
//! but the OS process keeps running. This implementation uses
//! `tokio::select!` with an explicit kill, which also reaps the
//! process before the timeout error returns.
//!
//! Jobs run under an interpreter (`sh`, `python3`, `pwsh`), so killing
//! the direct child alone would orphan anything the script itself
//! spawned. On Unix the child is placed in its own process group at
//! spawn and the kill signal goes to the whole group.

use std::process::{Output, Stdio};
use std::time::Duration;

use tokio::io::AsyncReadExt;
use tokio::process::Child;

use crate::application::ports::CommandRunner;
use crate::domain::command::CommandLine;
use crate::domain::error::RunError;

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioCommandRunner;

impl TokioCommandRunner {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for TokioCommandRunner {
    async fn run(&self, command: &CommandLine, timeout: Duration) -> Result<Output, RunError> {
        let mut cmd = tokio::process::Command::new(&command.program);
        cmd.args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        #[cfg(unix)]
        cmd.process_group(0);

        let mut child = cmd.spawn().map_err(|source| RunError::Launch {
            program: command.program.clone(),
            source,
        })?;

        let mut stdout_handle = child.stdout.take();
        let mut stderr_handle = child.stderr.take();

        // Read stdout/stderr concurrently with wait() to avoid pipe
        // deadlock: a child writing more than the OS pipe buffer blocks
        // on write, and wait() alone would never resolve.
        tokio::select! {
            result = async {
                let (status, stdout, stderr) = tokio::join!(
                    child.wait(),
                    read_to_end(&mut stdout_handle),
                    read_to_end(&mut stderr_handle),
                );
                let status = status.map_err(|source| RunError::Wait {
                    program: command.program.clone(),
                    source,
                })?;
                Ok(Output { status, stdout, stderr })
            } => result,
            () = tokio::time::sleep(timeout) => {
                kill_process_group(&child);
                let _ = child.kill().await;
                Err(RunError::Timeout(timeout))
            }
        }
    }
}

/// Signal the child's whole process group. The child is its own group
/// leader (`process_group(0)` at spawn), so its pid doubles as the
/// pgid. The caller still kills and reaps the direct child afterwards.
#[cfg(unix)]
fn kill_process_group(child: &Child) {
    if let Some(pid) = child.id().and_then(|pid| i32::try_from(pid).ok()) {
        // SAFETY: kill(2) takes a pid and a signal number; no pointers
        // or process memory are involved.
        #[allow(unsafe_code)]
        unsafe {
            libc::kill(-pid, libc::SIGKILL);
        }
    }
}

#[cfg(not(unix))]
fn kill_process_group(_child: &Child) {}

async fn read_to_end<R: AsyncReadExt + Unpin>(handle: &mut Option<R>) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Some(reader) = handle {
        let _ = reader.read_to_end(&mut buf).await;
    }
    buf
}
