//! Typed domain error enums.
//!
//! All error types implement `thiserror::Error` and convert to
//! `anyhow::Error` via the `?` operator at the application boundary.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Errors from running a job subprocess.
///
/// The executor needs to tell these apart: a timeout maps to job status
/// `timeout`, everything else to status `error`.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("waiting for {program}: {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("command timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

/// Errors from resolving a script reference to a local path.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("invalid script id '{0}': path separators and '..' are not allowed")]
    InvalidId(String),

    #[error("script '{id}' not found under {}", .dir.display())]
    NotFound { id: String, dir: PathBuf },
}
