//! Command construction — maps a script path plus parameters to a
//! structured argument vector.
//!
//! Arguments are passed to process-creation APIs as an array with no
//! shell interpretation, so parameter values cannot inject extra
//! arguments or shell syntax.

use std::ffi::OsStr;
use std::path::Path;

use serde_json::{Map, Value};

/// A program and its argument vector, ready to spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    /// Single-line rendering for logs. Not shell-quoted; never feed
    /// this back to a shell.
    #[must_use]
    pub fn display(&self) -> String {
        let mut out = self.program.clone();
        for arg in &self.args {
            out.push(' ');
            out.push_str(arg);
        }
        out
    }
}

/// Build the invocation for a script: interpreter by file extension,
/// then the script path, then `-<name> <value>` pairs in parameter
/// iteration order.
#[must_use]
pub fn build_command(script_path: &Path, parameters: &Map<String, Value>) -> CommandLine {
    let script = script_path.to_string_lossy().into_owned();
    let interpreter = script_path
        .extension()
        .and_then(OsStr::to_str)
        .and_then(interpreter_for);

    let (program, mut args) = match interpreter {
        Some(interpreter) => (interpreter.to_string(), vec![script]),
        // Unrecognized extension: assume the script is directly executable.
        None => (script, Vec::new()),
    };

    for (name, value) in parameters {
        args.push(format!("-{name}"));
        args.push(render_value(value));
    }

    CommandLine { program, args }
}

fn interpreter_for(extension: &str) -> Option<&'static str> {
    match extension.to_ascii_lowercase().as_str() {
        "ps1" => Some("pwsh"),
        "py" => Some("python3"),
        "sh" => Some("sh"),
        _ => None,
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
