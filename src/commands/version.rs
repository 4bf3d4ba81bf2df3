//! Version command.

pub fn execute() {
    println!("runbook-agent {}", env!("CARGO_PKG_VERSION"));
}
