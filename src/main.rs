//! runbook-agent — remote execution agent for controller-dispatched
//! automation jobs.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use runbook_agent::cli::Cli;

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    let cli = Cli::parse();
    if let Err(e) = cli.run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
