//! CLI argument parsing with clap derive

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// Remote execution agent for controller-dispatched automation jobs
#[derive(Parser)]
#[command(
    name = "runbook-agent",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Register with the controller and enter the job poll loop
    Run(commands::run::RunArgs),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error when startup fails (config or registration);
    /// the caller maps this to a non-zero exit status.
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Run(args) => commands::run::execute(&args).await,
            Command::Version => {
                commands::version::execute();
                Ok(())
            }
        }
    }
}
