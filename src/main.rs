//! Caravel CLI - ordered Kubernetes deployment sequencer
//!
//! Usage: caravel <COMMAND>
//!
//! Commands:
//!   deploy    Apply every group in plan order, waiting for readiness
//!   status    Show each group's live resource presence and readiness
//!   validate  Probe readiness checks without applying
//!   cleanup   Delete every plan resource, in reverse order

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Deploy { plan, dry_run } => {
            commands::cmd_deploy(&plan, dry_run, cli.json, cli.verbose)
        }
        Commands::Status { plan } => commands::cmd_status(&plan, cli.json),
        Commands::Validate { plan, depth } => {
            commands::cmd_validate(&plan, depth.into(), cli.json)
        }
        Commands::Cleanup { plan, yes } => commands::cmd_cleanup(&plan, yes, cli.json),
    }
}
