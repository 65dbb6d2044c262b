use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use caravel::application::ValidateDepth;
use caravel::config::DEFAULT_PLAN_FILE;

/// Caravel - ordered Kubernetes deployment sequencer
#[derive(Parser, Debug)]
#[command(name = "caravel")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output NDJSON events for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply every group in plan order, waiting for readiness between groups
    Deploy {
        /// Path to the deploy plan
        #[arg(short, long, default_value = DEFAULT_PLAN_FILE)]
        plan: PathBuf,

        /// Load and validate the plan, print the sequence, apply nothing
        #[arg(long)]
        dry_run: bool,
    },

    /// Show each group's live resource presence and readiness
    Status {
        /// Path to the deploy plan
        #[arg(short, long, default_value = DEFAULT_PLAN_FILE)]
        plan: PathBuf,
    },

    /// Probe readiness checks without applying (exits non-zero on failures)
    Validate {
        /// Path to the deploy plan
        #[arg(short, long, default_value = DEFAULT_PLAN_FILE)]
        plan: PathBuf,

        /// How deep to check
        #[arg(long, value_enum, default_value_t = Depth::Quick)]
        depth: Depth,
    },

    /// Delete every plan resource, in reverse order
    Cleanup {
        /// Path to the deploy plan
        #[arg(short, long, default_value = DEFAULT_PLAN_FILE)]
        plan: PathBuf,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Depth {
    /// Readiness checks only
    Quick,
    /// Readiness checks plus per-resource existence
    Report,
}

impl From<Depth> for ValidateDepth {
    fn from(depth: Depth) -> Self {
        match depth {
            Depth::Quick => ValidateDepth::Quick,
            Depth::Report => ValidateDepth::Report,
        }
    }
}
