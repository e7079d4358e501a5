//! Command-line interface for opcost.

use crate::pipeline::WorkloadKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "opcost")]
#[command(about = "Measure the per-operation cost of a workload against its loop overhead")]
#[command(version)]
pub struct Cli {
    /// Path to config file (defaults to opcost.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// Empty the output directory, run both series, then compare them
    Run {
        /// Keep the output directory contents; fails if a series file already has records
        #[arg(long)]
        keep: bool,

        /// Also write the system information file
        #[arg(long)]
        system_info: bool,
    },

    /// Run a single workload series
    Series {
        /// Workload to run
        #[arg(value_enum)]
        workload: WorkloadKind,
    },

    /// Compare existing series files and write the report
    Compare,

    /// Write the system information file
    SystemInfo,
}
