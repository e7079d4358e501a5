//! opcost: the per-operation cost of a workload, net of loop overhead
//!
//! This library times an operation workload and a matching overhead workload
//! over repeated trials, stores every trial in a series file, and compares
//! the two series into a report of per-operation times.

pub mod cli;
pub mod config;
pub mod engine;
pub mod pipeline;
pub mod setup;
pub mod system;

// Re-export core types for convenience
pub use opcost_core::{
    ComparisonReport, ComparisonRow, Reporter, SampleStats, SampleStore, Series, TerminalReporter,
    TextReporter, TrialRecord,
};
pub use opcost_harness::{run_series, SeriesOutcome, Task, Trial, WorkloadRegistry};

// Re-export main types from this crate
pub use cli::{Cli, Command};
pub use config::Config;
pub use engine::{compare, EngineError};
pub use pipeline::{Pipeline, PipelineError, WorkloadKind};
pub use setup::{prepare_output_dir, DirState};
pub use system::{write_system_info, SystemInfo};
