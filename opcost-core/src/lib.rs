//! Core types and utilities for opcost.
//!
//! This crate holds the trial record format, the append-only sample store,
//! and the statistics and reporting used to compare an operation series
//! against its overhead series. It is shared by the timing harness and the
//! opcost CLI so both agree on the series file format.

pub mod record;
pub mod report;
pub mod stats;
pub mod store;

// Re-export main types for convenience
pub use record::{RecordError, Series, SeriesError, TrialRecord};
pub use report::{
    ComparisonReport, ComparisonRow, ReportError, Reporter, TerminalReporter, TextReporter,
};
pub use stats::SampleStats;
pub use store::{SampleStore, StoreError};
