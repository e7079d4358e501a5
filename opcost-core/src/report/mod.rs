use std::io::Write;

use thiserror::Error;

use crate::record::Series;
use crate::stats::SampleStats;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Structural mismatch: operation series has {operation} trials, overhead series has {overhead}")]
    StructuralMismatch { operation: usize, overhead: usize },

    #[error("Operation count must be greater than zero")]
    ZeroOperationCount,
}

/// Per-operation times of one trial, in nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComparisonRow {
    pub operation_ns: f64,
    pub overhead_ns: f64,
    pub difference_ns: f64,
}

/// Operation series compared against overhead series, trial by trial.
#[derive(Debug, Clone)]
pub struct ComparisonReport {
    pub operation_count: u64,
    pub rows: Vec<ComparisonRow>,
    pub operation_stats: SampleStats,
    pub overhead_stats: SampleStats,
    pub difference_stats: SampleStats,
}

impl ComparisonReport {
    /// Compare two series of equal length.
    ///
    /// Each trial duration is divided by `operation_count` to give the time of
    /// a single operation; the difference is operation minus overhead.
    pub fn build(
        operation: &Series,
        overhead: &Series,
        operation_count: u64,
    ) -> Result<Self, ReportError> {
        if operation.len() != overhead.len() {
            return Err(ReportError::StructuralMismatch {
                operation: operation.len(),
                overhead: overhead.len(),
            });
        }
        if operation_count == 0 {
            return Err(ReportError::ZeroOperationCount);
        }

        let count = operation_count as f64;
        let rows: Vec<ComparisonRow> = operation
            .iter()
            .zip(overhead.iter())
            .map(|(op, ov)| {
                let operation_ns = op.duration_ns as f64 / count;
                let overhead_ns = ov.duration_ns as f64 / count;
                ComparisonRow {
                    operation_ns,
                    overhead_ns,
                    difference_ns: operation_ns - overhead_ns,
                }
            })
            .collect();

        let operation_stats = SampleStats::of(&column(&rows, |r| r.operation_ns));
        let overhead_stats = SampleStats::of(&column(&rows, |r| r.overhead_ns));
        let difference_stats = SampleStats::of(&column(&rows, |r| r.difference_ns));

        Ok(Self {
            operation_count,
            rows,
            operation_stats,
            overhead_stats,
            difference_stats,
        })
    }

    /// Number of trials compared.
    pub fn trial_count(&self) -> usize {
        self.rows.len()
    }

    /// Means of the three columns.
    pub fn mean_row(&self) -> ComparisonRow {
        ComparisonRow {
            operation_ns: self.operation_stats.mean,
            overhead_ns: self.overhead_stats.mean,
            difference_ns: self.difference_stats.mean,
        }
    }

    /// Standard deviations of the three columns.
    pub fn std_dev_row(&self) -> ComparisonRow {
        ComparisonRow {
            operation_ns: self.operation_stats.std_dev,
            overhead_ns: self.overhead_stats.std_dev,
            difference_ns: self.difference_stats.std_dev,
        }
    }
}

fn column(rows: &[ComparisonRow], f: impl Fn(&ComparisonRow) -> f64) -> Vec<f64> {
    rows.iter().map(f).collect()
}

pub trait Reporter: Send + Sync {
    fn report(&self, report: &ComparisonReport, writer: &mut dyn Write)
        -> Result<(), ReportError>;
}

mod terminal;
mod text;
pub use terminal::TerminalReporter;
pub use text::TextReporter;
