//! Statistics engine: compares two series files and writes the report.
//!
//! The engine only reads series files. The report file is replaced as a
//! whole, and is left untouched when any input fails validation.

use std::io;
use std::path::{Path, PathBuf};

use opcost_core::{
    ComparisonReport, ReportError, SampleStore, Series, SeriesError, StoreError, TextReporter,
};
use thiserror::Error;
use tokio::fs;
use tracing::{debug, info};

/// Errors that can occur while comparing two series.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Reading a series or writing the report failed.
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The two series contain different numbers of trials.
    #[error("Structural mismatch: operation series has {operation} trials, overhead series has {overhead}")]
    StructuralMismatch { operation: usize, overhead: usize },

    /// A series file is empty or contains a line that is not a trial record.
    #[error("Malformed record in {}: {source}", path.display())]
    MalformedRecord {
        path: PathBuf,
        #[source]
        source: SeriesError,
    },

    /// The comparison parameters are invalid.
    #[error("Invalid comparison: {0}")]
    Report(ReportError),
}

impl From<StoreError> for EngineError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Io { path, source } => EngineError::Io { path, source },
            StoreError::Malformed { path, source } => EngineError::MalformedRecord { path, source },
        }
    }
}

impl From<ReportError> for EngineError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::StructuralMismatch {
                operation,
                overhead,
            } => EngineError::StructuralMismatch {
                operation,
                overhead,
            },
            other => EngineError::Report(other),
        }
    }
}

/// Compare an operation series against an overhead series.
///
/// Both files are read and validated before anything is written. On success
/// the rendered report replaces `report_file` in a single rename and the
/// built report is returned.
///
/// # Errors
///
/// Returns `MalformedRecord` for an empty or unparsable series,
/// `StructuralMismatch` when the trial counts differ, and `Io` when a file
/// cannot be read or the report cannot be written.
pub async fn compare(
    operation_file: &Path,
    overhead_file: &Path,
    report_file: &Path,
    operation_count: u64,
) -> Result<ComparisonReport, EngineError> {
    let operation = read_series(operation_file).await?;
    let overhead = read_series(overhead_file).await?;

    let report = ComparisonReport::build(&operation, &overhead, operation_count)?;
    let rendered = TextReporter::new().render(&report);

    write_atomic(report_file, rendered.as_bytes()).await?;
    info!(
        path = %report_file.display(),
        trials = report.trial_count(),
        "Wrote comparison report"
    );

    Ok(report)
}

async fn read_series(path: &Path) -> Result<Series, EngineError> {
    let series = SampleStore::new(path).read().await?;
    debug!(path = %path.display(), trials = series.len(), "Read series");
    Ok(series)
}

/// Write `contents` to a sibling temporary file, then rename it over `path`.
async fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), EngineError> {
    let io_error = |source: io::Error| EngineError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file_name = path.file_name().ok_or_else(|| {
        io_error(io::Error::new(
            io::ErrorKind::InvalidInput,
            "report path has no file name",
        ))
    })?;
    let mut temp_name = std::ffi::OsString::from(".");
    temp_name.push(file_name);
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    fs::write(&temp_path, contents).await.map_err(io_error)?;
    if let Err(e) = fs::rename(&temp_path, path).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(io_error(e));
    }
    Ok(())
}
