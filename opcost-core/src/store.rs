//! Append-only storage of trial records, one file per series.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::record::{Series, SeriesError, TrialRecord};

/// Errors that can occur while reading a series back from disk.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The series file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The series file contents are not valid records.
    #[error("Malformed series in {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: SeriesError,
    },
}

/// A series file on disk.
///
/// Records are only ever appended; the store never rewrites or truncates
/// the file. A single writer per file is assumed.
#[derive(Debug, Clone)]
pub struct SampleStore {
    path: PathBuf,
}

impl SampleStore {
    /// Create a store backed by the file at `path`. The file is created on
    /// the first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing series file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record as a single newline-terminated line.
    pub async fn append(&self, record: &TrialRecord) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(format!("{record}\n").as_bytes()).await?;
        file.flush().await?;
        file.sync_data().await
    }

    /// Read the whole series back.
    pub async fn read(&self) -> Result<Series, StoreError> {
        let text = fs::read_to_string(&self.path)
            .await
            .map_err(|source| StoreError::Io {
                path: self.path.clone(),
                source,
            })?;

        Series::parse(&text).map_err(|source| StoreError::Malformed {
            path: self.path.clone(),
            source,
        })
    }
}
