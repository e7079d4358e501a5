//! Runs the measurement steps configured for one invocation.
//!
//! The pipeline runs the operation series, then the overhead series, then
//! compares them. Each step only communicates with the next through files,
//! so any step can be rerun on its own.

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::time::Instant;

use clap::ValueEnum;
use opcost_core::{ComparisonReport, SampleStore};
use opcost_harness::{
    run_series, saturating_nanos, SeriesOutcome, WorkloadRegistry, OPERATION, OVERHEAD,
};
use thiserror::Error;
use tokio::fs;
use tracing::info;

use crate::config::Config;
use crate::engine::{self, EngineError};
use crate::setup::{prepare_output_dir, DirState};
use crate::system::{self, SystemInfo};

/// Errors that can occur while running the pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The output directory could not be created.
    #[error("Failed to create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A series file could not be inspected before a run.
    #[error("Failed to inspect series file {}: {source}", path.display())]
    SeriesFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A series file already holds records from an earlier run.
    #[error("Series file {} already holds records; empty the output directory first", path.display())]
    StaleSeries { path: PathBuf },

    /// No workload is registered under the requested name.
    #[error("Workload not found: {0}")]
    WorkloadNotFound(String),

    /// The comparison failed.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// One of the two reference workloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WorkloadKind {
    /// The measured arithmetic.
    Operation,
    /// The loop and conversion cost alone.
    Overhead,
}

impl WorkloadKind {
    /// Registry name of the workload.
    pub fn name(self) -> &'static str {
        match self {
            WorkloadKind::Operation => OPERATION,
            WorkloadKind::Overhead => OVERHEAD,
        }
    }
}

impl fmt::Display for WorkloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Drives the harness and the statistics engine from a configuration.
pub struct Pipeline {
    config: Config,
    registry: WorkloadRegistry,
}

impl Pipeline {
    /// Create a pipeline with the reference workloads registered.
    pub fn new(config: Config) -> Self {
        let registry =
            WorkloadRegistry::with_defaults(config.benchmark.operation_count, config.benchmark.step);
        Self { config, registry }
    }

    /// Create a pipeline with a custom workload registry.
    ///
    /// The registry must contain workloads named `operation` and `overhead`.
    pub fn with_registry(config: Config, registry: WorkloadRegistry) -> Self {
        Self { config, registry }
    }

    /// The configuration this pipeline runs with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Path of the series file for `kind`.
    pub fn series_path(&self, kind: WorkloadKind) -> PathBuf {
        match kind {
            WorkloadKind::Operation => self.config.output.operation_path(),
            WorkloadKind::Overhead => self.config.output.overhead_path(),
        }
    }

    /// Run one workload for the configured number of trials, appending to
    /// its series file.
    pub async fn run_series(&mut self, kind: WorkloadKind) -> Result<SeriesOutcome, PipelineError> {
        let directory = &self.config.output.directory;
        fs::create_dir_all(directory)
            .await
            .map_err(|source| PipelineError::OutputDir {
                path: directory.clone(),
                source,
            })?;

        let store = SampleStore::new(self.series_path(kind));
        let iterations = self.config.benchmark.iteration_count;
        let task = self
            .registry
            .get_mut(kind.name())
            .ok_or_else(|| PipelineError::WorkloadNotFound(kind.name().to_string()))?;

        let start = Instant::now();
        let outcome = run_series(task.as_mut(), iterations, &store).await;
        info!(
            workload = %kind,
            elapsed_ns = saturating_nanos(start.elapsed()),
            "Series complete"
        );

        Ok(outcome)
    }

    /// Compare the operation and overhead series and write the report.
    pub async fn compare(&self) -> Result<ComparisonReport, EngineError> {
        let output = &self.config.output;
        engine::compare(
            &output.operation_path(),
            &output.overhead_path(),
            &output.report_path(),
            self.config.benchmark.operation_count,
        )
        .await
    }

    /// Empty the output directory, creating it if it is missing.
    pub async fn reset_output(&self) -> Result<DirState, PipelineError> {
        let directory = &self.config.output.directory;
        prepare_output_dir(directory)
            .await
            .map_err(|source| PipelineError::OutputDir {
                path: directory.clone(),
                source,
            })
    }

    /// Run both series and compare them.
    ///
    /// Both series files must be missing or empty, so that each holds a
    /// single run numbered from 1. Call `reset_output` first to discard an
    /// earlier run.
    pub async fn run_all(&mut self) -> Result<ComparisonReport, PipelineError> {
        for kind in [WorkloadKind::Operation, WorkloadKind::Overhead] {
            self.ensure_fresh(kind).await?;
        }

        self.run_series(WorkloadKind::Operation).await?;
        self.run_series(WorkloadKind::Overhead).await?;

        let start = Instant::now();
        let report = self.compare().await?;
        info!(
            elapsed_ns = saturating_nanos(start.elapsed()),
            "Comparison complete"
        );

        Ok(report)
    }

    async fn ensure_fresh(&self, kind: WorkloadKind) -> Result<(), PipelineError> {
        let path = self.series_path(kind);
        match fs::metadata(&path).await {
            Ok(meta) if meta.len() > 0 => Err(PipelineError::StaleSeries { path }),
            Ok(_) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(PipelineError::SeriesFile { path, source }),
        }
    }

    /// Write the system information file.
    pub async fn write_system_info(&self) -> io::Result<SystemInfo> {
        system::write_system_info(&self.config.output.system_info_path()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;
    use opcost_harness::Trial;
    use tempfile::TempDir;

    fn test_config(dir: &TempDir) -> Config {
        let mut config = Config::default();
        config.benchmark.operation_count = 1_000;
        config.benchmark.iteration_count = 3;
        config.output.directory = dir.path().join("data");
        config
    }

    fn fixed_registry(operation_ns: u64, overhead_ns: u64) -> WorkloadRegistry {
        let mut registry = WorkloadRegistry::new();
        registry.register(OPERATION, move |acc: BigInt| {
            Trial::new(operation_ns, acc + 3u32)
        });
        registry.register(OVERHEAD, move |acc: BigInt| Trial::new(overhead_ns, acc));
        registry
    }

    #[test]
    fn test_workload_kind_names() {
        assert_eq!(WorkloadKind::Operation.name(), "operation");
        assert_eq!(WorkloadKind::Overhead.to_string(), "overhead");
    }

    #[tokio::test]
    async fn test_run_series_creates_directory() {
        let dir = TempDir::new().unwrap();
        let mut pipeline = Pipeline::new(test_config(&dir));

        let outcome = pipeline.run_series(WorkloadKind::Operation).await.unwrap();

        assert_eq!(outcome.trials, 3);
        assert_eq!(outcome.persisted, 3);
        assert_eq!(outcome.final_accumulator, BigInt::from(9_000u32));
        let text =
            std::fs::read_to_string(pipeline.series_path(WorkloadKind::Operation)).unwrap();
        assert_eq!(text.lines().count(), 3);
    }

    #[tokio::test]
    async fn test_run_all_produces_report() {
        let dir = TempDir::new().unwrap();
        let mut pipeline =
            Pipeline::with_registry(test_config(&dir), fixed_registry(4_000, 1_000));

        let report = pipeline.run_all().await.unwrap();

        assert_eq!(report.trial_count(), 3);
        assert_eq!(report.mean_row().difference_ns, 3.0);
        assert!(pipeline.config().output.report_path().exists());
    }

    #[tokio::test]
    async fn test_run_all_twice_rejects_stale_series() {
        let dir = TempDir::new().unwrap();
        let mut pipeline =
            Pipeline::with_registry(test_config(&dir), fixed_registry(500, 200));

        pipeline.run_all().await.unwrap();
        let err = pipeline.run_all().await.unwrap_err();

        assert!(matches!(
            &err,
            PipelineError::StaleSeries { path }
                if *path == pipeline.series_path(WorkloadKind::Operation)
        ));
        let text =
            std::fs::read_to_string(pipeline.series_path(WorkloadKind::Operation)).unwrap();
        assert_eq!(text, "1,500,3\n2,500,6\n3,500,9\n");
        let text =
            std::fs::read_to_string(pipeline.series_path(WorkloadKind::Overhead)).unwrap();
        assert_eq!(text.lines().count(), 3);
    }

    #[tokio::test]
    async fn test_run_all_after_reset_starts_fresh() {
        let dir = TempDir::new().unwrap();
        let mut pipeline =
            Pipeline::with_registry(test_config(&dir), fixed_registry(500, 200));

        pipeline.run_all().await.unwrap();
        let state = pipeline.reset_output().await.unwrap();
        let report = pipeline.run_all().await.unwrap();

        assert_eq!(state, DirState::Cleared { removed: 3 });
        assert_eq!(report.trial_count(), 3);
        let text =
            std::fs::read_to_string(pipeline.series_path(WorkloadKind::Operation)).unwrap();
        assert_eq!(text, "1,500,3\n2,500,6\n3,500,9\n");
    }

    #[tokio::test]
    async fn test_run_all_accepts_empty_series_files() {
        let dir = TempDir::new().unwrap();
        let mut pipeline =
            Pipeline::with_registry(test_config(&dir), fixed_registry(500, 200));
        std::fs::create_dir_all(&pipeline.config().output.directory).unwrap();
        std::fs::write(pipeline.series_path(WorkloadKind::Operation), "").unwrap();

        let report = pipeline.run_all().await.unwrap();
        assert_eq!(report.trial_count(), 3);
    }

    #[tokio::test]
    async fn test_run_series_missing_workload() {
        let dir = TempDir::new().unwrap();
        let mut pipeline = Pipeline::with_registry(test_config(&dir), WorkloadRegistry::new());

        let err = pipeline.run_series(WorkloadKind::Overhead).await.unwrap_err();
        assert!(matches!(err, PipelineError::WorkloadNotFound(name) if name == "overhead"));
    }

    #[tokio::test]
    async fn test_write_system_info() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        std::fs::create_dir_all(&config.output.directory).unwrap();
        let pipeline = Pipeline::new(config);

        pipeline.write_system_info().await.unwrap();
        assert!(pipeline.config().output.system_info_path().exists());
    }
}
