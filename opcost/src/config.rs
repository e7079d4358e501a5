//! Configuration loading for opcost.
//!
//! Supports loading configuration from TOML files, with defaults for all
//! settings. Trial and operation counts are configuration, not command-line
//! flags.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration for opcost.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Settings for the measured workloads.
    pub benchmark: BenchmarkConfig,
    /// Locations of the series, report and system info files.
    pub output: OutputConfig,
}

/// Configuration for the measured workloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    /// Inner loop iterations per trial, shared by both workloads.
    pub operation_count: u64,
    /// Number of trials per series.
    pub iteration_count: u32,
    /// Amount the operation workload adds on every step.
    pub step: u64,
}

/// Configuration for output files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory holding every output file.
    pub directory: PathBuf,
    /// Series file of the operation workload.
    pub operation_file: String,
    /// Series file of the overhead workload.
    pub overhead_file: String,
    /// Comparison report file.
    pub report_file: String,
    /// System information file.
    pub system_info_file: String,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            operation_count: 1_000_000_000,
            iteration_count: 10,
            step: 3,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("data"),
            operation_file: "operation_results.txt".to_string(),
            overhead_file: "overhead_results.txt".to_string(),
            report_file: "statistics.txt".to_string(),
            system_info_file: "system_info.txt".to_string(),
        }
    }
}

impl OutputConfig {
    /// Full path of the operation series file.
    pub fn operation_path(&self) -> PathBuf {
        self.directory.join(&self.operation_file)
    }

    /// Full path of the overhead series file.
    pub fn overhead_path(&self) -> PathBuf {
        self.directory.join(&self.overhead_file)
    }

    /// Full path of the report file.
    pub fn report_path(&self) -> PathBuf {
        self.directory.join(&self.report_file)
    }

    /// Full path of the system information file.
    pub fn system_info_path(&self) -> PathBuf {
        self.directory.join(&self.system_info_file)
    }
}

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "opcost.toml";

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or fails validation.
    pub fn load(path: &Path) -> Result<Config> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration from the default file (`opcost.toml`) or use defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be parsed.
    pub fn load_or_default() -> Result<Config> {
        let path = Path::new(DEFAULT_CONFIG_FILE);

        if path.exists() {
            Self::load(path)
        } else {
            Ok(Config::default())
        }
    }

    /// Load configuration from the specified path, or try the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the specified file cannot be read or parsed.
    pub fn load_from(path: Option<&Path>) -> Result<Config> {
        match path {
            Some(p) => Self::load(p),
            None => Self::load_or_default(),
        }
    }

    /// Reject settings that would make the comparison meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.benchmark.operation_count == 0 {
            bail!("benchmark.operation_count must be greater than zero");
        }
        if self.benchmark.iteration_count == 0 {
            bail!("benchmark.iteration_count must be greater than zero");
        }
        Ok(())
    }
}
