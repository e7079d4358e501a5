//! Timing harness for opcost
//!
//! The harness runs a task a fixed number of times, threading an accumulator
//! from each trial into the next, and appends one trial record per run to a
//! series file. Two reference workloads are provided: an operation workload
//! and an overhead workload that loops the same number of times without the
//! measured arithmetic.

mod runner;
mod timing;
pub mod workload;

pub use runner::{run_series, SeriesOutcome};
pub use timing::{measure, saturating_nanos};
pub use workload::{OperationWorkload, OverheadWorkload, OPERATION, OVERHEAD};

use std::collections::BTreeMap;

use num_bigint::BigInt;

/// The result of one task execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trial {
    /// Elapsed time of the timed section in nanoseconds.
    pub elapsed_ns: u64,
    /// Accumulator value to hand to the next trial.
    pub accumulator: BigInt,
}

impl Trial {
    pub fn new(elapsed_ns: u64, accumulator: BigInt) -> Self {
        Self {
            elapsed_ns,
            accumulator,
        }
    }
}

/// A unit of timed work.
///
/// A task maps the accumulator produced by the previous trial to the elapsed
/// time of its own timed section and a new accumulator. The data dependency
/// between trials keeps the work from being optimized away.
pub trait Task {
    fn run(&mut self, accumulator: BigInt) -> Trial;
}

impl<F> Task for F
where
    F: FnMut(BigInt) -> Trial,
{
    fn run(&mut self, accumulator: BigInt) -> Trial {
        self(accumulator)
    }
}

/// A boxed task that can be stored in a registry.
pub type BoxedTask = Box<dyn Task + Send>;

/// Registry of named workloads.
///
/// Each workload is identified by a unique string name. Names are listed in
/// sorted order.
pub struct WorkloadRegistry {
    workloads: BTreeMap<String, BoxedTask>,
}

impl WorkloadRegistry {
    /// Create a new empty workload registry.
    pub fn new() -> Self {
        Self {
            workloads: BTreeMap::new(),
        }
    }

    /// Create a registry holding the operation and overhead reference
    /// workloads, both looping `operation_count` times.
    pub fn with_defaults(operation_count: u64, step: u64) -> Self {
        let mut registry = Self::new();
        registry.register(OPERATION, OperationWorkload::new(operation_count, step));
        registry.register(OVERHEAD, OverheadWorkload::new(operation_count));
        registry
    }

    /// Register a workload with the given name, replacing any previous
    /// workload of the same name.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let mut registry = WorkloadRegistry::new();
    /// registry.register("double", |acc: BigInt| {
    ///     measure(|| acc * 2u32)
    /// });
    /// ```
    pub fn register<T>(&mut self, name: impl Into<String>, task: T)
    where
        T: Task + Send + 'static,
    {
        self.workloads.insert(name.into(), Box::new(task));
    }

    /// List all registered workload names.
    pub fn list(&self) -> Vec<String> {
        self.workloads.keys().cloned().collect()
    }

    /// Get a workload by name for running.
    ///
    /// Returns `None` if no workload with the given name exists.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut BoxedTask> {
        self.workloads.get_mut(name)
    }

    /// Check if a workload with the given name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.workloads.contains_key(name)
    }

    /// Get the number of registered workloads.
    pub fn len(&self) -> usize {
        self.workloads.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.workloads.is_empty()
    }
}

impl Default for WorkloadRegistry {
    fn default() -> Self {
        Self::new()
    }
}
