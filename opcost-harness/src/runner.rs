//! Sequential execution of a task into a series file.

use num_bigint::BigInt;
use num_traits::Zero;
use opcost_core::{SampleStore, TrialRecord};
use tracing::{info, warn};

use crate::Task;

/// Summary of one harness run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesOutcome {
    /// Number of task executions.
    pub trials: u32,
    /// Number of trial records successfully appended to the store.
    pub persisted: u32,
    /// Accumulator produced by the last trial.
    pub final_accumulator: BigInt,
}

impl SeriesOutcome {
    /// Number of trials whose record could not be appended.
    pub fn skipped(&self) -> u32 {
        self.trials - self.persisted
    }
}

/// Run `task` `iterations` times and append one record per trial to `store`.
///
/// The accumulator starts at zero and each trial receives the accumulator
/// produced by the one before it. Trials never overlap and the timed section
/// never yields; suspension happens only while appending.
///
/// A failed append is logged and that trial is left out of the file. The run
/// always completes all `iterations` executions.
pub async fn run_series<T>(task: &mut T, iterations: u32, store: &SampleStore) -> SeriesOutcome
where
    T: Task + ?Sized,
{
    info!(
        path = %store.path().display(),
        iterations,
        "Starting series"
    );

    let mut accumulator = BigInt::zero();
    let mut persisted = 0;

    for index in 1..=iterations {
        let trial = task.run(accumulator);
        accumulator = trial.accumulator;

        let record = TrialRecord::new(u64::from(index), trial.elapsed_ns, accumulator.clone());
        match store.append(&record).await {
            Ok(()) => {
                persisted += 1;
                info!("{record}");
            }
            Err(e) => {
                warn!(
                    index,
                    path = %store.path().display(),
                    error = %e,
                    "Failed to append trial record, trial not persisted"
                );
            }
        }
    }

    info!(
        path = %store.path().display(),
        persisted,
        final_accumulator = %accumulator,
        "Finished series"
    );

    SeriesOutcome {
        trials: iterations,
        persisted,
        final_accumulator: accumulator,
    }
}
