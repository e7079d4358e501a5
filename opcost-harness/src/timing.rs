use std::hint::black_box;
use std::time::{Duration, Instant};

use num_bigint::BigInt;

use crate::Trial;

/// Time a synchronous closure with the monotonic clock.
///
/// The closure must not yield: anything it waits on is counted in the
/// elapsed time. The elapsed time is kept as whole nanoseconds, saturating
/// at `u64::MAX`.
pub fn measure<F>(work: F) -> Trial
where
    F: FnOnce() -> BigInt,
{
    let start = Instant::now();
    let accumulator = black_box(work());
    let elapsed = start.elapsed();

    Trial {
        elapsed_ns: saturating_nanos(elapsed),
        accumulator,
    }
}

/// Whole nanoseconds in `duration`, saturating at `u64::MAX`.
pub fn saturating_nanos(duration: Duration) -> u64 {
    u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX)
}
