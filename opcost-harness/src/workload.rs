//! Reference workloads.
//!
//! Both workloads loop `operation_count` times and convert into the
//! accumulator type on every step. Only the operation workload performs the
//! addition being measured, so the difference between the two isolates its
//! cost.

use std::hint::black_box;

use num_bigint::BigInt;

use crate::{measure, Task, Trial};

/// Registry name of the operation workload.
pub const OPERATION: &str = "operation";

/// Registry name of the overhead workload.
pub const OVERHEAD: &str = "overhead";

/// Adds `step` to the accumulator `operation_count` times.
#[derive(Debug, Clone)]
pub struct OperationWorkload {
    operation_count: u64,
    step: BigInt,
}

impl OperationWorkload {
    pub fn new(operation_count: u64, step: u64) -> Self {
        Self {
            operation_count,
            step: BigInt::from(step),
        }
    }
}

impl Task for OperationWorkload {
    fn run(&mut self, accumulator: BigInt) -> Trial {
        let step = &self.step;
        let operation_count = self.operation_count;

        measure(move || {
            let mut acc = accumulator;
            for _ in 0..black_box(operation_count) {
                acc = black_box(acc + step);
            }
            acc
        })
    }
}

/// Sets the accumulator to the loop index `operation_count` times.
#[derive(Debug, Clone)]
pub struct OverheadWorkload {
    operation_count: u64,
}

impl OverheadWorkload {
    pub fn new(operation_count: u64) -> Self {
        Self { operation_count }
    }
}

impl Task for OverheadWorkload {
    fn run(&mut self, accumulator: BigInt) -> Trial {
        let operation_count = self.operation_count;

        measure(move || {
            let mut acc = accumulator;
            for b in 0..black_box(operation_count) {
                acc = black_box(BigInt::from(b));
            }
            acc
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_workload_accumulates() {
        let mut workload = OperationWorkload::new(1_000, 3);

        let first = workload.run(BigInt::from(0u32));
        assert_eq!(first.accumulator, BigInt::from(3_000u32));

        let second = workload.run(first.accumulator);
        assert_eq!(second.accumulator, BigInt::from(6_000u32));
    }

    #[test]
    fn test_operation_workload_exceeds_u128() {
        let mut workload = OperationWorkload::new(2, 1);
        let start = BigInt::from(u128::MAX);

        let trial = workload.run(start.clone());
        assert_eq!(trial.accumulator, start + 2u32);
    }

    #[test]
    fn test_overhead_workload_ends_at_last_index() {
        let mut workload = OverheadWorkload::new(1_000);

        let trial = workload.run(BigInt::from(123_456u32));
        assert_eq!(trial.accumulator, BigInt::from(999u32));
    }

    #[test]
    fn test_zero_operations_pass_accumulator_through() {
        let mut operation = OperationWorkload::new(0, 3);
        let mut overhead = OverheadWorkload::new(0);

        assert_eq!(operation.run(BigInt::from(9u32)).accumulator, BigInt::from(9u32));
        assert_eq!(overhead.run(BigInt::from(9u32)).accumulator, BigInt::from(9u32));
    }
}
