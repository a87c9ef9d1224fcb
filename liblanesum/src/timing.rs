//! Latency measurement for repeated vectorized summation.

use crate::reduce::{LoadMode, sum_vector};
use std::hint::black_box;
use std::time::Instant;

/// The outcome of timing repeated summation of one buffer.
#[derive(Debug, Clone, Copy)]
pub struct Measurement {
    /// Average wall-clock nanoseconds per summation call.
    pub nanos_per_run: f64,
    /// The sum produced by the final repetition. All earlier results are discarded.
    pub result: f64,
}

/// Time `runs` back-to-back invocations of [`sum_vector`] over `values` and report the
/// average latency per call.
///
/// The input is routed through [`black_box`] so the repeated calls are not collapsed into
/// one by the optimizer.
///
/// # Parameters
/// - `values` the f64 values to sum
/// - `mode` the load path to time, see [`LoadMode`]
/// - `runs` how many repetitions to average over
///
/// # Panic
/// Panics if `runs` is zero.
pub fn measure(values: &[f64], mode: LoadMode, runs: usize) -> Measurement {
    assert!(runs > 0, "cannot average over zero runs");

    let mut result = 0.0;
    let start = Instant::now();
    for _ in 0..runs {
        result = sum_vector(black_box(values), mode);
    }
    let elapsed = start.elapsed();

    Measurement {
        nanos_per_run: elapsed.as_nanos() as f64 / runs as f64,
        result: black_box(result),
    }
}
