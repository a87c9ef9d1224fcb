use super::LoadMode;
use crate::{LANE_WIDTH, VECTOR_ALIGN};
use std::arch::x86_64::*;

/// Sum all values in groups of [`LANE_WIDTH`] using 256-bit vector loads, then reduce the
/// accumulator lanes pairwise and add the 0 to 3 trailing elements sequentially.
///
/// # Parameters
/// - `values` the f64 values to sum
/// - `mode` whether the base address of `values` is promised to be
///   [`VECTOR_ALIGN`]-byte aligned
///
/// Calling with [`LoadMode::Aligned`] on a slice whose base address does not satisfy the
/// vector alignment violates the contract of the aligned load instruction and may fault.
/// The promise is debug-asserted, not verified in release builds.
#[inline]
pub fn sum_vector(values: &[f64], mode: LoadMode) -> f64 {
    debug_assert!(
        mode == LoadMode::Unaligned || values.as_ptr() as usize % VECTOR_ALIGN == 0,
        "aligned load mode requires a {}-byte aligned base address",
        VECTOR_ALIGN
    );

    // SAFETY: this module is only compiled for x86_64 targets with the avx feature enabled
    unsafe { sum_avx(values, mode) }
}

#[target_feature(enable = "avx")]
unsafe fn sum_avx(values: &[f64], mode: LoadMode) -> f64 {
    let mut total = _mm256_setzero_pd();

    let mut groups = values.chunks_exact(LANE_WIDTH);
    for group in &mut groups {
        // group pointers inherit the base alignment, since full groups advance by 32 bytes
        let lanes = match mode {
            LoadMode::Aligned => _mm256_load_pd(group.as_ptr()),
            LoadMode::Unaligned => _mm256_loadu_pd(group.as_ptr()),
        };
        total = _mm256_add_pd(total, lanes);
    }

    let mut sum = reduce_lanes(total);
    for &value in groups.remainder() {
        sum += value;
    }

    sum
}

/// Reduce the 4 lanes of `total` to a scalar by pairwise addition, `(l0 + l1) + (l2 + l3)`.
#[target_feature(enable = "avx")]
unsafe fn reduce_lanes(total: __m256d) -> f64 {
    // [l0 + l1, l0 + l1, l2 + l3, l2 + l3]
    let pairs = _mm256_hadd_pd(total, total);
    let high = _mm256_extractf128_pd(pairs, 1);
    let low = _mm256_castpd256_pd128(pairs);
    _mm_cvtsd_f64(_mm_add_pd(low, high))
}
