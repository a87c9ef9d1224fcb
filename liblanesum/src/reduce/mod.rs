//! Scalar and 4-lane vectorized summation kernels.
//!
//! The vector kernel processes f64 values in groups of [`LANE_WIDTH`](crate::LANE_WIDTH),
//! accumulates lane-wise and reduces the lanes pairwise, `(l0 + l1) + (l2 + l3)`. Because
//! that addition order differs from the scalar kernel's strict left-to-right order, the two
//! results agree only up to floating-point rounding, never bit-for-bit.

#[cfg(all(target_arch = "x86_64", target_feature = "avx"))]
mod avx;
#[cfg(all(target_arch = "x86_64", target_feature = "avx"))]
pub use avx::sum_vector;

// portable fallback for targets without 256-bit vector loads
#[cfg(not(all(target_arch = "x86_64", target_feature = "avx")))]
mod fallback;
#[cfg(not(all(target_arch = "x86_64", target_feature = "avx")))]
pub use fallback::sum_vector;

/// The caller's promise about the base address of a slice handed to [`sum_vector`].
///
/// [`Aligned`](LoadMode::Aligned) selects the alignment-assuming load path and is only
/// valid for slices whose base address is a multiple of
/// [`VECTOR_ALIGN`](crate::VECTOR_ALIGN), such as those of
/// [`AlignedBuffer`](crate::buffer::AlignedBuffer). The promise is the caller's
/// responsibility; it is checked by a debug assertion only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    Aligned,
    Unaligned,
}

/// Sum all values sequentially, left to right, from a running total of 0.0.
///
/// This is the reference kernel the vectorized results are compared against. An empty
/// slice sums to 0.0.
#[inline]
pub fn sum_scalar(values: &[f64]) -> f64 {
    values.iter().sum()
}
