use super::LoadMode;
use crate::LANE_WIDTH;

/// Portable rendition of the vectorized sum for targets without 256-bit vector loads.
///
/// Accumulates into [`LANE_WIDTH`] virtual lanes with the same grouping and reduces them
/// in the same pairwise order as the vector kernel, so both produce bit-identical results
/// for identical input. The load mode has no instruction to select here; slices are read
/// the same way under either promise.
#[inline]
pub fn sum_vector(values: &[f64], _mode: LoadMode) -> f64 {
    let mut lanes = [0.0; LANE_WIDTH];

    let mut groups = values.chunks_exact(LANE_WIDTH);
    for group in &mut groups {
        for (lane, &value) in lanes.iter_mut().zip(group) {
            *lane += value;
        }
    }

    let mut sum = (lanes[0] + lanes[1]) + (lanes[2] + lanes[3]);
    for &value in groups.remainder() {
        sum += value;
    }

    sum
}
