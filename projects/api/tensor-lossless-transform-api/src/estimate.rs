//! Cheap compressibility estimate used to skip the entropy coder on noise-like planes.

use lossless_transform_utils::{entropy::*, histogram::*, match_estimator::*};

/// Fraction of an estimated LZ match that is assumed to be saved.
const LZ_MATCH_MULTIPLIER: f64 = 0.5809;

/// Estimates how many bits per input byte a coder would need for `plane`.
///
/// Combines the order-0 entropy of the plane with an estimate of how much of it repeats.
/// Returns a value in `0.0..=8.0`; `0.0` for an empty plane.
pub fn estimated_bits_per_byte(plane: &[u8]) -> f64 {
    if plane.is_empty() {
        return 0.0;
    }

    let num_matches = estimate_num_lz_matches_fast(plane);

    let mut histogram = Histogram32::default();
    histogram32_from_bytes(plane, &mut histogram);
    let entropy = code_length_of_histogram32(&histogram, plane.len() as u64);

    let bytes_after_lz = plane
        .len()
        .saturating_sub((num_matches as f64 * LZ_MATCH_MULTIPLIER) as usize);

    bytes_after_lz as f64 * entropy / plane.len() as f64
}
