//! Randomized rounding of expected counts to whole individuals.

use rand::Rng;

/// Rounds a non-negative expected count to an integer whose expectation is `rate`.
///
/// Returns `floor(rate) + 1` with probability `rate - floor(rate)` and
/// `floor(rate)` otherwise. Exactly one uniform draw is taken from `rng` per
/// call, even when `rate` is already a whole number.
///
/// `rate` must be finite and non-negative. This is only checked in debug
/// builds; release builds treat negative and NaN rates as zero.
pub fn stochastic_round(rate: f64, rng: &mut impl Rng) -> u64 {
    debug_assert!(
        rate.is_finite() && rate >= 0.0,
        "rate must be finite and non-negative, got {rate}"
    );
    let rate = rate.max(0.0);
    let base = rate.floor();
    let frac = rate - base;
    let draw: f64 = rng.random();
    let base = base as u64;
    if draw < frac { base + 1 } else { base }
}
