//! Numeric helpers shared by the scoring paths.

/// Round to 4 decimal places, the precision of every reported aggregate.
pub fn round4(x: f64) -> f64 {
    round_to(x, 4)
}

/// Round `x` to `places` decimal places.
///
/// Rounds the exact binary value of `x`, so `0.00035` (stored just below the
/// tie) becomes `0.0003`.
pub fn round_to(x: f64, places: usize) -> f64 {
    format!("{:.*}", places, x).parse().unwrap_or(x)
}

/// Clamp `x` into the unit interval.
pub fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}
