//! Rounding and clamping helpers for converting real-valued draws into
//! bounded integer counts.

/// Round half away from zero and clamp into `[lo, hi]`.
///
/// NaN maps to `lo`.
pub fn round_clamp_u32(x: f64, lo: u32, hi: u32) -> u32 {
    if x.is_nan() {
        return lo;
    }
    let r = x.round();
    if r <= lo as f64 {
        lo
    } else if r >= hi as f64 {
        hi
    } else {
        r as u32
    }
}

/// Round to a fixed number of decimal places.
pub fn round_to(x: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (x * scale).round() / scale
}
