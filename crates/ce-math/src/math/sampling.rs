//! Seeded samplers for the distributions the route generator draws from.
//!
//! These work over any `rand::Rng`, so a seeded `ChaCha8Rng` gives identical
//! streams on every platform.

use rand::Rng;

/// Draw from Normal(mean, sd) using the Box-Muller transform.
///
/// One uniform pair is consumed per draw; the second variate is discarded so
/// the stream position depends only on the number of draws.
pub fn sample_normal<R: Rng + ?Sized>(rng: &mut R, mean: f64, sd: f64) -> f64 {
    // u1 in (0, 1] keeps ln() finite.
    let u1: f64 = 1.0 - rng.random::<f64>();
    let u2: f64 = rng.random::<f64>();
    let z = (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos();
    mean + sd * z
}

/// Draw from Poisson(lambda) using Knuth's multiplication method.
///
/// Suitable for the small rates used here (lambda well under 100).
pub fn sample_poisson<R: Rng + ?Sized>(rng: &mut R, lambda: f64) -> u64 {
    if !lambda.is_finite() || lambda <= 0.0 {
        return 0;
    }
    let limit = (-lambda).exp();
    let mut k = 0u64;
    let mut p = 1.0;
    loop {
        p *= rng.random::<f64>();
        if p <= limit {
            return k;
        }
        k += 1;
    }
}
