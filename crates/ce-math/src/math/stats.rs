//! Summary statistics over small samples.
//!
//! Empty inputs yield `None` rather than NaN so callers must pick a fallback
//! explicitly.

/// Arithmetic mean.
pub fn mean(xs: &[f64]) -> Option<f64> {
    if xs.is_empty() {
        return None;
    }
    Some(xs.iter().sum::<f64>() / xs.len() as f64)
}

/// Population standard deviation (divides by `n`, not `n - 1`).
pub fn std_dev(xs: &[f64]) -> Option<f64> {
    let m = mean(xs)?;
    let var = xs.iter().map(|x| (x - m) * (x - m)).sum::<f64>() / xs.len() as f64;
    Some(var.sqrt())
}

/// Linearly rescale `xs` so its mean and population standard deviation
/// become `target_mean` and `target_sd`.
///
/// A constant sample (zero spread) is shifted onto `target_mean`.
pub fn zscore_rescale(xs: &[f64], target_mean: f64, target_sd: f64) -> Vec<f64> {
    let (Some(m), Some(sd)) = (mean(xs), std_dev(xs)) else {
        return Vec::new();
    };
    if sd <= f64::EPSILON {
        return vec![target_mean; xs.len()];
    }
    xs.iter()
        .map(|x| (x - m) / sd * target_sd + target_mean)
        .collect()
}
