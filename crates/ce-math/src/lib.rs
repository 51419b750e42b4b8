//! Commute Estimator math utilities.

pub mod math;

pub use math::round::*;
pub use math::sampling::*;
pub use math::stats::*;
