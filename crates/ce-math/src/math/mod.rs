//! Core math modules.

pub mod round;
pub mod sampling;
pub mod stats;
