//! Semantic validation of a loaded configuration.

use serde::Serialize;
use std::fmt;

use crate::config::{Config, DataSourceConfig};

/// A single failed check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All failed checks, or `Ok(())`.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// Validate every section of `config`.
pub fn validate_config(config: &Config) -> ValidationResult {
    let mut errors = Vec::new();

    if !ce_common::schema::is_compatible(&config.schema_version) {
        errors.push(ValidationError::new(
            "schema_version",
            format!("unsupported version {}", config.schema_version),
        ));
    }

    match &config.data {
        DataSourceConfig::Synthetic { samples, .. } => {
            if *samples == 0 {
                errors.push(ValidationError::new("data.samples", "must be at least 1"));
            }
        }
        DataSourceConfig::File { path } => {
            if path.as_os_str().is_empty() {
                errors.push(ValidationError::new("data.path", "must not be empty"));
            }
        }
    }

    // Positive coefficients keep predicted time strictly increasing in every input.
    let est = &config.estimator;
    for (field, value) in [
        ("estimator.per_km", est.per_km),
        ("estimator.per_signal", est.per_signal),
        ("estimator.per_pothole", est.per_pothole),
        ("estimator.potholes_per_quality_step", est.potholes_per_quality_step),
    ] {
        if !value.is_finite() || value <= 0.0 {
            errors.push(ValidationError::new(field, "must be a positive number"));
        }
    }
    if !est.intercept.is_finite() {
        errors.push(ValidationError::new("estimator.intercept", "must be finite"));
    }

    let fuel = &config.fuel;
    for (field, value) in [
        ("fuel.liters_per_hour", fuel.liters_per_hour),
        ("fuel.price_per_liter", fuel.price_per_liter),
    ] {
        if !value.is_finite() || value < 0.0 {
            errors.push(ValidationError::new(field, "must be a non-negative number"));
        }
    }

    let inputs = &config.inputs;
    if !inputs.min_distance_km.is_finite() || inputs.min_distance_km < 0.0 {
        errors.push(ValidationError::new(
            "inputs.min_distance_km",
            "must be a non-negative number",
        ));
    }
    if !inputs.distance_km.is_finite() || inputs.distance_km < inputs.min_distance_km {
        errors.push(ValidationError::new(
            "inputs.distance_km",
            format!("must be at least {}", inputs.min_distance_km),
        ));
    }
    if inputs.signals > inputs.max_signals {
        errors.push(ValidationError::new(
            "inputs.signals",
            format!("must not exceed max_signals ({})", inputs.max_signals),
        ));
    }
    if !(1..=10).contains(&inputs.road_quality) {
        errors.push(ValidationError::new("inputs.road_quality", "must be within 1..=10"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
