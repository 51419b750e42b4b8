//! Commute Estimator configuration loading and validation.
//!
//! This crate provides:
//! - Typed Rust structs for the estimator, fuel, input and data-source settings
//! - Config resolution (CLI → env → XDG → defaults)
//! - Semantic validation

pub mod config;
pub mod resolve;
pub mod validate;

pub use config::{
    Config, DataOverrides, DataSourceConfig, EmptyZoneFallback, EstimatorParams, FuelParams,
    InputLimits,
};
pub use resolve::{resolve_config, ConfigError, ConfigOrigin, ConfigPaths, ResolvedConfig};
pub use validate::{validate_config, ValidationError, ValidationResult};

/// Schema version for configuration files.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";
