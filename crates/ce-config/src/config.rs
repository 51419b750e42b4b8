//! Configuration types.
//!
//! Every section is defaulted, so an empty JSON object is a complete config.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::CONFIG_SCHEMA_VERSION;

/// Default seed for the synthetic route table.
pub const DEFAULT_SEED: u64 = 42;

/// Default number of synthetic route samples.
pub const DEFAULT_SAMPLES: usize = 50;

/// Complete configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub schema_version: String,
    pub data: DataSourceConfig,
    pub estimator: EstimatorParams,
    pub fuel: FuelParams,
    pub inputs: InputLimits,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_version: CONFIG_SCHEMA_VERSION.to_string(),
            data: DataSourceConfig::default(),
            estimator: EstimatorParams::default(),
            fuel: FuelParams::default(),
            inputs: InputLimits::default(),
        }
    }
}

impl Config {
    /// Apply command-line data overrides on top of the loaded config.
    pub fn apply_data_overrides(&mut self, overrides: &DataOverrides) {
        if let Some(path) = &overrides.file {
            self.data = DataSourceConfig::File { path: path.clone() };
            return;
        }
        if overrides.seed.is_none() && overrides.samples.is_none() {
            return;
        }
        let (mut seed, mut samples) = match &self.data {
            DataSourceConfig::Synthetic { seed, samples } => (*seed, *samples),
            DataSourceConfig::File { .. } => (DEFAULT_SEED, DEFAULT_SAMPLES),
        };
        if let Some(s) = overrides.seed {
            seed = s;
        }
        if let Some(n) = overrides.samples {
            samples = n;
        }
        self.data = DataSourceConfig::Synthetic { seed, samples };
    }
}

/// Command-line overrides for the data source.
///
/// A file path wins over synthetic tuning; seed or sample overrides switch a
/// file-backed config back to the synthetic strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataOverrides {
    pub file: Option<PathBuf>,
    pub seed: Option<u64>,
    pub samples: Option<usize>,
}

/// Where historical route samples come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataSourceConfig {
    /// Seeded pseudorandom table.
    Synthetic {
        #[serde(default = "default_seed")]
        seed: u64,
        #[serde(default = "default_samples")]
        samples: usize,
    },
    /// Static CSV file in the persisted layout.
    File { path: PathBuf },
}

impl Default for DataSourceConfig {
    fn default() -> Self {
        DataSourceConfig::Synthetic {
            seed: DEFAULT_SEED,
            samples: DEFAULT_SAMPLES,
        }
    }
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_samples() -> usize {
    DEFAULT_SAMPLES
}

/// Fitted travel-time coefficients.
///
/// `predicted_time_min = intercept + per_km*distance + per_signal*signals + per_pothole*potholes`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorParams {
    pub intercept: f64,
    pub per_km: f64,
    pub per_signal: f64,
    pub per_pothole: f64,
    /// Potholes added per point of road quality below 10.
    pub potholes_per_quality_step: f64,
}

impl Default for EstimatorParams {
    fn default() -> Self {
        Self {
            intercept: 9.538,
            per_km: 4.18,
            per_signal: 0.95,
            per_pothole: 1.8,
            potholes_per_quality_step: 2.2,
        }
    }
}

/// Idle fuel burn and price used to cost a trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuelParams {
    pub liters_per_hour: f64,
    pub price_per_liter: f64,
    pub currency: String,
}

impl Default for FuelParams {
    fn default() -> Self {
        Self {
            liters_per_hour: 0.3,
            price_per_liter: 102.0,
            currency: "₹".to_string(),
        }
    }
}

/// What a zone average falls back to when the zone has no samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyZoneFallback {
    /// Average over the whole table, as for the unknown-route sentinel.
    #[default]
    WholeTable,
    /// Use the default signal count and road quality.
    Neutral,
}

/// Input ranges and defaults for the trip controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputLimits {
    pub distance_km: f64,
    pub min_distance_km: f64,
    pub signals: u32,
    pub max_signals: u32,
    pub road_quality: u8,
    pub use_zone_signals: bool,
    pub use_zone_quality: bool,
    pub empty_zone_fallback: EmptyZoneFallback,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            distance_km: 10.0,
            min_distance_km: 1.0,
            signals: 14,
            max_signals: 50,
            road_quality: 5,
            use_zone_signals: false,
            use_zone_quality: false,
            empty_zone_fallback: EmptyZoneFallback::WholeTable,
        }
    }
}
