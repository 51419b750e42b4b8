//! Seeded synthetic route table.
//!
//! Used as a stand-in before real observations are available. The same seed
//! and sample count always yield the same table.

use ce_common::{Zone, BUILTIN_ZONES};
use ce_math::{round_clamp_u32, round_to, sample_normal, sample_poisson, zscore_rescale};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use super::{
    derive_road_quality, DataError, RouteSample, RouteSource, RouteTable, SourceKey,
    DISTANCE_RANGE_KM, MAX_POTHOLES, MAX_SIGNALS, MIN_TIME_MIN,
};

/// Constants of the generating process.
///
/// These are independent of the estimator's fitted coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorParams {
    pub distance_mean: f64,
    pub distance_sd: f64,
    pub signal_rate: f64,
    pub signal_per_km: f64,
    pub pothole_mean: f64,
    pub pothole_sd: f64,
    pub pothole_per_km: f64,
    pub time_intercept: f64,
    pub time_per_km: f64,
    pub time_per_signal: f64,
    pub time_per_pothole: f64,
    pub time_noise_sd: f64,
    pub target_time_mean: f64,
    pub target_time_sd: f64,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self {
            distance_mean: 10.66,
            distance_sd: 4.0,
            signal_rate: 14.0,
            signal_per_km: 0.3,
            pothole_mean: 5.0,
            pothole_sd: 3.0,
            pothole_per_km: 0.2,
            time_intercept: 9.538,
            time_per_km: 4.524,
            time_per_signal: 0.5,
            time_per_pothole: 1.0,
            time_noise_sd: 5.0,
            target_time_mean: 57.77,
            target_time_sd: 23.45,
        }
    }
}

/// Generate `samples` route observations from `seed`.
///
/// Draws happen column by column (distances, signals, potholes, time noise,
/// zones) from one `ChaCha8Rng` stream.
pub fn generate_routes(seed: u64, samples: usize, params: &GeneratorParams) -> RouteTable {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let (min_km, max_km) = DISTANCE_RANGE_KM;

    let distances: Vec<f64> = (0..samples)
        .map(|_| {
            sample_normal(&mut rng, params.distance_mean, params.distance_sd).clamp(min_km, max_km)
        })
        .collect();

    let signals: Vec<u32> = distances
        .iter()
        .map(|d| {
            let base = sample_poisson(&mut rng, params.signal_rate) as f64;
            let raw = base + (d - params.distance_mean) * params.signal_per_km;
            round_clamp_u32(raw, 0, MAX_SIGNALS)
        })
        .collect();

    let potholes: Vec<u32> = distances
        .iter()
        .map(|d| {
            let base = sample_normal(&mut rng, params.pothole_mean, params.pothole_sd);
            let raw = base + (d - params.distance_mean) * params.pothole_per_km;
            round_clamp_u32(raw, 0, MAX_POTHOLES)
        })
        .collect();

    let time_raw: Vec<f64> = (0..samples)
        .map(|i| {
            params.time_intercept
                + params.time_per_km * distances[i]
                + params.time_per_signal * signals[i] as f64
                + params.time_per_pothole * potholes[i] as f64
                + sample_normal(&mut rng, 0.0, params.time_noise_sd)
        })
        .collect();
    let times = zscore_rescale(&time_raw, params.target_time_mean, params.target_time_sd);

    let rows = (0..samples)
        .map(|i| {
            let zone = BUILTIN_ZONES[rng.random_range(0..BUILTIN_ZONES.len())];
            RouteSample {
                zone: Zone::new(zone),
                distance_km: round_to(distances[i], 2),
                time_min: round_to(times[i].max(MIN_TIME_MIN), 2),
                signals: signals[i],
                potholes: potholes[i],
                road_quality: derive_road_quality(potholes[i]),
            }
        })
        .collect();

    RouteTable::new(rows)
}

/// Synthetic strategy.
#[derive(Debug, Clone)]
pub struct SyntheticSource {
    seed: u64,
    samples: usize,
    params: GeneratorParams,
}

impl SyntheticSource {
    pub fn new(seed: u64, samples: usize) -> Self {
        Self {
            seed,
            samples,
            params: GeneratorParams::default(),
        }
    }
}

impl RouteSource for SyntheticSource {
    fn describe(&self) -> String {
        format!("synthetic (seed {}, {} samples)", self.seed, self.samples)
    }

    fn key(&self) -> Result<SourceKey, DataError> {
        Ok(SourceKey::Synthetic {
            seed: self.seed,
            samples: self.samples,
        })
    }

    fn load(&self) -> Result<RouteTable, DataError> {
        debug!(seed = self.seed, samples = self.samples, "generating synthetic routes");
        Ok(generate_routes(self.seed, self.samples, &self.params))
    }
}
