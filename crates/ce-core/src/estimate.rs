//! Trip time, fuel and cost estimation.
//!
//! `predicted_time_min = intercept + per_km*distance + per_signal*signals + per_pothole*potholes`,
//! then fuel burned idling over that time and its cost. Values are not
//! rounded here; rounding is a presentation concern (see [`crate::render`]).

use ce_config::{Config, EstimatorParams, FuelParams};
use serde::{Deserialize, Serialize};

/// Road condition as supplied by the user or a zone average.
///
/// Quality converts to an estimated pothole count; there is no conversion
/// back from potholes to quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RoadCondition {
    /// Rating 1 (many potholes) to 10 (smooth).
    Quality(u8),
    /// Pothole count along the route.
    Potholes(u32),
}

impl RoadCondition {
    pub fn estimated_potholes(self, params: &EstimatorParams) -> u32 {
        match self {
            RoadCondition::Quality(q) => potholes_from_quality(q, params.potholes_per_quality_step),
            RoadCondition::Potholes(p) => p,
        }
    }
}

/// `round((10 - quality) * per_step)`, with quality clamped to 1..=10.
pub fn potholes_from_quality(quality: u8, per_step: f64) -> u32 {
    let steps = 10 - quality.clamp(1, 10);
    (steps as f64 * per_step).round().max(0.0) as u32
}

/// A single trip to estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TripRequest {
    pub distance_km: f64,
    pub signals: u32,
    pub road: RoadCondition,
}

impl TripRequest {
    /// Build a request; negative or non-finite distances become 0.
    pub fn new(distance_km: f64, signals: u32, road: RoadCondition) -> Self {
        let distance_km = if distance_km.is_finite() {
            distance_km.max(0.0)
        } else {
            0.0
        };
        Self {
            distance_km,
            signals,
            road,
        }
    }
}

/// Estimator output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TripEstimate {
    pub estimated_potholes: u32,
    pub predicted_time_min: f64,
    pub fuel_loss_liters: f64,
    pub fuel_cost: f64,
}

/// Stateless estimator over fixed coefficients.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Estimator {
    params: EstimatorParams,
    fuel: FuelParams,
}

impl Estimator {
    pub fn new(params: EstimatorParams, fuel: FuelParams) -> Self {
        Self { params, fuel }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.estimator, config.fuel.clone())
    }

    pub fn params(&self) -> &EstimatorParams {
        &self.params
    }

    pub fn fuel(&self) -> &FuelParams {
        &self.fuel
    }

    /// Predicted travel time in minutes.
    pub fn predicted_time(&self, distance_km: f64, signals: u32, potholes: u32) -> f64 {
        let p = &self.params;
        p.intercept
            + p.per_km * distance_km
            + p.per_signal * signals as f64
            + p.per_pothole * potholes as f64
    }

    pub fn estimate(&self, request: &TripRequest) -> TripEstimate {
        let estimated_potholes = request.road.estimated_potholes(&self.params);
        let predicted_time_min =
            self.predicted_time(request.distance_km, request.signals, estimated_potholes);
        let fuel_loss_liters = predicted_time_min / 60.0 * self.fuel.liters_per_hour;
        let fuel_cost = fuel_loss_liters * self.fuel.price_per_liter;
        TripEstimate {
            estimated_potholes,
            predicted_time_min,
            fuel_loss_liters,
            fuel_cost,
        }
    }
}

/// Estimate with the default coefficients and fuel price.
pub fn estimate(request: &TripRequest) -> TripEstimate {
    Estimator::default().estimate(request)
}
