//! Front-end–neutral dashboard session.
//!
//! Holds the shared route table and answers one [`TripInputs`] at a time with
//! a [`DashboardView`]. Inputs are clamped here, at the boundary, so nothing
//! downstream needs an invalid-input error. With an empty table (missing data
//! file) the dashboard is non-interactive and refuses to evaluate.

use ce_common::ZoneSelection;
use ce_config::{Config, InputLimits};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::cache::TableCache;
use crate::data::{source_for, DataError, RouteTable};
use crate::estimate::{Estimator, RoadCondition, TripEstimate, TripRequest};
use crate::zones::{
    zone_average, zone_choices, zone_means, zone_summaries, AveragePolicy, ZoneAverages,
    ZoneMean, ZoneMetric, ZoneSummary,
};

/// Signal count control: a slider value or the zone average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum SignalInput {
    Manual(u32),
    ZoneAverage,
}

/// Road quality control: a 1..=10 rating or the zone average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum QualityInput {
    Manual(u8),
    ZoneAverage,
}

/// Raw control values for one interaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripInputs {
    pub distance_km: f64,
    pub zone: ZoneSelection,
    pub signals: SignalInput,
    pub road: QualityInput,
}

impl TripInputs {
    /// Initial control state.
    pub fn defaults(limits: &InputLimits) -> Self {
        Self {
            distance_km: limits.distance_km,
            zone: ZoneSelection::UnknownRoute,
            signals: if limits.use_zone_signals {
                SignalInput::ZoneAverage
            } else {
                SignalInput::Manual(limits.signals)
            },
            road: if limits.use_zone_quality {
                QualityInput::ZoneAverage
            } else {
                QualityInput::Manual(limits.road_quality)
            },
        }
    }

    /// Clamp every control into its range.
    pub fn clamped(&self, limits: &InputLimits) -> Self {
        let distance_km = if self.distance_km.is_finite() {
            self.distance_km.max(limits.min_distance_km)
        } else {
            limits.distance_km
        };
        let signals = match self.signals {
            SignalInput::Manual(n) => SignalInput::Manual(n.min(limits.max_signals)),
            SignalInput::ZoneAverage => SignalInput::ZoneAverage,
        };
        let road = match self.road {
            QualityInput::Manual(q) => QualityInput::Manual(q.clamp(1, 10)),
            QualityInput::ZoneAverage => QualityInput::ZoneAverage,
        };
        Self {
            distance_km,
            zone: self.zone.clone(),
            signals,
            road,
        }
    }
}

/// Why the dashboard cannot answer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DashboardError {
    #[error("dashboard unavailable: {notice}")]
    Unavailable { notice: String },
}

/// Everything a front-end needs to render one interaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub inputs: TripInputs,
    pub zone_averages: ZoneAverages,
    pub request: TripRequest,
    pub estimate: TripEstimate,
    /// Road quality that fed the pothole estimate.
    pub quality_rating: u8,
    pub signals_from_average: bool,
    pub quality_from_average: bool,
}

/// Dashboard session over one route table.
#[derive(Debug, Clone)]
pub struct Dashboard {
    table: Arc<RouteTable>,
    estimator: Estimator,
    limits: InputLimits,
    policy: AveragePolicy,
    notice: Option<String>,
}

impl Dashboard {
    pub fn new(table: Arc<RouteTable>, config: &Config) -> Self {
        let notice = table
            .is_empty()
            .then(|| "route table is empty; estimates are disabled".to_string());
        Self {
            table,
            estimator: Estimator::from_config(config),
            limits: config.inputs.clone(),
            policy: AveragePolicy::from_limits(&config.inputs),
            notice,
        }
    }

    /// Load the configured table through `cache` and open a session.
    ///
    /// A missing data file degrades to an empty, non-interactive dashboard
    /// carrying a notice; other data errors are returned.
    pub fn open(config: &Config, cache: &mut TableCache) -> Result<Self, DataError> {
        let source = source_for(&config.data);
        match cache.get_or_load(source.as_ref()) {
            Ok(table) => {
                debug!(rows = table.len(), source = %source.describe(), "dashboard opened");
                Ok(Self::new(table, config))
            }
            Err(err) if err.is_missing_source() => {
                warn!(error = %err, "route data missing; dashboard disabled");
                let mut dashboard = Self::new(Arc::new(RouteTable::empty()), config);
                dashboard.notice = Some(err.to_string());
                Ok(dashboard)
            }
            Err(err) => Err(err),
        }
    }

    pub fn is_interactive(&self) -> bool {
        !self.table.is_empty()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn estimator(&self) -> &Estimator {
        &self.estimator
    }

    pub fn limits(&self) -> &InputLimits {
        &self.limits
    }

    pub fn default_inputs(&self) -> TripInputs {
        TripInputs::defaults(&self.limits)
    }

    pub fn zone_choices(&self) -> Vec<ZoneSelection> {
        zone_choices(&self.table)
    }

    pub fn zone_average(&self, selection: &ZoneSelection) -> ZoneAverages {
        zone_average(&self.table, selection, &self.policy)
    }

    pub fn chart(&self, metric: ZoneMetric) -> Vec<ZoneMean> {
        zone_means(&self.table, metric)
    }

    pub fn summaries(&self) -> Vec<ZoneSummary> {
        zone_summaries(&self.table)
    }

    fn ensure_interactive(&self) -> Result<(), DashboardError> {
        if self.is_interactive() {
            return Ok(());
        }
        Err(DashboardError::Unavailable {
            notice: self
                .notice
                .clone()
                .unwrap_or_else(|| "route table is empty".to_string()),
        })
    }

    /// Resolve inputs against the zone averages and estimate the trip.
    pub fn evaluate(&self, inputs: &TripInputs) -> Result<DashboardView, DashboardError> {
        self.ensure_interactive()?;

        let inputs = inputs.clamped(&self.limits);
        let averages = self.zone_average(&inputs.zone);

        let (signals, signals_from_average) = match inputs.signals {
            SignalInput::Manual(n) => (n, false),
            SignalInput::ZoneAverage => (averages.signals, true),
        };
        let (quality_rating, quality_from_average) = match inputs.road {
            QualityInput::Manual(q) => (q, false),
            QualityInput::ZoneAverage => (averages.quality, true),
        };

        let request = TripRequest::new(
            inputs.distance_km,
            signals,
            RoadCondition::Quality(quality_rating),
        );
        let estimate = self.estimator.estimate(&request);
        debug!(
            zone = %inputs.zone,
            distance_km = request.distance_km,
            signals,
            quality_rating,
            predicted_time_min = estimate.predicted_time_min,
            "trip evaluated"
        );

        Ok(DashboardView {
            inputs,
            zone_averages: averages,
            request,
            estimate,
            quality_rating,
            signals_from_average,
            quality_from_average,
        })
    }
}
