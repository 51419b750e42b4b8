//! Per-zone aggregation over a route table.

use ce_common::{Zone, ZoneSelection};
use ce_config::{EmptyZoneFallback, InputLimits};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::data::{RouteSample, RouteTable};

/// Which rows an average was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AverageBasis {
    /// Rows of the selected zone.
    Zone,
    /// Every row (unknown route, or empty-zone fallback).
    WholeTable,
    /// No rows at all; neutral defaults.
    Neutral,
}

/// Truncated mean signal count and road quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ZoneAverages {
    pub signals: u32,
    pub quality: u8,
    pub basis: AverageBasis,
    pub samples: usize,
}

/// How to fill in an average when the filtered rows are empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AveragePolicy {
    pub fallback: EmptyZoneFallback,
    pub neutral_signals: u32,
    pub neutral_quality: u8,
}

impl Default for AveragePolicy {
    fn default() -> Self {
        Self::from_limits(&InputLimits::default())
    }
}

impl AveragePolicy {
    pub fn from_limits(limits: &InputLimits) -> Self {
        Self {
            fallback: limits.empty_zone_fallback,
            neutral_signals: limits.signals,
            neutral_quality: limits.road_quality,
        }
    }

    fn neutral(&self) -> ZoneAverages {
        ZoneAverages {
            signals: self.neutral_signals,
            quality: self.neutral_quality,
            basis: AverageBasis::Neutral,
            samples: 0,
        }
    }
}

fn averages_of<'a>(
    rows: impl Iterator<Item = &'a RouteSample>,
    basis: AverageBasis,
) -> Option<ZoneAverages> {
    let (mut count, mut signals, mut quality) = (0usize, 0f64, 0f64);
    for row in rows {
        count += 1;
        signals += row.signals as f64;
        quality += row.road_quality as f64;
    }
    if count == 0 {
        return None;
    }
    let n = count as f64;
    Some(ZoneAverages {
        signals: (signals / n) as u32,
        quality: ((quality / n) as u8).clamp(1, 10),
        basis,
        samples: count,
    })
}

/// Mean signals and road quality for a zone, truncated to integers.
///
/// The unknown-route sentinel averages the whole table. A zone with no rows
/// falls back per `policy`; an empty table always yields the neutral values.
pub fn zone_average(
    table: &RouteTable,
    selection: &ZoneSelection,
    policy: &AveragePolicy,
) -> ZoneAverages {
    let whole = || averages_of(table.iter(), AverageBasis::WholeTable);

    let found = match selection {
        ZoneSelection::UnknownRoute => whole(),
        ZoneSelection::Zone(zone) => {
            averages_of(table.in_zone(zone), AverageBasis::Zone).or_else(|| {
                debug!(zone = %zone, fallback = ?policy.fallback, "zone has no samples");
                match policy.fallback {
                    EmptyZoneFallback::WholeTable => whole(),
                    EmptyZoneFallback::Neutral => None,
                }
            })
        }
    };
    found.unwrap_or_else(|| policy.neutral())
}

/// Zones offered to the user: table zones sorted by name, then the sentinel.
pub fn zone_choices(table: &RouteTable) -> Vec<ZoneSelection> {
    table
        .zones()
        .into_iter()
        .map(ZoneSelection::Zone)
        .chain(std::iter::once(ZoneSelection::UnknownRoute))
        .collect()
}

/// Column that can be averaged per zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneMetric {
    Signals,
    RoadQuality,
    TimeMin,
    DistanceKm,
}

impl ZoneMetric {
    pub fn value(self, row: &RouteSample) -> f64 {
        match self {
            ZoneMetric::Signals => row.signals as f64,
            ZoneMetric::RoadQuality => row.road_quality as f64,
            ZoneMetric::TimeMin => row.time_min,
            ZoneMetric::DistanceKm => row.distance_km,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ZoneMetric::Signals => "Avg Signals by Zone",
            ZoneMetric::RoadQuality => "Avg Road Quality by Zone",
            ZoneMetric::TimeMin => "Avg Time (min) by Zone",
            ZoneMetric::DistanceKm => "Avg Distance (km) by Zone",
        }
    }
}

/// One bar of a per-zone chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneMean {
    pub zone: Zone,
    pub mean: f64,
}

fn group_by_zone(table: &RouteTable) -> BTreeMap<&Zone, Vec<&RouteSample>> {
    let mut groups: BTreeMap<&Zone, Vec<&RouteSample>> = BTreeMap::new();
    for row in table {
        groups.entry(&row.zone).or_default().push(row);
    }
    groups
}

fn mean_of(rows: &[&RouteSample], metric: ZoneMetric) -> f64 {
    let values: Vec<f64> = rows.iter().map(|r| metric.value(r)).collect();
    ce_math::mean(&values).unwrap_or_default()
}

/// Per-zone mean of `metric`, ascending by value (ties by zone name).
pub fn zone_means(table: &RouteTable, metric: ZoneMetric) -> Vec<ZoneMean> {
    let mut bars: Vec<ZoneMean> = group_by_zone(table)
        .into_iter()
        .map(|(zone, rows)| ZoneMean {
            zone: zone.clone(),
            mean: mean_of(&rows, metric),
        })
        .collect();
    bars.sort_by(|a, b| a.mean.total_cmp(&b.mean).then_with(|| a.zone.cmp(&b.zone)));
    bars
}

/// All per-zone means for one zone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneSummary {
    pub zone: Zone,
    pub samples: usize,
    pub mean_distance_km: f64,
    pub mean_time_min: f64,
    pub mean_signals: f64,
    pub mean_road_quality: f64,
}

/// Summaries for every zone, sorted by zone name.
pub fn zone_summaries(table: &RouteTable) -> Vec<ZoneSummary> {
    group_by_zone(table)
        .into_iter()
        .map(|(zone, rows)| ZoneSummary {
            zone: zone.clone(),
            samples: rows.len(),
            mean_distance_km: mean_of(&rows, ZoneMetric::DistanceKm),
            mean_time_min: mean_of(&rows, ZoneMetric::TimeMin),
            mean_signals: mean_of(&rows, ZoneMetric::Signals),
            mean_road_quality: mean_of(&rows, ZoneMetric::RoadQuality),
        })
        .collect()
}
