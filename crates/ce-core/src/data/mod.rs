//! Historical route samples and the strategies that provide them.
//!
//! A [`RouteSource`] is either the seeded synthetic generator or a static CSV
//! file; which one is used comes from configuration. Tables are immutable once
//! built and are shared through [`crate::cache::TableCache`].

pub mod file;
pub mod synthetic;

use ce_common::Zone;
use ce_config::DataSourceConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::SystemTime;
use thiserror::Error;

pub use file::{parse_routes, read_routes, write_routes, FileSource};
pub use synthetic::{generate_routes, GeneratorParams, SyntheticSource};

/// Stored distance range in kilometres.
pub const DISTANCE_RANGE_KM: (f64, f64) = (3.0, 20.0);

/// Lower bound on stored travel time in minutes.
pub const MIN_TIME_MIN: f64 = 15.0;

/// Upper bound on stored signal counts.
pub const MAX_SIGNALS: u32 = 30;

/// Upper bound on stored pothole counts.
pub const MAX_POTHOLES: u32 = 20;

/// Road quality score bounds (1 = worst, 10 = best).
pub const QUALITY_RANGE: (u8, u8) = (1, 10);

/// Errors from loading route data.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("route data source not found: {}", path.display())]
    MissingDataSource { path: PathBuf },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed route record at row {row}: {reason}")]
    InvalidRecord { row: usize, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DataError {
    pub fn is_missing_source(&self) -> bool {
        matches!(self, DataError::MissingDataSource { .. })
    }
}

impl From<DataError> for ce_common::Error {
    fn from(err: DataError) -> Self {
        match err {
            DataError::MissingDataSource { path } => ce_common::Error::MissingDataSource {
                path: path.display().to_string(),
            },
            DataError::InvalidRecord { row, reason } => {
                ce_common::Error::InvalidRecord { row, reason }
            }
            DataError::Csv(e) => ce_common::Error::DataSource(e.to_string()),
            DataError::Io(e) => ce_common::Error::Io(e),
        }
    }
}

/// One historical observation.
///
/// Field names follow the persisted CSV layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSample {
    #[serde(rename = "Zone")]
    pub zone: Zone,
    #[serde(rename = "Distance_km")]
    pub distance_km: f64,
    #[serde(rename = "Time_min")]
    pub time_min: f64,
    #[serde(rename = "Signals")]
    pub signals: u32,
    #[serde(rename = "Potholes")]
    pub potholes: u32,
    #[serde(rename = "Road_Quality")]
    pub road_quality: u8,
}

/// Road quality implied by a pothole count: `10 - round(potholes / 20 * 9)`,
/// clamped to 1..=10.
pub fn derive_road_quality(potholes: u32) -> u8 {
    let steps = (potholes as f64 / MAX_POTHOLES as f64 * 9.0).round();
    (10.0 - steps).clamp(QUALITY_RANGE.0 as f64, QUALITY_RANGE.1 as f64) as u8
}

/// Immutable table of route samples.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RouteTable {
    samples: Vec<RouteSample>,
}

impl RouteTable {
    pub fn new(samples: Vec<RouteSample>) -> Self {
        Self { samples }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn samples(&self) -> &[RouteSample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RouteSample> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Distinct zones present in the table, sorted by name.
    pub fn zones(&self) -> Vec<Zone> {
        let mut zones: Vec<Zone> = self.samples.iter().map(|s| s.zone.clone()).collect();
        zones.sort();
        zones.dedup();
        zones
    }

    /// Samples recorded in `zone`.
    pub fn in_zone<'a>(&'a self, zone: &'a Zone) -> impl Iterator<Item = &'a RouteSample> + 'a {
        self.samples.iter().filter(move |s| &s.zone == zone)
    }
}

impl<'a> IntoIterator for &'a RouteTable {
    type Item = &'a RouteSample;
    type IntoIter = std::slice::Iter<'a, RouteSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// Identity of a table for caching.
///
/// File keys include the modification time and length, so editing the file
/// yields a new key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceKey {
    Synthetic {
        seed: u64,
        samples: usize,
    },
    File {
        path: PathBuf,
        modified: Option<SystemTime>,
        len: u64,
    },
}

/// A strategy that produces a route table.
pub trait RouteSource {
    /// Human-readable description for logs and notices.
    fn describe(&self) -> String;

    /// Cache key for the table this source would produce right now.
    fn key(&self) -> Result<SourceKey, DataError>;

    /// Build the table.
    fn load(&self) -> Result<RouteTable, DataError>;
}

/// Build the strategy named by configuration.
pub fn source_for(config: &DataSourceConfig) -> Box<dyn RouteSource> {
    match config {
        DataSourceConfig::Synthetic { seed, samples } => {
            Box::new(SyntheticSource::new(*seed, *samples))
        }
        DataSourceConfig::File { path } => Box::new(FileSource::new(path.clone())),
    }
}

/// Load the configured table without caching.
pub fn load_or_generate(config: &DataSourceConfig) -> Result<RouteTable, DataError> {
    source_for(config).load()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(zone: &str, signals: u32) -> RouteSample {
        RouteSample {
            zone: Zone::new(zone),
            distance_km: 10.0,
            time_min: 40.0,
            signals,
            potholes: 4,
            road_quality: derive_road_quality(4),
        }
    }

    #[test]
    fn road_quality_endpoints() {
        assert_eq!(derive_road_quality(0), 10);
        assert_eq!(derive_road_quality(20), 1);
    }

    #[test]
    fn road_quality_is_non_increasing() {
        let mut last = derive_road_quality(0);
        for potholes in 1..=40 {
            let q = derive_road_quality(potholes);
            assert!(q <= last, "quality rose at {potholes} potholes");
            assert!((1..=10).contains(&q));
            last = q;
        }
    }

    #[test]
    fn zones_are_sorted_and_unique() {
        let table = RouteTable::new(vec![
            sample("Hebbal", 1),
            sample("Bellandur", 2),
            sample("Hebbal", 3),
        ]);
        assert_eq!(
            table.zones(),
            vec![Zone::new("Bellandur"), Zone::new("Hebbal")]
        );
        let hebbal = Zone::new("Hebbal");
        assert_eq!(table.in_zone(&hebbal).count(), 2);
    }

    #[test]
    fn missing_source_converts_to_recoverable_error() {
        let err = DataError::MissingDataSource {
            path: PathBuf::from("routes.csv"),
        };
        assert!(err.is_missing_source());
        let common: ce_common::Error = err.into();
        assert!(common.is_recoverable());
    }

    #[test]
    fn config_selects_strategy() {
        let synthetic = source_for(&DataSourceConfig::Synthetic {
            seed: 3,
            samples: 5,
        });
        assert_eq!(
            synthetic.key().unwrap(),
            SourceKey::Synthetic {
                seed: 3,
                samples: 5
            }
        );
        let file = source_for(&DataSourceConfig::File {
            path: PathBuf::from("/definitely/not/here.csv"),
        });
        assert!(file.key().unwrap_err().is_missing_source());
    }
}
