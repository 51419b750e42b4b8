//! CSV-backed route table.
//!
//! Layout: `Zone,Distance_km,Time_min,Signals,Potholes[,Road_Quality]`, header
//! row required, columns matched by name.

use ce_common::Zone;
use ce_math::round_clamp_u32;
use serde::Deserialize;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::{
    derive_road_quality, DataError, RouteSample, RouteSource, RouteTable, SourceKey,
    DISTANCE_RANGE_KM, MAX_POTHOLES, MAX_SIGNALS, MIN_TIME_MIN, QUALITY_RANGE,
};

/// One CSV row before range checks.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Zone")]
    zone: String,
    #[serde(rename = "Distance_km")]
    distance_km: f64,
    #[serde(rename = "Time_min")]
    time_min: f64,
    #[serde(rename = "Signals")]
    signals: f64,
    #[serde(rename = "Potholes")]
    potholes: f64,
    #[serde(rename = "Road_Quality", default, deserialize_with = "csv::invalid_option")]
    road_quality: Option<f64>,
}

impl RawRecord {
    /// Convert into a sample, clamping every field into its range.
    ///
    /// Returns the sample and whether any field had to be clamped.
    fn into_sample(self, row: usize) -> Result<(RouteSample, bool), DataError> {
        let zone = self.zone.trim();
        if zone.is_empty() {
            return Err(DataError::InvalidRecord {
                row,
                reason: "empty Zone".to_string(),
            });
        }
        for (name, value) in [
            ("Distance_km", self.distance_km),
            ("Time_min", self.time_min),
            ("Signals", self.signals),
            ("Potholes", self.potholes),
        ] {
            if !value.is_finite() {
                return Err(DataError::InvalidRecord {
                    row,
                    reason: format!("{name} is not a finite number"),
                });
            }
        }

        let (min_km, max_km) = DISTANCE_RANGE_KM;
        let distance_km = self.distance_km.clamp(min_km, max_km);
        let time_min = self.time_min.max(MIN_TIME_MIN);
        let signals = round_clamp_u32(self.signals, 0, MAX_SIGNALS);
        let potholes = round_clamp_u32(self.potholes, 0, MAX_POTHOLES);
        let road_quality = match self.road_quality.filter(|q| q.is_finite()) {
            Some(q) => round_clamp_u32(q, QUALITY_RANGE.0 as u32, QUALITY_RANGE.1 as u32) as u8,
            None => derive_road_quality(potholes),
        };

        let clamped = distance_km != self.distance_km
            || time_min != self.time_min
            || signals as f64 != self.signals
            || potholes as f64 != self.potholes
            || self
                .road_quality
                .is_some_and(|q| q != road_quality as f64);

        let sample = RouteSample {
            zone: Zone::new(zone),
            distance_km,
            time_min,
            signals,
            potholes,
            road_quality,
        };
        Ok((sample, clamped))
    }
}

/// Parse a route table from CSV text.
pub fn parse_routes<R: Read>(reader: R) -> Result<RouteTable, DataError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut samples = Vec::new();
    let mut clamped_rows = 0usize;
    for (idx, record) in rdr.deserialize::<RawRecord>().enumerate() {
        let (sample, clamped) = record?.into_sample(idx + 1)?;
        if clamped {
            clamped_rows += 1;
        }
        samples.push(sample);
    }

    if clamped_rows > 0 {
        warn!(rows = clamped_rows, "clamped out-of-range route values");
    }
    Ok(RouteTable::new(samples))
}

/// Read a route table from a CSV file.
///
/// An absent or unreadable file, or a path that is not a regular file, is
/// reported as [`DataError::MissingDataSource`].
pub fn read_routes(path: &Path) -> Result<RouteTable, DataError> {
    if !path.is_file() {
        debug!(path = %path.display(), "route path is not a regular file");
        return Err(DataError::MissingDataSource {
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path).map_err(|e| {
        debug!(path = %path.display(), error = %e, "route file unavailable");
        DataError::MissingDataSource {
            path: path.to_path_buf(),
        }
    })?;
    let table = parse_routes(file)?;
    info!(path = %path.display(), rows = table.len(), "loaded route table");
    Ok(table)
}

/// Write a table in the persisted CSV layout.
pub fn write_routes<W: Write>(table: &RouteTable, writer: W) -> Result<(), DataError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for sample in table {
        wtr.serialize(sample)?;
    }
    wtr.flush()?;
    Ok(())
}

/// File strategy.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RouteSource for FileSource {
    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }

    fn key(&self) -> Result<SourceKey, DataError> {
        let meta = fs::metadata(&self.path).map_err(|_| DataError::MissingDataSource {
            path: self.path.clone(),
        })?;
        if !meta.is_file() {
            return Err(DataError::MissingDataSource {
                path: self.path.clone(),
            });
        }
        Ok(SourceKey::File {
            path: self.path.clone(),
            modified: meta.modified().ok(),
            len: meta.len(),
        })
    }

    fn load(&self) -> Result<RouteTable, DataError> {
        read_routes(&self.path)
    }
}
