//! Commute Estimator core.
//!
//! Loads (or generates) a table of historical route samples, aggregates it by
//! zone, and estimates travel time, fuel loss and cost for a trip with a fixed
//! linear formula. The [`dashboard`] module ties these together behind a
//! request/response API that any front-end can drive.

pub mod cache;
pub mod dashboard;
pub mod data;
pub mod estimate;
pub mod exit_codes;
pub mod logging;
pub mod render;
pub mod zones;

pub use cache::{CacheStats, TableCache};
pub use dashboard::{
    Dashboard, DashboardError, DashboardView, QualityInput, SignalInput, TripInputs,
};
pub use data::{load_or_generate, DataError, RouteSample, RouteSource, RouteTable, SourceKey};
pub use estimate::{estimate, Estimator, RoadCondition, TripEstimate, TripRequest};
pub use zones::{zone_average, zone_choices, zone_means, AverageBasis, ZoneAverages, ZoneMetric};
