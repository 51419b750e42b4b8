//! Commute Estimator common types, zones, and errors.
//!
//! This crate provides foundational types shared across ce-core modules:
//! - Zone names and the "unknown route" sentinel selection
//! - Common error types
//! - Output format specifications
//! - Schema versioning for JSON outputs

pub mod error;
pub mod output;
pub mod schema;
pub mod zone;

pub use error::{Error, Result};
pub use output::OutputFormat;
pub use schema::SCHEMA_VERSION;
pub use zone::{Zone, ZoneSelection, BUILTIN_ZONES, UNKNOWN_ROUTE_LABEL};
