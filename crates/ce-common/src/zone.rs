//! Zone identity types.
//!
//! A zone is a named district used to bucket historical route samples.
//! Selections additionally allow the "unknown route" sentinel, which asks
//! for whole-table averages instead of a per-zone filter.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Districts drawn by the synthetic route generator.
pub const BUILTIN_ZONES: [&str; 8] = [
    "Whitefield",
    "Marathahalli",
    "KR Puram",
    "Hebbal",
    "Koramangala",
    "Silk Board",
    "Bellandur",
    "HSR Layout",
];

/// Display label of the sentinel selection.
pub const UNKNOWN_ROUTE_LABEL: &str = "Other / Unknown Route";

/// Named district.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Zone(pub String);

impl Zone {
    pub fn new(name: impl Into<String>) -> Self {
        Zone(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Zone {
    fn from(name: &str) -> Self {
        Zone(name.to_string())
    }
}

/// A zone picked by the user, or the "unknown route" sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ZoneSelection {
    Zone(Zone),
    #[default]
    UnknownRoute,
}

impl ZoneSelection {
    /// Parse a selection label. Only the sentinel label itself
    /// (case-insensitive) maps to [`ZoneSelection::UnknownRoute`]; any other
    /// name, including `Other` or `Unknown`, is a zone.
    pub fn parse(label: &str) -> Self {
        let trimmed = label.trim();
        if trimmed.eq_ignore_ascii_case(UNKNOWN_ROUTE_LABEL) {
            ZoneSelection::UnknownRoute
        } else {
            ZoneSelection::Zone(Zone::new(trimmed))
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, ZoneSelection::UnknownRoute)
    }

    pub fn label(&self) -> &str {
        match self {
            ZoneSelection::Zone(zone) => zone.as_str(),
            ZoneSelection::UnknownRoute => UNKNOWN_ROUTE_LABEL,
        }
    }

    /// Label used in captions ("Use average signals for Other").
    pub fn short_label(&self) -> &str {
        self.label().split('/').next().unwrap_or_default().trim()
    }
}

impl fmt::Display for ZoneSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl From<String> for ZoneSelection {
    fn from(label: String) -> Self {
        ZoneSelection::parse(&label)
    }
}

impl From<ZoneSelection> for String {
    fn from(selection: ZoneSelection) -> Self {
        selection.label().to_string()
    }
}

impl From<Zone> for ZoneSelection {
    fn from(zone: Zone) -> Self {
        ZoneSelection::Zone(zone)
    }
}
