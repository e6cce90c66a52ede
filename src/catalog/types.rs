//! Record shapes flowing into and out of the catalog.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::index::Platform;

/// A platform as it arrives from the feed, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    pub name: String,
    #[serde(default)]
    pub locations: Vec<String>,
    /// 1-based feed line the record came from, when known.
    #[serde(skip)]
    pub line: Option<usize>,
}

impl RawRecord {
    pub fn new(name: impl Into<String>, locations: Vec<String>) -> Self {
        Self {
            name: name.into(),
            locations,
            line: None,
        }
    }

    /// Trim the name and locations, keep only `/`-prefixed locations.
    pub fn validate(self) -> Validation {
        let name = self.name.trim();
        if name.is_empty() {
            return Validation::Skipped(SkippedRecord {
                line: self.line,
                name: None,
                reason: SkipReason::BlankName,
            });
        }

        let locations: Vec<String> = self
            .locations
            .iter()
            .map(|location| location.trim())
            .filter(|location| location.starts_with('/'))
            .map(str::to_owned)
            .collect();

        if locations.is_empty() {
            return Validation::Skipped(SkippedRecord {
                line: self.line,
                name: Some(name.to_owned()),
                reason: SkipReason::NoValidLocations,
            });
        }

        Validation::Accepted(Platform::new(name, locations))
    }
}

/// Outcome of validating one raw record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Accepted(Platform),
    Skipped(SkippedRecord),
}

/// Why a record never made it into the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    BlankName,
    NoValidLocations,
    MalformedLine,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::BlankName => write!(f, "platform name is blank"),
            SkipReason::NoValidLocations => write!(f, "no location starts with '/'"),
            SkipReason::MalformedLine => write!(f, "line has no ':' separator"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRecord {
    pub line: Option<usize>,
    pub name: Option<String>,
    pub reason: SkipReason,
}

/// What a single load did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: Vec<SkippedRecord>,
}

impl LoadReport {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}
