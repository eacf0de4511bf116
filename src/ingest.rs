//! CSV ingestion of raw ridership exports.
//!
//! One row per (service date, stop, fare interaction bucket) as exported by
//! the fare system. Records are validated on the way in: a date that does
//! not parse or a zero/negative entry count aborts the load.

use std::fs::File;
use std::path::Path;

use anyhow::Context;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use tracing::debug;

use crate::error::AnalysisError;

/// Service-day classification from the export's `day` column. Anything
/// other than the literal `Weekday` counts as weekend/holiday service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum DayType {
    Weekday,
    Other,
}

impl From<String> for DayType {
    fn from(raw: String) -> Self {
        if raw == "Weekday" {
            DayType::Weekday
        } else {
            DayType::Other
        }
    }
}

/// A raw per-stop ridership row. Immutable once ingested; `total_entries`
/// stays fractional until the daily aggregator owns the rounding.
#[derive(Debug, Clone, Deserialize)]
pub struct RidershipRecord {
    #[serde(rename = "Service Date", deserialize_with = "service_date")]
    pub service_date: NaiveDate,
    #[serde(rename = "Stop Name")]
    pub stop_name: String,
    #[serde(rename = "Route Or Line")]
    pub route_or_line: String,
    #[serde(rename = "Total Entries")]
    pub total_entries: f64,
    #[serde(rename = "day")]
    pub day_type: DayType,
}

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

fn service_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_service_date(&raw).map_err(serde::de::Error::custom)
}

fn parse_service_date(raw: &str) -> Result<NaiveDate, String> {
    let raw = raw.trim();
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Ok(date);
        }
    }
    Err(format!("unparseable service date `{raw}`"))
}

/// Reads all ridership records from a CSV export.
///
/// # Errors
///
/// Returns [`AnalysisError::DataQuality`] (with the 1-based file row) for a
/// row whose date does not parse or whose entry count is zero or negative.
pub fn read_records(path: &Path) -> anyhow::Result<Vec<RidershipRecord>> {
    let file = File::open(path)
        .with_context(|| format!("failed to open ridership CSV {}", path.display()))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut records = Vec::new();
    for (index, result) in reader.deserialize().enumerate() {
        let row = index + 2; // row 1 is the header
        let record: RidershipRecord =
            result.map_err(|e| AnalysisError::DataQuality {
                row,
                reason: e.to_string(),
            })?;

        if record.total_entries <= 0.0 {
            return Err(AnalysisError::DataQuality {
                row,
                reason: format!("non-positive total entries {}", record.total_entries),
            }
            .into());
        }

        records.push(record);
    }

    debug!(path = %path.display(), count = records.len(), "ridership records loaded");
    Ok(records)
}
