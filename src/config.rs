//! Line definitions and analysis windows.
//!
//! All configuration is an explicit value passed into each pipeline call,
//! so alternate windows or station lists can coexist in one process. The
//! defaults carry the Sumner Tunnel closure constants; a JSON file can
//! override any of them.

use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::path::Path;

use anyhow::Context;
use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Closed set of transit lines the tool knows about. Unknown line names are
/// unrepresentable: they fail at CLI or config parse time instead of
/// producing an empty analysis.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LineId {
    Orange,
    Blue,
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineId::Orange => write!(f, "orange"),
            LineId::Blue => write!(f, "blue"),
        }
    }
}

/// Inclusive calendar range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Stations owned by a line, in display order, plus the stops shared with
/// other lines that must be relabeled into this line when encountered.
///
/// The station list doubles as the completeness threshold: a service date
/// reporting fewer stations than the list is flagged as incomplete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineDefinition {
    pub name: String,
    pub stations: Vec<String>,
    pub shared_stops: Vec<String>,
}

impl LineDefinition {
    pub fn owns(&self, stop: &str) -> bool {
        self.stations.iter().any(|s| s == stop)
    }

    pub fn is_shared(&self, stop: &str) -> bool {
        self.shared_stops.iter().any(|s| s == stop)
    }

    /// Label of the synthetic whole-line row in the station table.
    pub fn total_label(&self) -> String {
        format!("{} TOTAL", self.name.to_uppercase())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Human-readable name of the disruption, used in chart and report titles.
    pub disruption: String,
    pub before: DateWindow,
    pub after: DateWindow,
    pub lines: BTreeMap<LineId, LineDefinition>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        let orange = LineDefinition {
            name: "Orange Line".to_string(),
            // Stations north of and including State Street
            stations: [
                "Oak Grove",
                "Malden Center",
                "Wellington",
                "Assembly",
                "Sullivan Square",
                "Community College",
                "North Station",
                "Haymarket",
                "State Street",
            ]
            .map(String::from)
            .to_vec(),
            shared_stops: ["Haymarket", "North Station", "State Street"]
                .map(String::from)
                .to_vec(),
        };

        let blue = LineDefinition {
            name: "Blue Line".to_string(),
            stations: [
                "Wonderland",
                "Revere Beach",
                "Beachmont",
                "Suffolk Downs",
                "Orient Heights",
                "Wood Island",
                "Airport",
                "Maverick",
                "Aquarium",
                "State Street",
                "Government Center",
                "Bowdoin",
            ]
            .map(String::from)
            .to_vec(),
            shared_stops: ["Government Center", "State Street"]
                .map(String::from)
                .to_vec(),
        };

        AnalysisConfig {
            disruption: "Sumner Tunnel Closure".to_string(),
            before: DateWindow {
                start: date(2023, 6, 1),
                end: date(2023, 7, 4),
            },
            after: DateWindow {
                start: date(2023, 7, 5),
                end: date(2023, 9, 1),
            },
            lines: BTreeMap::from([(LineId::Orange, orange), (LineId::Blue, blue)]),
        }
    }
}

impl AnalysisConfig {
    /// Loads a JSON override file.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("failed to open config file {}", path.display()))?;
        let config = serde_json::from_reader(file)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Looks up the station definition for a line. A line missing from the
    /// configuration is a hard failure, never an empty result.
    pub fn line(&self, id: LineId) -> Result<&LineDefinition, AnalysisError> {
        self.lines
            .get(&id)
            .ok_or_else(|| AnalysisError::Configuration(id.to_string()))
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid calendar date")
}
