//! Per-station before/after averages, differentials, and percent changes.

use std::collections::BTreeMap;

use crate::analyzers::daily::DailyTotal;
use crate::analyzers::utility::{mean, percent_change, round_i64};
use crate::config::{AnalysisConfig, LineDefinition};

/// One row of the station comparison table. `None` cells mark a station
/// with no data in that window; a `None` percent on an otherwise complete
/// row marks a zero baseline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationSummary {
    pub stop_name: String,
    pub avg_before: Option<i64>,
    pub avg_after: Option<i64>,
    pub differential: Option<i64>,
    pub percent_change: Option<i64>,
}

/// Builds the station comparison table for one line.
///
/// Rows follow the definition's station order; stations present in the data
/// but absent from the definition are dropped, stations in the definition
/// with no data get a placeholder row. The final row is the synthetic
/// whole-line total: its Before and After columns sum the already-rounded
/// per-station means rather than re-aggregating the raw days, so it can
/// drift from the true aggregate by rounding error. Differential and
/// percent change derive from the rounded columns throughout.
pub fn station_summaries(
    totals: &[DailyTotal],
    config: &AnalysisConfig,
    def: &LineDefinition,
) -> Vec<StationSummary> {
    let mut before: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    let mut after: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for total in totals {
        let bucket = if config.before.contains(total.service_date) {
            &mut before
        } else if config.after.contains(total.service_date) {
            &mut after
        } else {
            continue;
        };
        bucket
            .entry(total.stop_name.as_str())
            .or_default()
            .push(total.total_entries as f64);
    }

    let mut rows = Vec::with_capacity(def.stations.len() + 1);
    let mut total_before = None;
    let mut total_after = None;

    for stop in &def.stations {
        let avg_before = before.get(stop.as_str()).map(|v| round_i64(mean(v)));
        let avg_after = after.get(stop.as_str()).map(|v| round_i64(mean(v)));

        if let Some(b) = avg_before {
            total_before = Some(total_before.unwrap_or(0) + b);
        }
        if let Some(a) = avg_after {
            total_after = Some(total_after.unwrap_or(0) + a);
        }

        rows.push(summary_row(stop.clone(), avg_before, avg_after));
    }

    rows.push(summary_row(def.total_label(), total_before, total_after));
    rows
}

fn summary_row(
    stop_name: String,
    avg_before: Option<i64>,
    avg_after: Option<i64>,
) -> StationSummary {
    let differential = match (avg_before, avg_after) {
        (Some(b), Some(a)) => Some(a - b),
        _ => None,
    };
    let percent = match (avg_before, avg_after) {
        (Some(0), _) => None,
        (Some(b), Some(a)) => Some(percent_change(b, a)),
        _ => None,
    };

    StationSummary {
        stop_name,
        avg_before,
        avg_after,
        differential,
        percent_change: percent,
    }
}
