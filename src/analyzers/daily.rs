//! Collapses filtered records into daily per-station totals.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::analyzers::utility::round_i64;
use crate::ingest::RidershipRecord;

/// One total per (service date, stop) after summing duplicate raw rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyTotal {
    pub service_date: NaiveDate,
    pub stop_name: String,
    pub total_entries: i64,
}

/// Groups records by (date, stop) and sums their entries, valid and
/// anomalous alike; entry validity is an input-quality assumption, not this
/// function's concern. Sums are rounded to the nearest integer.
pub fn daily_totals(records: &[RidershipRecord]) -> Vec<DailyTotal> {
    let mut sums: BTreeMap<(NaiveDate, &str), f64> = BTreeMap::new();
    for record in records {
        *sums
            .entry((record.service_date, record.stop_name.as_str()))
            .or_insert(0.0) += record.total_entries;
    }

    sums.into_iter()
        .map(|((service_date, stop_name), sum)| DailyTotal {
            service_date,
            stop_name: stop_name.to_string(),
            total_entries: round_i64(sum),
        })
        .collect()
}

/// Collapses daily per-station totals to one whole-line total per date,
/// sorted by date. This is both the charting series and the input to the
/// line-level statistics.
pub fn line_series(totals: &[DailyTotal]) -> Vec<(NaiveDate, i64)> {
    let mut by_date: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    for total in totals {
        *by_date.entry(total.service_date).or_insert(0) += total.total_entries;
    }
    by_date.into_iter().collect()
}
