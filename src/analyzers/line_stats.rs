//! Whole-line ridership statistics: most recent day against the baseline.

use chrono::NaiveDate;
use serde::Serialize;

use crate::analyzers::utility::{mean, percent_change, round_i64};
use crate::config::AnalysisConfig;
use crate::error::AnalysisError;

/// Line-level comparison of the most recent service day against the
/// average over the before window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineSummary {
    pub line: String,
    pub most_recent_date: NaiveDate,
    pub most_recent_total: i64,
    pub before_average: i64,
    pub percent_change: i64,
}

/// Computes the [`LineSummary`] for one line's daily series.
///
/// # Errors
///
/// Returns [`AnalysisError::ZeroBaseline`] when the series is empty, when
/// no date falls inside the before window, or when the baseline average
/// rounds to zero. The percent change is undefined in all three cases.
pub fn line_summary(
    series: &[(NaiveDate, i64)],
    config: &AnalysisConfig,
    line: &str,
) -> Result<LineSummary, AnalysisError> {
    let zero_baseline = || AnalysisError::ZeroBaseline {
        line: line.to_string(),
        start: config.before.start,
        end: config.before.end,
    };

    let (most_recent_date, most_recent_total) = series
        .iter()
        .max_by_key(|(date, _)| *date)
        .copied()
        .ok_or_else(|| zero_baseline())?;

    let before: Vec<f64> = series
        .iter()
        .filter(|(date, _)| config.before.contains(*date))
        .map(|(_, total)| *total as f64)
        .collect();
    if before.is_empty() {
        return Err(zero_baseline());
    }

    let before_average = round_i64(mean(&before));
    if before_average == 0 {
        return Err(zero_baseline());
    }

    Ok(LineSummary {
        line: line.to_string(),
        most_recent_date,
        most_recent_total,
        before_average,
        percent_change: percent_change(before_average, most_recent_total),
    })
}
