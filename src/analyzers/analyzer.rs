//! Runs the full pipeline for one line and bundles the results.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::analyzers::completeness::{MissingReport, missing_stations};
use crate::analyzers::daily::{DailyTotal, daily_totals, line_series};
use crate::analyzers::filter::filter_line;
use crate::analyzers::line_stats::{LineSummary, line_summary};
use crate::analyzers::station_stats::{StationSummary, station_summaries};
use crate::config::{AnalysisConfig, LineId};
use crate::error::AnalysisError;
use crate::ingest::RidershipRecord;

/// Everything the presentation layer needs for one line.
#[derive(Debug, Clone)]
pub struct LineReport {
    pub line: String,
    pub daily: Vec<DailyTotal>,
    pub series: Vec<(NaiveDate, i64)>,
    pub summary: LineSummary,
    pub stations: Vec<StationSummary>,
    pub missing: Vec<MissingReport>,
}

/// Filter → aggregate → statistics → completeness, in one call.
///
/// # Errors
///
/// Propagates [`AnalysisError::Configuration`] for an unconfigured line and
/// [`AnalysisError::ZeroBaseline`] when the before window yields no usable
/// baseline. Either aborts this line's pipeline; other lines are unaffected.
pub fn analyze_line(
    records: &[RidershipRecord],
    config: &AnalysisConfig,
    line: LineId,
    weekdays_only: bool,
) -> Result<LineReport, AnalysisError> {
    let def = config.line(line)?;
    let name = def.name.clone();

    let filtered = filter_line(records, config, line, weekdays_only)?;
    debug!(line = %name, kept = filtered.len(), total = records.len(), "records filtered");

    let daily = daily_totals(&filtered);
    let series = line_series(&daily);
    let summary = line_summary(&series, config, &name)?;
    let stations = station_summaries(&daily, config, def);
    let missing = missing_stations(&daily, config, def);

    info!(
        line = %name,
        days = series.len(),
        incomplete_days = missing.len(),
        "line analysis complete"
    );

    Ok(LineReport {
        line: name,
        daily,
        series,
        summary,
        stations,
        missing,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::DayType;

    fn record(date: (i32, u32, u32), stop: &str, entries: f64) -> RidershipRecord {
        RidershipRecord {
            service_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            stop_name: stop.to_string(),
            route_or_line: "Blue Line".to_string(),
            total_entries: entries,
            day_type: DayType::Weekday,
        }
    }

    #[test]
    fn test_series_matches_station_sums_per_date() {
        let config = AnalysisConfig::default();
        let records = vec![
            record((2023, 6, 1), "Maverick", 100.0),
            record((2023, 6, 1), "Airport", 200.0),
            record((2023, 7, 10), "Maverick", 150.0),
            record((2023, 7, 10), "Airport", 250.0),
        ];

        let report = analyze_line(&records, &config, LineId::Blue, false).unwrap();

        for (date, series_total) in &report.series {
            let station_sum: i64 = report
                .daily
                .iter()
                .filter(|t| t.service_date == *date)
                .map(|t| t.total_entries)
                .sum();
            assert_eq!(*series_total, station_sum);
        }
    }

    #[test]
    fn test_pipeline_is_idempotent() {
        let config = AnalysisConfig::default();
        let records = vec![
            record((2023, 6, 1), "Maverick", 100.4),
            record((2023, 6, 1), "Maverick", 50.3),
            record((2023, 7, 10), "Maverick", 120.0),
        ];

        let first = analyze_line(&records, &config, LineId::Blue, false).unwrap();
        let second = analyze_line(&records, &config, LineId::Blue, false).unwrap();

        assert_eq!(first.daily, second.daily);
        assert_eq!(first.series, second.series);
        assert_eq!(first.summary, second.summary);
        assert_eq!(first.stations, second.stations);
        assert_eq!(first.missing, second.missing);
    }

    #[test]
    fn test_zero_baseline_aborts_line() {
        let config = AnalysisConfig::default();
        // Data only after the closure: no baseline to compare against.
        let records = vec![record((2023, 7, 10), "Maverick", 100.0)];

        let err = analyze_line(&records, &config, LineId::Blue, false).unwrap_err();
        assert!(matches!(err, AnalysisError::ZeroBaseline { .. }));
    }
}
