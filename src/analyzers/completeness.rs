//! Detects service dates where stations stopped reporting data.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::analyzers::daily::DailyTotal;
use crate::config::{AnalysisConfig, LineDefinition};

/// The stations missing from one service date's data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingReport {
    pub service_date: NaiveDate,
    pub missing: BTreeSet<String>,
}

/// Scans the after window for dates where fewer stations reported than the
/// line defines, and names the missing stations for each.
///
/// This is a quality diagnostic, not a failure: the result is returned for
/// the caller to render or assert on. Dates absent from the data entirely
/// are not reported; only dates that reported a partial station set are.
pub fn missing_stations(
    totals: &[DailyTotal],
    config: &AnalysisConfig,
    def: &LineDefinition,
) -> Vec<MissingReport> {
    let expected: BTreeSet<&str> = def.stations.iter().map(String::as_str).collect();

    let mut reporting: BTreeMap<NaiveDate, BTreeSet<&str>> = BTreeMap::new();
    for total in totals {
        if config.after.contains(total.service_date) && expected.contains(total.stop_name.as_str())
        {
            reporting
                .entry(total.service_date)
                .or_default()
                .insert(total.stop_name.as_str());
        }
    }

    reporting
        .into_iter()
        .filter(|(_, stops)| stops.len() < expected.len())
        .map(|(service_date, stops)| MissingReport {
            service_date,
            missing: expected
                .difference(&stops)
                .map(|stop| stop.to_string())
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LineId;

    fn total(date: (i32, u32, u32), stop: &str) -> DailyTotal {
        DailyTotal {
            service_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            stop_name: stop.to_string(),
            total_entries: 100,
        }
    }

    fn small_def() -> LineDefinition {
        LineDefinition {
            name: "Blue Line".to_string(),
            stations: vec![
                "Maverick".to_string(),
                "Airport".to_string(),
                "Wonderland".to_string(),
            ],
            shared_stops: vec![],
        }
    }

    #[test]
    fn test_no_reports_when_every_date_is_complete() {
        let config = AnalysisConfig::default();
        let def = small_def();
        let totals = vec![
            total((2023, 7, 10), "Maverick"),
            total((2023, 7, 10), "Airport"),
            total((2023, 7, 10), "Wonderland"),
        ];

        assert!(missing_stations(&totals, &config, &def).is_empty());
    }

    #[test]
    fn test_reports_exact_missing_set() {
        let config = AnalysisConfig::default();
        let def = small_def();
        let totals = vec![
            total((2023, 7, 10), "Maverick"),
            total((2023, 7, 11), "Maverick"),
            total((2023, 7, 11), "Airport"),
            total((2023, 7, 11), "Wonderland"),
        ];

        let reports = missing_stations(&totals, &config, &def);
        assert_eq!(reports.len(), 1);
        assert_eq!(
            reports[0].service_date,
            NaiveDate::from_ymd_opt(2023, 7, 10).unwrap()
        );
        assert_eq!(
            reports[0].missing,
            BTreeSet::from(["Airport".to_string(), "Wonderland".to_string()])
        );
    }

    #[test]
    fn test_ignores_dates_outside_after_window() {
        let config = AnalysisConfig::default();
        let def = small_def();
        // Before the closure only Maverick reported; not this check's concern.
        let totals = vec![total((2023, 6, 1), "Maverick")];

        assert!(missing_stations(&totals, &config, &def).is_empty());
    }

    #[test]
    fn test_reports_are_sorted_by_date() {
        let config = AnalysisConfig::default();
        let def = small_def();
        let totals = vec![
            total((2023, 7, 20), "Maverick"),
            total((2023, 7, 10), "Airport"),
        ];

        let reports = missing_stations(&totals, &config, &def);
        assert_eq!(reports.len(), 2);
        assert!(reports[0].service_date < reports[1].service_date);
    }

    #[test]
    fn test_foreign_stops_do_not_mask_missing_stations() {
        let config = AnalysisConfig::default();
        let def = small_def();
        let totals = vec![
            total((2023, 7, 10), "Maverick"),
            total((2023, 7, 10), "Airport"),
            total((2023, 7, 10), "Forest Hills"),
        ];

        let reports = missing_stations(&totals, &config, &def);
        assert_eq!(reports.len(), 1);
        assert_eq!(
            reports[0].missing,
            BTreeSet::from(["Wonderland".to_string()])
        );
    }

    #[test]
    fn test_full_line_definition_threshold() {
        let config = AnalysisConfig::default();
        let def = config.line(LineId::Blue).unwrap().clone();
        let totals: Vec<DailyTotal> = def.stations[..def.stations.len() - 1]
            .iter()
            .map(|stop| total((2023, 7, 10), stop))
            .collect();

        let reports = missing_stations(&totals, &config, &def);
        assert_eq!(reports.len(), 1);
        assert_eq!(
            reports[0].missing,
            BTreeSet::from(["Bowdoin".to_string()])
        );
    }
}
