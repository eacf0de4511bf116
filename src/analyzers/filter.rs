//! Selects and relabels the raw records belonging to one line.

use crate::config::{AnalysisConfig, LineId};
use crate::error::AnalysisError;
use crate::ingest::{DayType, RidershipRecord};

/// Produces the subset of `records` that belong to `line`.
///
/// Stops shared with other lines are relabeled to this line's name first;
/// the caller's choice of line decides the attribution, not the label in
/// the export. A record survives when its stop is in the line's station
/// list and its (relabeled) route matches the line name. With
/// `weekdays_only`, weekend and holiday service days are dropped too.
pub fn filter_line(
    records: &[RidershipRecord],
    config: &AnalysisConfig,
    line: LineId,
    weekdays_only: bool,
) -> Result<Vec<RidershipRecord>, AnalysisError> {
    let def = config.line(line)?;

    let mut kept = Vec::new();
    for record in records {
        if weekdays_only && record.day_type != DayType::Weekday {
            continue;
        }
        if !def.owns(&record.stop_name) {
            continue;
        }

        let mut record = record.clone();
        if def.is_shared(&record.stop_name) {
            record.route_or_line = def.name.clone();
        }
        if record.route_or_line == def.name {
            kept.push(record);
        }
    }

    Ok(kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LineId;
    use chrono::NaiveDate;

    fn record(stop: &str, route: &str, day_type: DayType) -> RidershipRecord {
        RidershipRecord {
            service_date: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
            stop_name: stop.to_string(),
            route_or_line: route.to_string(),
            total_entries: 100.0,
            day_type,
        }
    }

    #[test]
    fn test_keeps_owned_stations_only() {
        let config = AnalysisConfig::default();
        let records = vec![
            record("Oak Grove", "Orange Line", DayType::Weekday),
            record("Forest Hills", "Orange Line", DayType::Weekday),
            record("Wonderland", "Blue Line", DayType::Weekday),
        ];

        let kept = filter_line(&records, &config, LineId::Orange, false).unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].stop_name, "Oak Grove");
    }

    #[test]
    fn test_relabels_shared_stops() {
        let config = AnalysisConfig::default();
        let records = vec![
            record("State Street", "Blue Line", DayType::Weekday),
            record("Haymarket", "Green Line", DayType::Weekday),
        ];

        let kept = filter_line(&records, &config, LineId::Orange, false).unwrap();
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|r| r.route_or_line == "Orange Line"));
    }

    #[test]
    fn test_drops_foreign_route_on_unshared_stop() {
        let config = AnalysisConfig::default();
        let records = vec![record("Oak Grove", "Green Line", DayType::Weekday)];

        let kept = filter_line(&records, &config, LineId::Orange, false).unwrap();
        assert!(kept.is_empty());
    }

    #[test]
    fn test_weekdays_only_drops_weekend_service() {
        let config = AnalysisConfig::default();
        let records = vec![
            record("Oak Grove", "Orange Line", DayType::Weekday),
            record("Oak Grove", "Orange Line", DayType::Other),
        ];

        let all = filter_line(&records, &config, LineId::Orange, false).unwrap();
        let weekdays = filter_line(&records, &config, LineId::Orange, true).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(weekdays.len(), 1);
    }

    #[test]
    fn test_unconfigured_line_fails() {
        let mut config = AnalysisConfig::default();
        config.lines.remove(&LineId::Blue);
        let records = vec![record("Wonderland", "Blue Line", DayType::Weekday)];

        let err = filter_line(&records, &config, LineId::Blue, false).unwrap_err();
        assert!(matches!(err, AnalysisError::Configuration(_)));
    }
}
