//! Report formatting and persistence for ridership summaries.
//!
//! Renders the line and station summaries as display text and supports
//! appending line summaries to a CSV file across runs.

use std::fmt::Write as _;
use std::fs::OpenOptions;
use std::path::Path;

use anyhow::Result;
use chrono::NaiveDate;
use csv::WriterBuilder;
use tracing::debug;

use crate::analyzers::completeness::MissingReport;
use crate::analyzers::line_stats::LineSummary;
use crate::analyzers::station_stats::StationSummary;
use crate::config::DateWindow;

fn long_date(date: NaiveDate) -> String {
    date.format("%d %b %Y").to_string()
}

fn cell(value: Option<i64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn percent_cell(value: Option<i64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v}%"))
}

/// Renders the line-level summary block.
pub fn render_line_summary(summary: &LineSummary, disruption: &str) -> String {
    format!(
        "{line} total ridership on most recent day, {date}: {total}\n\
         {line} average ridership before the {disruption}: {avg}\n\
         {line} percent change in ridership after the {disruption}: {pct}%",
        line = summary.line,
        date = long_date(summary.most_recent_date),
        total = summary.most_recent_total,
        avg = summary.before_average,
        pct = summary.percent_change,
    )
}

/// Renders the per-station comparison table, total row last.
pub fn render_station_table(
    line: &str,
    disruption: &str,
    rows: &[StationSummary],
    before: &DateWindow,
    after: &DateWindow,
) -> String {
    let name_width = rows
        .iter()
        .map(|r| r.stop_name.len())
        .chain(std::iter::once("Stop".len()))
        .max()
        .unwrap_or(4)
        + 2;

    let mut out = String::new();
    let _ = writeln!(
        out,
        "AVG RIDERSHIP BEFORE AND AFTER {} FOR {}\n",
        disruption.to_uppercase(),
        line.to_uppercase()
    );
    let _ = writeln!(
        out,
        "Dates included before closing:\t{} - {}",
        long_date(before.start),
        long_date(before.end)
    );
    let _ = writeln!(
        out,
        "Dates included after closing:\t{} - {}\n",
        long_date(after.start),
        long_date(after.end)
    );

    let _ = writeln!(
        out,
        "{:<name_width$}{:>16}{:>16}{:>14}{:>10}",
        "Stop", "Before Closing", "After Closing", "Differential", "% Change"
    );
    for row in rows {
        let _ = writeln!(
            out,
            "{:<name_width$}{:>16}{:>16}{:>14}{:>10}",
            row.stop_name,
            cell(row.avg_before),
            cell(row.avg_after),
            cell(row.differential),
            percent_cell(row.percent_change),
        );
    }

    out
}

/// Renders the missing-station diagnostic, one line per incomplete date.
/// Empty output means every date reported the full station set.
pub fn render_completeness(line: &str, reports: &[MissingReport]) -> String {
    reports
        .iter()
        .map(|report| {
            let stations: Vec<&str> = report.missing.iter().map(String::as_str).collect();
            format!(
                "Missing values for {} on {}: {}",
                line,
                long_date(report.service_date),
                stations.join(", ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Appends a [`LineSummary`] record as a row to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_summary(path: &Path, summary: &LineSummary) -> Result<()> {
    let file_exists = path.exists();
    debug!(path = %path.display(), file_exists, "Appending summary CSV record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    writer.serialize(summary)?;
    writer.flush()?;

    Ok(())
}
