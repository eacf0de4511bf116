//! Daily ridership chart rendering.
//!
//! Draws each line's daily series as a colored line with point markers,
//! shades the before window, and marks the disruption boundary with a
//! dashed vertical line.

use std::path::Path;

use anyhow::{Result, bail};
use chrono::{Duration, NaiveDate};
use plotters::prelude::*;
use tracing::info;

use crate::config::{AnalysisConfig, LineId};

const ORANGE_LINE: RGBColor = RGBColor(237, 139, 0);
const BLUE_LINE: RGBColor = RGBColor(0, 61, 165);
const BAND: RGBColor = RGBColor(211, 211, 211);

/// One line's plottable series.
pub struct ChartSeries<'a> {
    pub label: &'a str,
    pub color: RGBColor,
    pub points: &'a [(NaiveDate, i64)],
}

pub fn line_color(line: LineId) -> RGBColor {
    match line {
        LineId::Orange => ORANGE_LINE,
        LineId::Blue => BLUE_LINE,
    }
}

fn y_ceiling(series: &[ChartSeries<'_>]) -> i64 {
    let max = series
        .iter()
        .flat_map(|s| s.points.iter().map(|(_, v)| *v))
        .max()
        .unwrap_or(0);
    ((max as f64 * 1.05).ceil() as i64).max(1)
}

fn x_span(series: &[ChartSeries<'_>], config: &AnalysisConfig) -> (NaiveDate, NaiveDate) {
    let dates = series.iter().flat_map(|s| s.points.iter().map(|(d, _)| *d));
    let min = dates
        .clone()
        .min()
        .map_or(config.before.start, |d| d.min(config.before.start));
    let max = dates
        .max()
        .map_or(config.before.end, |d| d.max(config.before.end));
    if min == max {
        (min, max + Duration::days(1))
    } else {
        (min, max)
    }
}

/// Renders the daily ridership series for one or more lines to a PNG.
pub fn render_daily_chart(
    path: &Path,
    config: &AnalysisConfig,
    series: &[ChartSeries<'_>],
    title_suffix: &str,
) -> Result<()> {
    if series.iter().all(|s| s.points.is_empty()) {
        bail!("no daily ridership data to chart");
    }

    let (x_min, x_max) = x_span(series, config);
    let y_max = y_ceiling(series);
    let title = format!("Ridership During {}{}", config.disruption, title_suffix);

    let root = BitMapBackend::new(path, (1200, 700)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&title, ("sans-serif", 28))
        .margin(12)
        .x_label_area_size(56)
        .y_label_area_size(72)
        .build_cartesian_2d(x_min..x_max, 0i64..y_max)?;

    let span_days = (x_max - x_min).num_days().max(1);
    chart
        .configure_mesh()
        .x_labels((span_days / 7 + 1) as usize)
        .x_label_formatter(&|date| date.format("%d %b").to_string())
        .x_desc("Date")
        .y_desc("Ridership per Day")
        .draw()?;

    // Shaded band over the before window
    chart.draw_series(std::iter::once(Rectangle::new(
        [(config.before.start, 0), (config.before.end, y_max)],
        BAND.mix(0.6).filled(),
    )))?;

    for s in series {
        let color = s.color;
        chart
            .draw_series(LineSeries::new(
                s.points.iter().copied(),
                color.stroke_width(2),
            ))?
            .label(s.label)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 18, y)], color.stroke_width(2))
            });
        chart.draw_series(
            s.points
                .iter()
                .map(|(date, total)| Circle::new((*date, *total), 3, color.filled())),
        )?;
    }

    // Dashed boundary at the end of the before window
    chart
        .draw_series(DashedLineSeries::new(
            [(config.before.end, 0), (config.before.end, y_max)],
            6,
            4,
            BLACK.stroke_width(2),
        ))?
        .label(config.disruption.as_str())
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], BLACK.stroke_width(2)));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerMiddle)
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    info!(path = %path.display(), "chart written");
    Ok(())
}
