//! CLI entry point for the ridership rater tool.
//!
//! Provides subcommands for analyzing one transit line's ridership around a
//! service disruption and for comparing the orange and blue lines side by
//! side.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use ridership_rater::{
    analyzers::analyzer::{LineReport, analyze_line},
    chart::{ChartSeries, line_color, render_daily_chart},
    config::{AnalysisConfig, LineId},
    ingest::read_records,
    output::{append_summary, render_completeness, render_line_summary, render_station_table},
};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "ridership_rater")]
#[command(about = "Before/after ridership analysis around a service disruption", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze ridership for a single line from a CSV export
    Analyze {
        /// Path to the line's ridership CSV export
        #[arg(value_name = "CSV")]
        input: PathBuf,

        /// Transit line the export belongs to
        #[arg(short, long, value_enum)]
        line: LineId,

        /// Restrict the analysis to weekday service
        #[arg(short, long, default_value_t = false)]
        weekdays_only: bool,

        /// JSON file overriding the date windows and station lists
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory to write chart PNGs to
        #[arg(long, default_value = "charts")]
        charts_dir: PathBuf,

        /// CSV file to append the line summary to
        #[arg(long)]
        summary_csv: Option<PathBuf>,
    },
    /// Compare both lines: combined chart plus per-line reports
    Compare {
        /// Path to the orange line ridership CSV export
        #[arg(value_name = "ORANGE_CSV")]
        orange: PathBuf,

        /// Path to the blue line ridership CSV export
        #[arg(value_name = "BLUE_CSV")]
        blue: PathBuf,

        /// Restrict the analysis to weekday service
        #[arg(short, long, default_value_t = false)]
        weekdays_only: bool,

        /// JSON file overriding the date windows and station lists
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory to write chart PNGs to
        #[arg(long, default_value = "charts")]
        charts_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/ridership_rater.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("ridership_rater.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            line,
            weekdays_only,
            config,
            charts_dir,
            summary_csv,
        } => {
            let config = load_config(config.as_deref())?;
            let records = read_records(&input)?;
            let report = analyze_line(&records, &config, line, weekdays_only)?;

            render_line_chart(&charts_dir, &config, line, &report, weekdays_only)?;
            print_report(&config, &report);

            if let Some(path) = summary_csv {
                append_summary(&path, &report.summary)?;
                info!(path = %path.display(), "line summary appended");
            }
        }
        Commands::Compare {
            orange,
            blue,
            weekdays_only,
            config,
            charts_dir,
        } => {
            let config = load_config(config.as_deref())?;
            let orange_records = read_records(&orange)?;
            let blue_records = read_records(&blue)?;

            let orange_report = analyze_line(&orange_records, &config, LineId::Orange, weekdays_only)?;
            let blue_report = analyze_line(&blue_records, &config, LineId::Blue, weekdays_only)?;

            let suffix = title_suffix(weekdays_only);
            let combined = vec![
                ChartSeries {
                    label: &orange_report.line,
                    color: line_color(LineId::Orange),
                    points: &orange_report.series,
                },
                ChartSeries {
                    label: &blue_report.line,
                    color: line_color(LineId::Blue),
                    points: &blue_report.series,
                },
            ];
            std::fs::create_dir_all(&charts_dir)?;
            render_daily_chart(
                &charts_dir.join(chart_file_name("combined", weekdays_only)),
                &config,
                &combined,
                suffix,
            )?;

            render_line_chart(&charts_dir, &config, LineId::Orange, &orange_report, weekdays_only)?;
            render_line_chart(&charts_dir, &config, LineId::Blue, &blue_report, weekdays_only)?;

            print_report(&config, &orange_report);
            print_report(&config, &blue_report);
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    match path {
        Some(path) => {
            let config = AnalysisConfig::from_path(path)?;
            info!(path = %path.display(), "analysis config loaded");
            Ok(config)
        }
        None => Ok(AnalysisConfig::default()),
    }
}

fn title_suffix(weekdays_only: bool) -> &'static str {
    if weekdays_only { " (Weekdays Only)" } else { "" }
}

fn chart_file_name(stem: &str, weekdays_only: bool) -> String {
    if weekdays_only {
        format!("daily_ridership_{stem}_weekdays.png")
    } else {
        format!("daily_ridership_{stem}.png")
    }
}

fn render_line_chart(
    charts_dir: &Path,
    config: &AnalysisConfig,
    line: LineId,
    report: &LineReport,
    weekdays_only: bool,
) -> Result<()> {
    std::fs::create_dir_all(charts_dir)?;
    let series = [ChartSeries {
        label: &report.line,
        color: line_color(line),
        points: &report.series,
    }];
    render_daily_chart(
        &charts_dir.join(chart_file_name(&line.to_string(), weekdays_only)),
        config,
        &series,
        title_suffix(weekdays_only),
    )
}

fn print_report(config: &AnalysisConfig, report: &LineReport) {
    println!("\n{}\n", render_line_summary(&report.summary, &config.disruption));
    println!("--------------------------------------------------------\n");

    let completeness = render_completeness(&report.line, &report.missing);
    if !completeness.is_empty() {
        println!("{completeness}\n");
    }

    println!(
        "{}",
        render_station_table(
            &report.line,
            &config.disruption,
            &report.stations,
            &config.before,
            &config.after,
        )
    );
    println!("--------------------------------------------------------");
}
