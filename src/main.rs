//! CLI entry point for the bikeshare statistics tool.
//!
//! Provides an interactive explorer that mirrors the classic prompt flow and
//! a one-shot `report` subcommand for scripting.

use anyhow::{Context, Result};
use bikeshare_stats::{
    City,
    config::SourceConfig,
    filter::{DayOfWeek, FilterSpec, Month, Period},
    loader::{LoadOptions, TimestampPolicy, load_city},
    output::{print_json, render_report, render_rows},
    prompt::Prompt,
    report::CityReport,
    source::TripSource,
};
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bikeshare_stats")]
#[command(about = "Explore US bikeshare trip data", long_about = None)]
struct Cli {
    /// Directory holding chicago.csv, new_york_city.csv and washington.csv
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// JSON file with data_dir and per-city file overrides
    #[arg(long, global = true, env = "BIKESHARE_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Fail on the first row with an unreadable start time instead of skipping it
    #[arg(long, global = true, default_value_t = false)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Choose a city and filter interactively, then browse the statistics
    Explore,
    /// Print statistics for one city and filter
    Report {
        /// chicago, new york or washington
        #[arg(short, long)]
        city: City,

        /// Only trips starting in this month (or "all")
        #[arg(short, long, conflicts_with = "day")]
        month: Option<String>,

        /// Only trips starting on this day of the week (or "all")
        #[arg(short, long)]
        day: Option<String>,

        /// Print the report as JSON
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Also print the first N raw rows
        #[arg(long, value_name = "N", default_value_t = 0)]
        raw: usize,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/bikeshare_stats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("warn".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SourceConfig::load(path)?,
        None => SourceConfig::default(),
    };
    config = config.apply_env().with_data_dir(cli.data_dir.clone());
    debug!(data_dir = %config.data_dir.display(), overrides = config.files.len(), "Source configuration");

    let source = config.source();
    let options = LoadOptions {
        timestamp_policy: if cli.strict {
            TimestampPolicy::Abort
        } else {
            TimestampPolicy::Skip
        },
    };

    match cli.command {
        Commands::Explore => explore(&source, &options)?,
        Commands::Report {
            city,
            month,
            day,
            json,
            raw,
        } => {
            let period = match (month, day) {
                (Some(m), _) if !m.eq_ignore_ascii_case("all") => Period::Month(m.parse::<Month>()?),
                (_, Some(d)) if !d.eq_ignore_ascii_case("all") => {
                    Period::Day(d.parse::<DayOfWeek>()?)
                }
                _ => Period::All,
            };
            let spec = FilterSpec { city, period };
            report(&source, &options, &spec, json, raw)?;
        }
    }

    Ok(())
}

/// Loads the table for `spec` and prints its report, optionally followed by
/// the first `raw` rows.
#[tracing::instrument(skip(source, options, spec), fields(spec = %spec))]
fn report(
    source: &dyn TripSource,
    options: &LoadOptions,
    spec: &FilterSpec,
    json: bool,
    raw: usize,
) -> Result<()> {
    let table = load_city(source, spec.city, &spec.trip_filter(), options)
        .with_context(|| format!("loading {}", spec.city))?;
    let report = CityReport::build(&table)?;

    if json {
        print_json(&report)?;
    } else {
        println!("{spec}");
        print!("{}", render_report(&report));
    }

    if raw > 0 {
        let rows = &table.rows()[..raw.min(table.len())];
        print!("{}", render_rows(&table, rows, 0));
    }

    Ok(())
}

/// The interactive loop on stdin/stdout.
fn explore(source: &dyn TripSource, options: &LoadOptions) -> Result<()> {
    let stdin = std::io::stdin();
    Prompt::new(stdin.lock(), std::io::stdout()).explore(source, options)
}
