//! Detail report converter
//!
//! Converts an end-of-season league detail report into the export report
//! format read by `tsrate`, synthesizing set scores from match points.
//!
//! Usage:
//!   detail2export detail.csv export.csv --series "Men 3" -v

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tsrate::config::AppConfig;
use tsrate::logging::{effective_level, init_logging};
use tsrate::normalizer::{load_detail_file, write_export_file, Normalizer};

/// Convert a league detail report to export format
#[derive(Parser)]
#[command(
    name = "detail2export",
    version,
    about = "Convert a league detail report to export format"
)]
struct Args {
    /// Detail report CSV file
    #[arg(value_name = "DATAFILE")]
    datafile: PathBuf,

    /// Output file
    #[arg(value_name = "RESULTSFILE", help = "Output file [default: export.csv]")]
    resultsfile: Option<PathBuf>,

    /// Limit results to a specific series
    #[arg(short, long)]
    series: Option<String>,

    /// Show diagnostic messages on the console
    #[arg(short, long)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::from_env()?,
    };
    init_logging(&effective_level(&config.service.log_level, args.verbose))?;

    let normalizer = Normalizer::new(
        args.series.clone(),
        &config.input.forfeit_sentinel,
        &config.input.match_time,
    );
    let summary = load_detail_file(&args.datafile, &normalizer)?;

    let output = args
        .resultsfile
        .unwrap_or_else(|| PathBuf::from(&config.input.export_file));
    write_export_file(&output, &summary.rows)?;

    Ok(())
}
