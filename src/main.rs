//! Main entry point for the tsrate rating tool
//!
//! Loads an export report (and optionally a file of starting ratings),
//! replays every match in chronological order and either writes the ratings
//! of all players to a CSV file or prints one club's standings.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;
use tsrate::config::{AppConfig, RatingAlgorithm};
use tsrate::loader::{load_initial_ratings, MatchLoader};
use tsrate::logging::{effective_level, init_logging};
use tsrate::rating::{PlayerRegistry, RatingCalculator};
use tsrate::report;
use tsrate::RatingEngine;

/// Calculate TrueSkill ratings of the players in a league
#[derive(Parser)]
#[command(
    name = "tsrate",
    version,
    about = "Calculate TrueSkill ranking of a platform tennis league",
    long_about = "Replays the doubles matches of a league export report in chronological order, \
                 rating every set through a team TrueSkill update, and reports each player's \
                 final rating and uncertainty grouped by club."
)]
struct Args {
    /// Match export CSV file
    #[arg(value_name = "DATAFILE")]
    datafile: PathBuf,

    /// Output file for calculated ratings
    #[arg(value_name = "RESULTSFILE", help = "Output file for calculated ratings [default: ratings.csv]")]
    resultsfile: Option<PathBuf>,

    /// CSV file of initial player ratings and sigmas
    #[arg(short, long, value_name = "FILE")]
    init: Option<PathBuf>,

    /// Show results for a single club on the console
    #[arg(short, long, value_name = "CLUB")]
    display: Option<String>,

    /// Show diagnostic messages on the console
    #[arg(short, long)]
    verbose: bool,

    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Rating algorithm override
    #[arg(long, value_enum)]
    algorithm: Option<RatingAlgorithm>,
}

/// Load configuration and apply CLI overrides
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::from_env()?,
    };

    if let Some(algorithm) = args.algorithm {
        config.rating.algorithm = algorithm;
        config.rating.validate()?;
    }

    Ok(config)
}

fn run(args: &Args, config: &AppConfig) -> Result<()> {
    let calculator: Arc<dyn RatingCalculator> = Arc::from(config.rating.build_calculator()?);
    debug!(
        "Rating with {}: {}",
        config.rating.algorithm,
        calculator.config()
    );

    let mut registry = match &args.init {
        Some(path) => load_initial_ratings(path)?,
        None => PlayerRegistry::new(),
    };

    let loader = MatchLoader::new(&config.input.forfeit_sentinel);
    let loaded = loader.load_export_file(
        &args.datafile,
        &mut registry,
        calculator.get_initial_rating(),
    )?;

    let engine = RatingEngine::new(calculator);
    engine.replay(&loaded.matches, &mut registry)?;

    let standings = report::standings(&registry);
    let output = args
        .resultsfile
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.input.ratings_file));
    let mode = report::OutputMode::select(args.display.clone(), output);
    report::emit(&standings, &mode, &mut std::io::stdout().lock())?;

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args)?;
    init_logging(&effective_level(&config.service.log_level, args.verbose))?;

    run(&args, &config)
}
