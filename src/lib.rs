//! tsrate - TrueSkill ratings for doubles platform tennis leagues
//!
//! This crate converts league match reports into a common export format,
//! replays the matches in chronological order through a team skill model,
//! and reports each player's final rating and uncertainty by club.

pub mod config;
pub mod engine;
pub mod error;
pub mod loader;
pub mod logging;
pub mod normalizer;
pub mod rating;
pub mod records;
pub mod report;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{RatingError, Result};
pub use types::*;

// Re-export key components
pub use engine::{RatingEngine, ReplaySummary};
pub use loader::MatchLoader;
pub use normalizer::Normalizer;
pub use rating::{PlayerRegistry, RatingCalculator};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
