//! Error types for the rating pipeline
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the application. Nothing in the pipeline recovers locally: any
//! of these aborts the run.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific pipeline failures
#[derive(Debug, thiserror::Error)]
pub enum RatingError {
    #[error("Malformed row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },

    #[error("Invalid match date '{value}': expected {expected}")]
    InvalidMatchDate { value: String, expected: String },

    #[error("Player not found in registry: {player_id}")]
    PlayerNotFound { player_id: String },

    #[error("Rating calculation failed: {reason}")]
    RatingCalculationFailed { reason: String },

    #[error("Nothing to write to {path}: no records")]
    EmptyOutput { path: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}
