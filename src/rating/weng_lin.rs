//! Weng-Lin (OpenSkill) rating system implementation
//!
//! This module provides an alternative rating calculator using the
//! Weng-Lin algorithm from the skillratings crate. It is selected with
//! `algorithm = "weng_lin"` in the rating configuration.

use crate::rating::calculator::{into_team, RatingCalculator};
use crate::types::{PlayerRating, SetOutcome, TeamRatings};
use serde::{Deserialize, Serialize};
use skillratings::weng_lin::{weng_lin_two_teams, WengLinConfig, WengLinRating};
use skillratings::Outcomes;

/// Extended configuration for the Weng-Lin rating system
/// This wraps the skillratings WengLinConfig with additional parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtendedWengLinConfig {
    /// Core Weng-Lin parameters
    pub weng_lin_config: WengLinConfig,
    /// Initial rating for new players
    pub initial_rating: f64,
    /// Initial uncertainty for new players
    pub initial_uncertainty: f64,
}

impl Default for ExtendedWengLinConfig {
    fn default() -> Self {
        let prior = WengLinRating::new();
        Self {
            weng_lin_config: WengLinConfig::new(),
            initial_rating: prior.rating,
            initial_uncertainty: prior.uncertainty,
        }
    }
}

impl ExtendedWengLinConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.weng_lin_config.beta <= 0.0 {
            return Err(crate::error::RatingError::ConfigurationError {
                message: "Beta must be positive".to_string(),
            }
            .into());
        }

        if self.weng_lin_config.uncertainty_tolerance < 0.0 {
            return Err(crate::error::RatingError::ConfigurationError {
                message: "Uncertainty tolerance must be non-negative".to_string(),
            }
            .into());
        }

        if self.initial_uncertainty <= 0.0 {
            return Err(crate::error::RatingError::ConfigurationError {
                message: "Initial uncertainty must be positive".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

/// Weng-Lin rating calculator implementation
#[derive(Debug)]
pub struct WengLinRatingCalculator {
    config: ExtendedWengLinConfig,
}

impl WengLinRatingCalculator {
    /// Create a new Weng-Lin rating calculator
    pub fn new(config: ExtendedWengLinConfig) -> crate::error::Result<Self> {
        config.validate()?;

        Ok(Self { config })
    }

    /// Get default rating for new players
    pub fn default_rating(&self) -> PlayerRating {
        PlayerRating {
            rating: self.config.initial_rating,
            uncertainty: self.config.initial_uncertainty,
        }
    }
}

impl RatingCalculator for WengLinRatingCalculator {
    fn rate_teams(
        &self,
        home: &TeamRatings,
        away: &TeamRatings,
        outcome: SetOutcome,
    ) -> crate::error::Result<(TeamRatings, TeamRatings)> {
        let home_team: Vec<WengLinRating> = home.iter().map(|r| (*r).into()).collect();
        let away_team: Vec<WengLinRating> = away.iter().map(|r| (*r).into()).collect();

        let (new_home, new_away) = weng_lin_two_teams(
            &home_team,
            &away_team,
            &Outcomes::from(outcome),
            &self.config.weng_lin_config,
        );

        Ok((into_team(new_home)?, into_team(new_away)?))
    }

    fn get_initial_rating(&self) -> PlayerRating {
        self.default_rating()
    }

    fn config(&self) -> serde_json::Value {
        serde_json::to_value(&self.config).unwrap_or(serde_json::Value::Null)
    }
}
