//! TrueSkill rating system implementation
//!
//! This module provides the default rating calculator, backed by the
//! two-team TrueSkill factor graph update from the skillratings crate.

use crate::rating::calculator::{into_team, RatingCalculator};
use crate::types::{PlayerRating, SetOutcome, TeamRatings};
use serde::{Deserialize, Serialize};
use skillratings::trueskill::{trueskill_two_teams, TrueSkillConfig, TrueSkillRating};
use skillratings::Outcomes;

/// Extended configuration for the TrueSkill rating system
/// This wraps the skillratings TrueSkillConfig with the prior for new players
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtendedTrueSkillConfig {
    /// Core TrueSkill parameters
    pub trueskill_config: TrueSkillConfig,
    /// Initial rating for new players
    pub initial_rating: f64,
    /// Initial uncertainty for new players
    pub initial_uncertainty: f64,
}

impl Default for ExtendedTrueSkillConfig {
    fn default() -> Self {
        let prior = TrueSkillRating::new();
        Self {
            trueskill_config: TrueSkillConfig::new(),
            initial_rating: prior.rating,
            initial_uncertainty: prior.uncertainty,
        }
    }
}

impl ExtendedTrueSkillConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> crate::error::Result<()> {
        let config = &self.trueskill_config;

        if config.beta <= 0.0 {
            return Err(crate::error::RatingError::ConfigurationError {
                message: "TrueSkill beta must be positive".to_string(),
            }
            .into());
        }

        if !(config.draw_probability > 0.0 && config.draw_probability < 1.0) {
            return Err(crate::error::RatingError::ConfigurationError {
                message: "TrueSkill draw probability must be between 0 and 1".to_string(),
            }
            .into());
        }

        if config.default_dynamics < 0.0 {
            return Err(crate::error::RatingError::ConfigurationError {
                message: "TrueSkill dynamics must be non-negative".to_string(),
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

/// TrueSkill rating calculator implementation
#[derive(Debug)]
pub struct TrueSkillRatingCalculator {
    config: ExtendedTrueSkillConfig,
}

impl TrueSkillRatingCalculator {
    /// Create a new TrueSkill rating calculator
    pub fn new(config: ExtendedTrueSkillConfig) -> crate::error::Result<Self> {
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

impl RatingCalculator for TrueSkillRatingCalculator {
    fn rate_teams(
        &self,
        home: &TeamRatings,
        away: &TeamRatings,
        outcome: SetOutcome,
    ) -> crate::error::Result<(TeamRatings, TeamRatings)> {
        let home_team: Vec<TrueSkillRating> = home.iter().map(|r| (*r).into()).collect();
        let away_team: Vec<TrueSkillRating> = away.iter().map(|r| (*r).into()).collect();

        let (new_home, new_away) = trueskill_two_teams(
            &home_team,
            &away_team,
            &Outcomes::from(outcome),
            &self.config.trueskill_config,
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
