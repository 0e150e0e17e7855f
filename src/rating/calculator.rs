//! Rating calculator trait and implementations
//!
//! This module defines the interface for the team-vs-team skill update used
//! by the replay engine, plus a recording calculator for tests.

use crate::types::{PlayerRating, SetOutcome, TeamRatings};

/// Trait for rating one set between two doubles pairs
pub trait RatingCalculator: Send + Sync {
    /// Update both pairs' ratings for a single set
    ///
    /// # Arguments
    /// * `home` - Current ratings of the home pair
    /// * `away` - Current ratings of the away pair
    /// * `outcome` - Result of the set from the home side's point of view
    ///
    /// # Returns
    /// The updated (home, away) pair ratings
    fn rate_teams(
        &self,
        home: &TeamRatings,
        away: &TeamRatings,
        outcome: SetOutcome,
    ) -> crate::error::Result<(TeamRatings, TeamRatings)>;

    /// Get the initial rating for new players
    fn get_initial_rating(&self) -> PlayerRating;

    /// Get current configuration as JSON
    fn config(&self) -> serde_json::Value;
}

/// Convert a calculator's output vector back into a pair
pub(crate) fn into_team<T>(ratings: Vec<T>) -> crate::error::Result<TeamRatings>
where
    T: Into<PlayerRating>,
{
    let count = ratings.len();
    let mut iter = ratings.into_iter().map(|r| -> PlayerRating { r.into() });
    match (iter.next(), iter.next(), iter.next()) {
        (Some(first), Some(second), None) => Ok([first, second]),
        _ => Err(crate::error::RatingError::RatingCalculationFailed {
            reason: format!("expected 2 ratings for a doubles pair, got {}", count),
        }
        .into()),
    }
}

/// One recorded call to [`MockRatingCalculator::rate_teams`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub home: TeamRatings,
    pub away: TeamRatings,
    pub outcome: SetOutcome,
}

/// Mock rating calculator for testing
///
/// Winners gain `step` and losers drop `step`, draws leave means alone, and
/// every rated player's uncertainty shrinks by 10%. Every call is recorded.
#[derive(Debug)]
pub struct MockRatingCalculator {
    calls: std::sync::Mutex<Vec<RecordedCall>>,
    initial_rating: PlayerRating,
    step: f64,
}

impl MockRatingCalculator {
    pub fn new() -> Self {
        Self {
            calls: std::sync::Mutex::new(Vec::new()),
            initial_rating: PlayerRating {
                rating: 25.0,
                uncertainty: 25.0 / 3.0,
            },
            step: 1.0,
        }
    }

    /// Get all calculation calls made (for testing)
    pub fn get_calculation_calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Clear recorded calls
    pub fn clear_calls(&self) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.clear();
        }
    }

    fn shift(team: &TeamRatings, delta: f64) -> TeamRatings {
        team.map(|player| PlayerRating {
            rating: player.rating + delta,
            uncertainty: player.uncertainty * 0.9,
        })
    }
}

impl Default for MockRatingCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl RatingCalculator for MockRatingCalculator {
    fn rate_teams(
        &self,
        home: &TeamRatings,
        away: &TeamRatings,
        outcome: SetOutcome,
    ) -> crate::error::Result<(TeamRatings, TeamRatings)> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                home: *home,
                away: *away,
                outcome,
            });
        }

        let (home_delta, away_delta) = match outcome {
            SetOutcome::HomeWin => (self.step, -self.step),
            SetOutcome::AwayWin => (-self.step, self.step),
            SetOutcome::Draw => (0.0, 0.0),
        };

        Ok((Self::shift(home, home_delta), Self::shift(away, away_delta)))
    }

    fn get_initial_rating(&self) -> PlayerRating {
        self.initial_rating
    }

    fn config(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "mock",
            "initial_rating": self.initial_rating.rating,
            "initial_uncertainty": self.initial_rating.uncertainty,
            "step": self.step
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(rating: f64) -> TeamRatings {
        [PlayerRating {
            rating,
            uncertainty: 10.0,
        }; 2]
    }

    #[test]
    fn test_into_team_requires_two_ratings() {
        let pair = into_team(vec![team(20.0)[0], team(30.0)[0]]).unwrap();
        assert_eq!(pair[0].rating, 20.0);
        assert_eq!(pair[1].rating, 30.0);

        assert!(into_team(vec![team(20.0)[0]]).is_err());
        assert!(into_team(vec![team(20.0)[0]; 3]).is_err());
    }

    #[test]
    fn test_mock_calculator() {
        let calculator = MockRatingCalculator::new();

        let (home, away) = calculator
            .rate_teams(&team(25.0), &team(25.0), SetOutcome::HomeWin)
            .unwrap();
        assert_eq!(home[0].rating, 26.0);
        assert_eq!(away[1].rating, 24.0);
        assert!((home[0].uncertainty - 9.0).abs() < 1e-12);

        // Should record the call
        let calls = calculator.get_calculation_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].outcome, SetOutcome::HomeWin);
        assert_eq!(calls[0].home, team(25.0));

        calculator.clear_calls();
        assert!(calculator.get_calculation_calls().is_empty());
    }

    #[test]
    fn test_mock_calculator_draw_keeps_means() {
        let calculator = MockRatingCalculator::new();
        let (home, away) = calculator
            .rate_teams(&team(30.0), &team(20.0), SetOutcome::Draw)
            .unwrap();
        assert_eq!(home[0].rating, 30.0);
        assert_eq!(away[0].rating, 20.0);
    }

    #[test]
    fn test_mock_calculator_config() {
        let calculator = MockRatingCalculator::new();
        let config = calculator.config();
        assert_eq!(config["type"], "mock");
        assert_eq!(calculator.get_initial_rating().rating, 25.0);
    }
}
