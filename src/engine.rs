//! Chronological match replay
//!
//! The engine walks the ordered match list once. Each match reads the
//! current ratings of its four players from the registry, rates every
//! decided set in order (so a match can compound up to three updates), and
//! writes the four results back before the next match is considered.

use crate::error::Result;
use crate::rating::{PlayerRegistry, RatingCalculator};
use crate::types::{MatchRecord, SetOutcome, TeamRatings};
use std::sync::Arc;
use tracing::{debug, info, trace};

/// Totals from replaying a match list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub matches: usize,
    pub sets_rated: usize,
    /// Rated sets that went to a tiebreak
    pub draws: usize,
    /// Level sets (usually unplayed third sets) that produced no update
    pub sets_skipped: usize,
}

/// Ratings of both pairs after one match
#[derive(Debug, Clone, PartialEq)]
pub struct MatchUpdate {
    pub home: TeamRatings,
    pub away: TeamRatings,
    pub sets_rated: usize,
    pub draws: usize,
}

/// Replays matches through a rating calculator
pub struct RatingEngine {
    calculator: Arc<dyn RatingCalculator>,
}

impl RatingEngine {
    pub fn new(calculator: Arc<dyn RatingCalculator>) -> Self {
        Self { calculator }
    }

    /// Rate one match against the registry's current state and store the
    /// resulting ratings
    pub fn rate_match(
        &self,
        record: &MatchRecord,
        registry: &mut PlayerRegistry,
    ) -> Result<MatchUpdate> {
        let [home_1, home_2] = &record.home_players;
        let [away_1, away_2] = &record.away_players;

        let mut home = [registry.rating(home_1)?, registry.rating(home_2)?];
        let mut away = [registry.rating(away_1)?, registry.rating(away_2)?];
        let mut sets_rated = 0;
        let mut draws = 0;

        for (number, set) in record.sets.iter().enumerate() {
            let Some(outcome) = set.outcome() else {
                continue;
            };

            trace!(
                "Set {} {}-{} rated as {}",
                number + 1,
                set.home,
                set.away,
                outcome
            );
            (home, away) = self.calculator.rate_teams(&home, &away, outcome)?;
            sets_rated += 1;
            if outcome == SetOutcome::Draw {
                draws += 1;
            }
        }

        let sets = sets_rated as u64;
        registry.update_rating(home_1, home[0], sets)?;
        registry.update_rating(home_2, home[1], sets)?;
        registry.update_rating(away_1, away[0], sets)?;
        registry.update_rating(away_2, away[1], sets)?;

        Ok(MatchUpdate {
            home,
            away,
            sets_rated,
            draws,
        })
    }

    /// Replay every match in the given order
    pub fn replay(
        &self,
        matches: &[MatchRecord],
        registry: &mut PlayerRegistry,
    ) -> Result<ReplaySummary> {
        let mut summary = ReplaySummary::default();

        for record in matches {
            let update = self.rate_match(record, registry)?;
            debug!(
                "{} {}/{} vs {}/{}: {} sets rated",
                record.played_at,
                record.home_players[0],
                record.home_players[1],
                record.away_players[0],
                record.away_players[1],
                update.sets_rated
            );

            summary.matches += 1;
            summary.sets_rated += update.sets_rated;
            summary.draws += update.draws;
            summary.sets_skipped += record.sets.len() - update.sets_rated;
        }

        info!(
            "Rating completed: {} matches, {} sets rated ({} tiebreaks)",
            summary.matches, summary.sets_rated, summary.draws
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::{
        ExtendedTrueSkillConfig, MockRatingCalculator, TrueSkillRatingCalculator,
    };
    use crate::types::{PlayerRating, SetScore};
    use chrono::NaiveDate;

    fn record(day: u32, home: [&str; 2], away: [&str; 2], sets: [(u32, u32); 3]) -> MatchRecord {
        MatchRecord {
            home_players: home.map(str::to_string),
            away_players: away.map(str::to_string),
            sets: sets.map(|(h, a)| SetScore::new(h, a)),
            played_at: NaiveDate::from_ymd_opt(2017, 1, day)
                .and_then(|d| d.and_hms_opt(19, 0, 0))
                .unwrap(),
            home_club: "North".to_string(),
            away_club: "South".to_string(),
        }
    }

    fn registry_for(matches: &[MatchRecord], prior: PlayerRating) -> PlayerRegistry {
        let mut registry = PlayerRegistry::new();
        for m in matches {
            for (player, club) in m.participants() {
                registry.discover(player, club, prior);
            }
        }
        registry
    }

    fn trueskill() -> Arc<dyn RatingCalculator> {
        Arc::new(TrueSkillRatingCalculator::new(ExtendedTrueSkillConfig::default()).unwrap())
    }

    #[test]
    fn test_sets_rated_in_order_and_compounded() {
        let mock = Arc::new(MockRatingCalculator::new());
        let engine = RatingEngine::new(mock.clone());
        let matches = vec![record(5, ["A", "B"], ["C", "D"], [(6, 0), (0, 6), (6, 0)])];
        let mut registry = registry_for(&matches, mock.get_initial_rating());

        let summary = engine.replay(&matches, &mut registry).unwrap();
        assert_eq!(summary.sets_rated, 3);

        let calls = mock.get_calculation_calls();
        let outcomes: Vec<SetOutcome> = calls.iter().map(|c| c.outcome).collect();
        assert_eq!(
            outcomes,
            vec![SetOutcome::HomeWin, SetOutcome::AwayWin, SetOutcome::HomeWin]
        );
        // Second set sees the first set's update
        assert_eq!(calls[1].home[0].rating, 26.0);
        assert_eq!(calls[2].home[0].rating, 25.0);

        let a = registry.get("A").unwrap();
        assert_eq!(a.rating.rating, 26.0);
        assert_eq!(a.sets_played, 3);
        assert_eq!(registry.get("D").unwrap().rating.rating, 24.0);
    }

    #[test]
    fn test_tiebreak_sets_rated_as_draw() {
        let mock = Arc::new(MockRatingCalculator::new());
        let engine = RatingEngine::new(mock.clone());
        let matches = vec![record(5, ["A", "B"], ["C", "D"], [(7, 6), (6, 7), (0, 0)])];
        let mut registry = registry_for(&matches, mock.get_initial_rating());

        let summary = engine.replay(&matches, &mut registry).unwrap();
        assert_eq!(summary.draws, 2);
        assert_eq!(summary.sets_skipped, 1);

        let calls = mock.get_calculation_calls();
        assert_eq!(calls.len(), 2);
        assert!(calls.iter().all(|c| c.outcome == SetOutcome::Draw));
        assert_eq!(registry.get("A").unwrap().rating.rating, 25.0);
    }

    #[test]
    fn test_level_sets_skip_update() {
        let mock = Arc::new(MockRatingCalculator::new());
        let engine = RatingEngine::new(mock.clone());
        let matches = vec![record(5, ["A", "B"], ["C", "D"], [(6, 0), (0, 0), (3, 3)])];
        let mut registry = registry_for(&matches, mock.get_initial_rating());

        let summary = engine.replay(&matches, &mut registry).unwrap();
        assert_eq!(summary.sets_rated, 1);
        assert_eq!(summary.sets_skipped, 2);
        assert_eq!(mock.get_calculation_calls().len(), 1);
    }

    #[test]
    fn test_later_matches_see_earlier_updates() {
        let mock = Arc::new(MockRatingCalculator::new());
        let engine = RatingEngine::new(mock.clone());
        let matches = vec![
            record(5, ["A", "B"], ["C", "D"], [(6, 0), (0, 0), (0, 0)]),
            record(12, ["A", "C"], ["B", "D"], [(6, 0), (0, 0), (0, 0)]),
        ];
        let mut registry = registry_for(&matches, mock.get_initial_rating());

        engine.replay(&matches, &mut registry).unwrap();

        let calls = mock.get_calculation_calls();
        assert_eq!(calls[1].home[0].rating, 26.0); // A after first win
        assert_eq!(calls[1].home[1].rating, 24.0); // C after first loss
    }

    #[test]
    fn test_home_sweep_with_trueskill() {
        let calculator = trueskill();
        let prior = calculator.get_initial_rating();
        let engine = RatingEngine::new(calculator);
        let matches = vec![record(5, ["A", "B"], ["C", "D"], [(6, 0), (6, 0), (0, 0)])];
        let mut registry = registry_for(&matches, prior);

        engine.replay(&matches, &mut registry).unwrap();

        for name in ["A", "B"] {
            let state = registry.get(name).unwrap();
            assert!(state.rating.rating > registry.get("C").unwrap().rating.rating);
            assert!(state.rating.rating > registry.get("D").unwrap().rating.rating);
        }
        for name in ["A", "B", "C", "D"] {
            assert!(registry.get(name).unwrap().rating.uncertainty < prior.uncertainty);
        }
    }

    #[test]
    fn test_match_order_changes_outcome() {
        let first = record(5, ["A", "B"], ["C", "D"], [(6, 0), (6, 0), (0, 0)]);
        let second = record(12, ["A", "B"], ["C", "D"], [(0, 6), (0, 6), (0, 0)]);

        let forward = vec![first.clone(), second.clone()];
        let backward = vec![second, first];

        let calculator = trueskill();
        let prior = calculator.get_initial_rating();
        let engine = RatingEngine::new(calculator);

        let mut forward_registry = registry_for(&forward, prior);
        engine.replay(&forward, &mut forward_registry).unwrap();
        let mut backward_registry = registry_for(&backward, prior);
        engine.replay(&backward, &mut backward_registry).unwrap();

        let a_forward = forward_registry.get("A").unwrap().rating;
        let a_backward = backward_registry.get("A").unwrap().rating;
        assert!((a_forward.rating - a_backward.rating).abs() > 1e-6);
    }

    #[test]
    fn test_unknown_player_aborts() {
        let engine = RatingEngine::new(trueskill());
        let matches = vec![record(5, ["A", "B"], ["C", "D"], [(6, 0), (6, 0), (0, 0)])];
        let mut registry = PlayerRegistry::new();
        registry.discover("A", "North", PlayerRating::default());

        assert!(engine.replay(&matches, &mut registry).is_err());
    }

    #[test]
    fn test_bystanders_unchanged() {
        let engine = RatingEngine::new(trueskill());
        let matches = vec![record(5, ["A", "B"], ["C", "D"], [(6, 0), (6, 0), (0, 0)])];
        let mut registry = registry_for(&matches, PlayerRating::default());
        let seed = PlayerRating {
            rating: 30.0,
            uncertainty: 4.0,
        };
        registry.discover("Idle", "North", seed);

        engine.replay(&matches, &mut registry).unwrap();
        let idle = registry.get("Idle").unwrap();
        assert_eq!(idle.rating, seed);
        assert_eq!(idle.sets_played, 0);
    }
}
