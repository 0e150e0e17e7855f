//! Common types used throughout the rating pipeline

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use skillratings::trueskill::TrueSkillRating;
use skillratings::weng_lin::WengLinRating;
use skillratings::Outcomes;
use std::cmp::Ordering;

/// Unique identifier for players (the player's name, case-sensitive)
pub type PlayerId = String;

/// Club identifier as it appears in the match reports
pub type ClubId = String;

/// Number of set slots carried by every match record
pub const SETS_PER_MATCH: usize = 3;

/// Total games of a set that went to a tiebreak (7-6 or 6-7)
pub const TIEBREAK_GAME_TOTAL: u32 = 13;

/// Most games one side can record in a single set
pub const MAX_SET_GAMES: u32 = 99;

/// Rating information for a player: mean skill and its uncertainty
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerRating {
    pub rating: f64,
    pub uncertainty: f64,
}

impl Default for PlayerRating {
    fn default() -> Self {
        TrueSkillRating::new().into()
    }
}

impl From<TrueSkillRating> for PlayerRating {
    fn from(rating: TrueSkillRating) -> Self {
        Self {
            rating: rating.rating,
            uncertainty: rating.uncertainty,
        }
    }
}

impl From<PlayerRating> for TrueSkillRating {
    fn from(rating: PlayerRating) -> Self {
        Self {
            rating: rating.rating,
            uncertainty: rating.uncertainty,
        }
    }
}

impl From<WengLinRating> for PlayerRating {
    fn from(rating: WengLinRating) -> Self {
        Self {
            rating: rating.rating,
            uncertainty: rating.uncertainty,
        }
    }
}

impl From<PlayerRating> for WengLinRating {
    fn from(rating: PlayerRating) -> Self {
        Self {
            rating: rating.rating,
            uncertainty: rating.uncertainty,
        }
    }
}

/// The two ratings of a doubles pair, in player order
pub type TeamRatings = [PlayerRating; 2];

/// Result of a single set, seen from the home side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetOutcome {
    HomeWin,
    AwayWin,
    /// The set went to a tiebreak and is rated as equal rank
    Draw,
}

impl From<SetOutcome> for Outcomes {
    fn from(outcome: SetOutcome) -> Self {
        match outcome {
            SetOutcome::HomeWin => Outcomes::WIN,
            SetOutcome::AwayWin => Outcomes::LOSS,
            SetOutcome::Draw => Outcomes::DRAW,
        }
    }
}

impl std::fmt::Display for SetOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SetOutcome::HomeWin => write!(f, "home win"),
            SetOutcome::AwayWin => write!(f, "away win"),
            SetOutcome::Draw => write!(f, "draw"),
        }
    }
}

/// Games won by each side in one set; (0, 0) marks an unplayed set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SetScore {
    pub home: u32,
    pub away: u32,
}

impl SetScore {
    pub const fn new(home: u32, away: u32) -> Self {
        Self { home, away }
    }

    /// Classify the set for rating purposes.
    ///
    /// A set whose games add up to 13 counts as a draw even though one side
    /// nominally won it. Level sets that are not tiebreaks (including unplayed
    /// ones) yield `None` and are not rated.
    pub fn outcome(&self) -> Option<SetOutcome> {
        if self.home.checked_add(self.away) == Some(TIEBREAK_GAME_TOTAL) {
            return Some(SetOutcome::Draw);
        }

        match self.home.cmp(&self.away) {
            Ordering::Greater => Some(SetOutcome::HomeWin),
            Ordering::Less => Some(SetOutcome::AwayWin),
            Ordering::Equal => None,
        }
    }
}

/// One completed doubles match, ready for rating
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRecord {
    pub home_players: [PlayerId; 2],
    pub away_players: [PlayerId; 2],
    pub sets: [SetScore; SETS_PER_MATCH],
    pub played_at: NaiveDateTime,
    pub home_club: ClubId,
    pub away_club: ClubId,
}

impl MatchRecord {
    /// All four participants paired with the club of the side they played for
    pub fn participants(&self) -> impl Iterator<Item = (&PlayerId, &ClubId)> {
        self.home_players
            .iter()
            .map(move |player| (player, &self.home_club))
            .chain(
                self.away_players
                    .iter()
                    .map(move |player| (player, &self.away_club)),
            )
    }
}
