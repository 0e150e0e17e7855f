//! Player registry: the owned mapping from player name to skill state
//!
//! A registry is built fresh for each run, threaded by reference through the
//! loader and the engine, and read once by the report. Iteration follows the
//! order in which players were first registered.

use crate::records::RatingRow;
use crate::types::{ClubId, PlayerId, PlayerRating};
use std::collections::HashMap;

/// Skill state of one player
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    pub name: PlayerId,
    /// Club from the player's first appearance; never reassigned
    pub club: ClubId,
    pub rating: PlayerRating,
    /// Number of rated sets this player took part in
    pub sets_played: u64,
}

impl PlayerState {
    /// Create a new state for a player that has not played yet
    pub fn new(name: PlayerId, club: ClubId, rating: PlayerRating) -> Self {
        Self {
            name,
            club,
            rating,
            sets_played: 0,
        }
    }
}

impl From<&PlayerState> for RatingRow {
    fn from(state: &PlayerState) -> Self {
        Self {
            club: state.club.clone(),
            name: state.name.clone(),
            rating: state.rating.rating,
            sigma: state.rating.uncertainty,
        }
    }
}

/// All players known to a run
#[derive(Debug, Clone, Default)]
pub struct PlayerRegistry {
    players: Vec<PlayerState>,
    index: HashMap<PlayerId, usize>,
}

impl PlayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from initializer rows. Repeated names take the last row.
    pub fn from_rating_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = RatingRow>,
    {
        let mut registry = Self::new();
        for row in rows {
            registry.seed(
                &row.name,
                &row.club,
                PlayerRating {
                    rating: row.rating,
                    uncertainty: row.sigma,
                },
            );
        }
        registry
    }

    /// Set a player's club and rating from an initializer row.
    ///
    /// A later row for the same name overwrites the earlier one but keeps
    /// its registration slot.
    pub fn seed(&mut self, name: &str, club: &str, rating: PlayerRating) {
        match self.index.get(name) {
            Some(&slot) => {
                let state = &mut self.players[slot];
                state.club = club.to_string();
                state.rating = rating;
            }
            None => {
                self.discover(name, club, rating);
            }
        }
    }

    /// Register a player on first sight in a match.
    ///
    /// The first registration always wins: a player already present (seeded
    /// from the initializer or seen in an earlier match) keeps its club and
    /// rating. Returns `true` when a new entry was created.
    pub fn discover(&mut self, name: &str, club: &str, rating: PlayerRating) -> bool {
        if self.index.contains_key(name) {
            return false;
        }

        self.index.insert(name.to_string(), self.players.len());
        self.players
            .push(PlayerState::new(name.to_string(), club.to_string(), rating));
        true
    }

    /// Look up a player's state
    pub fn get(&self, name: &str) -> Option<&PlayerState> {
        self.index.get(name).map(|&slot| &self.players[slot])
    }

    /// Current rating of a registered player
    pub fn rating(&self, name: &str) -> crate::error::Result<PlayerRating> {
        self.get(name)
            .map(|state| state.rating)
            .ok_or_else(|| player_not_found(name))
    }

    /// Replace a player's rating after `sets_rated` more rated sets
    pub fn update_rating(
        &mut self,
        name: &str,
        rating: PlayerRating,
        sets_rated: u64,
    ) -> crate::error::Result<()> {
        let slot = *self.index.get(name).ok_or_else(|| player_not_found(name))?;
        let state = &mut self.players[slot];
        state.rating = rating;
        state.sets_played += sets_rated;
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Players in first-registration order
    pub fn iter(&self) -> impl Iterator<Item = &PlayerState> {
        self.players.iter()
    }
}

fn player_not_found(name: &str) -> anyhow::Error {
    crate::error::RatingError::PlayerNotFound {
        player_id: name.to_string(),
    }
    .into()
}
