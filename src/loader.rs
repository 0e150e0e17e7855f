//! Export report loading
//!
//! Turns export report rows into deduplicated, chronologically ordered
//! match records and registers every player seen along the way.

use crate::error::{RatingError, Result};
use crate::rating::PlayerRegistry;
use crate::records::{self, ExportRow, RatingRow};
use crate::types::{MatchRecord, PlayerRating, SetScore, MAX_SET_GAMES};
use crate::utils::{parse_match_datetime, row_contains};
use csv::StringRecord;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

/// Matches read from an export report
#[derive(Debug, Clone, Default)]
pub struct LoadSummary {
    /// Unique matches, oldest first
    pub matches: Vec<MatchRecord>,
    pub rows_read: usize,
    pub forfeits: usize,
    pub duplicates: usize,
    pub new_players: usize,
}

/// Parses export report rows into match records
#[derive(Debug, Clone)]
pub struct MatchLoader {
    forfeit_sentinel: String,
}

impl MatchLoader {
    pub fn new(forfeit_sentinel: impl Into<String>) -> Self {
        Self {
            forfeit_sentinel: forfeit_sentinel.into(),
        }
    }

    /// Load matches from raw export rows.
    ///
    /// Rows naming the forfeit sentinel anywhere are dropped, exact duplicate
    /// rows are collapsed to their first occurrence, and the result is sorted
    /// by match time (stable). Players not yet in `registry` are added with
    /// `default_rating` and the club of the side they first played for.
    pub fn load_records(
        &self,
        headers: &StringRecord,
        records: &[StringRecord],
        registry: &mut PlayerRegistry,
        default_rating: PlayerRating,
    ) -> Result<LoadSummary> {
        let mut summary = LoadSummary {
            rows_read: records.len(),
            ..LoadSummary::default()
        };
        let mut seen: HashSet<Vec<&str>> = HashSet::new();

        for (index, record) in records.iter().enumerate() {
            let row_number = index + 1;

            if row_contains(record.iter(), &self.forfeit_sentinel) {
                summary.forfeits += 1;
                continue;
            }

            if !seen.insert(record.iter().collect()) {
                summary.duplicates += 1;
                continue;
            }

            let row: ExportRow =
                record
                    .deserialize(Some(headers))
                    .map_err(|e| RatingError::MalformedRow {
                        row: row_number,
                        reason: e.to_string(),
                    })?;
            let parsed = parse_match(&row, row_number)?;

            for (player, club) in parsed.participants() {
                if registry.discover(player, club, default_rating) {
                    summary.new_players += 1;
                }
            }

            summary.matches.push(parsed);
        }

        summary.matches.sort_by_key(|m| m.played_at);

        debug!(
            "Dropped {} forfeits and {} duplicate rows out of {}",
            summary.forfeits, summary.duplicates, summary.rows_read
        );
        Ok(summary)
    }

    /// Load matches from an export report file
    pub fn load_export_file(
        &self,
        path: &Path,
        registry: &mut PlayerRegistry,
        default_rating: PlayerRating,
    ) -> Result<LoadSummary> {
        let (headers, records) = records::read_raw(path)?;
        let summary = self.load_records(&headers, &records, registry, default_rating)?;
        info!(
            "Imported {} matches and {} players from {}",
            summary.matches.len(),
            registry.len(),
            path.display()
        );
        Ok(summary)
    }
}

/// Build a match record from a typed export row
pub fn parse_match(row: &ExportRow, row_number: usize) -> Result<MatchRecord> {
    let malformed = |reason: String| RatingError::MalformedRow {
        row: row_number,
        reason,
    };

    let (home_details, away_details) = row
        .details
        .split_once('|')
        .ok_or_else(|| malformed(format!("Details '{}' has no '|' separator", row.details)))?;

    let players = [
        &row.home_player_1,
        &row.home_player_2,
        &row.away_player_1,
        &row.away_player_2,
    ];
    if players.iter().any(|p| p.is_empty()) {
        return Err(malformed("missing player name".to_string()).into());
    }
    let distinct: HashSet<&String> = players.iter().copied().collect();
    if distinct.len() != players.len() {
        return Err(malformed("a player appears twice in the same match".to_string()).into());
    }

    let played_at = parse_match_datetime(&row.match_date)
        .map_err(|e| malformed(e.to_string()))?;

    let sets = [
        SetScore::new(row.home_set_1, row.away_set_1),
        SetScore::new(row.home_set_2, row.away_set_2),
        SetScore::new(row.home_set_3, row.away_set_3),
    ];
    if let Some(set) = sets
        .iter()
        .find(|s| s.home > MAX_SET_GAMES || s.away > MAX_SET_GAMES)
    {
        return Err(malformed(format!(
            "set score {}-{} exceeds {} games",
            set.home, set.away, MAX_SET_GAMES
        ))
        .into());
    }

    Ok(MatchRecord {
        home_players: [row.home_player_1.clone(), row.home_player_2.clone()],
        away_players: [row.away_player_1.clone(), row.away_player_2.clone()],
        sets,
        played_at,
        home_club: club_name(home_details).to_string(),
        away_club: club_name(away_details).to_string(),
    })
}

fn club_name(details: &str) -> &str {
    details.split(':').next().unwrap_or(details)
}

/// Load an initializer ratings file into a fresh registry.
///
/// A name repeated in the file takes its last row.
pub fn load_initial_ratings(path: &Path) -> Result<PlayerRegistry> {
    let rows: Vec<RatingRow> = records::read_rows(path)?;
    for (index, row) in rows.iter().enumerate() {
        check_initial_rating(row, index + 1)?;
    }
    let registry = PlayerRegistry::from_rating_rows(rows);
    info!(
        "Imported {} players from {}",
        registry.len(),
        path.display()
    );
    Ok(registry)
}

fn check_initial_rating(row: &RatingRow, row_number: usize) -> Result<()> {
    if !row.rating.is_finite() || !row.sigma.is_finite() || row.sigma <= 0.0 {
        return Err(RatingError::MalformedRow {
            row: row_number,
            reason: format!(
                "player {} has rating {} and sigma {}",
                row.name, row.rating, row.sigma
            ),
        }
        .into());
    }
    Ok(())
}
