//! Detail report to export report conversion
//!
//! End-of-season detail reports only carry aggregate match points, so the
//! normalizer synthesizes three set scores that reproduce the sets won by
//! each side. Rows are converted independently of each other.

use crate::error::Result;
use crate::records::{self, DetailRow, ExportRow};
use crate::types::{SetScore, SETS_PER_MATCH};
use crate::utils::{detail_date_to_match_date, row_contains};
use std::path::Path;
use tracing::{debug, info};

/// Synthetic set scores for a points result, or `None` for an invalid pair.
///
/// A set won earns one point and winning the match earns a bonus point, so
/// 3 points means two sets won, 1 point one set, 0 points none.
pub fn points_to_sets(home_points: u8, away_points: u8) -> Option<[SetScore; SETS_PER_MATCH]> {
    const WON: SetScore = SetScore::new(6, 0);
    const LOST: SetScore = SetScore::new(0, 6);
    const UNPLAYED: SetScore = SetScore::new(0, 0);

    match (home_points, away_points) {
        (3, 0) => Some([WON, WON, UNPLAYED]),
        (3, 1) => Some([WON, LOST, WON]),
        (0, 3) => Some([LOST, LOST, UNPLAYED]),
        (1, 3) => Some([LOST, WON, LOST]),
        _ => None,
    }
}

/// What happened to a single detail row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowDisposition {
    Converted(ExportRow),
    /// Row belongs to a different series than the filter
    OtherSeries,
    /// Match was forfeited or has a placeholder player
    Forfeit,
    /// Points do not describe a completed match
    InvalidPoints,
}

/// Counts from converting a whole detail report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeSummary {
    pub rows: Vec<ExportRow>,
    pub other_series: usize,
    pub forfeits: usize,
    pub invalid_points: usize,
}

/// Converts detail rows into export rows
#[derive(Debug, Clone)]
pub struct Normalizer {
    series: Option<String>,
    forfeit_sentinel: String,
    match_time: String,
}

impl Normalizer {
    pub fn new(
        series: Option<String>,
        forfeit_sentinel: impl Into<String>,
        match_time: impl Into<String>,
    ) -> Self {
        Self {
            series,
            forfeit_sentinel: forfeit_sentinel.into(),
            match_time: match_time.into(),
        }
    }

    /// Decide the fate of one detail row.
    ///
    /// Fails only when the row passes the series and forfeit checks but its
    /// match date cannot be read.
    pub fn classify_row(&self, row: &DetailRow) -> Result<RowDisposition> {
        if let Some(series) = &self.series {
            if &row.series != series {
                return Ok(RowDisposition::OtherSeries);
            }
        }

        if is_flag_set(&row.home_forfeit)
            || is_flag_set(&row.away_forfeit)
            || row_contains(row.fields(), &self.forfeit_sentinel)
        {
            return Ok(RowDisposition::Forfeit);
        }

        let match_date = detail_date_to_match_date(&row.match_date, &self.match_time)?;

        let sets = match (parse_points(&row.home_points), parse_points(&row.away_points)) {
            (Some(home), Some(away)) => points_to_sets(home, away),
            _ => None,
        };
        let Some(sets) = sets else {
            return Ok(RowDisposition::InvalidPoints);
        };

        Ok(RowDisposition::Converted(ExportRow {
            home_player_1: row.home_player_1.clone(),
            home_player_2: row.home_player_2.clone(),
            away_player_1: row.away_player_1.clone(),
            away_player_2: row.away_player_2.clone(),
            details: format!("{}:0|{}:0", row.home_team, row.away_team),
            match_date,
            home_set_1: sets[0].home,
            home_set_2: sets[1].home,
            home_set_3: sets[2].home,
            away_set_1: sets[0].away,
            away_set_2: sets[1].away,
            away_set_3: sets[2].away,
        }))
    }

    /// Convert one detail row into zero or one export row
    pub fn normalize_row(&self, row: &DetailRow) -> Result<Option<ExportRow>> {
        Ok(match self.classify_row(row)? {
            RowDisposition::Converted(export) => Some(export),
            _ => None,
        })
    }

    /// Convert every row of a detail report, preserving input order
    pub fn normalize_rows<'a, I>(&self, rows: I) -> Result<NormalizeSummary>
    where
        I: IntoIterator<Item = &'a DetailRow>,
    {
        let mut summary = NormalizeSummary::default();
        for (index, row) in rows.into_iter().enumerate() {
            match self.classify_row(row).map_err(|e| {
                crate::error::RatingError::MalformedRow {
                    row: index + 1,
                    reason: e.to_string(),
                }
            })? {
                RowDisposition::Converted(export) => summary.rows.push(export),
                RowDisposition::OtherSeries => summary.other_series += 1,
                RowDisposition::Forfeit => {
                    debug!("Skipping forfeited match on row {}", index + 1);
                    summary.forfeits += 1;
                }
                RowDisposition::InvalidPoints => {
                    debug!(
                        "Skipping row {} with points {}-{}",
                        index + 1,
                        row.home_points,
                        row.away_points
                    );
                    summary.invalid_points += 1;
                }
            }
        }
        Ok(summary)
    }
}

fn is_flag_set(flag: &str) -> bool {
    flag.trim() != "0"
}

/// Only the exact point tokens of a completed match are accepted
fn parse_points(points: &str) -> Option<u8> {
    match points.trim() {
        "0" => Some(0),
        "1" => Some(1),
        "3" => Some(3),
        _ => None,
    }
}

/// Load a detail report file and convert it
pub fn load_detail_file(path: &Path, normalizer: &Normalizer) -> Result<NormalizeSummary> {
    let rows: Vec<DetailRow> = records::read_rows(path)?;
    let summary = normalizer.normalize_rows(&rows)?;
    info!(
        "Imported {} matches from {}",
        summary.rows.len(),
        path.display()
    );
    debug!(
        "Skipped {} rows from other series, {} forfeits, {} with invalid points",
        summary.other_series, summary.forfeits, summary.invalid_points
    );
    Ok(summary)
}

/// Write export rows to a file
pub fn write_export_file(path: &Path, rows: &[ExportRow]) -> Result<()> {
    records::write_rows(path, rows)?;
    info!("Wrote {} records to {}", rows.len(), path.display());
    Ok(())
}
