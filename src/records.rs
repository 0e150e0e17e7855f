//! Tabular record formats and whole-file CSV access
//!
//! Three formats flow through the tools: the end-of-season detail report,
//! the in-season export report and the ratings table (which doubles as the
//! initializer input). Each is a serde row type; files are read or written
//! in one call and the handle is dropped on return.

use crate::error::{RatingError, Result};
use anyhow::Context;
use csv::{ReaderBuilder, StringRecord};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::Path;

/// One row of a detail report. Only the columns the normalizer needs are typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailRow {
    #[serde(rename = "Series", default)]
    pub series: String,
    #[serde(rename = "HomeTeam")]
    pub home_team: String,
    #[serde(rename = "AwayTeam")]
    pub away_team: String,
    #[serde(rename = "HomePlayer1")]
    pub home_player_1: String,
    #[serde(rename = "HomePlayer2")]
    pub home_player_2: String,
    #[serde(rename = "AwayPlayer1")]
    pub away_player_1: String,
    #[serde(rename = "AwayPlayer2")]
    pub away_player_2: String,
    #[serde(rename = "HomeForfeit")]
    pub home_forfeit: String,
    #[serde(rename = "AwayForfeit")]
    pub away_forfeit: String,
    #[serde(rename = "MatchDate")]
    pub match_date: String,
    #[serde(rename = "HomePoints")]
    pub home_points: String,
    #[serde(rename = "AwayPoints")]
    pub away_points: String,
}

impl DetailRow {
    /// Every typed field, for sentinel scans
    pub fn fields(&self) -> [&str; 12] {
        [
            self.series.as_str(),
            self.home_team.as_str(),
            self.away_team.as_str(),
            self.home_player_1.as_str(),
            self.home_player_2.as_str(),
            self.away_player_1.as_str(),
            self.away_player_2.as_str(),
            self.home_forfeit.as_str(),
            self.away_forfeit.as_str(),
            self.match_date.as_str(),
            self.home_points.as_str(),
            self.away_points.as_str(),
        ]
    }
}

/// One row of an export report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRow {
    #[serde(rename = "Home Player 1")]
    pub home_player_1: String,
    #[serde(rename = "Home Player 2")]
    pub home_player_2: String,
    #[serde(rename = "Away Player 1")]
    pub away_player_1: String,
    #[serde(rename = "Away Player 2")]
    pub away_player_2: String,
    /// `home-club:score|away-club:score`
    #[serde(rename = "Details")]
    pub details: String,
    #[serde(rename = "Match: Match date")]
    pub match_date: String,
    #[serde(rename = "Home Set 1")]
    pub home_set_1: u32,
    #[serde(rename = "Home Set 2")]
    pub home_set_2: u32,
    #[serde(rename = "Home Set 3")]
    pub home_set_3: u32,
    #[serde(rename = "Away Set 1")]
    pub away_set_1: u32,
    #[serde(rename = "Away Set 2")]
    pub away_set_2: u32,
    #[serde(rename = "Away Set 3")]
    pub away_set_3: u32,
}

/// One row of a ratings table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingRow {
    pub club: String,
    pub name: String,
    pub rating: f64,
    pub sigma: f64,
}

/// Read every row of a CSV source into typed records
pub fn read_rows_from<R: Read, T: DeserializeOwned>(source: R) -> Result<Vec<T>> {
    let mut reader = ReaderBuilder::new().from_reader(source);
    let mut rows = Vec::new();
    for (index, result) in reader.deserialize().enumerate() {
        let row: T = result.map_err(|e| RatingError::MalformedRow {
            row: index + 1,
            reason: e.to_string(),
        })?;
        rows.push(row);
    }
    Ok(rows)
}

/// Read every row of a CSV file into typed records
pub fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    read_rows_from(file).with_context(|| format!("Failed to read {}", path.display()))
}

/// Read a CSV source as untyped records, keeping the header row
pub fn read_raw_from<R: Read>(source: R) -> Result<(StringRecord, Vec<StringRecord>)> {
    let mut reader = ReaderBuilder::new().from_reader(source);
    let headers = reader.headers()?.clone();
    let records = reader
        .records()
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok((headers, records))
}

/// Read a CSV file as untyped records, keeping the header row
pub fn read_raw(path: &Path) -> Result<(StringRecord, Vec<StringRecord>)> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    read_raw_from(file).with_context(|| format!("Failed to read {}", path.display()))
}

/// Write typed rows with a header derived from the row type.
///
/// An empty slice is an error: the header comes from the first record.
pub fn write_rows_to<W: Write, T: Serialize>(sink: W, rows: &[T], label: &str) -> Result<()> {
    if rows.is_empty() {
        return Err(RatingError::EmptyOutput {
            path: label.to_string(),
        }
        .into());
    }

    let mut writer = csv::Writer::from_writer(sink);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write typed rows to a CSV file
pub fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let label = path.display().to_string();
    if rows.is_empty() {
        return Err(RatingError::EmptyOutput { path: label }.into());
    }

    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_rows_to(file, rows, &label)
}
