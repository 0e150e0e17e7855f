//! Final standings: ordering, the ratings file and the console table

use crate::error::Result;
use crate::rating::PlayerRegistry;
use crate::records::{self, RatingRow};
use std::cmp::Ordering;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Players ordered by club, then by rating from highest to lowest.
///
/// The sort is stable, so players tied on both keys keep registration order.
pub fn standings(registry: &PlayerRegistry) -> Vec<RatingRow> {
    let mut rows: Vec<RatingRow> = registry.iter().map(RatingRow::from).collect();
    rows.sort_by(compare_standings);
    rows
}

fn compare_standings(a: &RatingRow, b: &RatingRow) -> Ordering {
    a.club
        .cmp(&b.club)
        .then_with(|| b.rating.total_cmp(&a.rating))
}

/// Write the standings as a `club,name,rating,sigma` CSV file
pub fn write_ratings_file(path: &Path, standings: &[RatingRow]) -> Result<()> {
    records::write_rows(path, standings)?;
    info!("Wrote {} records to {}", standings.len(), path.display());
    Ok(())
}

/// Where the final standings go; a run produces exactly one of these
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    /// Write every player to a ratings CSV file
    File(PathBuf),
    /// Print one club's table to the console
    Display(String),
}

impl OutputMode {
    /// Display mode when a club is given, otherwise the ratings file
    pub fn select(display: Option<String>, ratings_file: PathBuf) -> Self {
        match display {
            Some(club) => OutputMode::Display(club),
            None => OutputMode::File(ratings_file),
        }
    }
}

/// Emit the standings in the selected mode. Display output goes to `console`.
pub fn emit<W: Write>(
    standings: &[RatingRow],
    mode: &OutputMode,
    console: &mut W,
) -> Result<()> {
    match mode {
        OutputMode::File(path) => write_ratings_file(path, standings),
        OutputMode::Display(club) => {
            console.write_all(render_club_table(standings, club).as_bytes())?;
            console.flush()?;
            Ok(())
        }
    }
}

/// Render one club's standings as a plain text table
pub fn render_club_table(standings: &[RatingRow], club: &str) -> String {
    const HEADERS: [&str; 3] = ["Name", "Rating", "Sigma"];

    let rows: Vec<[String; 3]> = standings
        .iter()
        .filter(|row| row.club == club)
        .map(|row| {
            [
                row.name.clone(),
                format!("{:.4}", row.rating),
                format!("{:.4}", row.sigma),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    out.push_str(&format_line(&HEADERS.map(str::to_string), &widths));
    out.push_str(&format_line(&widths.map(|w| "-".repeat(w)), &widths));
    for row in &rows {
        out.push_str(&format_line(row, &widths));
    }
    out
}

fn format_line(cells: &[String; 3], widths: &[usize; 3]) -> String {
    let line = format!(
        "{:<name$}  {:>rating$}  {:>sigma$}",
        cells[0],
        cells[1],
        cells[2],
        name = widths[0],
        rating = widths[1],
        sigma = widths[2]
    );
    format!("{}\n", line.trim_end())
}
