//! Test fixtures: report files written into temporary directories

use std::path::PathBuf;
use tempfile::TempDir;

pub const DETAIL_HEADER: &str = "Series,MatchDate,HomeTeam,AwayTeam,HomePlayer1,HomePlayer2,AwayPlayer1,AwayPlayer2,HomeForfeit,AwayForfeit,HomePoints,AwayPoints";

pub const EXPORT_HEADER: &str = "Home Player 1,Home Player 2,Away Player 1,Away Player 2,Details,Match: Match date,Home Set 1,Home Set 2,Home Set 3,Away Set 1,Away Set 2,Away Set 3";

/// A temporary directory holding report files for one test
pub struct ReportDir {
    dir: TempDir,
}

impl ReportDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write a CSV file from a header and data lines
    pub fn write_csv(&self, name: &str, header: &str, lines: &[&str]) -> PathBuf {
        let path = self.path(name);
        let mut text = String::from(header);
        text.push('\n');
        for line in lines {
            text.push_str(line);
            text.push('\n');
        }
        std::fs::write(&path, text).expect("write fixture");
        path
    }

    pub fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.path(name)).expect("read output")
    }
}

/// One export row: home pair, away pair, clubs, date and three set scores
pub fn export_line(
    home: [&str; 2],
    away: [&str; 2],
    clubs: [&str; 2],
    date: &str,
    sets: [(u32, u32); 3],
) -> String {
    format!(
        "{},{},{},{},{}:0|{}:0,{},{},{},{},{},{},{}",
        home[0],
        home[1],
        away[0],
        away[1],
        clubs[0],
        clubs[1],
        date,
        sets[0].0,
        sets[1].0,
        sets[2].0,
        sets[0].1,
        sets[1].1,
        sets[2].1
    )
}
