//! High score leaderboard
//!
//! Persisted as a plain-text file: at most five lines, one integer score per
//! line, best first. Missing lines read as zero.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of scores kept
pub const MAX_HIGH_SCORES: usize = 5;

/// Display titles for the score table
pub const TITLE: &str = "High Scores";
pub const BROKEN_TITLE: &str = "High Scores (Broken)";

#[derive(Debug, Error)]
pub enum HighScoreError {
    #[error("high score file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line} is not a score: {value:?}")]
    Corrupt { line: usize, value: String },
}

/// Top-five scores, sorted descending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HighScores {
    pub entries: [i64; MAX_HIGH_SCORES],
}

impl HighScores {
    /// Five zero entries
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: [i64; MAX_HIGH_SCORES]) -> Self {
        Self { entries }
    }

    /// Insert a score at the first slot it beats, shifting the rest down.
    /// Returns the rank achieved (1-indexed) or None if it beats nothing.
    pub fn insert(&mut self, score: i64) -> Option<usize> {
        let pos = self.entries.iter().position(|&e| score > e)?;
        self.entries[pos..].rotate_right(1);
        self.entries[pos] = score;
        Some(pos + 1)
    }

    /// Whether a score would make the table
    pub fn qualifies(&self, score: i64) -> bool {
        self.entries.iter().any(|&e| score > e)
    }

    pub fn top_score(&self) -> i64 {
        self.entries[0]
    }

    /// Parse the file format. Lines past the fifth are ignored.
    pub fn parse(text: &str) -> Result<Self, HighScoreError> {
        let mut scores = Self::new();
        for (i, line) in text.lines().take(MAX_HIGH_SCORES).enumerate() {
            let value = line.trim();
            scores.entries[i] = value.parse().map_err(|_| HighScoreError::Corrupt {
                line: i + 1,
                value: value.to_string(),
            })?;
        }
        Ok(scores)
    }

    /// Render the file format
    pub fn format(&self) -> String {
        self.entries.iter().map(|e| format!("{e}\n")).collect()
    }

    /// Read scores from disk. A missing or corrupt file reads as five zeros;
    /// any other I/O failure is returned.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, HighScoreError> {
        let path = path.as_ref();
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No high scores at {}, starting fresh", path.display());
                return Ok(Self::new());
            }
            Err(e) => return Err(e.into()),
        };

        match Self::parse(&text) {
            Ok(scores) => {
                log::info!("Loaded high scores from {}", path.display());
                Ok(scores)
            }
            Err(e) => {
                log::warn!("Resetting corrupt high scores at {}: {}", path.display(), e);
                Ok(Self::new())
            }
        }
    }

    /// Overwrite the score file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), HighScoreError> {
        std::fs::write(path, self.format())?;
        log::info!("High scores saved");
        Ok(())
    }
}

/// Score table as shown on the high-score and game-over screens
///
/// File failures never escape: the board keeps its last known scores and
/// switches to the broken title.
#[derive(Debug, Clone)]
pub struct HighScoreBoard {
    path: PathBuf,
    scores: HighScores,
    broken: bool,
}

impl HighScoreBoard {
    /// Open the board and read the current file
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let mut board = Self {
            path: path.into(),
            scores: HighScores::new(),
            broken: false,
        };
        board.refresh();
        board
    }

    /// Re-read the file for display
    pub fn refresh(&mut self) {
        match HighScores::load(&self.path) {
            Ok(scores) => {
                self.scores = scores;
                self.broken = false;
            }
            Err(e) => {
                log::warn!("High scores unavailable: {}", e);
                self.broken = true;
            }
        }
    }

    /// Merge a finished session's score into the file.
    /// Returns the rank achieved, if any.
    pub fn record(&mut self, score: i64) -> Option<usize> {
        let mut scores = match HighScores::load(&self.path) {
            Ok(scores) => scores,
            Err(e) => {
                // Leave an unreadable file untouched
                log::warn!("Not recording score {}: {}", score, e);
                self.broken = true;
                return None;
            }
        };

        let rank = scores.insert(score);
        self.scores = scores;
        if let Err(e) = scores.save(&self.path) {
            log::warn!("Failed to save high scores: {}", e);
            self.broken = true;
        } else if let Some(rank) = rank {
            log::info!("New high score {} at rank {}", score, rank);
        }
        rank
    }

    pub fn scores(&self) -> &HighScores {
        &self.scores
    }

    pub fn is_broken(&self) -> bool {
        self.broken
    }

    pub fn title(&self) -> &'static str {
        if self.broken { BROKEN_TITLE } else { TITLE }
    }

    /// Title followed by the five scores
    pub fn lines(&self) -> Vec<String> {
        std::iter::once(self.title().to_string())
            .chain(self.scores.entries.iter().map(|e| e.to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_shifts_and_drops_lowest() {
        let mut scores = HighScores::from_entries([500, 400, 300, 200, 100]);
        assert_eq!(scores.insert(350), Some(3));
        assert_eq!(scores.entries, [500, 400, 350, 300, 200]);
    }

    #[test]
    fn test_insert_top_and_miss() {
        let mut scores = HighScores::from_entries([500, 400, 300, 200, 100]);
        assert_eq!(scores.insert(900), Some(1));
        assert_eq!(scores.entries, [900, 500, 400, 300, 200]);

        // Ties do not displace
        assert_eq!(scores.insert(200), None);
        assert_eq!(scores.entries, [900, 500, 400, 300, 200]);
    }

    #[test]
    fn test_negative_score_does_not_qualify_over_zeros() {
        let mut scores = HighScores::new();
        assert!(!scores.qualifies(-300));
        assert_eq!(scores.insert(-300), None);
        assert_eq!(scores.entries, [0; MAX_HIGH_SCORES]);
    }

    #[test]
    fn test_parse_pads_short_files() {
        let scores = HighScores::parse("700\n  300 \n").unwrap();
        assert_eq!(scores.entries, [700, 300, 0, 0, 0]);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = HighScores::parse("100\nabc\n").unwrap_err();
        assert!(matches!(err, HighScoreError::Corrupt { line: 2, .. }));
    }

    #[test]
    fn test_file_round_trip_then_insert() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("HighScores.txt");

        HighScores::from_entries([500, 400, 300, 200, 100])
            .save(&path)
            .unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "500\n400\n300\n200\n100\n"
        );

        let mut board = HighScoreBoard::open(&path);
        assert_eq!(board.record(350), Some(3));
        assert_eq!(
            HighScores::load(&path).unwrap().entries,
            [500, 400, 350, 300, 200]
        );
        assert_eq!(board.lines()[0], TITLE);
        assert_eq!(board.lines()[3], "350");
    }

    #[test]
    fn test_missing_and_corrupt_files_read_as_zeros() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("none.txt");
        assert_eq!(HighScores::load(&missing).unwrap(), HighScores::new());

        let corrupt = dir.path().join("corrupt.txt");
        std::fs::write(&corrupt, "lots\n").unwrap();
        assert_eq!(HighScores::load(&corrupt).unwrap(), HighScores::new());
    }

    #[test]
    fn test_unreadable_path_marks_board_broken() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be read as a score file
        let mut board = HighScoreBoard::open(dir.path());
        assert!(board.is_broken());
        assert_eq!(board.title(), BROKEN_TITLE);
        assert_eq!(board.record(1000), None);
        assert_eq!(board.lines().len(), MAX_HIGH_SCORES + 1);
    }
}
