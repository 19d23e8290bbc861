//! Persistent quiz state: score history and learned-question tracking.
//!
//! Everything in here is best effort. Stored files are uncontrolled input
//! (hand-edited, half-written, or from older versions), so unreadable history
//! loads as empty and write failures are reported to the caller to log, never
//! to abort a running quiz.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Local;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::models::Question;

const SCORE_HISTORY_FILE: &str = "score_history.json";
const ASKED_QUESTIONS_FILE: &str = "asked_questions.json";
const CORRECT_QUESTIONS_FILE: &str = "correct_questions.json";

/// How many attempts the history screen shows.
pub const HISTORY_DISPLAY_LIMIT: usize = 10;

/// One completed quiz attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub date: String,
    pub correct: usize,
    pub total: usize,
    /// Percent score, truncated.
    pub score: u32,
}

impl ScoreEntry {
    pub fn now(correct: usize, total: usize) -> Self {
        let score = if total > 0 {
            (correct * 100 / total) as u32
        } else {
            0
        };
        Self {
            date: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            correct,
            total,
            score,
        }
    }
}

/// Error writing persistent state.
#[derive(Debug)]
pub enum StorageError {
    Io(io::Error),
    Serialize(serde_json::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "storage io error: {}", e),
            StorageError::Serialize(e) => write!(f, "storage serialization error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            StorageError::Serialize(e) => Some(e),
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(err: io::Error) -> Self {
        StorageError::Io(err)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialize(err)
    }
}

/// App data directory and the files inside it.
#[derive(Debug, Clone)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    fn path(&self, filename: &str) -> PathBuf {
        self.root.join(filename)
    }

    fn write_json<T: Serialize>(&self, filename: &str, data: &T) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root)?;
        let json = serde_json::to_string_pretty(data)?;
        fs::write(self.path(filename), json)?;
        Ok(())
    }

    /// Load score history, dropping entries from attempts with no questions.
    ///
    /// A missing or unreadable file is an empty history.
    pub fn load_score_history(&self) -> Vec<ScoreEntry> {
        load_json_or_default::<Vec<ScoreEntry>>(&self.path(SCORE_HISTORY_FILE))
            .into_iter()
            .filter(|entry| entry.total > 0)
            .collect()
    }

    /// Append a completed attempt to the score history.
    pub fn append_score(&self, entry: ScoreEntry) -> Result<(), StorageError> {
        let mut history = self.load_score_history();
        history.push(entry);
        self.write_json(SCORE_HISTORY_FILE, &history)
    }

    /// Most recent attempts, newest first.
    pub fn recent_attempts(&self) -> Vec<ScoreEntry> {
        let history = self.load_score_history();
        history
            .into_iter()
            .rev()
            .take(HISTORY_DISPLAY_LIMIT)
            .collect()
    }

    /// Snapshot the questions asked so far in the current session.
    pub fn save_asked_questions(&self, asked: &[Question]) -> Result<(), StorageError> {
        self.write_json(ASKED_QUESTIONS_FILE, &asked)
    }

    /// Delete the learned-question tracking files.
    ///
    /// Returns the names of the files actually removed; a file that cannot
    /// be removed is logged and skipped.
    pub fn reset_learned_questions(&self) -> Vec<String> {
        let mut removed = Vec::new();
        for filename in [CORRECT_QUESTIONS_FILE, ASKED_QUESTIONS_FILE] {
            let path = self.path(filename);
            if path.exists() {
                match fs::remove_file(&path) {
                    Ok(()) => removed.push(filename.to_string()),
                    Err(e) => warn!("could not remove {}: {}", filename, e),
                }
            }
        }
        removed
    }
}

fn load_json_or_default<T: Default + for<'de> Deserialize<'de>>(path: &Path) -> T {
    match fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
        Err(_) => T::default(),
    }
}
