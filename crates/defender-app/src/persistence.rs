//! JSON file store for the high-score list.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use defender_core::highscores::{HighScoreError, HighScoreStore, ScoreEntry};

/// On-disk shape of the high-score file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct HighScoreFile {
    scores: Vec<ScoreEntry>,
}

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonFileStore {
    /// A missing file is an empty list, not an error.
    fn load(&self) -> Result<Vec<ScoreEntry>, HighScoreError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let file: HighScoreFile = serde_json::from_str(&json)?;
        Ok(file.scores)
    }

    fn save(&self, entries: &[ScoreEntry]) -> Result<(), HighScoreError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let file = HighScoreFile {
            scores: entries.to_vec(),
        };
        fs::write(&self.path, serde_json::to_string_pretty(&file)?)?;
        Ok(())
    }
}

/// Load the list, treating any failure as an empty table.
pub fn load_or_empty(store: &impl HighScoreStore) -> Vec<ScoreEntry> {
    store.load().unwrap_or_else(|e| {
        warn!(error = %e, "could not load high scores; starting with an empty table");
        Vec::new()
    })
}
