use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::APP_DIR_NAME;
use crate::error::StoreError;

const SCORE_FILE_NAME: &str = "scores.json";

/// Single-value store for the best score across sessions.
pub trait HighScoreStore {
    /// Reads the persisted high score. A store that was never written reads as 0.
    fn get(&self) -> Result<u32, StoreError>;

    /// Replaces the persisted high score.
    fn set(&mut self, score: u32) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ScoreFile {
    high_score: u32,
}

/// Returns the platform data directory used for all persisted files.
#[must_use]
pub fn default_data_dir() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base
}

/// High score kept in `scores.json`.
#[derive(Debug, Clone)]
pub struct JsonHighScoreStore {
    path: PathBuf,
}

impl JsonHighScoreStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store rooted in `data_dir`.
    #[must_use]
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(SCORE_FILE_NAME))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonHighScoreStore {
    fn get(&self) -> Result<u32, StoreError> {
        load_high_score_from_path(&self.path)
    }

    fn set(&mut self, score: u32) -> Result<(), StoreError> {
        save_high_score_to_path(&self.path, score)
    }
}

fn load_high_score_from_path(path: &Path) -> Result<u32, StoreError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(StoreError::io(path, e)),
    };

    serde_json::from_str::<ScoreFile>(&raw)
        .map(|file| file.high_score)
        .map_err(|e| StoreError::parse(path, e))
}

fn save_high_score_to_path(path: &Path, score: u32) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
    }

    let payload = ScoreFile { high_score: score };
    let json = serde_json::to_string_pretty(&payload).map_err(|e| StoreError::parse(path, e))?;

    fs::write(path, json).map_err(|e| StoreError::io(path, e))
}

/// In-memory store that records every write.
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScoreStore {
    value: u32,
    writes: Vec<u32>,
}

impl MemoryHighScoreStore {
    #[must_use]
    pub fn with_value(value: u32) -> Self {
        Self {
            value,
            writes: Vec::new(),
        }
    }

    /// Values passed to `set`, oldest first.
    #[must_use]
    pub fn writes(&self) -> &[u32] {
        &self.writes
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn get(&self) -> Result<u32, StoreError> {
        Ok(self.value)
    }

    fn set(&mut self, score: u32) -> Result<(), StoreError> {
        self.value = score;
        self.writes.push(score);
        Ok(())
    }
}
