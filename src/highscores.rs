//! High score persistence
//!
//! The game keeps a single best score. The simulation only reads it at startup
//! and reports when it has been beaten; storing it is up to a `ScoreStore`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures writing settings or scores to disk
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Somewhere the best score lives between runs
pub trait ScoreStore {
    /// Best score so far (0 if none has been recorded)
    fn load(&self) -> u64;
    /// Record a new best score
    fn save(&mut self, score: u64) -> Result<(), StoreError>;

    /// Save `score` if it beats what is stored; returns true if it did
    fn submit(&mut self, score: u64) -> Result<bool, StoreError> {
        if score > self.load() {
            self.save(score)?;
            return Ok(true);
        }
        Ok(false)
    }
}

/// In-memory store, for tests and for runs that should not touch disk
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    best: u64,
}

impl MemoryScoreStore {
    pub fn new(best: u64) -> Self {
        Self { best }
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> u64 {
        self.best
    }

    fn save(&mut self, score: u64) -> Result<(), StoreError> {
        self.best = score;
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ScoreFile {
    best: u64,
}

/// JSON file store (`{"best": 12345}`)
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&self) -> u64 {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(_) => {
                log::info!("No high score found, starting fresh");
                return 0;
            }
        };
        match serde_json::from_str::<ScoreFile>(&json) {
            Ok(file) => {
                log::info!("Loaded high score {}", file.best);
                file.best
            }
            Err(e) => {
                log::warn!("Ignoring corrupt high score file {}: {}", self.path.display(), e);
                0
            }
        }
    }

    fn save(&mut self, score: u64) -> Result<(), StoreError> {
        let json = serde_json::to_string(&ScoreFile { best: score })?;
        std::fs::write(&self.path, json)?;
        log::info!("High score saved ({})", score);
        Ok(())
    }
}
