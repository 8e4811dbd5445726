//! High score persistence
//!
//! The JSON file store keeps `{"high_score": N}` on disk. A missing file
//! reads as a high score of 0.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::game::{HighScoreStore, StoreError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: u32,
}

/// High score kept in a JSON file
#[derive(Debug, Clone)]
pub struct JsonHighScoreStore {
    path: PathBuf,
}

impl JsonHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonHighScoreStore {
    fn load_high_score(&mut self) -> Result<u32, StoreError> {
        if !self.path.exists() {
            return Ok(0);
        }
        let text = fs::read_to_string(&self.path)?;
        let record: HighScoreRecord = serde_json::from_str(&text)?;
        Ok(record.high_score)
    }

    fn save_high_score(&mut self, score: u32) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&HighScoreRecord { high_score: score })?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// High score that lasts only as long as the process
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryHighScoreStore {
    high_score: u32,
}

impl MemoryHighScoreStore {
    pub fn new(high_score: u32) -> Self {
        Self { high_score }
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load_high_score(&mut self) -> Result<u32, StoreError> {
        Ok(self.high_score)
    }

    fn save_high_score(&mut self, score: u32) -> Result<(), StoreError> {
        self.high_score = score;
        Ok(())
    }
}
