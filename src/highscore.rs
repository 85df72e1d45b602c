use std::fs;
use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::app_dirs::AppDirs;
use crate::error::Result;

/// Best-effort storage for the arcade high score. Implementations swallow
/// their own failures: a lost high score never interrupts a game.
pub trait HighScoreStore {
    fn read(&self) -> Option<u32>;
    fn write(&self, score: u32);
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct HighScoreRecord {
    high_score: u32,
}

#[derive(Debug, Clone)]
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::high_score_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    fn try_read(&self) -> Result<Option<u32>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&self.path)?;
        let record: HighScoreRecord = serde_json::from_slice(&bytes)?;
        Ok(Some(record.high_score))
    }

    fn try_write(&self, score: u32) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(&HighScoreRecord { high_score: score })?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

impl Default for FileHighScoreStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn read(&self) -> Option<u32> {
        self.try_read().unwrap_or_else(|e| {
            warn!("ignoring unreadable high score at {}: {e}", self.path.display());
            None
        })
    }

    fn write(&self, score: u32) {
        if let Err(e) = self.try_write(score) {
            warn!("could not save high score to {}: {e}", self.path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_reads_none() {
        let dir = tempdir().unwrap();
        let store = FileHighScoreStore::with_path(dir.path().join("high_score.json"));
        assert_eq!(store.read(), None);
    }

    #[test]
    fn write_then_read() {
        let dir = tempdir().unwrap();
        let store = FileHighScoreStore::with_path(dir.path().join("nested/high_score.json"));

        store.write(120);
        assert_eq!(store.read(), Some(120));

        store.write(135);
        assert_eq!(store.read(), Some(135));
    }

    #[test]
    fn corrupt_file_reads_none() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("high_score.json");
        fs::write(&path, "not json").unwrap();

        let store = FileHighScoreStore::with_path(&path);
        assert_eq!(store.read(), None);
    }

    #[test]
    fn unwritable_path_is_ignored() {
        let dir = tempdir().unwrap();
        // a directory where the file should be makes the write fail
        let path = dir.path().join("high_score.json");
        fs::create_dir_all(&path).unwrap();

        let store = FileHighScoreStore::with_path(&path);
        store.write(10);
        assert_eq!(store.read(), None);
    }
}
