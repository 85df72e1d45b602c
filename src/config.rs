use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app_dirs::AppDirs;
use crate::language::{Difficulty, DEFAULT_CHALLENGE_COUNT};
use crate::practice::PracticeSettings;
use crate::timer::TICK_RATE_MS;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub difficulty: String,
    pub challenge_count: usize,
    pub tick_rate_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default().to_string(),
            challenge_count: DEFAULT_CHALLENGE_COUNT,
            tick_rate_ms: TICK_RATE_MS,
        }
    }
}

impl Config {
    /// Resolved practice settings; unknown tiers fall back to medium and a
    /// zero count to the default
    pub fn practice_settings(&self) -> PracticeSettings {
        let challenge_count = match self.challenge_count {
            0 => DEFAULT_CHALLENGE_COUNT,
            n => n,
        };
        PracticeSettings {
            difficulty: Difficulty::from_name(&self.difficulty),
            challenge_count,
            tick_interval: Duration::from_millis(self.tick_rate_ms.max(1)),
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let Ok(bytes) = fs::read(&self.path) else {
            return Config::default();
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("ignoring invalid config at {}: {e}", self.path.display());
                Config::default()
            }
        }
    }
}
