use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "keystreak";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    fn project() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", APP_NAME)
    }

    pub fn config_path() -> PathBuf {
        Self::project()
            .map(|pd| pd.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("keystreak_config.json"))
    }

    pub fn high_score_path() -> PathBuf {
        Self::project()
            .map(|pd| pd.data_local_dir().join("high_score.json"))
            .unwrap_or_else(|| PathBuf::from("keystreak_high_score.json"))
    }

    /// Log file under the state dir when the platform has one
    pub fn log_path() -> PathBuf {
        Self::project()
            .map(|pd| {
                pd.state_dir()
                    .unwrap_or_else(|| pd.data_local_dir())
                    .join("keystreak.log")
            })
            .unwrap_or_else(|| PathBuf::from("keystreak.log"))
    }
}
