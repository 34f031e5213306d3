use directories::ProjectDirs;
use std::path::PathBuf;

const STATS_FILE_NAME: &str = ".pomodoro_stats.json";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// Session history lives directly in the home directory so existing
    /// history files are picked up unchanged.
    pub fn stats_path() -> PathBuf {
        if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home).join(STATS_FILE_NAME)
        } else if let Some(dirs) = directories::BaseDirs::new() {
            dirs.home_dir().join(STATS_FILE_NAME)
        } else {
            PathBuf::from(STATS_FILE_NAME)
        }
    }

    pub fn config_path() -> PathBuf {
        match Self::project_dirs() {
            Some(pd) => pd.config_dir().join("config.json"),
            None => PathBuf::from("cosmodoro_config.json"),
        }
    }

    pub fn log_path() -> PathBuf {
        if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("cosmodoro")
                .join("cosmodoro.log")
        } else if let Some(pd) = Self::project_dirs() {
            pd.data_local_dir().join("cosmodoro.log")
        } else {
            PathBuf::from("cosmodoro.log")
        }
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "cosmodoro")
    }
}
