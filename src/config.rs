use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;
use crate::theme::Background;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Pace used to turn elapsed minutes into meters.
    pub meters_per_minute: f64,
    pub tick_rate_ms: u64,
    pub checkpoint_secs: u64,
    pub background: Background,
    pub notifications: bool,
    pub stats_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            meters_per_minute: 10.0,
            tick_rate_ms: crate::TICK_RATE_MS,
            checkpoint_secs: crate::timer::CHECKPOINT_SECS,
            background: Background::DeepSpace,
            notifications: true,
            stats_file: None,
        }
    }
}

impl Config {
    pub fn stats_path(&self) -> PathBuf {
        self.stats_file.clone().unwrap_or_else(AppDirs::stats_path)
    }

    /// Guards against hand-edited files with zero or negative pacing values.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.meters_per_minute.is_finite() && self.meters_per_minute > 0.0) {
            self.meters_per_minute = defaults.meters_per_minute;
        }
        if self.tick_rate_ms == 0 {
            self.tick_rate_ms = defaults.tick_rate_ms;
        }
        if self.checkpoint_secs == 0 {
            self.checkpoint_secs = defaults.checkpoint_secs;
        }
        self
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
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
        if let Ok(bytes) = fs::read(&self.path) {
            match serde_json::from_slice::<Config>(&bytes) {
                Ok(cfg) => return cfg.sanitized(),
                Err(e) => log::warn!("ignoring unreadable config {}: {e}", self.path.display()),
            }
        }
        Config::default()
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}
