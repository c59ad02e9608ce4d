use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;
use crate::game::GameSettings;
use crate::language::remote::{DEFAULT_HEALTH_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS};
use crate::language::{Difficulty, Language};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub language: Language,
    pub difficulty: Difficulty,
    pub use_remote: bool,
    pub api_url: Option<String>,
    pub model: Option<String>,
    pub request_timeout_secs: u64,
    pub health_timeout_secs: u64,
    pub lexicon_dir: Option<PathBuf>,
    pub record_history: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: Language::English,
            difficulty: Difficulty::Easy,
            use_remote: false,
            api_url: None,
            model: None,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            health_timeout_secs: DEFAULT_HEALTH_TIMEOUT_SECS,
            lexicon_dir: None,
            record_history: true,
        }
    }
}

impl Config {
    pub fn settings(&self) -> GameSettings {
        GameSettings {
            language: self.language,
            difficulty: self.difficulty,
            use_remote: self.use_remote && self.api_url.is_some(),
        }
    }

    /// Keep the settings the player last started a round with
    pub fn remember(&mut self, settings: &GameSettings) {
        self.language = settings.language;
        self.difficulty = settings.difficulty;
        self.use_remote = settings.use_remote;
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
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = AppDirs::config_path().unwrap_or_else(|| PathBuf::from("wordclass_config.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
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
            if let Ok(cfg) = serde_json::from_slice::<Config>(&bytes) {
                return cfg;
            }
        }
        Config::default()
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).unwrap_or_default();
        fs::write(&self.path, data)
    }
}
