use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::hotkey::{parse_hotkey, Hotkey, HotkeyError, DEFAULT_HOTKEY};

pub const MIN_BLUR_CLOSE_DELAY_MS: u64 = 100;
pub const MAX_BLUR_CLOSE_DELAY_MS: u64 = 200;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("failed to encode config: {0}")]
    Encode(#[from] toml::ser::Error),
    #[error("invalid hotkey: {0}")]
    Hotkey(#[from] HotkeyError),
    #[error("blur_close_delay_ms must be between 100 and 200, got {0}")]
    BlurDelayOutOfRange(u64),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub hotkey: String,
    pub blur_close_delay_ms: u64,
    pub catalog_path: Option<PathBuf>,
    pub log_filter: String,
    #[serde(skip)]
    pub config_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hotkey: DEFAULT_HOTKEY.to_string(),
            blur_close_delay_ms: 150,
            catalog_path: None,
            log_filter: "info".to_string(),
            config_path: default_config_path(),
        }
    }
}

impl Config {
    pub fn blur_close_delay(&self) -> Duration {
        Duration::from_millis(self.blur_close_delay_ms)
    }

    pub fn parsed_hotkey(&self) -> Result<Hotkey, HotkeyError> {
        parse_hotkey(&self.hotkey)
    }
}

pub fn default_config_path() -> PathBuf {
    std::env::temp_dir().join("docpalette").join("config.toml")
}

pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if !(MIN_BLUR_CLOSE_DELAY_MS..=MAX_BLUR_CLOSE_DELAY_MS).contains(&cfg.blur_close_delay_ms) {
        return Err(ConfigError::BlurDelayOutOfRange(cfg.blur_close_delay_ms));
    }
    cfg.parsed_hotkey()?;
    Ok(())
}

/// Loads `path` (or the default location). A missing file yields defaults.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let config_path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !config_path.exists() {
        return Ok(Config {
            config_path,
            ..Config::default()
        });
    }

    let raw = std::fs::read_to_string(&config_path).map_err(|source| ConfigError::Read {
        path: config_path.clone(),
        source,
    })?;
    let mut cfg: Config = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: config_path.clone(),
        source,
    })?;
    cfg.config_path = config_path;
    validate(&cfg)?;
    Ok(cfg)
}

pub fn save(cfg: &Config) -> Result<(), ConfigError> {
    validate(cfg)?;
    let encoded = toml::to_string_pretty(cfg)?;
    if let Some(parent) = cfg.config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(&cfg.config_path, encoded).map_err(|source| ConfigError::Write {
        path: cfg.config_path.clone(),
        source,
    })
}
