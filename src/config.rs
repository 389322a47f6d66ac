use crate::voice_commands::{CatalogError, ACCEPT_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub voice: VoiceConfig,
    /// Voice command → action token, in declaration order
    #[serde(default)]
    pub voice_commands: Vec<VoiceCommandEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VoiceConfig {
    /// Acceptance threshold, a match must score strictly above it
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Collapse repeated whitespace inside transcripts
    #[serde(default = "default_collapse_whitespace")]
    pub collapse_whitespace: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VoiceCommandEntry {
    pub phrase: String,
    /// e.g. "navigate:contact"
    pub action: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid voice commands: {0}")]
    Catalog(#[from] CatalogError),

    #[error("threshold {0} is outside [0, 1]")]
    Threshold(f64),
}

fn default_threshold() -> f64 {
    ACCEPT_THRESHOLD
}
fn default_collapse_whitespace() -> bool {
    true
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            collapse_whitespace: default_collapse_whitespace(),
        }
    }
}

impl AppConfig {
    /// Check settings that serde cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.voice.threshold) {
            return Err(ConfigError::Threshold(self.voice.threshold));
        }
        Ok(())
    }
}

/// Config file path
pub fn config_path() -> PathBuf {
    let config_dir = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("portfolio-voice");
    config_dir.join("config.toml")
}

/// Load the config, writing the default one if the file is missing
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AppConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    } else {
        log::info!("no config at {}, writing defaults", path.display());
        let config = default_config();
        save_config_to(&config, path)?;
        Ok(config)
    }
}

pub fn save_config(config: &AppConfig) -> Result<(), ConfigError> {
    save_config_to(config, &config_path())
}

pub fn save_config_to(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Built-in portfolio commands
pub fn default_config() -> AppConfig {
    let commands = [
        ("go to home", "navigate:home"),
        ("go home", "navigate:home"),
        ("go to about", "navigate:about"),
        ("about me", "navigate:about"),
        ("show skills", "navigate:skills"),
        ("show projects", "navigate:projects"),
        ("show experience", "navigate:experience"),
        ("go to contact", "navigate:contact"),
        ("contact me", "navigate:contact"),
        ("scroll to top", "scroll:top"),
        ("scroll to bottom", "scroll:bottom"),
        ("toggle theme", "theme:toggle"),
        ("dark mode", "theme:toggle"),
        ("light mode", "theme:toggle"),
        ("download resume", "resume:download"),
        ("help", "voice:help"),
        ("stop listening", "voice:stop"),
    ];

    AppConfig {
        voice: VoiceConfig::default(),
        voice_commands: commands
            .into_iter()
            .map(|(phrase, action)| VoiceCommandEntry {
                phrase: phrase.to_string(),
                action: action.to_string(),
            })
            .collect(),
    }
}
