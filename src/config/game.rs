use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// User-facing configuration for a game
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub grid_width: u32,
    pub grid_height: u32,
    /// Points awarded for each solved word
    pub points_per_word: u32,
    /// Endpoint serving the clue list
    pub clue_url: String,
    /// Value of the `action` query parameter sent to `clue_url`
    pub clue_action: String,
    /// Local JSON clue list; takes precedence over `clue_url` when set
    pub clue_file: Option<PathBuf>,
    pub request_timeout_secs: u64,
    /// TTF/OTF font used for letters in rendered PNG boards
    pub font_path: Option<PathBuf>,
}

impl GameConfig {
    pub const DEFAULT_GRID_SIZE: u32 = 15;
    pub const DEFAULT_POINTS_PER_WORD: u32 = 10;
    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
    pub const DEFAULT_CLUE_ACTION: &'static str = "getClues";
    pub const MAX_GRID_SIZE: u32 = 100;

    /// Reads a TOML file; missing keys keep their defaults
    ///
    /// The file is only parsed here. It may be partial and leave the clue
    /// source to command-line overrides, so callers run `validate` once every
    /// layer has been applied.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let valid_size = 1..=Self::MAX_GRID_SIZE;
        if !valid_size.contains(&self.grid_width) || !valid_size.contains(&self.grid_height) {
            return Err(ConfigError::InvalidGridSize {
                width: self.grid_width,
                height: self.grid_height,
                max: Self::MAX_GRID_SIZE,
            });
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid("request_timeout_secs must be at least 1".into()));
        }

        if self.clue_file.is_none() && self.clue_url.trim().is_empty() {
            return Err(ConfigError::Invalid("either clue_url or clue_file must be set".into()));
        }

        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: Self::DEFAULT_GRID_SIZE,
            grid_height: Self::DEFAULT_GRID_SIZE,
            points_per_word: Self::DEFAULT_POINTS_PER_WORD,
            clue_url: String::new(),
            clue_action: Self::DEFAULT_CLUE_ACTION.to_string(),
            clue_file: None,
            request_timeout_secs: Self::DEFAULT_TIMEOUT_SECS,
            font_path: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("grid size {width}x{height} must be between 1 and {max} on each side")]
    InvalidGridSize { width: u32, height: u32, max: u32 },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
