//! Configuration file loading for self-play matches.

use std::path::Path;

use chess_core::Color;
use chess_search::SearchConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// One self-play match: a search setup per side, a ply limit and an
/// optional starting position.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SelfplayConfig {
    #[serde(default)]
    pub white: SearchConfig,
    #[serde(default)]
    pub black: SearchConfig,
    /// The match is abandoned as a draw after this many plies.
    #[serde(default = "default_max_plies")]
    pub max_plies: usize,
    #[serde(default)]
    pub start_fen: Option<String>,
}

fn default_max_plies() -> usize {
    200
}

impl Default for SelfplayConfig {
    fn default() -> Self {
        Self {
            white: SearchConfig::default(),
            black: SearchConfig::default(),
            max_plies: default_max_plies(),
            start_fen: None,
        }
    }
}

impl SelfplayConfig {
    /// Reads the file at `path`, falling back to defaults when it does not
    /// exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn side(&self, color: Color) -> &SearchConfig {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    pub fn side_mut(&mut self, color: Color) -> &mut SearchConfig {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }
}
