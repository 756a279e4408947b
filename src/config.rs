use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Deepest ply limit accepted by the searcher.
pub const MAX_DEPTH: u32 = 9;

/// Difficulty tiers offered by the driver, each mapped to a ply depth.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
    Master,
}

impl Difficulty {
    pub fn depth(self) -> u32 {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 3,
            Difficulty::Hard => 5,
            Difficulty::Expert => 7,
            Difficulty::Master => MAX_DEPTH,
        }
    }

    /// Tier picked from a menu number (1 = easy).
    pub fn from_menu(choice: u32) -> Option<Self> {
        match choice {
            1 => Some(Difficulty::Easy),
            2 => Some(Difficulty::Medium),
            3 => Some(Difficulty::Hard),
            4 => Some(Difficulty::Expert),
            5 => Some(Difficulty::Master),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Ply limit of every root search.
    pub depth: u32,
    /// Probe and fill the transposition table.
    pub use_tt: bool,
    /// Reorder generated moves before iterating them.
    pub order_moves: bool,
}

impl Default for SearchConfig {
    fn default() -> Self { Self { depth: Difficulty::Medium.depth(), use_tt: true, order_moves: true } }
}

impl SearchConfig {
    pub fn for_difficulty(difficulty: Difficulty) -> Self { Self { depth: difficulty.depth(), ..Self::default() } }

    pub fn with_depth(depth: u32) -> Self { Self { depth, ..Self::default() } }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depth == 0 || self.depth > MAX_DEPTH {
            return Err(ConfigError::DepthOutOfRange { depth: self.depth, max: MAX_DEPTH });
        }
        Ok(())
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: SearchConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
