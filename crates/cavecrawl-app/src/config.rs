//! Level and rules files.
//!
//! Levels on disk name wall tiles by their canonical `"{col}x{row}"` key,
//! the same form the tile editor exports.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use cavecrawl_core::constants::TILE_SIZE;
use cavecrawl_core::level::{Level, Marker};
use cavecrawl_core::rules::GameRules;

/// On-disk level layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelFile {
    #[serde(default = "default_tile_size")]
    pub tile_size: f64,
    #[serde(default)]
    pub markers: Vec<Marker>,
    /// Destructible wall tiles as `"{col}x{row}"` keys.
    #[serde(default)]
    pub walls: Vec<String>,
}

fn default_tile_size() -> f64 {
    TILE_SIZE
}

impl LevelFile {
    pub fn into_level(self) -> Result<Level> {
        let walls = Level::walls_from_keys(self.walls.iter().map(String::as_str))
            .context("parsing wall tiles")?;
        Ok(Level {
            tile_size: self.tile_size,
            markers: self.markers,
            walls,
        })
    }
}

pub fn parse_level(json: &str) -> Result<Level> {
    let file: LevelFile = serde_json::from_str(json).context("level is not valid JSON")?;
    file.into_level()
}

/// Rules documents may be partial; missing fields keep their defaults.
pub fn parse_rules(json: &str) -> Result<GameRules> {
    serde_json::from_str(json).context("rules are not valid JSON")
}

pub fn load_level(path: &Path) -> Result<Level> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading level {}", path.display()))?;
    parse_level(&json).with_context(|| format!("loading level {}", path.display()))
}

pub fn load_rules(path: &Path) -> Result<GameRules> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading rules {}", path.display()))?;
    parse_rules(&json).with_context(|| format!("loading rules {}", path.display()))
}
