//! Level description supplied by the host at session start.
//!
//! The core never parses tilemap files. The host extracts the named object
//! markers and the destructible wall tiles and hands them over here.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::TILE_SIZE;
use crate::types::{Position, TileCoord};

#[derive(Debug, Error, PartialEq)]
pub enum LevelError {
    #[error("tile size must be positive, got {0}")]
    TileSize(f64),
    #[error("malformed tile key {0:?}, expected \"{{col}}x{{row}}\"")]
    BadTileKey(String),
}

/// Marker names the simulation understands.
pub mod marker_names {
    pub const SPAWN_POINT: &str = "spawnpoint";
    pub const TURRET: &str = "turret";
    pub const PLAYER: &str = "player";
    pub const STATION: &str = "station";
    pub const CAMERA_FOCUS: &str = "camerafocus";

    pub const ALL: [&str; 5] = [SPAWN_POINT, TURRET, PLAYER, STATION, CAMERA_FOCUS];
}

/// A named, positioned object from the level's object layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub name: String,
    pub x: f64,
    pub y: f64,
}

impl Marker {
    pub fn new(name: &str, x: f64, y: f64) -> Self {
        Self {
            name: name.to_string(),
            x,
            y,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    #[serde(default = "default_tile_size")]
    pub tile_size: f64,
    #[serde(default)]
    pub markers: Vec<Marker>,
    /// Destructible wall tiles present at session start.
    #[serde(default)]
    pub walls: Vec<TileCoord>,
}

fn default_tile_size() -> f64 {
    TILE_SIZE
}

impl Default for Level {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            markers: Vec::new(),
            walls: Vec::new(),
        }
    }
}

impl Level {
    pub fn validate(&self) -> Result<(), LevelError> {
        if self.tile_size > 0.0 {
            Ok(())
        } else {
            Err(LevelError::TileSize(self.tile_size))
        }
    }

    /// All markers with the given name, in authoring order.
    pub fn markers_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Marker> + 'a {
        self.markers.iter().filter(move |m| m.name == name)
    }

    /// First marker with the given name.
    pub fn find_marker(&self, name: &str) -> Option<&Marker> {
        self.markers.iter().find(|m| m.name == name)
    }

    /// Markers whose names the simulation does not recognize.
    pub fn unknown_markers(&self) -> impl Iterator<Item = &Marker> {
        self.markers
            .iter()
            .filter(|m| !marker_names::ALL.contains(&m.name.as_str()))
    }

    /// Parse wall tiles from canonical `"{col}x{row}"` keys.
    pub fn walls_from_keys<'a>(
        keys: impl IntoIterator<Item = &'a str>,
    ) -> Result<Vec<TileCoord>, LevelError> {
        keys.into_iter().map(str::parse).collect()
    }
}
