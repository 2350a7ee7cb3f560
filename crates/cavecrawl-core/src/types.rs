//! Fundamental geometric and simulation types.

use std::fmt;
use std::str::FromStr;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::{HEALTH_MAX, HEALTH_MIN};
use crate::level::LevelError;

/// 2D position in world space (pixels).
/// x grows to the right (the crawler's direction of travel), y grows downward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// 2D velocity in world space (pixels per second).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn as_dvec2(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn from_dvec2(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }

    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        self.as_dvec2().distance(other.as_dvec2())
    }

    /// Angle toward another position in radians (atan2, screen coordinates).
    pub fn angle_to(&self, other: &Position) -> f64 {
        let d = other.as_dvec2() - self.as_dvec2();
        d.y.atan2(d.x)
    }

    /// Offset by a delta.
    pub fn offset(&self, dx: f64, dy: f64) -> Position {
        Position::new(self.x + dx, self.y + dy)
    }

    /// Tile containing this position.
    pub fn tile(&self, tile_size: f64) -> TileCoord {
        TileCoord::new(
            (self.x / tile_size).floor() as i32,
            (self.y / tile_size).floor() as i32,
        )
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn as_dvec2(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Velocity of magnitude `speed` pointing from `from` toward `to`.
    /// Zero if the two points coincide.
    pub fn toward(from: &Position, to: &Position, speed: f64) -> Self {
        let dir = (to.as_dvec2() - from.as_dvec2()).normalize_or_zero();
        let v = dir * speed;
        Self { x: v.x, y: v.y }
    }

    /// Speed magnitude.
    pub fn speed(&self) -> f64 {
        self.as_dvec2().length()
    }
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// One destructible terrain cell, addressed by column and row.
///
/// Ordering is row-major (row first, then column) so that sorted
/// collections iterate top-to-bottom, left-to-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub col: i32,
    pub row: i32,
}

impl TileCoord {
    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Euclidean distance in tile units.
    pub fn distance_to(&self, other: &TileCoord) -> f64 {
        let dc = f64::from(other.col - self.col);
        let dr = f64::from(other.row - self.row);
        (dc * dc + dr * dr).sqrt()
    }

    /// World-space center of the tile.
    pub fn center(&self, tile_size: f64) -> Position {
        Position::new(
            (f64::from(self.col) + 0.5) * tile_size,
            (f64::from(self.row) + 0.5) * tile_size,
        )
    }
}

impl Ord for TileCoord {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.row, self.col).cmp(&(other.row, other.col))
    }
}

impl PartialOrd for TileCoord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.col, self.row)
    }
}

impl FromStr for TileCoord {
    type Err = LevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || LevelError::BadTileKey(s.to_string());
        let (col, row) = s.split_once('x').ok_or_else(bad)?;
        let col = col.trim().parse::<i32>().map_err(|_| bad())?;
        let row = row.trim().parse::<i32>().map_err(|_| bad())?;
        Ok(TileCoord::new(col, row))
    }
}

/// Aggregate health of the crawler. Always within `[HEALTH_MIN, HEALTH_MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlerHealth(i32);

impl Default for CrawlerHealth {
    fn default() -> Self {
        Self(HEALTH_MAX)
    }
}

impl CrawlerHealth {
    pub fn new(value: i32) -> Self {
        Self(value.clamp(HEALTH_MIN, HEALTH_MAX))
    }

    pub fn value(&self) -> i32 {
        self.0
    }

    pub fn reduce(&mut self, amount: i32) {
        self.0 = self.0.saturating_sub(amount).clamp(HEALTH_MIN, HEALTH_MAX);
    }

    pub fn add(&mut self, amount: i32) {
        self.0 = self.0.saturating_add(amount).clamp(HEALTH_MIN, HEALTH_MAX);
    }

    pub fn is_depleted(&self) -> bool {
        self.0 <= HEALTH_MIN
    }
}

/// Serializable entity handle exchanged with the host.
///
/// Wraps the bit representation of the simulation's generational handle so
/// a stale id never aliases a newer entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u64);
