//! Game state snapshot: the complete visible state handed to the host each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SimEvent;
use crate::types::{EntityId, Position, SimTime, TileCoord, Velocity};

/// Complete game state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub enemies: Vec<EnemyView>,
    pub turrets: Vec<TurretView>,
    pub projectiles: Vec<ProjectileView>,
    pub player: Option<PlayerView>,
    pub terrain: TerrainView,
    pub crawler_health: i32,
    pub economy: EconomyView,
    /// Spawn interval currently in force (seconds).
    pub spawn_interval: f64,
    pub camera_focus: Position,
    pub outcome: Option<OutcomeView>,
    /// Notifications emitted during this tick, in emission order.
    pub events: Vec<SimEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: EntityId,
    pub position: Position,
    pub velocity: Velocity,
    pub state: EnemyState,
    pub hitpoints: i32,
    pub attacking: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurretView {
    pub id: EntityId,
    pub position: Position,
    pub head_angle: f64,
    pub cooldown: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: EntityId,
    pub position: Position,
    pub velocity: Velocity,
    /// Remaining / initial lifetime, for shrink-with-age rendering.
    pub life_fraction: f64,
    pub source: ProjectileSource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: EntityId,
    pub position: Position,
    /// Velocity the host physics should apply to the player body.
    pub desired_velocity: Velocity,
    pub facing_left: bool,
    /// Progress of the current repair in `[0, 1]`, if one is underway.
    pub fix_progress: Option<f64>,
    pub fix_target: Option<TileCoord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TerrainView {
    /// Tiles with accumulated damage below the destruction threshold.
    pub damaged: Vec<(TileCoord, u8)>,
    /// Tiles currently removed and awaiting repair.
    pub destroyed: Vec<TileCoord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EconomyView {
    pub processable_rock: f64,
    pub processed_rock: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutcomeView {
    pub final_score: i64,
    pub survived_secs: f64,
}
