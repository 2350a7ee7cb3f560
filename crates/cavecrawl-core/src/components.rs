//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems and in the enemy-ai crate, not here.
//! Every entity carries an `EntityKind` tag; `Position` marks it as
//! positioned and `Hitpoints` as damageable.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{Position, TileCoord};

/// Remaining hitpoints. The owner is destroyed once this reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hitpoints(pub i32);

/// Enemy behavior state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyBrain {
    pub state: EnemyState,
    /// Countdown until the next jump attack (seconds).
    pub attack_cooldown: f64,
    /// Grounded report received this tick.
    pub grounded: bool,
    /// Tile supplied by the wall contact that triggered `Grabbing`.
    pub grab_target: Option<TileCoord>,
    /// Tile latched during the last `Grabbing` pulse, waiting to be read
    /// by the terrain phase.
    pub grabbed_tile: Option<TileCoord>,
}

/// Turret firing state. The base position is the entity's `Position`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurretState {
    /// Head orientation (radians).
    pub head_angle: f64,
    /// Countdown until the turret may fire (seconds). Stays negative while
    /// no target is in range.
    pub cooldown: f64,
    /// Engagement range (px).
    pub max_range: f64,
}

/// In-flight projectile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileState {
    /// Aim point captured at fire time.
    pub target: Position,
    pub speed: f64,
    pub lifetime_remaining: f64,
    pub lifetime_total: f64,
    pub damage: i32,
    pub source: ProjectileSource,
}

/// Player character state that the core owns. The body itself lives in the
/// host physics; the core computes intents for it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerState {
    pub facing_left: bool,
    pub grounded: bool,
    /// Fire button level seen last tick (for edge detection).
    pub fire_was_down: bool,
}
