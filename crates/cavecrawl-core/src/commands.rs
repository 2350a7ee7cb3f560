//! Inputs sent from the host to the simulation.
//!
//! Host events are queued and processed at the next tick boundary, before
//! any system runs. Player input is latched and read once per tick.

use serde::{Deserialize, Serialize};

use crate::types::{EntityId, Position, TileCoord, Velocity};

/// Reports from the host's physics collaborator and session controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HostEvent {
    // --- Physics reports ---
    /// The entity's body is resting on the ground this step.
    Grounded { entity: EntityId },
    /// The entity's body collided with a wall tile.
    WallContact { entity: EntityId, tile: TileCoord },
    /// Two entity bodies overlap.
    Overlap { a: EntityId, b: EntityId },
    /// The entity entered a hazard zone (the crawler's wheels, the ground
    /// layer for the player).
    HazardContact { entity: EntityId },
    /// Authoritative body state after the host's collision resolution.
    BodySync {
        entity: EntityId,
        position: Position,
        velocity: Velocity,
    },

    // --- Economy feed ---
    /// Drilled rock became available for processing.
    RockProduced { amount: f64 },

    // --- Session control ---
    Pause,
    Resume,
}

/// Player controls latched for the next tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    /// Fire button state; the engine fires on the rising edge only.
    pub fire: bool,
    /// Work button held (process rock or repair walls).
    pub work: bool,
    /// Player body position from the host physics, if it moved.
    pub position: Option<Position>,
    /// Player body resting on the ground.
    pub grounded: bool,
}

impl PlayerInput {
    /// Whether any horizontal movement intent is held.
    pub fn wants_to_move(&self) -> bool {
        self.left || self.right
    }
}
