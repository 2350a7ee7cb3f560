//! External operations on a single enemy.
//!
//! These are invoked by the contact dispatcher (wall contact, projectile
//! overlap) and by the engine (ceasefire, terrain phase). They only touch
//! the enemy's own components.

use cavecrawl_core::components::{EnemyBrain, Hitpoints};
use cavecrawl_core::enums::EnemyState;
use cavecrawl_core::types::TileCoord;

/// Fresh brain for a newly spawned enemy.
pub fn new_brain(attack_cooldown: f64) -> EnemyBrain {
    EnemyBrain {
        state: EnemyState::Falling,
        attack_cooldown,
        grounded: false,
        grab_target: None,
        grabbed_tile: None,
    }
}

/// Whether the enemy is mid-attack and may latch onto a wall.
pub fn is_attacking(brain: &EnemyBrain) -> bool {
    brain.state == EnemyState::Attacking
}

/// Latch onto `tile`. Accepted only while attacking; any other state
/// (including an enemy that already grabbed this tick) rejects the grab.
pub fn grab(brain: &mut EnemyBrain, tile: TileCoord) -> bool {
    if !is_attacking(brain) {
        return false;
    }
    brain.state = EnemyState::Grabbing;
    brain.grab_target = Some(tile);
    true
}

/// Subtract `damage` from hitpoints. Returns the remaining hitpoints.
/// Destruction is handled by the enemy update once this drops to zero.
pub fn get_hit(hitpoints: &mut Hitpoints, damage: i32) -> i32 {
    hitpoints.0 -= damage;
    hitpoints.0
}

pub fn is_dead(hitpoints: &Hitpoints) -> bool {
    hitpoints.0 <= 0
}

/// Tile latched by the last grab pulse, not yet consumed.
pub fn grabbed_tile(brain: &EnemyBrain) -> Option<TileCoord> {
    brain.grabbed_tile
}

pub fn clear_grabbed_tile(brain: &mut EnemyBrain) {
    brain.grabbed_tile = None;
}

/// Stop fighting for good. There is no transition out of `Partying`.
pub fn start_partying(brain: &mut EnemyBrain) {
    brain.state = EnemyState::Partying;
    brain.grab_target = None;
    brain.grabbed_tile = None;
}
