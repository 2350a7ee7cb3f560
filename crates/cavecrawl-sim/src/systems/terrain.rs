//! Terrain phase: applies this tick's grab pulses, then resolves destruction.
//!
//! Runs strictly after the enemy AI so that grabs made this tick are counted
//! before the scan.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use cavecrawl_core::components::EnemyBrain;
use cavecrawl_core::events::{SimEvent, SoundCue};
use cavecrawl_core::types::{CrawlerHealth, TileCoord};

use cavecrawl_enemy_ai::actions;
use cavecrawl_terrain::TerrainDamageTracker;

use crate::effects;

/// Read and clear every enemy's latched grab tile.
pub fn collect_grabbed_tiles(world: &mut World) -> Vec<TileCoord> {
    let mut tiles = Vec::new();
    for (_entity, brain) in world.query_mut::<&mut EnemyBrain>() {
        if let Some(tile) = actions::grabbed_tile(brain) {
            tiles.push(tile);
            actions::clear_grabbed_tile(brain);
        }
    }
    tiles
}

/// Damage grabbed tiles and destroy the ones that crossed the threshold.
/// Returns the tiles destroyed this tick.
pub fn run(
    world: &mut World,
    tracker: &mut TerrainDamageTracker,
    health: &mut CrawlerHealth,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<SimEvent>,
) -> Vec<TileCoord> {
    for tile in collect_grabbed_tiles(world) {
        if !tracker.damage_tile(tile) {
            tracing::debug!(%tile, "grab on a tile that is not destructible terrain");
        }
    }

    let destroyed = tracker.tick(health, events);
    for _ in &destroyed {
        effects::play(events, rng, SoundCue::Crunch);
    }
    destroyed
}
