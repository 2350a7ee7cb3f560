//! Wall repair by the player.
//!
//! Holding work near a destroyed tile (and away from the station) runs a fix
//! countdown. Progress is all or nothing: letting go, walking off or the
//! target changing starts over.

use rand_chacha::ChaCha8Rng;

use cavecrawl_core::commands::PlayerInput;
use cavecrawl_core::constants::PARTICLES_DUST;
use cavecrawl_core::enums::ParticleKind;
use cavecrawl_core::events::{SimEvent, SoundCue};
use cavecrawl_core::rules::WorkRules;
use cavecrawl_core::types::{CrawlerHealth, TileCoord};

use cavecrawl_terrain::TerrainDamageTracker;

use crate::effects;

const FIX_EPSILON: f64 = 1e-9;

/// A repair in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct FixAction {
    pub tile: TileCoord,
    /// Seconds of sustained work still needed.
    pub remaining: f64,
    pub duration: f64,
    /// Countdown to the next dust puff and fix sound.
    pub effect_cooldown: f64,
}

impl FixAction {
    pub fn new(tile: TileCoord, duration: f64) -> Self {
        Self {
            tile,
            remaining: duration,
            duration,
            effect_cooldown: 0.0,
        }
    }

    /// Completed share in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (1.0 - self.remaining / self.duration).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RepairState {
    pub current: Option<FixAction>,
}

/// First destroyed tile within the repair radius, in row-major order.
pub fn find_target(
    tracker: &TerrainDamageTracker,
    player_tile: TileCoord,
    rules: &WorkRules,
) -> Option<TileCoord> {
    tracker
        .destroyed()
        .find(|tile| player_tile.distance_to(tile) <= rules.repair_radius_tiles)
        .copied()
}

/// Advance the repair. Returns the tile repaired this tick, if any.
#[allow(clippy::too_many_arguments)]
pub fn run(
    state: &mut RepairState,
    tracker: &mut TerrainDamageTracker,
    health: &mut CrawlerHealth,
    player_tile: Option<TileCoord>,
    at_station: bool,
    input: &PlayerInput,
    rules: &WorkRules,
    dt: f64,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<SimEvent>,
) -> Option<TileCoord> {
    let player_tile = match player_tile {
        Some(tile) if input.work && !at_station => tile,
        _ => {
            state.current = None;
            return None;
        }
    };

    // Stick with the tile being worked on while it stays in reach.
    let keep = state.current.as_ref().is_some_and(|fix| {
        tracker.is_destroyed(&fix.tile)
            && player_tile.distance_to(&fix.tile) <= rules.repair_radius_tiles
    });
    if !keep {
        state.current = find_target(tracker, player_tile, rules)
            .map(|tile| FixAction::new(tile, rules.repair_duration));
    }
    let fix = state.current.as_mut()?;

    fix.remaining -= dt;
    fix.effect_cooldown -= dt;
    if fix.effect_cooldown <= 0.0 {
        let center = tracker.grid().tile_center(&fix.tile);
        effects::burst(events, ParticleKind::Dust, center, PARTICLES_DUST);
        effects::play(events, rng, SoundCue::Fix);
        fix.effect_cooldown = rules.repair_effect_interval;
    }
    if fix.remaining > FIX_EPSILON {
        return None;
    }

    let tile = fix.tile;
    state.current = None;
    if tracker.repair(tile, health, events) {
        effects::play(events, rng, SoundCue::Place);
        Some(tile)
    } else {
        None
    }
}
