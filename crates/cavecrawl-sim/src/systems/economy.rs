//! Rock processing at the station.

use rand_chacha::ChaCha8Rng;

use cavecrawl_core::commands::PlayerInput;
use cavecrawl_core::events::{SimEvent, SoundCue};
use cavecrawl_core::rules::WorkRules;
use cavecrawl_core::types::TileCoord;

use crate::economy::ResourceEconomy;
use crate::effects;

/// Rate limiter for the processing sound.
#[derive(Debug, Clone, Default)]
pub struct ProcessingState {
    pub sound_cooldown: f64,
}

/// Whether the player's tile is within the station radius.
pub fn at_station(player_tile: Option<TileCoord>, station: Option<TileCoord>, rules: &WorkRules) -> bool {
    match (player_tile, station) {
        (Some(player), Some(station)) => player.distance_to(&station) <= rules.station_radius_tiles,
        _ => false,
    }
}

/// Convert one quantum while the player works, standing still, at the
/// station. Returns the amount converted.
#[allow(clippy::too_many_arguments)]
pub fn run(
    economy: &mut ResourceEconomy,
    state: &mut ProcessingState,
    at_station: bool,
    input: &PlayerInput,
    rules: &WorkRules,
    dt: f64,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<SimEvent>,
) -> f64 {
    state.sound_cooldown -= dt;
    if !at_station || !input.work || input.wants_to_move() {
        return 0.0;
    }
    let moved = economy.convert_step(rules.process_quantum);
    if moved > 0.0 && state.sound_cooldown <= 0.0 {
        effects::play(events, rng, SoundCue::Process);
        state.sound_cooldown = rules.process_sound_interval;
    }
    moved
}
