//! Enemy spawning: a step-function interval over elapsed time.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use cavecrawl_core::events::SimEvent;
use cavecrawl_core::rules::{EnemyRules, SpawnRules};
use cavecrawl_core::types::Position;

use crate::world_setup;

/// Spawner state carried between ticks.
#[derive(Debug, Clone)]
pub struct SpawnState {
    /// Countdown to the next wave (seconds).
    pub cooldown: f64,
    /// One enemy per marker per wave.
    pub points: Vec<Position>,
}

impl SpawnState {
    pub fn new(points: Vec<Position>, rules: &SpawnRules) -> Self {
        Self {
            cooldown: rules.initial_cooldown,
            points,
        }
    }
}

/// Count the cooldown down; once it drops below zero, reset it to the
/// interval in force and spawn a wave. Once the crawler's walls have been
/// breached each spawn point only fires with the breach probability.
///
/// Returns the number of enemies spawned.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    state: &mut SpawnState,
    spawn_rules: &SpawnRules,
    enemy_rules: &EnemyRules,
    elapsed_secs: f64,
    breached: bool,
    dt: f64,
    events: &mut Vec<SimEvent>,
) -> usize {
    if state.cooldown >= 0.0 {
        state.cooldown -= dt;
        return 0;
    }
    state.cooldown = spawn_rules.interval_at(elapsed_secs);

    let mut spawned = 0;
    for point in &state.points {
        if breached {
            if let Some(p) = spawn_rules.breach_probability {
                if !rng.gen_bool(p) {
                    continue;
                }
            }
        }
        let jitter = if spawn_rules.jitter > 0.0 {
            rng.gen_range(0.0..spawn_rules.jitter)
        } else {
            0.0
        };
        let position = point.offset(jitter, 0.0);
        let entity = world_setup::spawn_enemy(world, position, enemy_rules);
        let id = world_setup::entity_id(entity);
        tracing::debug!(id = id.0, x = position.x, y = position.y, "enemy spawned");
        events.push(SimEvent::EnemySpawned { id, position });
        spawned += 1;
    }
    spawned
}
