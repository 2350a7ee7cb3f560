//! Enemy AI system: drives each enemy's state machine for one tick.
//!
//! Calls the FSM from cavecrawl-enemy-ai, writes the result back into the
//! ECS components, and removes enemies whose hitpoints ran out. Death is
//! checked after evaluation and pre-empts every state, including a grab
//! pulse issued in the same tick.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use cavecrawl_core::components::{EnemyBrain, Hitpoints};
use cavecrawl_core::constants::{PARTICLES_DEATH, PARTICLES_SPARK};
use cavecrawl_core::enums::{EnemyState, ParticleKind};
use cavecrawl_core::events::{SimEvent, SoundCue};
use cavecrawl_core::rules::EnemyRules;
use cavecrawl_core::types::{Position, Velocity};

use cavecrawl_enemy_ai::actions;
use cavecrawl_enemy_ai::fsm::{evaluate, EnemyContext};

use crate::effects;
use crate::world_setup;

/// Run every enemy's FSM. Grab pulses are left in `EnemyBrain::grabbed_tile`
/// for the terrain phase to collect.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    rules: &EnemyRules,
    dt: f64,
    events: &mut Vec<SimEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();
    let mut sparks: Vec<Position> = Vec::new();
    let mut deaths: Vec<(Entity, Position)> = Vec::new();

    for (entity, (brain, pos, vel, hitpoints)) in
        world.query_mut::<(&mut EnemyBrain, &Position, &mut Velocity, &Hitpoints)>()
    {
        let jump_rise = if brain.state == EnemyState::Jumping {
            roll(rng, rules.jump_rise_min, rules.jump_rise_max)
        } else {
            0.0
        };
        let party_bounce = if brain.state == EnemyState::Partying && brain.grounded {
            roll(rng, rules.party_bounce_min, rules.party_bounce_max)
        } else {
            0.0
        };

        let ctx = EnemyContext {
            state: brain.state,
            position: *pos,
            velocity: *vel,
            grounded: brain.grounded,
            attack_cooldown: brain.attack_cooldown,
            grab_target: brain.grab_target,
            dt,
            jump_rise,
            party_bounce,
            rules,
        };
        let update = evaluate(&ctx);

        if update.state_changed {
            tracing::debug!(
                id = world_setup::entity_id(entity).0,
                from = ?brain.state,
                to = ?update.state,
                "enemy state change"
            );
        }
        brain.state = update.state;
        brain.attack_cooldown = update.attack_cooldown;
        brain.grounded = false;
        if update.grabbed_tile.is_some() {
            brain.grabbed_tile = update.grabbed_tile;
            brain.grab_target = None;
        }
        *vel = update.velocity;
        if update.sparks {
            sparks.push(*pos);
        }

        if actions::is_dead(hitpoints) {
            deaths.push((entity, *pos));
        }
    }

    for pos in sparks {
        effects::burst(events, ParticleKind::Spark, pos, PARTICLES_SPARK);
        effects::play(events, rng, SoundCue::Clack);
    }

    for (entity, pos) in deaths {
        kill(entity, pos, rng, events);
        despawn_buffer.push(entity);
    }
    super::cleanup::flush(world, despawn_buffer);
}

/// Uniform roll in `[min, max)`; a degenerate range yields `min`.
fn roll(rng: &mut ChaCha8Rng, min: f64, max: f64) -> f64 {
    if max > min {
        rng.gen_range(min..max)
    } else {
        min
    }
}

/// Death notification for an enemy about to be removed.
pub fn kill(entity: Entity, position: Position, rng: &mut ChaCha8Rng, events: &mut Vec<SimEvent>) {
    let id = world_setup::entity_id(entity);
    tracing::debug!(id = id.0, x = position.x, y = position.y, "enemy died");
    effects::burst(events, ParticleKind::Blood, position, PARTICLES_DEATH);
    effects::play(events, rng, SoundCue::Blorp);
    events.push(SimEvent::EnemyDied { id, position });
}

/// Put every enemy into its terminal celebration.
pub fn start_party(world: &mut World) -> usize {
    let mut count = 0;
    for (_entity, brain) in world.query_mut::<&mut EnemyBrain>() {
        actions::start_partying(brain);
        count += 1;
    }
    count
}
