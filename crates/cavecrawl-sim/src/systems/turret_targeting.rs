//! Turret targeting and firing.
//!
//! Each turret counts its cooldown down. Once it has expired the turret scans
//! the live enemies and fires at the pick if it is in range; otherwise the
//! cooldown stays negative and the scan repeats next tick.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use cavecrawl_core::components::{EnemyBrain, Hitpoints, TurretState};
use cavecrawl_core::constants::{
    PARTICLES_SPARK, TARGET_SCAN_DISTANCE_SENTINEL, TARGET_SCAN_HP_SENTINEL, TURRET_HEAD_OFFSET,
};
use cavecrawl_core::enums::{ParticleKind, ProjectileSource};
use cavecrawl_core::events::{SimEvent, SoundCue};
use cavecrawl_core::rules::TurretRules;
use cavecrawl_core::types::Position;

use crate::effects;
use crate::world_setup::{self, ShotParams};

/// An enemy as seen by the targeting scan.
#[derive(Debug, Clone, Copy)]
pub struct TargetCandidate {
    pub position: Position,
    pub hitpoints: i32,
}

/// Single pass over `candidates` in the order given.
///
/// The lowest hitpoints seen so far is updated before the distance test, so
/// the result depends on iteration order: a candidate can only win while its
/// hitpoints are at or below the running minimum. Returns the chosen
/// position and its distance from `origin`.
pub fn select_target<'a>(
    origin: &Position,
    candidates: impl IntoIterator<Item = &'a TargetCandidate>,
) -> Option<(Position, f64)> {
    let mut lowest_hp = TARGET_SCAN_HP_SENTINEL;
    let mut closest = TARGET_SCAN_DISTANCE_SENTINEL;
    let mut target = None;

    for candidate in candidates {
        let dist = origin.distance_to(&candidate.position);
        if lowest_hp > candidate.hitpoints {
            lowest_hp = candidate.hitpoints;
        }
        if closest > dist && candidate.hitpoints <= lowest_hp {
            closest = dist;
            target = Some(candidate.position);
        }
    }

    target.map(|pos| (pos, closest))
}

/// Where shots leave the turret.
pub fn head_position(base: &Position) -> Position {
    base.offset(TURRET_HEAD_OFFSET.0, TURRET_HEAD_OFFSET.1)
}

/// Run targeting for every turret. Returns the number of shots fired.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    rules: &TurretRules,
    dt: f64,
    events: &mut Vec<SimEvent>,
) -> usize {
    let candidates: Vec<TargetCandidate> = world
        .query::<(&EnemyBrain, &Position, &Hitpoints)>()
        .iter()
        .map(|(_, (_, pos, hp))| TargetCandidate {
            position: *pos,
            hitpoints: hp.0,
        })
        .collect();

    let mut shots: Vec<ShotParams> = Vec::new();

    for (_entity, (turret, base)) in world.query_mut::<(&mut TurretState, &Position)>() {
        turret.cooldown -= dt;
        if turret.cooldown >= 0.0 {
            continue;
        }
        let Some((target, closest)) = select_target(base, &candidates) else {
            continue;
        };
        if closest >= turret.max_range {
            continue;
        }

        let head = head_position(base);
        let aim = if rules.aim_jitter > 0.0 {
            target.offset(
                rng.gen_range(-rules.aim_jitter..rules.aim_jitter),
                rng.gen_range(-rules.aim_jitter..rules.aim_jitter),
            )
        } else {
            target
        };
        turret.head_angle = head.angle_to(&target);
        turret.cooldown = rules.fire_interval;
        shots.push(ShotParams {
            origin: head,
            target: aim,
            speed: rules.shot_speed,
            lifetime: rules.shot_lifetime,
            damage: rules.shot_damage,
            source: ProjectileSource::Turret,
        });
    }

    for shot in &shots {
        world_setup::spawn_projectile(world, *shot);
        effects::play(events, rng, SoundCue::Zap);
        effects::burst(events, ParticleKind::Puff, shot.origin, 1);
    }
    shots.len()
}

/// Two turrets collided: both are lost.
pub fn collision_effects(
    a: Position,
    b: Position,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<SimEvent>,
) {
    effects::burst(events, ParticleKind::Spark, a, PARTICLES_SPARK);
    effects::burst(events, ParticleKind::Spark, b, PARTICLES_SPARK);
    effects::play(events, rng, SoundCue::Explosion);
}
