//! Tunable gameplay rules.
//!
//! `GameRules::default()` reproduces the stock game. Hosts may deserialize a
//! partial JSON document; missing fields fall back to the defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;

/// Validation failures for a rules document.
#[derive(Debug, Error, PartialEq)]
pub enum RulesError {
    #[error("spawn schedule must contain at least one step")]
    EmptySchedule,
    #[error("spawn schedule must start at 0 seconds, starts at {0}")]
    ScheduleStart(f64),
    #[error("spawn schedule threshold {threshold} at step {index} is not after the previous step")]
    ScheduleOrder { index: usize, threshold: f64 },
    #[error("spawn interval {interval} at step {index} must be positive")]
    ScheduleInterval { index: usize, interval: f64 },
    #[error("{name} must be within [0, 1], got {value}")]
    Probability { name: &'static str, value: f64 },
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },
    #[error("{name} must be within [{min}, {max}], got {value}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{name} range is inverted: min {min} > max {max}")]
    InvertedRange { name: &'static str, min: f64, max: f64 },
}

/// Upper bound (px or px/s) for any randomized spread.
pub const MAX_RANDOM_SPREAD: f64 = 1.0e6;

/// One step of the difficulty ramp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnStep {
    /// Elapsed session time (seconds) from which this step applies.
    pub after_secs: f64,
    /// Seconds between spawn waves.
    pub interval_secs: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnRules {
    pub schedule: Vec<SpawnStep>,
    pub initial_cooldown: f64,
    pub jitter: f64,
    /// Probability that a spawn point produces an enemy once any wall tile
    /// has been destroyed. `None` disables the gate.
    pub breach_probability: Option<f64>,
}

impl Default for SpawnRules {
    fn default() -> Self {
        Self {
            schedule: SPAWN_SCHEDULE
                .iter()
                .map(|&(after_secs, interval_secs)| SpawnStep {
                    after_secs,
                    interval_secs,
                })
                .collect(),
            initial_cooldown: SPAWN_INITIAL_COOLDOWN,
            jitter: SPAWN_JITTER,
            breach_probability: Some(SPAWN_PROBABILITY),
        }
    }
}

impl SpawnRules {
    /// Spawn interval in force at `elapsed_secs`: the last step whose
    /// threshold has been reached.
    pub fn interval_at(&self, elapsed_secs: f64) -> f64 {
        self.schedule
            .iter()
            .take_while(|step| step.after_secs <= elapsed_secs)
            .last()
            .or_else(|| self.schedule.first())
            .map(|step| step.interval_secs)
            .unwrap_or(SPAWN_SCHEDULE[0].1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyRules {
    pub hitpoints: i32,
    pub fall_drift: f64,
    pub run_speed: f64,
    pub attack_cooldown: f64,
    pub jump_reach: f64,
    pub jump_rise_min: f64,
    pub jump_rise_max: f64,
    pub jump_speed: f64,
    pub party_decay: f64,
    pub party_bounce_min: f64,
    pub party_bounce_max: f64,
}

impl Default for EnemyRules {
    fn default() -> Self {
        Self {
            hitpoints: ENEMY_HITPOINTS,
            fall_drift: ENEMY_FALL_DRIFT,
            run_speed: ENEMY_RUN_SPEED,
            attack_cooldown: ENEMY_ATTACK_COOLDOWN,
            jump_reach: ENEMY_JUMP_REACH,
            jump_rise_min: ENEMY_JUMP_RISE_MIN,
            jump_rise_max: ENEMY_JUMP_RISE_MAX,
            jump_speed: ENEMY_JUMP_SPEED,
            party_decay: PARTY_VELOCITY_DECAY,
            party_bounce_min: PARTY_BOUNCE_MIN,
            party_bounce_max: PARTY_BOUNCE_MAX,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurretRules {
    pub max_range: f64,
    pub initial_cooldown: f64,
    pub fire_interval: f64,
    pub shot_speed: f64,
    pub shot_lifetime: f64,
    pub shot_damage: i32,
    /// Maximum random aim error applied to each axis of the aim point (px).
    pub aim_jitter: f64,
}

impl Default for TurretRules {
    fn default() -> Self {
        Self {
            max_range: TURRET_MAX_RANGE,
            initial_cooldown: TURRET_INITIAL_COOLDOWN,
            fire_interval: TURRET_FIRE_INTERVAL,
            shot_speed: TURRET_SHOT_SPEED,
            shot_lifetime: TURRET_SHOT_LIFETIME,
            shot_damage: PROJECTILE_DAMAGE,
            aim_jitter: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerRules {
    pub walk_speed: f64,
    pub jump_speed: f64,
    pub velocity_decay: f64,
    pub shot_count: u32,
    pub shot_speed: f64,
    pub shot_lifetime: f64,
    pub shot_damage: i32,
}

impl Default for PlayerRules {
    fn default() -> Self {
        Self {
            walk_speed: PLAYER_WALK_SPEED,
            jump_speed: PLAYER_JUMP_SPEED,
            velocity_decay: PLAYER_VELOCITY_DECAY,
            shot_count: PLAYER_SHOT_COUNT,
            shot_speed: PLAYER_SHOT_SPEED,
            shot_lifetime: PLAYER_SHOT_LIFETIME,
            shot_damage: PROJECTILE_DAMAGE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainRules {
    pub destroy_threshold: u8,
    pub destroy_penalty: i32,
    pub repair_bonus: i32,
}

impl Default for TerrainRules {
    fn default() -> Self {
        Self {
            destroy_threshold: TILE_DESTROY_THRESHOLD,
            destroy_penalty: TILE_DESTROY_PENALTY,
            repair_bonus: TILE_REPAIR_BONUS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkRules {
    pub process_quantum: f64,
    pub station_radius_tiles: f64,
    pub process_sound_interval: f64,
    pub repair_radius_tiles: f64,
    pub repair_duration: f64,
    pub repair_effect_interval: f64,
}

impl Default for WorkRules {
    fn default() -> Self {
        Self {
            process_quantum: PROCESS_QUANTUM,
            station_radius_tiles: STATION_RADIUS_TILES,
            process_sound_interval: PROCESS_SOUND_INTERVAL,
            repair_radius_tiles: REPAIR_RADIUS_TILES,
            repair_duration: REPAIR_DURATION,
            repair_effect_interval: REPAIR_EFFECT_INTERVAL,
        }
    }
}

/// Every tunable of a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameRules {
    pub spawn: SpawnRules,
    pub enemy: EnemyRules,
    pub turret: TurretRules,
    pub player: PlayerRules,
    pub terrain: TerrainRules,
    pub work: WorkRules,
}

impl GameRules {
    /// Check internal consistency.
    pub fn validate(&self) -> Result<(), RulesError> {
        let schedule = &self.spawn.schedule;
        let first = schedule.first().ok_or(RulesError::EmptySchedule)?;
        if first.after_secs != 0.0 {
            return Err(RulesError::ScheduleStart(first.after_secs));
        }
        for (index, step) in schedule.iter().enumerate() {
            if step.interval_secs <= 0.0 {
                return Err(RulesError::ScheduleInterval {
                    index,
                    interval: step.interval_secs,
                });
            }
            if index > 0 && step.after_secs <= schedule[index - 1].after_secs {
                return Err(RulesError::ScheduleOrder {
                    index,
                    threshold: step.after_secs,
                });
            }
        }

        if let Some(p) = self.spawn.breach_probability {
            if !(0.0..=1.0).contains(&p) {
                return Err(RulesError::Probability {
                    name: "spawn.breach_probability",
                    value: p,
                });
            }
        }

        positive("enemy.attack_cooldown", self.enemy.attack_cooldown)?;
        positive("enemy.party_decay", self.enemy.party_decay)?;
        positive("turret.max_range", self.turret.max_range)?;
        positive("turret.fire_interval", self.turret.fire_interval)?;
        positive("turret.shot_lifetime", self.turret.shot_lifetime)?;
        positive("player.velocity_decay", self.player.velocity_decay)?;
        positive("player.shot_lifetime", self.player.shot_lifetime)?;
        positive("work.process_quantum", self.work.process_quantum)?;
        positive("work.repair_duration", self.work.repair_duration)?;
        positive(
            "terrain.destroy_threshold",
            f64::from(self.terrain.destroy_threshold),
        )?;

        let health_span = f64::from(HEALTH_MAX - HEALTH_MIN);
        within(
            "terrain.destroy_penalty",
            f64::from(self.terrain.destroy_penalty),
            0.0,
            health_span,
        )?;
        within(
            "terrain.repair_bonus",
            f64::from(self.terrain.repair_bonus),
            0.0,
            health_span,
        )?;

        within("spawn.jitter", self.spawn.jitter, 0.0, MAX_RANDOM_SPREAD)?;
        within("turret.aim_jitter", self.turret.aim_jitter, 0.0, MAX_RANDOM_SPREAD)?;
        band(
            "enemy.jump_rise",
            self.enemy.jump_rise_min,
            self.enemy.jump_rise_max,
        )?;
        band(
            "enemy.party_bounce",
            self.enemy.party_bounce_min,
            self.enemy.party_bounce_max,
        )?;
        Ok(())
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), RulesError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(RulesError::NonPositive { name, value })
    }
}

/// `value` lies in `[min, max]`. NaN never does.
fn within(name: &'static str, value: f64, min: f64, max: f64) -> Result<(), RulesError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(RulesError::OutOfRange {
            name,
            value,
            min,
            max,
        })
    }
}

/// A randomized `[min, max)` band that can be sampled.
fn band(name: &'static str, min: f64, max: f64) -> Result<(), RulesError> {
    within(name, min, -MAX_RANDOM_SPREAD, MAX_RANDOM_SPREAD)?;
    within(name, max, -MAX_RANDOM_SPREAD, MAX_RANDOM_SPREAD)?;
    if min > max {
        return Err(RulesError::InvertedRange { name, min, max });
    }
    Ok(())
}
