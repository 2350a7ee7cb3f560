//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::{Entity, World};

use cavecrawl_core::components::*;
use cavecrawl_core::enums::*;
use cavecrawl_core::events::SimEvent;
use cavecrawl_core::state::*;
use cavecrawl_core::types::{CrawlerHealth, Position, SimTime, Velocity};

use cavecrawl_enemy_ai::actions;
use cavecrawl_terrain::TerrainDamageTracker;

use crate::economy::ResourceEconomy;
use crate::systems::projectiles;
use crate::systems::repair::RepairState;
use crate::world_setup::entity_id;

/// Engine-owned state the snapshot reads besides the world.
pub struct SnapshotInputs<'a> {
    pub time: SimTime,
    pub phase: GamePhase,
    pub player: Option<Entity>,
    pub terrain: &'a TerrainDamageTracker,
    pub health: CrawlerHealth,
    pub economy: &'a ResourceEconomy,
    pub repair: &'a RepairState,
    pub spawn_interval: f64,
    pub camera_focus: Position,
    pub outcome: Option<OutcomeView>,
}

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    inputs: SnapshotInputs<'_>,
    events: Vec<SimEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: inputs.time,
        phase: inputs.phase,
        enemies: build_enemies(world),
        turrets: build_turrets(world),
        projectiles: build_projectiles(world),
        player: build_player(world, inputs.player, inputs.repair),
        terrain: TerrainView {
            damaged: inputs.terrain.damaged().collect(),
            destroyed: inputs.terrain.destroyed().copied().collect(),
        },
        crawler_health: inputs.health.value(),
        economy: EconomyView {
            processable_rock: inputs.economy.processable(),
            processed_rock: inputs.economy.processed(),
        },
        spawn_interval: inputs.spawn_interval,
        camera_focus: inputs.camera_focus,
        outcome: inputs.outcome,
        events,
    }
}

fn build_enemies(world: &World) -> Vec<EnemyView> {
    world
        .query::<(&EnemyBrain, &Position, &Velocity, &Hitpoints)>()
        .iter()
        .map(|(entity, (brain, pos, vel, hp))| to_enemy_view(entity, brain, pos, vel, hp))
        .collect()
}

/// View of a single enemy, if `entity` is a live enemy.
pub fn enemy_view(world: &World, entity: Entity) -> Option<EnemyView> {
    let mut query = world
        .query_one::<(&EnemyBrain, &Position, &Velocity, &Hitpoints)>(entity)
        .ok()?;
    let (brain, pos, vel, hp) = query.get()?;
    Some(to_enemy_view(entity, brain, pos, vel, hp))
}

fn to_enemy_view(
    entity: Entity,
    brain: &EnemyBrain,
    pos: &Position,
    vel: &Velocity,
    hp: &Hitpoints,
) -> EnemyView {
    EnemyView {
        id: entity_id(entity),
        position: *pos,
        velocity: *vel,
        state: brain.state,
        hitpoints: hp.0,
        attacking: actions::is_attacking(brain),
    }
}

fn build_turrets(world: &World) -> Vec<TurretView> {
    world
        .query::<(&TurretState, &Position)>()
        .iter()
        .map(|(entity, (turret, pos))| TurretView {
            id: entity_id(entity),
            position: *pos,
            head_angle: turret.head_angle,
            cooldown: turret.cooldown,
        })
        .collect()
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    world
        .query::<(&ProjectileState, &Position, &Velocity)>()
        .iter()
        .map(|(entity, (projectile, pos, vel))| ProjectileView {
            id: entity_id(entity),
            position: *pos,
            velocity: *vel,
            life_fraction: projectiles::life_fraction(projectile),
            source: projectile.source,
        })
        .collect()
}

fn build_player(world: &World, player: Option<Entity>, repair: &RepairState) -> Option<PlayerView> {
    let entity = player?;
    let mut query = world
        .query_one::<(&PlayerState, &Position, &Velocity)>(entity)
        .ok()?;
    let (state, pos, vel) = query.get()?;
    Some(PlayerView {
        id: entity_id(entity),
        position: *pos,
        desired_velocity: *vel,
        facing_left: state.facing_left,
        fix_progress: repair.current.as_ref().map(|fix| fix.progress()),
        fix_target: repair.current.as_ref().map(|fix| fix.tile),
    })
}
