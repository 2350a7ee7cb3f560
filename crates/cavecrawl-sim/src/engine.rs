//! Simulation engine, the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, the terrain tracker, the
//! economy and the crawler's health. It drains host events, runs all
//! systems in a fixed phase order and produces `GameStateSnapshot`s.
//! Completely headless, which keeps it deterministic and testable.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use cavecrawl_core::commands::{HostEvent, PlayerInput};
use cavecrawl_core::components::{Hitpoints, ProjectileState};
use cavecrawl_core::enums::{EntityKind, GamePhase, ProjectileSource};
use cavecrawl_core::events::{SimEvent, SoundCue};
use cavecrawl_core::level::{Level, LevelError};
use cavecrawl_core::rules::{GameRules, RulesError};
use cavecrawl_core::state::{EnemyView, GameStateSnapshot, OutcomeView};
use cavecrawl_core::types::{CrawlerHealth, EntityId, Position, SimTime, TileCoord};

use cavecrawl_terrain::{TerrainDamageTracker, TerrainGrid};

use crate::economy::ResourceEconomy;
use crate::effects;
use crate::systems;
use crate::systems::contacts::ContactContext;
use crate::systems::economy::ProcessingState;
use crate::systems::repair::RepairState;
use crate::systems::snapshot::SnapshotInputs;
use crate::systems::spawner::SpawnState;
use crate::world_setup::{self, ShotParams};

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed and inputs give the same run.
    pub seed: u64,
    pub rules: GameRules,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            rules: GameRules::default(),
        }
    }
}

/// Why a session could not be started.
#[derive(Debug, Error, PartialEq)]
pub enum SetupError {
    #[error("invalid rules: {0}")]
    Rules(#[from] RulesError),
    #[error("invalid level: {0}")]
    Level(#[from] LevelError),
}

/// The simulation engine. Owns the ECS world and all session state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    rules: GameRules,
    rng: ChaCha8Rng,
    event_queue: VecDeque<HostEvent>,
    input: PlayerInput,
    despawn_buffer: Vec<Entity>,
    events: Vec<SimEvent>,

    terrain: TerrainDamageTracker,
    health: CrawlerHealth,
    economy: ResourceEconomy,
    processing: ProcessingState,
    repair: RepairState,
    spawn: SpawnState,

    tile_size: f64,
    station: Option<TileCoord>,
    player: Option<Entity>,
    camera_focus: Position,
    outcome: Option<OutcomeView>,
}

impl SimulationEngine {
    /// Validate the rules and level, then populate the world from the
    /// level's markers. The session starts running.
    pub fn new(config: SimConfig, level: &Level) -> Result<Self, SetupError> {
        config.rules.validate()?;
        level.validate()?;

        let mut world = World::new();
        let layout = world_setup::setup_level(&mut world, level, &config.rules);
        let grid = TerrainGrid::new(level.tile_size, level.walls.iter().copied());

        Ok(Self {
            world,
            time: SimTime::default(),
            phase: GamePhase::Running,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            event_queue: VecDeque::new(),
            input: PlayerInput::default(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            terrain: TerrainDamageTracker::new(grid, config.rules.terrain.clone()),
            health: CrawlerHealth::default(),
            economy: ResourceEconomy::default(),
            processing: ProcessingState::default(),
            repair: RepairState::default(),
            spawn: SpawnState::new(layout.spawn_points, &config.rules.spawn),
            tile_size: level.tile_size,
            station: layout.station,
            player: layout.player,
            camera_focus: layout.camera_focus,
            outcome: None,
            rules: config.rules,
        })
    }

    /// Queue a host event for processing at the next tick boundary.
    pub fn queue_event(&mut self, event: HostEvent) {
        self.event_queue.push_back(event);
    }

    /// Queue multiple host events.
    pub fn queue_events(&mut self, events: impl IntoIterator<Item = HostEvent>) {
        self.event_queue.extend(events);
    }

    /// Latch the player controls read by the next tick.
    pub fn set_input(&mut self, input: PlayerInput) {
        self.input = input;
    }

    /// Advance the simulation by `dt` seconds and return the resulting
    /// snapshot. Negative or non-finite deltas count as zero.
    pub fn tick(&mut self, dt: f64) -> GameStateSnapshot {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.process_events();

        match self.phase {
            GamePhase::Running => {
                self.time.advance(dt);
                self.run_systems(dt);
            }
            GamePhase::Defeated => self.run_aftermath(dt),
            GamePhase::Paused => {}
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            SnapshotInputs {
                time: self.time,
                phase: self.phase,
                player: self.player,
                terrain: &self.terrain,
                health: self.health,
                economy: &self.economy,
                repair: &self.repair,
                spawn_interval: self.rules.spawn.interval_at(self.time.elapsed_secs),
                camera_focus: self.camera_focus,
                outcome: self.outcome.clone(),
            },
            events,
        )
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    /// Read-only access to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn health(&self) -> CrawlerHealth {
        self.health
    }

    pub fn economy(&self) -> &ResourceEconomy {
        &self.economy
    }

    pub fn terrain(&self) -> &TerrainDamageTracker {
        &self.terrain
    }

    pub fn player(&self) -> Option<EntityId> {
        self.player
            .filter(|p| self.world.contains(*p))
            .map(world_setup::entity_id)
    }

    /// Final score once the session is lost.
    pub fn final_score(&self) -> Option<i64> {
        self.outcome.as_ref().map(|o| o.final_score)
    }

    /// Current view of one enemy, if it is still alive.
    pub fn enemy(&self, id: EntityId) -> Option<EnemyView> {
        let entity = world_setup::resolve(id)?;
        systems::snapshot::enemy_view(&self.world, entity)
    }

    /// Live enemy handles in world iteration order.
    pub fn enemy_ids(&self) -> Vec<EntityId> {
        self.entities_of(EntityKind::Enemy)
    }

    pub fn turret_ids(&self) -> Vec<EntityId> {
        self.entities_of(EntityKind::Turret)
    }

    pub fn projectile_ids(&self) -> Vec<EntityId> {
        self.entities_of(EntityKind::Projectile)
    }

    fn entities_of(&self, kind: EntityKind) -> Vec<EntityId> {
        self.world
            .query::<&EntityKind>()
            .iter()
            .filter(|(_, k)| **k == kind)
            .map(|(e, _)| world_setup::entity_id(e))
            .collect()
    }

    /// Spawn an enemy outside the regular schedule (scripted events, tests).
    pub fn spawn_enemy(&mut self, position: Position) -> EntityId {
        let entity = world_setup::spawn_enemy(&mut self.world, position, &self.rules.enemy);
        let id = world_setup::entity_id(entity);
        self.events.push(SimEvent::EnemySpawned { id, position });
        id
    }

    /// Place a turret; the position is snapped to the tile grid.
    pub fn spawn_turret(&mut self, position: Position) -> EntityId {
        let snapped = world_setup::snap_to_grid(position, self.tile_size);
        world_setup::entity_id(world_setup::spawn_turret(
            &mut self.world,
            snapped,
            &self.rules.turret,
        ))
    }

    /// Fire a turret-style shot from `origin` at `target`.
    pub fn spawn_projectile(&mut self, origin: Position, target: Position) -> EntityId {
        let shot = ShotParams {
            origin,
            target,
            speed: self.rules.turret.shot_speed,
            lifetime: self.rules.turret.shot_lifetime,
            damage: self.rules.turret.shot_damage,
            source: ProjectileSource::Turret,
        };
        world_setup::entity_id(world_setup::spawn_projectile(&mut self.world, shot))
    }

    /// Force an enemy's hitpoints (scripted events, tests).
    pub fn set_enemy_hitpoints(&mut self, id: EntityId, hitpoints: i32) -> bool {
        let Some(entity) = world_setup::resolve(id) else {
            return false;
        };
        match self.world.get::<&mut Hitpoints>(entity) {
            Ok(mut hp) => {
                hp.0 = hitpoints;
                true
            }
            Err(_) => false,
        }
    }

    /// Remaining lifetime of a projectile (seconds).
    pub fn projectile_lifetime(&self, id: EntityId) -> Option<f64> {
        let entity = world_setup::resolve(id)?;
        let state = self.world.get::<&ProjectileState>(entity).ok()?;
        Some(state.lifetime_remaining)
    }

    /// Mutable world access for tests that stage enemy states directly.
    #[cfg(test)]
    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[cfg(test)]
    pub(crate) fn terrain_mut(&mut self) -> &mut TerrainDamageTracker {
        &mut self.terrain
    }

    #[cfg(test)]
    pub(crate) fn health_mut(&mut self) -> &mut CrawlerHealth {
        &mut self.health
    }

    /// Drain all queued host events.
    fn process_events(&mut self) {
        while let Some(event) = self.event_queue.pop_front() {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: HostEvent) {
        match event {
            HostEvent::Pause => {
                if self.phase == GamePhase::Running {
                    self.phase = GamePhase::Paused;
                }
            }
            HostEvent::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Running;
                }
            }
            other => {
                let mut ctx = ContactContext {
                    world: &mut self.world,
                    rng: &mut self.rng,
                    events: &mut self.events,
                    economy: &mut self.economy,
                    live: self.phase == GamePhase::Running,
                };
                systems::contacts::dispatch(&mut ctx, other);
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        // 1. Spawning
        systems::spawner::run(
            &mut self.world,
            &mut self.rng,
            &mut self.spawn,
            &self.rules.spawn,
            &self.rules.enemy,
            self.time.elapsed_secs,
            self.terrain.is_eroded(),
            dt,
            &mut self.events,
        );
        // 2. Player intent
        systems::player::run(
            &mut self.world,
            self.player,
            &self.input,
            &self.rules.player,
            &mut self.events,
        );
        // 3. Enemy AI (death pre-empts every state)
        systems::enemy_ai::run(
            &mut self.world,
            &mut self.rng,
            &self.rules.enemy,
            dt,
            &mut self.events,
            &mut self.despawn_buffer,
        );
        // 4. Terrain: this tick's grabs, then destruction
        systems::terrain::run(
            &mut self.world,
            &mut self.terrain,
            &mut self.health,
            &mut self.rng,
            &mut self.events,
        );
        // 5. Turret targeting and firing
        systems::turret_targeting::run(
            &mut self.world,
            &mut self.rng,
            &self.rules.turret,
            dt,
            &mut self.events,
        );
        // 6. Movement integration, then projectile expiry
        systems::movement::run(&mut self.world, dt);
        systems::projectiles::run(&mut self.world, dt, &mut self.despawn_buffer);
        // 7. Processing at the station, repair elsewhere
        let player_tile = self.player_tile();
        let at_station = systems::economy::at_station(player_tile, self.station, &self.rules.work);
        systems::economy::run(
            &mut self.economy,
            &mut self.processing,
            at_station,
            &self.input,
            &self.rules.work,
            dt,
            &mut self.rng,
            &mut self.events,
        );
        systems::repair::run(
            &mut self.repair,
            &mut self.terrain,
            &mut self.health,
            player_tile,
            at_station,
            &self.input,
            &self.rules.work,
            dt,
            &mut self.rng,
            &mut self.events,
        );
        // 8. Loss check
        self.check_defeat();
    }

    /// After defeat only the celebration plays out.
    fn run_aftermath(&mut self, dt: f64) {
        systems::enemy_ai::run(
            &mut self.world,
            &mut self.rng,
            &self.rules.enemy,
            dt,
            &mut self.events,
            &mut self.despawn_buffer,
        );
        systems::movement::run(&mut self.world, dt);
        systems::projectiles::run(&mut self.world, dt, &mut self.despawn_buffer);
    }

    fn player_tile(&self) -> Option<TileCoord> {
        let player = self.player?;
        let pos = self.world.get::<&Position>(player).ok()?;
        Some(self.terrain.grid().tile_at(&pos))
    }

    fn player_lost(&self) -> bool {
        self.player.is_some_and(|p| !self.world.contains(p))
    }

    fn check_defeat(&mut self) {
        if !self.health.is_depleted() && !self.player_lost() {
            return;
        }

        self.phase = GamePhase::Defeated;
        let final_score = self.economy.score();
        effects::play(&mut self.events, &mut self.rng, SoundCue::BigExplosion);
        let partying = systems::enemy_ai::start_party(&mut self.world);
        let turrets = systems::cleanup::despawn_kind(
            &mut self.world,
            EntityKind::Turret,
            &mut self.despawn_buffer,
        );
        self.repair.current = None;
        self.events.push(SimEvent::Defeat { final_score });
        self.outcome = Some(OutcomeView {
            final_score,
            survived_secs: self.time.elapsed_secs,
        });

        tracing::info!(
            final_score,
            survived_secs = self.time.elapsed_secs,
            health = self.health.value(),
            partying,
            turrets,
            "crawler lost"
        );
    }
}
