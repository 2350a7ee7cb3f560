//! Headless game loop: the engine plus its host-side collaborators.
//!
//! Each step ticks the engine, lets the physics resolve the new snapshot,
//! feeds the reports and the autopilot's controls back in, and keeps the
//! drill producing rock. Optionally paced to wall-clock time.

use std::time::{Duration, Instant};

use serde::Serialize;

use cavecrawl_core::commands::HostEvent;
use cavecrawl_core::constants::{DT, TICK_RATE};
use cavecrawl_core::enums::GamePhase;
use cavecrawl_core::events::SimEvent;
use cavecrawl_core::level::{marker_names, Level};
use cavecrawl_core::state::GameStateSnapshot;
use cavecrawl_sim::SimulationEngine;

use crate::autopilot::Autopilot;
use crate::physics::{FlatFloorPhysics, Zone};

/// Nominal duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub max_ticks: u64,
    /// Sleep between ticks to run at wall-clock speed.
    pub realtime: bool,
    /// Rock delivered by the drill each second.
    pub rock_per_second: f64,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            max_ticks: 120 * TICK_RATE as u64,
            realtime: false,
            rock_per_second: 1.0,
        }
    }
}

/// Totals for a finished run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub phase: GamePhase,
    pub survived_secs: f64,
    pub crawler_health: i32,
    pub processed_rock: f64,
    pub final_score: Option<i64>,
    pub enemies_spawned: u32,
    pub enemies_died: u32,
    pub tiles_destroyed: u32,
    pub tiles_repaired: u32,
}

impl RunSummary {
    fn record(&mut self, snapshot: &GameStateSnapshot) {
        self.ticks += 1;
        for event in &snapshot.events {
            match event {
                SimEvent::EnemySpawned { .. } => self.enemies_spawned += 1,
                SimEvent::EnemyDied { .. } => self.enemies_died += 1,
                SimEvent::TileDestroyed { .. } => self.tiles_destroyed += 1,
                SimEvent::TileRepaired { .. } => self.tiles_repaired += 1,
                _ => {}
            }
        }
        self.phase = snapshot.phase;
        self.survived_secs = snapshot.time.elapsed_secs;
        self.crawler_health = snapshot.crawler_health;
        self.processed_rock = snapshot.economy.processed_rock;
        self.final_score = snapshot.outcome.as_ref().map(|o| o.final_score);
    }
}

/// An engine wired to the headless collaborators.
pub struct Session {
    engine: SimulationEngine,
    physics: FlatFloorPhysics,
    autopilot: Autopilot,
    tile_size: f64,
    drill_timer: f64,
}

impl Session {
    pub fn new(engine: SimulationEngine, level: &Level, floor_y: f64, hazard: Option<Zone>) -> Self {
        let station = level
            .find_marker(marker_names::STATION)
            .map(|m| m.position());
        Self {
            engine,
            physics: FlatFloorPhysics::new(level, floor_y, hazard),
            autopilot: Autopilot::new(station),
            tile_size: level.tile_size,
            drill_timer: 0.0,
        }
    }

    pub fn engine(&self) -> &SimulationEngine {
        &self.engine
    }

    /// Advance one tick and prepare the next one.
    pub fn step(&mut self, rock_per_second: f64) -> GameStateSnapshot {
        let snapshot = self.engine.tick(DT);

        let reports = self.physics.step(&snapshot, DT);
        self.engine.queue_events(reports);

        self.drill_timer += DT;
        if self.drill_timer >= 1.0 {
            self.drill_timer -= 1.0;
            if rock_per_second > 0.0 && snapshot.phase == GamePhase::Running {
                self.engine.queue_event(HostEvent::RockProduced {
                    amount: rock_per_second,
                });
            }
        }

        let input = self
            .autopilot
            .decide(&snapshot, self.physics.player(), self.tile_size);
        self.engine.set_input(input);

        snapshot
    }
}

/// Run until defeat or `max_ticks`.
pub fn run(session: &mut Session, config: &LoopConfig) -> RunSummary {
    let mut summary = RunSummary::default();
    let mut next_tick_time = Instant::now();

    while summary.ticks < config.max_ticks {
        let snapshot = session.step(config.rock_per_second);
        summary.record(&snapshot);

        if snapshot.phase == GamePhase::Defeated {
            tracing::info!(
                ticks = summary.ticks,
                final_score = ?summary.final_score,
                "session over"
            );
            break;
        }
        if summary.ticks % u64::from(TICK_RATE * 10) == 0 {
            tracing::debug!(
                secs = snapshot.time.elapsed_secs,
                health = snapshot.crawler_health,
                enemies = snapshot.enemies.len(),
                processed = snapshot.economy.processed_rock,
                "progress"
            );
        }

        if config.realtime {
            next_tick_time += TICK_DURATION;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > TICK_DURATION * 2 {
                // Too far behind; reset to avoid a catch-up spiral.
                next_tick_time = now;
            }
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo;
    use cavecrawl_sim::SimConfig;

    fn demo_session(seed: u64) -> Session {
        let level = demo::demo_level();
        let engine = SimulationEngine::new(
            SimConfig {
                seed,
                ..Default::default()
            },
            &level,
        )
        .unwrap();
        Session::new(engine, &level, demo::FLOOR_Y, Some(demo::wheel_zone()))
    }

    #[test]
    fn test_tick_duration_constant() {
        // 60Hz = 16.666ms per tick
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(TICK_DURATION.as_nanos(), expected_nanos as u128);
    }

    #[test]
    fn test_demo_run_is_deterministic() {
        let config = LoopConfig {
            max_ticks: 3000,
            ..Default::default()
        };
        let a = run(&mut demo_session(9), &config);
        let b = run(&mut demo_session(9), &config);
        assert_eq!(a, b);
        assert!(a.ticks > 0 && a.ticks <= 3000);
        assert!(a.enemies_spawned > 0, "spawn points are active");
        assert!((0..=100).contains(&a.crawler_health));
    }

    #[test]
    fn test_drill_feeds_economy() {
        let config = LoopConfig {
            max_ticks: 200,
            rock_per_second: 2.0,
            ..Default::default()
        };
        let mut session = demo_session(1);
        let summary = run(&mut session, &config);
        let economy = session.engine().economy();
        assert!(economy.total() > 0.0);
        assert!(summary.processed_rock <= economy.total());
    }

    #[test]
    fn test_mid_session_snapshot_round_trips() {
        let mut session = demo_session(3);
        for _ in 0..600 {
            session.step(1.0);
        }
        let snapshot = session.step(1.0);
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: GameStateSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.time.tick, snapshot.time.tick);
        assert_eq!(back.enemies.len(), snapshot.enemies.len());
        assert_eq!(back.turrets.len(), snapshot.turrets.len());
        assert_eq!(back.crawler_health, snapshot.crawler_health);
    }
}
