//! Minimal physics collaborator for headless runs.
//!
//! A flat floor, gravity, solid wall tiles and one hazard zone. After every
//! engine tick it reads the snapshot, resolves bodies against the floor and
//! the walls, and reports what happened as `HostEvent`s for the next tick.

use std::collections::BTreeSet;

use cavecrawl_core::commands::HostEvent;
use cavecrawl_core::events::SimEvent;
use cavecrawl_core::level::Level;
use cavecrawl_core::state::GameStateSnapshot;
use cavecrawl_core::types::{Position, TileCoord, Velocity};

/// Downward acceleration (px/s^2).
pub const GRAVITY: f64 = 400.0;

/// Half the side of an enemy or player body (px).
pub const BODY_HALF: f64 = 4.0;

/// Projectile-enemy overlap distance (px).
pub const HIT_RADIUS: f64 = 6.0;

/// Axis-aligned rectangle in world pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zone {
    pub min: Position,
    pub max: Position,
}

impl Zone {
    pub fn contains(&self, pos: &Position) -> bool {
        (self.min.x..=self.max.x).contains(&pos.x) && (self.min.y..=self.max.y).contains(&pos.y)
    }
}

/// Where the player's body ended up after resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerBody {
    pub position: Position,
    pub grounded: bool,
}

pub struct FlatFloorPhysics {
    tile_size: f64,
    floor_y: f64,
    hazard: Option<Zone>,
    solid: BTreeSet<TileCoord>,
    player: Option<PlayerBody>,
}

impl FlatFloorPhysics {
    pub fn new(level: &Level, floor_y: f64, hazard: Option<Zone>) -> Self {
        Self {
            tile_size: level.tile_size,
            floor_y,
            hazard,
            solid: level.walls.iter().copied().collect(),
            player: None,
        }
    }

    pub fn player(&self) -> Option<PlayerBody> {
        self.player
    }

    pub fn is_solid(&self, tile: &TileCoord) -> bool {
        self.solid.contains(tile)
    }

    /// Resolve every body in `snapshot` and return the reports for the next
    /// tick.
    pub fn step(&mut self, snapshot: &GameStateSnapshot, dt: f64) -> Vec<HostEvent> {
        for event in &snapshot.events {
            match event {
                SimEvent::TileDestroyed { tile } => {
                    self.solid.remove(tile);
                }
                SimEvent::TileRepaired { tile } => {
                    self.solid.insert(*tile);
                }
                _ => {}
            }
        }

        let mut reports = Vec::new();

        for enemy in &snapshot.enemies {
            let (position, velocity, grounded, blocked) =
                self.resolve_body(enemy.position, enemy.velocity, dt);
            if let Some(zone) = self.hazard {
                if zone.contains(&position) {
                    reports.push(HostEvent::HazardContact { entity: enemy.id });
                    continue;
                }
            }
            reports.push(HostEvent::BodySync {
                entity: enemy.id,
                position,
                velocity,
            });
            if grounded {
                reports.push(HostEvent::Grounded { entity: enemy.id });
            }
            if let (Some(tile), true) = (blocked, enemy.attacking) {
                reports.push(HostEvent::WallContact {
                    entity: enemy.id,
                    tile,
                });
            }
        }

        for projectile in &snapshot.projectiles {
            let tile = projectile.position.tile(self.tile_size);
            if self.solid.contains(&tile) {
                reports.push(HostEvent::WallContact {
                    entity: projectile.id,
                    tile,
                });
                continue;
            }
            let hit = snapshot
                .enemies
                .iter()
                .find(|e| e.position.distance_to(&projectile.position) < HIT_RADIUS);
            if let Some(enemy) = hit {
                reports.push(HostEvent::Overlap {
                    a: projectile.id,
                    b: enemy.id,
                });
            }
        }

        for (i, a) in snapshot.turrets.iter().enumerate() {
            for b in &snapshot.turrets[i + 1..] {
                if a.position.distance_to(&b.position) < self.tile_size {
                    reports.push(HostEvent::Overlap { a: a.id, b: b.id });
                }
            }
        }

        self.player = snapshot.player.as_ref().map(|player| {
            let (position, _, grounded, _) =
                self.resolve_body(player.position, player.desired_velocity, dt);
            PlayerBody { position, grounded }
        });
        if let (Some(zone), Some(player), Some(body)) = (self.hazard, &snapshot.player, self.player) {
            if zone.contains(&body.position) {
                reports.push(HostEvent::HazardContact { entity: player.id });
            }
        }

        reports
    }

    /// Gravity, floor and wall resolution for one body. Returns the resolved
    /// position and velocity, whether it rests on the floor, and the wall
    /// tile that blocked it, if any.
    fn resolve_body(
        &self,
        mut position: Position,
        mut velocity: Velocity,
        dt: f64,
    ) -> (Position, Velocity, bool, Option<TileCoord>) {
        velocity.y += GRAVITY * dt;
        position.y += GRAVITY * dt * dt;

        let rest_y = self.floor_y - BODY_HALF;
        let grounded = position.y >= rest_y;
        if grounded {
            position.y = rest_y;
            velocity.y = velocity.y.min(0.0);
        }

        let mut blocked = None;
        if velocity.x != 0.0 {
            let edge_x = if velocity.x > 0.0 {
                position.x + BODY_HALF
            } else {
                position.x - BODY_HALF
            };
            let tile = Position::new(edge_x, position.y).tile(self.tile_size);
            if self.solid.contains(&tile) {
                let face = if velocity.x > 0.0 {
                    f64::from(tile.col) * self.tile_size - BODY_HALF
                } else {
                    f64::from(tile.col + 1) * self.tile_size + BODY_HALF
                };
                position.x = face;
                velocity.x = 0.0;
                blocked = Some(tile);
            }
        }

        (position, velocity, grounded, blocked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cavecrawl_core::enums::EnemyState;
    use cavecrawl_core::state::{EnemyView, ProjectileView};
    use cavecrawl_core::enums::ProjectileSource;
    use cavecrawl_core::types::EntityId;

    const DT: f64 = 1.0 / 60.0;

    fn physics() -> FlatFloorPhysics {
        let level = Level {
            walls: vec![TileCoord::new(5, 8), TileCoord::new(5, 9)],
            ..Level::default()
        };
        FlatFloorPhysics::new(&level, 160.0, None)
    }

    fn enemy(x: f64, y: f64, vx: f64, state: EnemyState) -> EnemyView {
        EnemyView {
            id: EntityId(7),
            position: Position::new(x, y),
            velocity: Velocity::new(vx, 0.0),
            state,
            hitpoints: 4,
            attacking: state == EnemyState::Attacking,
        }
    }

    #[test]
    fn test_enemy_on_floor_is_grounded() {
        let mut physics = physics();
        let snap = GameStateSnapshot {
            enemies: vec![enemy(20.0, 170.0, 0.0, EnemyState::Falling)],
            ..Default::default()
        };
        let reports = physics.step(&snap, DT);
        assert!(reports.contains(&HostEvent::Grounded { entity: EntityId(7) }));
        let synced = reports.iter().find_map(|r| match r {
            HostEvent::BodySync { position, .. } => Some(*position),
            _ => None,
        });
        assert_eq!(synced.unwrap().y, 156.0);
    }

    #[test]
    fn test_attacking_enemy_hits_wall() {
        let mut physics = physics();
        let snap = GameStateSnapshot {
            enemies: vec![enemy(77.0, 140.0, 50.0, EnemyState::Attacking)],
            ..Default::default()
        };
        let reports = physics.step(&snap, DT);
        assert!(reports.contains(&HostEvent::WallContact {
            entity: EntityId(7),
            tile: TileCoord::new(5, 8),
        }));
    }

    #[test]
    fn test_running_enemy_is_blocked_without_grab() {
        let mut physics = physics();
        let snap = GameStateSnapshot {
            enemies: vec![enemy(77.0, 156.0, 8.0, EnemyState::Running)],
            ..Default::default()
        };
        let reports = physics.step(&snap, DT);
        assert!(!reports
            .iter()
            .any(|r| matches!(r, HostEvent::WallContact { .. })));
        let synced = reports.iter().find_map(|r| match r {
            HostEvent::BodySync { position, velocity, .. } => Some((*position, *velocity)),
            _ => None,
        });
        let (pos, vel) = synced.unwrap();
        assert_eq!(pos.x, 76.0);
        assert_eq!(vel.x, 0.0);
    }

    #[test]
    fn test_destroyed_tile_stops_blocking() {
        let mut physics = physics();
        let snap = GameStateSnapshot {
            events: vec![SimEvent::TileDestroyed {
                tile: TileCoord::new(5, 9),
            }],
            ..Default::default()
        };
        physics.step(&snap, DT);
        assert!(!physics.is_solid(&TileCoord::new(5, 9)));
        assert!(physics.is_solid(&TileCoord::new(5, 8)));
    }

    #[test]
    fn test_projectile_overlap_and_wall() {
        let mut physics = physics();
        let shot = |id: u64, x: f64, y: f64| ProjectileView {
            id: EntityId(id),
            position: Position::new(x, y),
            velocity: Velocity::new(400.0, 0.0),
            life_fraction: 1.0,
            source: ProjectileSource::Turret,
        };
        let snap = GameStateSnapshot {
            enemies: vec![enemy(20.0, 100.0, 0.0, EnemyState::Falling)],
            projectiles: vec![shot(1, 22.0, 101.0), shot(2, 85.0, 135.0)],
            ..Default::default()
        };
        let reports = physics.step(&snap, DT);
        assert!(reports.contains(&HostEvent::Overlap {
            a: EntityId(1),
            b: EntityId(7),
        }));
        assert!(reports.contains(&HostEvent::WallContact {
            entity: EntityId(2),
            tile: TileCoord::new(5, 8),
        }));
    }

    #[test]
    fn test_hazard_zone_crushes() {
        let level = Level::default();
        let zone = Zone {
            min: Position::new(0.0, 0.0),
            max: Position::new(50.0, 200.0),
        };
        let mut physics = FlatFloorPhysics::new(&level, 160.0, Some(zone));
        let snap = GameStateSnapshot {
            enemies: vec![enemy(20.0, 100.0, 0.0, EnemyState::Running)],
            ..Default::default()
        };
        let reports = physics.step(&snap, DT);
        assert_eq!(reports, vec![HostEvent::HazardContact { entity: EntityId(7) }]);
    }
}
