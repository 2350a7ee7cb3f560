//! Entity spawn factories for setting up the simulation world.
//!
//! Creates turret, enemy, player and projectile entities with their
//! component bundles, and reads the level markers at session start.

use hecs::{Entity, World};

use cavecrawl_core::components::*;
use cavecrawl_core::constants::TURRET_HEAD_INITIAL_ANGLE;
use cavecrawl_core::enums::*;
use cavecrawl_core::level::{marker_names, Level};
use cavecrawl_core::rules::{EnemyRules, GameRules, TurretRules};
use cavecrawl_core::types::{EntityId, Position, TileCoord, Velocity};

use cavecrawl_enemy_ai::actions;

/// What the engine keeps from the level after the world is populated.
#[derive(Debug, Clone, Default)]
pub struct LevelLayout {
    pub spawn_points: Vec<Position>,
    pub station: Option<TileCoord>,
    pub player: Option<Entity>,
    pub camera_focus: Position,
}

/// Populate the world from the level's markers. Missing markers leave the
/// matching subsystem inert; unknown ones are logged and skipped.
pub fn setup_level(world: &mut World, level: &Level, rules: &GameRules) -> LevelLayout {
    let mut layout = LevelLayout::default();

    for marker in level.unknown_markers() {
        tracing::warn!(name = %marker.name, x = marker.x, y = marker.y, "ignoring unknown level marker");
    }

    for marker in level.markers_named(marker_names::TURRET) {
        spawn_turret(world, snap_to_grid(marker.position(), level.tile_size), &rules.turret);
    }

    layout.spawn_points = level
        .markers_named(marker_names::SPAWN_POINT)
        .map(|m| m.position())
        .collect();

    layout.player = level
        .find_marker(marker_names::PLAYER)
        .map(|m| spawn_player(world, m.position()));

    layout.station = level
        .find_marker(marker_names::STATION)
        .map(|m| m.position().tile(level.tile_size));

    layout.camera_focus = level
        .find_marker(marker_names::CAMERA_FOCUS)
        .map(|m| m.position())
        .unwrap_or_default();

    tracing::info!(
        turrets = level.markers_named(marker_names::TURRET).count(),
        spawn_points = layout.spawn_points.len(),
        player = layout.player.is_some(),
        station = layout.station.is_some(),
        walls = level.walls.len(),
        "level loaded"
    );

    layout
}

/// Snap a position down to the top-left corner of its tile.
pub fn snap_to_grid(pos: Position, tile_size: f64) -> Position {
    Position::new(
        (pos.x / tile_size).floor() * tile_size,
        (pos.y / tile_size).floor() * tile_size,
    )
}

pub fn spawn_turret(world: &mut World, position: Position, rules: &TurretRules) -> Entity {
    world.spawn((
        EntityKind::Turret,
        position,
        TurretState {
            head_angle: TURRET_HEAD_INITIAL_ANGLE,
            cooldown: rules.initial_cooldown,
            max_range: rules.max_range,
        },
    ))
}

pub fn spawn_enemy(world: &mut World, position: Position, rules: &EnemyRules) -> Entity {
    world.spawn((
        EntityKind::Enemy,
        position,
        Velocity::zero(),
        Hitpoints(rules.hitpoints),
        actions::new_brain(rules.attack_cooldown),
    ))
}

pub fn spawn_player(world: &mut World, position: Position) -> Entity {
    world.spawn((
        EntityKind::Player,
        position,
        Velocity::zero(),
        PlayerState::default(),
    ))
}

/// Parameters for a single shot.
#[derive(Debug, Clone, Copy)]
pub struct ShotParams {
    pub origin: Position,
    pub target: Position,
    pub speed: f64,
    pub lifetime: f64,
    pub damage: i32,
    pub source: ProjectileSource,
}

/// Spawn a projectile flying in a straight line from `origin` toward
/// `target`. It never re-aims.
pub fn spawn_projectile(world: &mut World, shot: ShotParams) -> Entity {
    world.spawn((
        EntityKind::Projectile,
        shot.origin,
        Velocity::toward(&shot.origin, &shot.target, shot.speed),
        ProjectileState {
            target: shot.target,
            speed: shot.speed,
            lifetime_remaining: shot.lifetime,
            lifetime_total: shot.lifetime,
            damage: shot.damage,
            source: shot.source,
        },
    ))
}

/// Host-facing handle for an entity.
pub fn entity_id(entity: Entity) -> EntityId {
    EntityId(entity.to_bits().get())
}

/// Resolve a host handle. Malformed handles resolve to `None`; handles of
/// despawned entities resolve but no longer match anything in the world.
pub fn resolve(id: EntityId) -> Option<Entity> {
    Entity::from_bits(id.0)
}
