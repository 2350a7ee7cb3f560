//! Simulation constants and tuning defaults.
//!
//! Most of these seed `GameRules::default()`; the rules struct is what the
//! simulation actually reads, so hosts can override any of them.

/// Nominal host tick rate (Hz). The core accepts any delta; this is only the
/// default used by the headless runner.
pub const TICK_RATE: u32 = 60;

/// Seconds per tick at the nominal rate.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Edge length of one terrain tile in pixels.
pub const TILE_SIZE: f64 = 16.0;

// --- Crawler ---

pub const HEALTH_MAX: i32 = 100;
pub const HEALTH_MIN: i32 = 0;

/// Health lost per destroyed wall tile.
pub const TILE_DESTROY_PENALTY: i32 = 10;

/// Health regained per repaired wall tile.
pub const TILE_REPAIR_BONUS: i32 = 10;

/// Damage count at which a tile is destroyed.
pub const TILE_DESTROY_THRESHOLD: u8 = 3;

// --- Enemies ---

pub const ENEMY_HITPOINTS: i32 = 4;

/// Horizontal drift while falling (px/s, toward the crawler's rear).
pub const ENEMY_FALL_DRIFT: f64 = -16.0;

/// Forward run speed after landing (px/s).
pub const ENEMY_RUN_SPEED: f64 = 8.0;

/// Seconds between landing and the jump attack, and after each attack.
pub const ENEMY_ATTACK_COOLDOWN: f64 = 1.0;

/// Horizontal reach of the jump attack (px).
pub const ENEMY_JUMP_REACH: f64 = 100.0;

/// Vertical rise of the jump attack is rolled in this band (px).
pub const ENEMY_JUMP_RISE_MIN: f64 = 80.0;
pub const ENEMY_JUMP_RISE_MAX: f64 = 120.0;

/// Speed of the jump attack (px/s).
pub const ENEMY_JUMP_SPEED: f64 = 300.0;

/// Divisor applied to horizontal velocity each tick while partying.
pub const PARTY_VELOCITY_DECAY: f64 = 1.2;

/// Upward bounce impulse while partying is rolled in this band (px/s).
pub const PARTY_BOUNCE_MIN: f64 = 20.0;
pub const PARTY_BOUNCE_MAX: f64 = 60.0;

/// Maximum random horizontal offset applied at a spawn point (px).
pub const SPAWN_JITTER: f64 = 100.0;

/// Spawn gate probability once the walls have been breached.
pub const SPAWN_PROBABILITY: f64 = 0.75;

/// Initial countdown before the first spawn wave (seconds).
pub const SPAWN_INITIAL_COOLDOWN: f64 = 1.0;

/// Default difficulty ramp: (elapsed seconds threshold, spawn interval seconds).
pub const SPAWN_SCHEDULE: [(f64, f64); 6] = [
    (0.0, 10.0),
    (10.0, 8.0),
    (30.0, 6.0),
    (50.0, 4.0),
    (70.0, 2.0),
    (90.0, 0.5),
];

// --- Turrets ---

pub const TURRET_MAX_RANGE: f64 = 200.0;
pub const TURRET_INITIAL_COOLDOWN: f64 = 1.0;
pub const TURRET_FIRE_INTERVAL: f64 = 0.2;
pub const TURRET_SHOT_SPEED: f64 = 400.0;
pub const TURRET_SHOT_LIFETIME: f64 = 0.5;

/// Offset of the turret head from the turret base (px).
pub const TURRET_HEAD_OFFSET: (f64, f64) = (4.0, 4.0);

/// Initial head orientation (radians).
pub const TURRET_HEAD_INITIAL_ANGLE: f64 = -3.0;

/// Sentinels used by the single-pass target scan.
pub const TARGET_SCAN_HP_SENTINEL: i32 = 10_000;
pub const TARGET_SCAN_DISTANCE_SENTINEL: f64 = 100_000.0;

// --- Projectiles ---

pub const PROJECTILE_DAMAGE: i32 = 1;

// --- Player ---

pub const PLAYER_WALK_SPEED: f64 = 100.0;
pub const PLAYER_JUMP_SPEED: f64 = 180.0;
pub const PLAYER_VELOCITY_DECAY: f64 = 1.3;
pub const PLAYER_STOP_THRESHOLD: f64 = 0.5;
pub const PLAYER_SHOT_COUNT: u32 = 3;
pub const PLAYER_SHOT_REACH: f64 = 8.0;
pub const PLAYER_SHOT_SPEED: f64 = 200.0;
pub const PLAYER_SHOT_LIFETIME: f64 = 0.25;

// --- Economy ---

/// Rock moved from processable to processed per conversion step.
pub const PROCESS_QUANTUM: f64 = 0.05;

/// Station proximity radius (tiles).
pub const STATION_RADIUS_TILES: f64 = 1.0;

/// Minimum spacing between "process" sound cues (seconds).
pub const PROCESS_SOUND_INTERVAL: f64 = 0.4;

// --- Repair ---

/// Repair proximity radius (tiles).
pub const REPAIR_RADIUS_TILES: f64 = 2.2;

/// Work time required to repair one tile (seconds).
pub const REPAIR_DURATION: f64 = 1.5;

/// Spacing between dust/fix cues while repairing (seconds).
pub const REPAIR_EFFECT_INTERVAL: f64 = 0.3;

// --- Effects ---

pub const PARTICLES_TILE_CRUMBLE: u32 = 10;
pub const PARTICLES_SPARK: u32 = 3;
pub const PARTICLES_HIT: u32 = 2;
pub const PARTICLES_DEATH: u32 = 10;
pub const PARTICLES_DUST: u32 = 2;
