//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Enemy behavior state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyState {
    /// Dropping from the spawn point, drifting backward.
    #[default]
    Falling,
    /// Touched ground this tick; starts running next evaluation.
    Landed,
    /// Running forward while the attack cooldown counts down.
    Running,
    /// Launching the jump attack.
    Jumping,
    /// Airborne attack; waiting for wall contact.
    Attacking,
    /// Latched onto a wall tile for one tick.
    Grabbing,
    /// Crawler destroyed; harmless bouncing.
    Partying,
}

/// Closed set of entity kinds living in the simulation world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Enemy,
    Turret,
    Projectile,
    Player,
}

/// Who fired a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileSource {
    Turret,
    Player,
}

/// Particle effect kinds the host knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticleKind {
    Dust,
    Puff,
    Crumble,
    Spark,
    Blood,
}

/// Top-level session phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Simulation advancing normally.
    #[default]
    Running,
    /// Host-requested pause; nothing advances.
    Paused,
    /// Crawler or player destroyed. Terminal.
    Defeated,
}
