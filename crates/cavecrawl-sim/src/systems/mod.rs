//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions over `&mut World` plus the engine-owned state
//! they need. Per-entity state lives in components; session state lives on
//! the engine.

pub mod cleanup;
pub mod contacts;
pub mod economy;
pub mod enemy_ai;
pub mod movement;
pub mod player;
pub mod projectiles;
pub mod repair;
pub mod snapshot;
pub mod spawner;
pub mod terrain;
pub mod turret_targeting;
