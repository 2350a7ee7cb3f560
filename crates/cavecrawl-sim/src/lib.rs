//! Simulation engine for CAVECRAWL.
//!
//! Owns the hecs ECS world, runs systems in a fixed phase order each tick,
//! and produces GameStateSnapshots for the host.

pub mod economy;
pub mod effects;
pub mod engine;
pub mod systems;
pub mod world_setup;

pub use cavecrawl_core as core;
pub use engine::{SetupError, SimConfig, SimulationEngine};
