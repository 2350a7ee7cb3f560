//! Headless host for the cave crawler simulation.
//!
//! Supplies what the engine leaves to its host: level loading, a simple
//! physics collaborator, a scripted player and a fixed-step loop.

pub mod autopilot;
pub mod config;
pub mod demo;
pub mod game_loop;
pub mod physics;
