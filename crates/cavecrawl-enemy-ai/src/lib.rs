//! Enemy AI for CAVECRAWL.
//!
//! Implements the enemy behavior state machine and the operations the rest
//! of the simulation may perform on an enemy.

pub mod actions;
pub mod fsm;

pub use cavecrawl_core as core;

#[cfg(test)]
mod tests;
