//! Destructible terrain for CAVECRAWL.
//!
//! Wall tile presence, damage accumulation, destruction and repair.

pub use cavecrawl_core as core;

pub mod damage;
pub mod grid;

pub use damage::TerrainDamageTracker;
pub use grid::TerrainGrid;

#[cfg(test)]
mod tests;
