//! Damage accumulation, destruction and repair of wall tiles.
//!
//! Enemies report grabbed tiles through `damage_tile`. Destruction is
//! deferred to `tick`, which the engine runs after every enemy update of
//! the frame, so a third grab destroys the tile within the same frame.

use std::collections::{BTreeMap, BTreeSet};

use cavecrawl_core::constants::PARTICLES_TILE_CRUMBLE;
use cavecrawl_core::enums::ParticleKind;
use cavecrawl_core::events::SimEvent;
use cavecrawl_core::rules::TerrainRules;
use cavecrawl_core::types::{CrawlerHealth, TileCoord};

use crate::grid::TerrainGrid;

#[derive(Debug, Clone)]
pub struct TerrainDamageTracker {
    grid: TerrainGrid,
    rules: TerrainRules,
    /// Accumulated damage per tile. Below the threshold between ticks.
    damage: BTreeMap<TileCoord, u8>,
    /// Tiles removed by damage and eligible for repair. Never solid.
    destroyed: BTreeSet<TileCoord>,
    /// Tiles destroyed over the whole session.
    destroyed_total: u32,
}

impl TerrainDamageTracker {
    pub fn new(grid: TerrainGrid, rules: TerrainRules) -> Self {
        Self {
            grid,
            rules,
            damage: BTreeMap::new(),
            destroyed: BTreeSet::new(),
            destroyed_total: 0,
        }
    }

    pub fn grid(&self) -> &TerrainGrid {
        &self.grid
    }

    /// Add one point of damage to a wall tile.
    /// Returns false (and does nothing) if the tile is not solid wall.
    pub fn damage_tile(&mut self, tile: TileCoord) -> bool {
        if !self.grid.is_solid(&tile) {
            return false;
        }
        let count = self.damage.entry(tile).or_insert(0);
        *count = count.saturating_add(1);
        true
    }

    /// Destroy every tile whose damage reached the threshold.
    ///
    /// Each destruction removes the wall, moves the tile to the destroyed
    /// set, applies the health penalty and emits `TileDestroyed` plus
    /// crumble particles. Returns the destroyed tiles in row-major order.
    pub fn tick(&mut self, health: &mut CrawlerHealth, events: &mut Vec<SimEvent>) -> Vec<TileCoord> {
        let threshold = self.rules.destroy_threshold;
        let due: Vec<TileCoord> = self
            .damage
            .iter()
            .filter(|(_, &count)| count >= threshold)
            .map(|(&tile, _)| tile)
            .collect();

        for tile in &due {
            self.damage.remove(tile);
            self.grid.remove(tile);
            self.destroyed.insert(*tile);
            self.destroyed_total += 1;
            health.reduce(self.rules.destroy_penalty);

            tracing::debug!(%tile, health = health.value(), "wall tile destroyed");

            events.push(SimEvent::TileDestroyed { tile: *tile });
            events.push(SimEvent::particles(
                ParticleKind::Crumble,
                self.grid.tile_center(tile),
                PARTICLES_TILE_CRUMBLE,
            ));
        }

        due
    }

    /// Rebuild a destroyed tile and grant the health bonus.
    ///
    /// Tiles that are not in the destroyed set are left alone and the call
    /// returns false.
    pub fn repair(
        &mut self,
        tile: TileCoord,
        health: &mut CrawlerHealth,
        events: &mut Vec<SimEvent>,
    ) -> bool {
        if !self.destroyed.remove(&tile) {
            return false;
        }
        self.grid.restore(tile);
        health.add(self.rules.repair_bonus);

        tracing::debug!(%tile, health = health.value(), "wall tile repaired");

        events.push(SimEvent::TileRepaired { tile });
        true
    }

    /// Current damage count of a tile (0 if undamaged).
    pub fn damage_of(&self, tile: &TileCoord) -> u8 {
        self.damage.get(tile).copied().unwrap_or(0)
    }

    pub fn is_destroyed(&self, tile: &TileCoord) -> bool {
        self.destroyed.contains(tile)
    }

    /// Damaged tiles in row-major order.
    pub fn damaged(&self) -> impl Iterator<Item = (TileCoord, u8)> + '_ {
        self.damage.iter().map(|(&t, &c)| (t, c))
    }

    /// Destroyed tiles in row-major order.
    pub fn destroyed(&self) -> impl Iterator<Item = &TileCoord> {
        self.destroyed.iter()
    }

    pub fn destroyed_count(&self) -> usize {
        self.destroyed.len()
    }

    pub fn destroyed_total(&self) -> u32 {
        self.destroyed_total
    }

    /// Whether any wall has been breached this session.
    pub fn is_eroded(&self) -> bool {
        self.destroyed_total > 0
    }
}
