//! TerrainGrid: which destructible wall tiles currently have geometry.

use std::collections::BTreeSet;

use cavecrawl_core::types::{Position, TileCoord};

/// Destructible wall layer. The host owns the rendered tilemap; this is the
/// simulation's authoritative view of which wall tiles exist.
#[derive(Debug, Clone)]
pub struct TerrainGrid {
    tile_size: f64,
    solid: BTreeSet<TileCoord>,
}

impl TerrainGrid {
    pub fn new(tile_size: f64, walls: impl IntoIterator<Item = TileCoord>) -> Self {
        Self {
            tile_size,
            solid: walls.into_iter().collect(),
        }
    }

    /// Whether the tile currently has wall geometry.
    pub fn is_solid(&self, tile: &TileCoord) -> bool {
        self.solid.contains(tile)
    }

    /// Remove wall geometry. Returns false if there was none.
    pub fn remove(&mut self, tile: &TileCoord) -> bool {
        self.solid.remove(tile)
    }

    /// Restore wall geometry. Returns false if it was already present.
    pub fn restore(&mut self, tile: TileCoord) -> bool {
        self.solid.insert(tile)
    }

    /// Tile containing a world position.
    pub fn tile_at(&self, pos: &Position) -> TileCoord {
        pos.tile(self.tile_size)
    }

    /// World-space center of a tile.
    pub fn tile_center(&self, tile: &TileCoord) -> Position {
        tile.center(self.tile_size)
    }
}
