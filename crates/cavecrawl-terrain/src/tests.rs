//! Tests for wall damage, destruction and repair.

use cavecrawl_core::events::SimEvent;
use cavecrawl_core::rules::TerrainRules;
use cavecrawl_core::types::{CrawlerHealth, Position, TileCoord};
use proptest::prelude::*;

use crate::damage::TerrainDamageTracker;
use crate::grid::TerrainGrid;

fn tracker_with_walls(walls: &[(i32, i32)]) -> TerrainDamageTracker {
    let grid = TerrainGrid::new(16.0, walls.iter().map(|&(c, r)| TileCoord::new(c, r)));
    TerrainDamageTracker::new(grid, TerrainRules::default())
}

// ---- Destruction ----

#[test]
fn test_three_hits_destroy_tile_on_tick() {
    let mut terrain = tracker_with_walls(&[(5, 5), (6, 5)]);
    let mut health = CrawlerHealth::default();
    let mut events = Vec::new();
    let tile = TileCoord::new(5, 5);

    for _ in 0..3 {
        assert!(terrain.damage_tile(tile));
    }
    // Nothing happens until the scan runs.
    assert!(terrain.grid().is_solid(&tile));
    assert_eq!(terrain.damage_of(&tile), 3);

    let destroyed = terrain.tick(&mut health, &mut events);
    assert_eq!(destroyed, vec![tile]);
    assert!(!terrain.grid().is_solid(&tile));
    assert!(terrain.is_destroyed(&tile));
    assert_eq!(terrain.damage_of(&tile), 0, "counter removed on destruction");
    assert_eq!(health.value(), 90);
    assert!(events.contains(&SimEvent::TileDestroyed { tile }));

    // The neighbour is untouched.
    assert!(terrain.grid().is_solid(&TileCoord::new(6, 5)));
}

#[test]
fn test_two_hits_do_not_destroy() {
    let mut terrain = tracker_with_walls(&[(1, 1)]);
    let mut health = CrawlerHealth::default();
    let mut events = Vec::new();
    let tile = TileCoord::new(1, 1);

    terrain.damage_tile(tile);
    terrain.damage_tile(tile);
    assert!(terrain.tick(&mut health, &mut events).is_empty());
    assert_eq!(terrain.damage_of(&tile), 2);
    assert!(terrain.grid().is_solid(&tile));
    assert_eq!(health.value(), 100);
    assert!(events.is_empty());
}

#[test]
fn test_damage_on_non_wall_is_ignored() {
    let mut terrain = tracker_with_walls(&[(1, 1)]);
    assert!(!terrain.damage_tile(TileCoord::new(9, 9)));
    assert_eq!(terrain.damaged().count(), 0);
}

#[test]
fn test_damage_on_destroyed_tile_is_ignored() {
    let mut terrain = tracker_with_walls(&[(2, 2)]);
    let mut health = CrawlerHealth::default();
    let mut events = Vec::new();
    let tile = TileCoord::new(2, 2);
    for _ in 0..3 {
        terrain.damage_tile(tile);
    }
    terrain.tick(&mut health, &mut events);

    assert!(!terrain.damage_tile(tile), "destroyed tiles have no geometry to damage");
    assert_eq!(terrain.damage_of(&tile), 0);
}

#[test]
fn test_health_penalty_clamps_at_zero() {
    let mut terrain = tracker_with_walls(&[(0, 0)]);
    let mut health = CrawlerHealth::new(5);
    let mut events = Vec::new();
    for _ in 0..3 {
        terrain.damage_tile(TileCoord::new(0, 0));
    }
    terrain.tick(&mut health, &mut events);
    assert_eq!(health.value(), 0);
}

#[test]
fn test_multiple_tiles_destroyed_in_one_tick() {
    let mut terrain = tracker_with_walls(&[(0, 0), (1, 0), (2, 0)]);
    let mut health = CrawlerHealth::default();
    let mut events = Vec::new();
    for tile in [TileCoord::new(2, 0), TileCoord::new(0, 0)] {
        for _ in 0..3 {
            terrain.damage_tile(tile);
        }
    }
    let destroyed = terrain.tick(&mut health, &mut events);
    assert_eq!(destroyed, vec![TileCoord::new(0, 0), TileCoord::new(2, 0)]);
    assert_eq!(health.value(), 80);
    assert_eq!(terrain.destroyed_total(), 2);
    assert!(terrain.is_eroded());
}

// ---- Repair ----

#[test]
fn test_repair_restores_tile_and_health() {
    let mut terrain = tracker_with_walls(&[(5, 5)]);
    let mut health = CrawlerHealth::default();
    let mut events = Vec::new();
    let tile = TileCoord::new(5, 5);
    for _ in 0..3 {
        terrain.damage_tile(tile);
    }
    terrain.tick(&mut health, &mut events);
    assert_eq!(health.value(), 90);

    events.clear();
    assert!(terrain.repair(tile, &mut health, &mut events));
    assert!(terrain.grid().is_solid(&tile));
    assert_eq!(terrain.destroyed_count(), 0);
    assert_eq!(health.value(), 100);
    assert_eq!(events, vec![SimEvent::TileRepaired { tile }]);
}

#[test]
fn test_repair_non_member_is_noop() {
    let mut terrain = tracker_with_walls(&[(1, 1)]);
    let mut health = CrawlerHealth::new(70);
    let mut events = Vec::new();
    terrain.damage_tile(TileCoord::new(1, 1));

    assert!(!terrain.repair(TileCoord::new(1, 1), &mut health, &mut events));
    assert!(!terrain.repair(TileCoord::new(4, 4), &mut health, &mut events));

    assert_eq!(health.value(), 70);
    assert!(events.is_empty());
    assert_eq!(terrain.damage_of(&TileCoord::new(1, 1)), 1);
    assert!(terrain.grid().is_solid(&TileCoord::new(1, 1)));
    assert!(!terrain.grid().is_solid(&TileCoord::new(4, 4)));
}

#[test]
fn test_grid_maps_positions_to_tiles() {
    let terrain = tracker_with_walls(&[(2, 3)]);
    let grid = terrain.grid();
    assert_eq!(grid.tile_at(&Position::new(40.0, 50.0)), TileCoord::new(2, 3));
    assert_eq!(grid.tile_at(&Position::new(-1.0, 0.0)), TileCoord::new(-1, 0));
    assert_eq!(grid.tile_center(&TileCoord::new(2, 3)), Position::new(40.0, 56.0));
}

// ---- Properties ----

proptest! {
    /// Damage counters stay below the threshold after every scan, and a tile
    /// is never both solid and destroyed.
    #[test]
    fn prop_counters_below_threshold_after_tick(
        hits in proptest::collection::vec((0i32..4, 0i32..4), 0..60),
    ) {
        let walls: Vec<(i32, i32)> = (0..4).flat_map(|c| (0..4).map(move |r| (c, r))).collect();
        let mut terrain = tracker_with_walls(&walls);
        let mut health = CrawlerHealth::default();
        let mut events = Vec::new();

        for (c, r) in hits {
            terrain.damage_tile(TileCoord::new(c, r));
            terrain.tick(&mut health, &mut events);
            for (_, count) in terrain.damaged() {
                prop_assert!(count < 3);
            }
        }
        for tile in terrain.destroyed() {
            prop_assert!(!terrain.grid().is_solid(tile));
        }
        let expected = 100 - 10 * terrain.destroyed_count() as i32;
        prop_assert_eq!(health.value(), expected.max(0));
    }
}
