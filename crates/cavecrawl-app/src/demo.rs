//! Built-in level used when no level file is given.
//!
//! The crawler sits on the right: a wall column facing the cave, two turrets
//! on its roof, the player and the processing station inside. Enemies drop
//! in from the left.

use cavecrawl_core::level::{marker_names, Level, Marker};
use cavecrawl_core::types::{Position, TileCoord};

use crate::physics::Zone;

/// Floor height (px) of the demo cave.
pub const FLOOR_Y: f64 = 160.0;

const WALL_COL: i32 = 20;

pub fn demo_level() -> Level {
    Level {
        tile_size: 16.0,
        markers: vec![
            Marker::new(marker_names::SPAWN_POINT, 16.0, 40.0),
            Marker::new(marker_names::SPAWN_POINT, 64.0, 24.0),
            Marker::new(marker_names::TURRET, 344.0, 52.0),
            Marker::new(marker_names::TURRET, 424.0, 52.0),
            Marker::new(marker_names::PLAYER, 400.0, 150.0),
            Marker::new(marker_names::STATION, 448.0, 150.0),
            Marker::new(marker_names::CAMERA_FOCUS, 240.0, 80.0),
        ],
        walls: (4..=9).map(|row| TileCoord::new(WALL_COL, row)).collect(),
    }
}

/// The crawler's front wheels: anything resting on the floor right in front
/// of the wall is crushed.
pub fn wheel_zone() -> Zone {
    Zone {
        min: Position::new(296.0, FLOOR_Y - 4.0),
        max: Position::new(318.0, FLOOR_Y),
    }
}
