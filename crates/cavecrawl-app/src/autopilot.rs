//! Scripted player for headless runs.
//!
//! Patches the first hole in the walls, otherwise processes rock at the
//! station, and shoots at enemies that get close.

use cavecrawl_core::commands::PlayerInput;
use cavecrawl_core::state::GameStateSnapshot;
use cavecrawl_core::types::Position;

use crate::physics::PlayerBody;

/// Horizontal distance (px) at which the autopilot stops walking.
const ARRIVE_DISTANCE: f64 = 6.0;

/// Enemies closer than this (px) draw fire.
const FIRE_DISTANCE: f64 = 48.0;

#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    station: Option<Position>,
    fire_was_down: bool,
}

impl Autopilot {
    pub fn new(station: Option<Position>) -> Self {
        Self {
            station,
            fire_was_down: false,
        }
    }

    /// Controls for the next tick.
    pub fn decide(
        &mut self,
        snapshot: &GameStateSnapshot,
        body: Option<PlayerBody>,
        tile_size: f64,
    ) -> PlayerInput {
        let (Some(player), Some(body)) = (snapshot.player.as_ref(), body) else {
            return PlayerInput::default();
        };
        let mut input = PlayerInput {
            position: Some(body.position),
            grounded: body.grounded,
            ..Default::default()
        };

        let goal = snapshot
            .terrain
            .destroyed
            .first()
            .map(|tile| tile.center(tile_size))
            .or_else(|| {
                self.station
                    .filter(|_| snapshot.economy.processable_rock > 0.0)
            });

        if let Some(goal) = goal {
            let dx = goal.x - body.position.x;
            if dx.abs() > ARRIVE_DISTANCE {
                input.left = dx < 0.0;
                input.right = dx > 0.0;
            } else {
                input.work = true;
            }
        }

        let threatened = snapshot
            .enemies
            .iter()
            .any(|e| e.position.distance_to(&player.position) < FIRE_DISTANCE);
        // Tap the trigger: the engine only fires on a press.
        input.fire = threatened && !self.fire_was_down;
        self.fire_was_down = input.fire;

        input
    }
}
