//! Player intent: turns latched input into a desired velocity and shots.
//!
//! The player's body lives in the host physics. The engine computes the
//! velocity the host should apply and spawns the player's shots.

use hecs::{Entity, World};

use cavecrawl_core::commands::PlayerInput;
use cavecrawl_core::components::PlayerState;
use cavecrawl_core::constants::{PLAYER_SHOT_REACH, PLAYER_STOP_THRESHOLD};
use cavecrawl_core::enums::{ParticleKind, ProjectileSource};
use cavecrawl_core::events::SimEvent;
use cavecrawl_core::rules::PlayerRules;
use cavecrawl_core::types::{Position, Velocity};

use crate::effects;
use crate::world_setup::{self, ShotParams};

/// Horizontal and vertical intent for one tick.
pub fn desired_velocity(
    current: Velocity,
    input: &PlayerInput,
    grounded: bool,
    rules: &PlayerRules,
) -> Velocity {
    let vx = if input.left && !input.right {
        -rules.walk_speed
    } else if input.right && !input.left {
        rules.walk_speed
    } else {
        let decayed = current.x / rules.velocity_decay;
        if decayed.abs() < PLAYER_STOP_THRESHOLD {
            0.0
        } else {
            decayed
        }
    };
    let vy = if input.up && grounded {
        -rules.jump_speed
    } else if grounded {
        0.0
    } else {
        current.y
    };
    Velocity::new(vx, vy)
}

/// Shots of a spread fired from `position`: aimed `PLAYER_SHOT_REACH`
/// ahead of the player, one pixel apart vertically.
pub fn spread(position: Position, facing_left: bool, rules: &PlayerRules) -> Vec<ShotParams> {
    let dx = if facing_left {
        -PLAYER_SHOT_REACH
    } else {
        PLAYER_SHOT_REACH
    };
    (0..rules.shot_count)
        .map(|i| ShotParams {
            origin: position,
            target: position.offset(dx, -1.0 + i as f64),
            speed: rules.shot_speed,
            lifetime: rules.shot_lifetime,
            damage: rules.shot_damage,
            source: ProjectileSource::Player,
        })
        .collect()
}

/// Apply the latched input to the player entity. Returns the number of
/// shots fired.
pub fn run(
    world: &mut World,
    player: Option<Entity>,
    input: &PlayerInput,
    rules: &PlayerRules,
    events: &mut Vec<SimEvent>,
) -> usize {
    let Some(player) = player else {
        return 0;
    };
    let Ok((pos, vel, state)) =
        world.query_one_mut::<(&mut Position, &mut Velocity, &mut PlayerState)>(player)
    else {
        return 0;
    };

    if let Some(reported) = input.position {
        *pos = reported;
    }
    let grounded = input.grounded || state.grounded;
    state.grounded = false;

    *vel = desired_velocity(*vel, input, grounded, rules);
    if input.left && !input.right {
        state.facing_left = true;
    } else if input.right && !input.left {
        state.facing_left = false;
    }

    let fire_edge = input.fire && !state.fire_was_down;
    state.fire_was_down = input.fire;
    if !fire_edge {
        return 0;
    }

    let origin = *pos;
    let shots = spread(origin, state.facing_left, rules);
    let muzzle = shots.first().map(|s| s.target).unwrap_or(origin);
    for shot in &shots {
        world_setup::spawn_projectile(world, *shot);
    }
    effects::burst(events, ParticleKind::Puff, muzzle, 1);
    shots.len()
}
