//! Projectile lifetime management.
//!
//! Projectiles fly straight toward their fixed aim point (integrated by the
//! movement system) and never re-aim. This system ages them and removes the
//! expired or stalled ones.

use hecs::{Entity, World};

use cavecrawl_core::components::ProjectileState;
use cavecrawl_core::types::Velocity;

/// Lifetimes within this of zero count as expired, so that a run of ticks
/// summing to the lifetime always expires it despite float drift.
const LIFETIME_EPSILON: f64 = 1e-9;

/// Age every projectile by `dt` and despawn the expired ones.
/// Returns the number removed.
pub fn run(world: &mut World, dt: f64, despawn_buffer: &mut Vec<Entity>) -> usize {
    despawn_buffer.clear();
    for (entity, (projectile, vel)) in world.query_mut::<(&mut ProjectileState, &Velocity)>() {
        projectile.lifetime_remaining -= dt;
        let stalled = vel.speed() == 0.0;
        if projectile.lifetime_remaining <= LIFETIME_EPSILON || stalled {
            despawn_buffer.push(entity);
        }
    }
    let removed = despawn_buffer.len();
    super::cleanup::flush(world, despawn_buffer);
    removed
}

/// Remaining lifetime as a fraction of the initial lifetime, in `[0, 1]`.
pub fn life_fraction(projectile: &ProjectileState) -> f64 {
    if projectile.lifetime_total <= 0.0 {
        return 0.0;
    }
    (projectile.lifetime_remaining / projectile.lifetime_total).clamp(0.0, 1.0)
}
