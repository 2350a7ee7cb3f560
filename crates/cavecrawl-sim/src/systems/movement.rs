//! Kinematic integration system.
//!
//! Updates Position from Velocity: position += velocity * dt. There is no
//! gravity here; the host physics owns it and reports back via `BodySync`.

use hecs::World;

use cavecrawl_core::types::{Position, Velocity};

/// Integrate every entity with Position + Velocity.
pub fn run(world: &mut World, dt: f64) {
    for (_entity, (pos, vel)) in world.query_mut::<(&mut Position, &Velocity)>() {
        pos.x += vel.x * dt;
        pos.y += vel.y * dt;
    }
}
