//! Cleanup: removes entities collected for despawn during a phase.

use hecs::{Entity, World};

use cavecrawl_core::enums::EntityKind;

/// Despawn every entity in the buffer and leave it empty.
/// Entities already gone (despawned twice in one tick) are skipped.
pub fn flush(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// Despawn every entity of `kind`. Returns how many were removed.
pub fn despawn_kind(world: &mut World, kind: EntityKind, despawn_buffer: &mut Vec<Entity>) -> usize {
    despawn_buffer.clear();
    for (entity, tag) in world.query_mut::<&EntityKind>() {
        if *tag == kind {
            despawn_buffer.push(entity);
        }
    }
    let count = despawn_buffer.len();
    flush(world, despawn_buffer);
    count
}
