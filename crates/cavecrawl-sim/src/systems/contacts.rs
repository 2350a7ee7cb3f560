//! Host event dispatch: physics reports become gameplay operations.
//!
//! Overlaps are routed through a `(kind, kind)` table. Pairs without an
//! entry are ignored, as are reports about entities that no longer exist.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use cavecrawl_core::commands::HostEvent;
use cavecrawl_core::components::{EnemyBrain, Hitpoints, PlayerState, ProjectileState};
use cavecrawl_core::constants::{PARTICLES_DEATH, PARTICLES_HIT};
use cavecrawl_core::enums::{EntityKind, ParticleKind};
use cavecrawl_core::events::{SimEvent, SoundCue};
use cavecrawl_core::types::{EntityId, Position, TileCoord, Velocity};

use cavecrawl_enemy_ai::actions;

use crate::economy::ResourceEconomy;
use crate::effects;
use crate::systems::{enemy_ai, turret_targeting};
use crate::world_setup;

/// Everything a host event may touch.
pub struct ContactContext<'a> {
    pub world: &'a mut World,
    pub rng: &'a mut ChaCha8Rng,
    pub events: &'a mut Vec<SimEvent>,
    pub economy: &'a mut ResourceEconomy,
    /// Gameplay contacts (hits, grabs, hazards, rock) only apply while the
    /// session is running. Grounding and body syncs always apply.
    pub live: bool,
}

type OverlapHandler = fn(&mut ContactContext<'_>, Entity, Entity);

/// Handlers receive the pair in table order.
const OVERLAP_HANDLERS: [(EntityKind, EntityKind, OverlapHandler); 2] = [
    (EntityKind::Projectile, EntityKind::Enemy, projectile_hits_enemy),
    (EntityKind::Turret, EntityKind::Turret, turrets_collide),
];

/// Look up the handler for a kind pair. The flag is set when the pair must
/// be swapped to match the table order.
pub fn overlap_handler(a: EntityKind, b: EntityKind) -> Option<(OverlapHandler, bool)> {
    OVERLAP_HANDLERS.iter().find_map(|&(first, second, handler)| {
        if (a, b) == (first, second) {
            Some((handler, false))
        } else if (b, a) == (first, second) {
            Some((handler, true))
        } else {
            None
        }
    })
}

/// Apply one host event. Returns false when the event was ignored.
pub fn dispatch(ctx: &mut ContactContext<'_>, event: HostEvent) -> bool {
    match event {
        HostEvent::Grounded { entity } => grounded(ctx, entity),
        HostEvent::BodySync {
            entity,
            position,
            velocity,
        } => body_sync(ctx, entity, position, velocity),
        HostEvent::WallContact { entity, tile } if ctx.live => wall_contact(ctx, entity, tile),
        HostEvent::Overlap { a, b } if ctx.live => overlap(ctx, a, b),
        HostEvent::HazardContact { entity } if ctx.live => hazard_contact(ctx, entity),
        HostEvent::RockProduced { amount } if ctx.live => {
            if !ctx.economy.produce(amount) {
                tracing::warn!(amount, "ignoring invalid rock production");
                return false;
            }
            effects::play(ctx.events, ctx.rng, SoundCue::Rocks);
            true
        }
        // Session controls are handled by the engine.
        _ => false,
    }
}

/// Resolve a host handle to a live entity and its kind.
fn lookup(world: &World, id: EntityId) -> Option<(Entity, EntityKind)> {
    let entity = world_setup::resolve(id)?;
    let kind = world.get::<&EntityKind>(entity).ok().map(|k| *k);
    match kind {
        Some(kind) => Some((entity, kind)),
        None => {
            tracing::warn!(id = id.0, "host event for a stale entity handle");
            None
        }
    }
}

fn position_of(world: &World, entity: Entity) -> Position {
    world
        .get::<&Position>(entity)
        .map(|p| *p)
        .unwrap_or_default()
}

fn grounded(ctx: &mut ContactContext<'_>, id: EntityId) -> bool {
    let Some((entity, kind)) = lookup(ctx.world, id) else {
        return false;
    };
    match kind {
        EntityKind::Enemy => {
            if let Ok(mut brain) = ctx.world.get::<&mut EnemyBrain>(entity) {
                brain.grounded = true;
                return true;
            }
            false
        }
        EntityKind::Player => {
            if let Ok(mut state) = ctx.world.get::<&mut PlayerState>(entity) {
                state.grounded = true;
                return true;
            }
            false
        }
        _ => false,
    }
}

fn body_sync(ctx: &mut ContactContext<'_>, id: EntityId, position: Position, velocity: Velocity) -> bool {
    let Some((entity, _)) = lookup(ctx.world, id) else {
        return false;
    };
    if let Ok(mut pos) = ctx.world.get::<&mut Position>(entity) {
        *pos = position;
    }
    if let Ok(mut vel) = ctx.world.get::<&mut Velocity>(entity) {
        *vel = velocity;
    }
    true
}

fn wall_contact(ctx: &mut ContactContext<'_>, id: EntityId, tile: TileCoord) -> bool {
    let Some((entity, kind)) = lookup(ctx.world, id) else {
        return false;
    };
    match kind {
        EntityKind::Enemy => match ctx.world.get::<&mut EnemyBrain>(entity) {
            Ok(mut brain) => {
                let accepted = actions::grab(&mut brain, tile);
                if accepted {
                    tracing::debug!(id = id.0, %tile, "enemy grabbed wall");
                }
                accepted
            }
            Err(_) => false,
        },
        EntityKind::Projectile => ctx.world.despawn(entity).is_ok(),
        _ => false,
    }
}

fn overlap(ctx: &mut ContactContext<'_>, a: EntityId, b: EntityId) -> bool {
    let (Some((ea, ka)), Some((eb, kb))) = (lookup(ctx.world, a), lookup(ctx.world, b)) else {
        return false;
    };
    if ea == eb {
        return false;
    }
    match overlap_handler(ka, kb) {
        Some((handler, false)) => {
            handler(ctx, ea, eb);
            true
        }
        Some((handler, true)) => {
            handler(ctx, eb, ea);
            true
        }
        None => false,
    }
}

fn projectile_hits_enemy(ctx: &mut ContactContext<'_>, projectile: Entity, enemy: Entity) {
    let damage = match ctx.world.get::<&ProjectileState>(projectile) {
        Ok(state) => state.damage,
        Err(_) => return,
    };
    let remaining = match ctx.world.get::<&mut Hitpoints>(enemy) {
        Ok(mut hp) => actions::get_hit(&mut hp, damage),
        Err(_) => return,
    };
    let pos = position_of(ctx.world, enemy);
    tracing::debug!(
        id = world_setup::entity_id(enemy).0,
        remaining,
        "enemy hit"
    );
    effects::burst(ctx.events, ParticleKind::Blood, pos, PARTICLES_HIT);
    effects::play(ctx.events, ctx.rng, SoundCue::Thunk);
    let _ = ctx.world.despawn(projectile);
}

fn turrets_collide(ctx: &mut ContactContext<'_>, a: Entity, b: Entity) {
    let pa = position_of(ctx.world, a);
    let pb = position_of(ctx.world, b);
    tracing::debug!(
        a = world_setup::entity_id(a).0,
        b = world_setup::entity_id(b).0,
        "turrets collided"
    );
    turret_targeting::collision_effects(pa, pb, ctx.rng, ctx.events);
    let _ = ctx.world.despawn(a);
    let _ = ctx.world.despawn(b);
}

fn hazard_contact(ctx: &mut ContactContext<'_>, id: EntityId) -> bool {
    let Some((entity, kind)) = lookup(ctx.world, id) else {
        return false;
    };
    let pos = position_of(ctx.world, entity);
    match kind {
        EntityKind::Enemy => {
            enemy_ai::kill(entity, pos, ctx.rng, ctx.events);
            ctx.world.despawn(entity).is_ok()
        }
        EntityKind::Player => {
            tracing::info!(x = pos.x, y = pos.y, "player destroyed");
            effects::burst(ctx.events, ParticleKind::Blood, pos, PARTICLES_DEATH);
            effects::play(ctx.events, ctx.rng, SoundCue::Blorp);
            ctx.world.despawn(entity).is_ok()
        }
        _ => false,
    }
}
