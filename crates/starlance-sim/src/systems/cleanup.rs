//! End-of-tick entity removal.
//!
//! Spent projectiles are despawned through a reusable buffer; despawning
//! mid-iteration would invalidate the query borrow. Dead ships are kept as
//! entities with `alive == false` so snapshots and weak target handles can
//! still observe them.

use hecs::{Entity, World};

use starlance_core::components::Projectile;

pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();
    for (entity, projectile) in world.query_mut::<&Projectile>() {
        if !projectile.alive {
            despawn_buffer.push(entity);
        }
    }
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
