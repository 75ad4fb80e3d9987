//! Cleanup system: removes destroyed entities at the end of the frame.

use hecs::{Entity, World};

use defender_core::components::{Humanoid, Lander, Projectile};

/// Despawn destroyed projectiles, landers and humanoids.
/// Uses a pre-allocated buffer to avoid per-frame allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, projectile) in world.query_mut::<&Projectile>() {
        if projectile.destroyed {
            despawn_buffer.push(entity);
        }
    }

    for (entity, lander) in world.query_mut::<&Lander>() {
        if lander.destroyed {
            despawn_buffer.push(entity);
        }
    }

    for (entity, humanoid) in world.query_mut::<&Humanoid>() {
        if humanoid.is_destroyed() {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
