//! Projectile system: straight-line flight and out-of-bounds removal.

use hecs::World;

use defender_core::components::Projectile;
use defender_core::constants::LASER_OOB_MARGIN;
use defender_core::enums::ProjectileKind;
use defender_core::tuning::Tuning;
use defender_core::types::Position;

/// Integrate positions and flag projectiles that left the playfield.
pub fn run(world: &mut World, tuning: &Tuning, dt: f32) {
    for (_entity, (projectile, pos)) in world.query_mut::<(&mut Projectile, &mut Position)>() {
        if projectile.destroyed {
            continue;
        }
        *pos = pos.offset(projectile.direction * projectile.speed * dt);
        if is_out_of_bounds(projectile.kind, pos, tuning) {
            projectile.destroyed = true;
        }
    }
}

/// Lasers get a horizontal grace margin; missiles are gone as soon as
/// their centre leaves the arena on any side.
pub fn is_out_of_bounds(kind: ProjectileKind, pos: &Position, tuning: &Tuning) -> bool {
    match kind {
        ProjectileKind::Laser => {
            pos.x < -LASER_OOB_MARGIN || pos.x > tuning.arena_width + LASER_OOB_MARGIN
        }
        ProjectileKind::Missile => {
            !tuning.arena().contains(pos)
        }
    }
}
