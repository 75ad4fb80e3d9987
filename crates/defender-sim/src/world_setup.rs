//! Entity spawn factories for setting up the simulation world.
//!
//! Creates the player, landers, humanoids, projectiles, and the fuel
//! pickup with appropriate component bundles.

use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use defender_core::components::*;
use defender_core::constants::*;
use defender_core::enums::*;
use defender_core::tuning::Tuning;
use defender_core::types::{Cooldown, Position, SimTime};

use defender_lander_ai::targeting::select_nearest;

/// Set up a fresh run: the player and the fuel pickup.
/// Landers and humanoids arrive later through the spawner.
pub fn setup_run(world: &mut World, rng: &mut ChaCha8Rng, tuning: &Tuning, now: &SimTime) {
    world.clear();
    spawn_player(world, tuning, now);
    spawn_fuel_pickup(world, rng, tuning, now);
}

/// Spawn the player at the arena centre, facing right, fully fuelled.
pub fn spawn_player(world: &mut World, tuning: &Tuning, now: &SimTime) -> Entity {
    let player = Player {
        facing: Facing::Right,
        fuel: tuning.max_fuel,
        shield_active: false,
        shield_cooldown: Cooldown::ready(tuning.shield_duration_secs, now),
        shot_cooldown: Cooldown::ready(tuning.laser_cooldown_secs, now),
        crash_cooldown: Cooldown::ready(tuning.crash_damage_cooldown_secs, now),
        missile_hit_cooldown: Cooldown::ready(tuning.missile_damage_cooldown_secs, now),
        carrying: None,
    };

    world.spawn((
        player,
        Position::new(tuning.arena_width / 2.0, tuning.arena_height / 2.0),
        Hitbox::new(PLAYER_WIDTH, PLAYER_HEIGHT),
    ))
}

/// Spawn a lander on the spawn line at a random x.
///
/// `humanoids` are the roaming humanoids the lander could chase. A spawn
/// x horizontally closer than `LANDER_SPAWN_MIN_DISTANCE` to the would-be
/// target is re-rolled a bounded number of times.
pub fn spawn_lander(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    tuning: &Tuning,
    next_order: &mut u64,
    now: &SimTime,
    humanoids: &[(Entity, Position)],
) -> Entity {
    let width = tuning.arena_width.max(1.0);
    let mut spawn = Position::new(rng.gen_range(0.0..width), LANDER_SPAWN_Y);
    let mut target = select_nearest(&spawn, humanoids.iter().copied()).map(|(_, pos)| pos);

    for _ in 1..LANDER_SPAWN_MAX_ATTEMPTS {
        let too_close =
            target.is_some_and(|t| (spawn.x - t.x).abs() < LANDER_SPAWN_MIN_DISTANCE);
        if !too_close {
            break;
        }
        spawn.x = rng.gen_range(0.0..width);
        target = select_nearest(&spawn, humanoids.iter().copied()).map(|(_, pos)| pos);
    }

    // Nothing to chase yet: drift toward a point near the spawn, kept
    // inside the band creep can reach.
    let target = target.unwrap_or_else(|| {
        let j = LANDER_INITIAL_TARGET_JITTER;
        let hi_x = (tuning.arena_width - LANDER_EDGE_MARGIN).max(LANDER_EDGE_MARGIN);
        let hi_y = (tuning.ground_y - LANDER_HOVER_CLEARANCE).max(LANDER_TOP_MARGIN);
        Position::new(
            (spawn.x + rng.gen_range(-j..j)).clamp(LANDER_EDGE_MARGIN, hi_x),
            (spawn.y + rng.gen_range(-j..j)).clamp(LANDER_TOP_MARGIN, hi_y),
        )
    });

    let lander = Lander {
        target,
        destroyed: false,
        carrying: None,
        fire_cooldown: Cooldown::started(tuning.missile_cooldown_secs, now),
    };

    let entity = world.spawn((
        lander,
        spawn,
        Hitbox::new(LANDER_WIDTH, LANDER_HEIGHT),
        take_order(next_order),
    ));
    debug!(x = spawn.x, y = spawn.y, "lander spawned");
    entity
}

/// Spawn a roaming humanoid on the ground line at a random x.
pub fn spawn_humanoid(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    tuning: &Tuning,
    next_order: &mut u64,
) -> Entity {
    let x = rng.gen_range(0.0..tuning.arena_width.max(1.0));
    let patrol_dir = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
    let entity = spawn_humanoid_at(world, Position::new(x, tuning.ground_y), next_order);
    if let Ok(mut humanoid) = world.get::<&mut Humanoid>(entity) {
        humanoid.patrol_dir = patrol_dir;
    }
    debug!(x, "humanoid spawned");
    entity
}

/// Spawn a roaming humanoid at an exact position.
pub fn spawn_humanoid_at(world: &mut World, position: Position, next_order: &mut u64) -> Entity {
    world.spawn((
        Humanoid::default(),
        position,
        Hitbox::new(HUMANOID_WIDTH, HUMANOID_HEIGHT),
        take_order(next_order),
    ))
}

/// Spawn a player laser travelling horizontally along `facing`.
pub fn spawn_laser(
    world: &mut World,
    tuning: &Tuning,
    next_order: &mut u64,
    origin: Position,
    facing: Facing,
) -> Entity {
    world.spawn((
        Projectile {
            kind: ProjectileKind::Laser,
            owner: ProjectileOwner::Player,
            direction: Vec2::new(facing.sign(), 0.0),
            speed: tuning.laser_speed,
            destroyed: false,
        },
        origin,
        Hitbox::new(LASER_WIDTH, LASER_HEIGHT),
        take_order(next_order),
    ))
}

/// Spawn a lander missile. `direction` must already be a unit vector; it
/// never changes after launch.
pub fn spawn_missile(
    world: &mut World,
    tuning: &Tuning,
    next_order: &mut u64,
    origin: Position,
    direction: Vec2,
) -> Entity {
    world.spawn((
        Projectile {
            kind: ProjectileKind::Missile,
            owner: ProjectileOwner::Lander,
            direction,
            speed: tuning.missile_speed,
            destroyed: false,
        },
        origin,
        Hitbox::new(MISSILE_WIDTH, MISSILE_HEIGHT),
        take_order(next_order),
    ))
}

/// Spawn the fuel pickup at a random ground position with a fresh cycle.
pub fn spawn_fuel_pickup(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    tuning: &Tuning,
    now: &SimTime,
) -> Entity {
    world.spawn((
        FuelPickup {
            cycle: Cooldown::started(tuning.fuel_cycle_secs, now),
            hidden_secs: tuning.fuel_hidden_secs,
        },
        fuel_pickup_position(rng, tuning),
        Hitbox::new(FUEL_PICKUP_SIZE, FUEL_PICKUP_SIZE),
    ))
}

/// A fresh random resting spot for the fuel pickup.
pub fn fuel_pickup_position(rng: &mut ChaCha8Rng, tuning: &Tuning) -> Position {
    let y = tuning.ground_y + (FUEL_PICKUP_Y - GROUND_Y);
    Position::new(rng.gen_range(0.0..tuning.arena_width.max(1.0)), y)
}

fn take_order(next_order: &mut u64) -> SpawnOrder {
    let order = SpawnOrder(*next_order);
    *next_order += 1;
    order
}
