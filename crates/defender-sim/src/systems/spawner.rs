//! Spawn scheduler: cooldown-gated creation of landers and humanoids, and
//! the fuel pickup's visibility cycle.
//!
//! Missile fire is per lander and lives in the lander AI system.

use hecs::World;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use defender_core::components::{FuelPickup, Humanoid};
use defender_core::tuning::Tuning;
use defender_core::types::{Cooldown, Position, SimTime};

use crate::queries;
use crate::scoring::ScoreState;
use crate::world_setup;

/// Run-wide spawn cooldowns.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnScheduler {
    pub lander_cooldown: Cooldown,
    pub humanoid_cooldown: Cooldown,
}

impl SpawnScheduler {
    /// The first humanoid may appear immediately; the first lander waits a
    /// full interval.
    pub fn new(tuning: &Tuning, now: &SimTime) -> Self {
        Self {
            lander_cooldown: Cooldown::started(tuning.lander_spawn_interval_secs, now),
            humanoid_cooldown: Cooldown::ready(tuning.humanoid_spawn_interval_secs, now),
        }
    }
}

/// Check every stream and spawn whatever is due.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    tuning: &Tuning,
    now: &SimTime,
    schedule: &mut SpawnScheduler,
    score: &mut ScoreState,
    next_order: &mut u64,
) {
    spawn_landers(world, rng, tuning, now, schedule, score, next_order);
    spawn_humanoids(world, rng, tuning, now, schedule, score, next_order);
    cycle_fuel_pickup(world, rng, tuning, now);
}

fn spawn_landers(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    tuning: &Tuning,
    now: &SimTime,
    schedule: &mut SpawnScheduler,
    score: &mut ScoreState,
    next_order: &mut u64,
) {
    // The lifetime cap is permanent: a ready cooldown no longer matters.
    if score.landers_spawned >= tuning.lander_lifetime_cap {
        return;
    }
    if !schedule.lander_cooldown.is_ready(now) {
        return;
    }

    let targets = queries::roaming_humanoids(world);
    world_setup::spawn_lander(world, rng, tuning, next_order, now, &targets);
    schedule.lander_cooldown.restart(now);
    score.landers_spawned += 1;
    debug!(total = score.landers_spawned, "lander spawn stream ticked");
}

fn spawn_humanoids(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    tuning: &Tuning,
    now: &SimTime,
    schedule: &mut SpawnScheduler,
    score: &mut ScoreState,
    next_order: &mut u64,
) {
    if score.humanoids_spawned >= tuning.humanoid_lifetime_cap {
        return;
    }
    if !schedule.humanoid_cooldown.is_ready(now) {
        return;
    }

    let present = world
        .query::<&Humanoid>()
        .iter()
        .filter(|(_, h)| !h.is_destroyed())
        .count() as u32;
    if present >= tuning.humanoid_concurrent_target {
        return;
    }

    world_setup::spawn_humanoid(world, rng, tuning, next_order);
    schedule.humanoid_cooldown.restart(now);
    score.humanoids_spawned += 1;
}

/// Restart an expired visibility cycle and move the pickup somewhere new.
fn cycle_fuel_pickup(world: &mut World, rng: &mut ChaCha8Rng, tuning: &Tuning, now: &SimTime) {
    for (_entity, (pickup, pos)) in world.query_mut::<(&mut FuelPickup, &mut Position)>() {
        if pickup.cycle_expired(now) {
            pickup.cycle.restart(now);
            *pos = world_setup::fuel_pickup_position(rng, tuning);
        }
    }
}
