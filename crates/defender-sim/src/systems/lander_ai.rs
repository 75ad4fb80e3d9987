//! Lander AI system: updates lander targeting, movement and missile fire.
//!
//! Calls the lander FSM from defender-lander-ai to compute motion, then
//! writes the results back to ECS components.

use glam::Vec2;
use hecs::{Entity, World};
use tracing::debug;

use defender_core::components::Lander;
use defender_core::events::AudioEvent;
use defender_core::tuning::Tuning;
use defender_core::types::{Position, SimTime};

use defender_lander_ai::fsm::{evaluate, LanderContext};
use defender_lander_ai::profiles::LanderProfile;
use defender_lander_ai::targeting::select_nearest;

use crate::queries;
use crate::world_setup;

/// Run the lander AI system for every live lander, in creation order.
pub fn run(
    world: &mut World,
    profile: &LanderProfile,
    tuning: &Tuning,
    now: &SimTime,
    dt: f32,
    next_order: &mut u64,
    audio_events: &mut Vec<AudioEvent>,
) {
    let targets = queries::roaming_humanoids(world);
    let player_pos = queries::player_position(world);

    // Missiles are spawned after the pass to keep the world borrow simple.
    let mut launches: Vec<(Position, Vec2)> = Vec::new();

    for entity in queries::ordered::<Lander>(world) {
        if let Some(launch) = step_lander(world, entity, profile, now, dt, &targets, player_pos) {
            launches.push(launch);
        }
    }

    for (origin, direction) in launches {
        world_setup::spawn_missile(world, tuning, next_order, origin, direction);
        audio_events.push(AudioEvent::MissileFired { position: origin });
    }
}

/// Advance one lander. Returns a missile launch if one is due.
fn step_lander(
    world: &mut World,
    entity: Entity,
    profile: &LanderProfile,
    now: &SimTime,
    dt: f32,
    targets: &[(Entity, Position)],
    player_pos: Option<Position>,
) -> Option<(Position, Vec2)> {
    let (lander, pos) = world
        .query_one_mut::<(&mut Lander, &mut Position)>(entity)
        .ok()?;

    if lander.destroyed {
        return None;
    }

    // Fire from the pre-move position; direction is fixed at launch.
    let mut launch = None;
    if lander.fire_cooldown.is_ready(now) {
        lander.fire_cooldown.restart(now);
        if let Some(direction) = player_pos.and_then(|p| pos.direction_to(&p)) {
            launch = Some((*pos, direction));
        }
    }

    if !lander.is_carrying() {
        if let Some((_, target)) = select_nearest(pos, targets.iter().copied()) {
            lander.target = target;
        }
    }

    let update = evaluate(
        &LanderContext {
            position: *pos,
            target: lander.target,
            carrying: lander.is_carrying(),
            destroyed: lander.destroyed,
            dt,
        },
        profile,
    );

    *pos = update.new_position;
    if update.release_carry {
        lander.carrying = None;
        debug!(?entity, y = pos.y, "lander left carry mode");
    }

    launch
}
