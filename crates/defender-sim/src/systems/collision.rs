//! Collision system: pairwise AABB tests that drive state transitions and
//! score changes.
//!
//! Categories are resolved in a fixed order, each walking its entities in
//! creation order:
//!
//! 1. player laser vs lander
//! 2. player laser vs humanoid
//! 3. lander vs player
//! 4. lander missile vs player
//! 5. lander vs humanoid (capture)
//! 6. player vs humanoid (capture / deposit)
//! 7. player vs fuel pickup
//!
//! A projectile resolves at most one hit per frame. Destroyed entities
//! stay in the world until cleanup but take no further part.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use defender_core::components::*;
use defender_core::constants::{LANDER_PARKED_X, LANDER_PARKED_Y};
use defender_core::enums::ProjectileOwner;
use defender_core::events::AudioEvent;
use defender_core::tuning::Tuning;
use defender_core::types::{Aabb, Cooldown, Position, SimTime};

use crate::queries;
use crate::scoring::ScoreState;
use crate::world_setup;

/// Resolve every collision category for this frame.
pub fn run(
    world: &mut World,
    tuning: &Tuning,
    now: &SimTime,
    rng: &mut ChaCha8Rng,
    score: &mut ScoreState,
    audio_events: &mut Vec<AudioEvent>,
) {
    lasers_vs_landers(world, tuning, score, audio_events);
    lasers_vs_humanoids(world, tuning, score, audio_events);
    landers_vs_player(world, now, score, audio_events);
    missiles_vs_player(world, now, score, audio_events);
    landers_vs_humanoids(world);
    player_vs_humanoids(world, tuning);
    player_vs_fuel(world, tuning, now, rng, audio_events);
}

// --- Category 1 ---

fn lasers_vs_landers(
    world: &mut World,
    tuning: &Tuning,
    score: &mut ScoreState,
    audio_events: &mut Vec<AudioEvent>,
) {
    let lasers = live_projectiles(world, ProjectileOwner::Player);
    for (laser, laser_box) in lasers {
        let hit = queries::ordered::<Lander>(world).into_iter().find(|&lander| {
            live_lander_bounds(world, lander).is_some_and(|b| b.intersects(&laser_box))
        });

        if let Some(lander) = hit {
            mark_projectile_destroyed(world, laser);
            if let Some(at) = destroy_lander(world, lander) {
                score.lander_shot(tuning);
                audio_events.push(AudioEvent::LanderExplosion { position: at });
                debug!(
                    ?lander,
                    score = score.score,
                    destroyed = score.landers_destroyed,
                    "lander shot down"
                );
            }
        }
    }
}

// --- Category 2 ---

fn lasers_vs_humanoids(
    world: &mut World,
    tuning: &Tuning,
    score: &mut ScoreState,
    audio_events: &mut Vec<AudioEvent>,
) {
    let lasers = live_projectiles(world, ProjectileOwner::Player);
    for (laser, laser_box) in lasers {
        let hit = queries::ordered::<Humanoid>(world).into_iter().find(|&h| {
            shootable_humanoid_bounds(world, h, tuning).is_some_and(|b| b.intersects(&laser_box))
        });

        let Some(humanoid) = hit else {
            continue;
        };
        mark_projectile_destroyed(world, laser);

        let killed_at = match world.query_one_mut::<(&mut Humanoid, &Position)>(humanoid) {
            Ok((h, pos)) => h.destroy().then_some(*pos),
            Err(_) => None,
        };
        if let Some(position) = killed_at {
            score.humanoid_shot(tuning);
            audio_events.push(AudioEvent::HumanoidKilled { position });
            debug!(?humanoid, score = score.score, "humanoid hit by friendly fire");
        }
    }
}

// --- Category 3 ---

fn landers_vs_player(
    world: &mut World,
    now: &SimTime,
    score: &mut ScoreState,
    audio_events: &mut Vec<AudioEvent>,
) {
    let Some((player, player_box)) = player_bounds(world) else {
        return;
    };

    for lander in queries::ordered::<Lander>(world) {
        if !live_lander_bounds(world, lander).is_some_and(|b| b.intersects(&player_box)) {
            continue;
        }
        if !take_damage_gate(world, player, now, |p| &mut p.crash_cooldown) {
            continue;
        }
        destroy_lander(world, lander);
        score.lander_crashed();
        audio_events.push(AudioEvent::PlayerCrash {
            lives_remaining: score.lives,
        });
        debug!(?lander, lives = score.lives, "player crashed into lander");
    }
}

// --- Category 4 ---

fn missiles_vs_player(
    world: &mut World,
    now: &SimTime,
    score: &mut ScoreState,
    audio_events: &mut Vec<AudioEvent>,
) {
    let Some((player, player_box)) = player_bounds(world) else {
        return;
    };

    for (missile, missile_box) in live_projectiles(world, ProjectileOwner::Lander) {
        if !missile_box.intersects(&player_box) {
            continue;
        }
        if !take_damage_gate(world, player, now, |p| &mut p.missile_hit_cooldown) {
            continue;
        }
        mark_projectile_destroyed(world, missile);
        score.missile_hit();
        audio_events.push(AudioEvent::PlayerCrash {
            lives_remaining: score.lives,
        });
        debug!(?missile, lives = score.lives, "player hit by missile");
    }
}

// --- Category 5 ---

fn landers_vs_humanoids(world: &mut World) {
    let humanoids = queries::ordered::<Humanoid>(world);

    for lander in queries::ordered::<Lander>(world) {
        let free = world
            .get::<&Lander>(lander)
            .is_ok_and(|l| !l.destroyed && !l.is_carrying());
        if !free {
            continue;
        }
        let Some(lander_box) = live_lander_bounds(world, lander) else {
            continue;
        };
        let Some(lander_pos) = world.get::<&Position>(lander).ok().map(|p| *p) else {
            continue;
        };

        for &humanoid in &humanoids {
            let captured = match world
                .query_one_mut::<(&mut Humanoid, &mut Position, &Hitbox)>(humanoid)
            {
                Ok((h, pos, hitbox)) => {
                    h.is_roaming()
                        && hitbox.bounds(pos).intersects(&lander_box)
                        && h.capture(Captor::Lander(lander), pos, lander_pos)
                }
                Err(_) => false,
            };
            if captured {
                if let Ok(mut l) = world.get::<&mut Lander>(lander) {
                    l.carrying = Some(humanoid);
                }
                debug!(?lander, ?humanoid, "humanoid captured by lander");
                break;
            }
        }
    }
}

// --- Category 6 ---

fn player_vs_humanoids(world: &mut World, tuning: &Tuning) {
    let Some((player, player_box)) = player_bounds(world) else {
        return;
    };
    let Some((player_pos, carrying)) = world
        .query_one_mut::<(&Player, &Position)>(player)
        .ok()
        .map(|(p, pos)| (*pos, p.carrying))
    else {
        return;
    };

    if let Some(humanoid) = carrying {
        if player_pos.y >= tuning.deposit_y {
            let deposited = match world.query_one_mut::<(&mut Humanoid, &mut Position)>(humanoid) {
                Ok((h, pos)) => {
                    h.is_player_captured() && h.deposit(pos, player_pos.x, tuning.ground_y)
                }
                Err(_) => false,
            };
            if let Ok(mut p) = world.get::<&mut Player>(player) {
                p.carrying = None;
            }
            if deposited {
                debug!(?humanoid, x = player_pos.x, "humanoid deposited");
            }
        }
        return;
    }

    for humanoid in queries::ordered::<Humanoid>(world) {
        let caught = match world.query_one_mut::<(&mut Humanoid, &mut Position, &Hitbox)>(humanoid)
        {
            Ok((h, pos, hitbox)) => {
                h.is_falling()
                    && pos.y < tuning.ground_y
                    && hitbox.bounds(pos).intersects(&player_box)
                    && h.capture(Captor::Player, pos, player_pos)
            }
            Err(_) => false,
        };
        if caught {
            if let Ok(mut p) = world.get::<&mut Player>(player) {
                p.carrying = Some(humanoid);
            }
            debug!(?humanoid, "falling humanoid caught by player");
            break;
        }
    }
}

// --- Category 7 ---

fn player_vs_fuel(
    world: &mut World,
    tuning: &Tuning,
    now: &SimTime,
    rng: &mut ChaCha8Rng,
    audio_events: &mut Vec<AudioEvent>,
) {
    let Some((player, player_box)) = player_bounds(world) else {
        return;
    };

    let pickups: Vec<Entity> = world
        .query::<(&FuelPickup, &Position, &Hitbox)>()
        .iter()
        .filter(|(_, (pickup, pos, hitbox))| {
            pickup.is_visible(now) && hitbox.bounds(pos).intersects(&player_box)
        })
        .map(|(entity, _)| entity)
        .collect();

    for pickup in pickups {
        let spot = world_setup::fuel_pickup_position(rng, tuning);
        if let Ok((fuel, pos)) = world.query_one_mut::<(&mut FuelPickup, &mut Position)>(pickup) {
            fuel.cycle.restart(now);
            *pos = spot;
        }
        if let Ok(mut p) = world.get::<&mut Player>(player) {
            p.fuel = tuning.max_fuel;
        }
        audio_events.push(AudioEvent::FuelCollected);
        debug!(x = spot.x, "fuel collected, pickup relocated");
    }
}

// --- Helpers ---

/// Mark a lander destroyed, park it off-screen, and drop whatever it was
/// carrying. Returns where it died, or `None` if it was already dead.
pub fn destroy_lander(world: &mut World, lander: Entity) -> Option<Position> {
    let (at, carried) = {
        let (l, pos) = world
            .query_one_mut::<(&mut Lander, &mut Position)>(lander)
            .ok()?;
        if l.destroyed {
            return None;
        }
        l.destroyed = true;
        let at = *pos;
        *pos = Position::new(LANDER_PARKED_X, LANDER_PARKED_Y);
        (at, l.carrying.take())
    };

    if let Some(humanoid) = carried {
        if let Ok(mut h) = world.get::<&mut Humanoid>(humanoid) {
            if h.captor == Some(Captor::Lander(lander)) && h.release() {
                debug!(?humanoid, ?lander, "humanoid released, falling");
            }
        }
    }
    Some(at)
}

fn live_projectiles(world: &World, owner: ProjectileOwner) -> Vec<(Entity, Aabb)> {
    queries::ordered::<Projectile>(world)
        .into_iter()
        .filter_map(|entity| {
            let mut query = world
                .query_one::<(&Projectile, &Position, &Hitbox)>(entity)
                .ok()?;
            let (projectile, pos, hitbox) = query.get()?;
            (!projectile.destroyed && projectile.owner == owner)
                .then(|| (entity, hitbox.bounds(pos)))
        })
        .collect()
}

fn live_lander_bounds(world: &World, lander: Entity) -> Option<Aabb> {
    let mut query = world.query_one::<(&Lander, &Position, &Hitbox)>(lander).ok()?;
    let (l, pos, hitbox) = query.get()?;
    (!l.destroyed).then(|| hitbox.bounds(pos))
}

/// Bounds of a humanoid a laser can hit: airborne and falling, or
/// patrolling on the ground line. Captured and destroyed ones are immune.
fn shootable_humanoid_bounds(world: &World, humanoid: Entity, tuning: &Tuning) -> Option<Aabb> {
    let mut query = world
        .query_one::<(&Humanoid, &Position, &Hitbox)>(humanoid)
        .ok()?;
    let (h, pos, hitbox) = query.get()?;
    let exposed = h.is_falling() || (h.is_roaming() && pos.y >= tuning.ground_y);
    exposed.then(|| hitbox.bounds(pos))
}

fn player_bounds(world: &World) -> Option<(Entity, Aabb)> {
    world
        .query::<(&Player, &Position, &Hitbox)>()
        .iter()
        .next()
        .map(|(entity, (_, pos, hitbox))| (entity, hitbox.bounds(pos)))
}

fn mark_projectile_destroyed(world: &mut World, projectile: Entity) {
    if let Ok(mut p) = world.get::<&mut Projectile>(projectile) {
        p.destroyed = true;
    }
}

/// Damage against the player passes only when the shield is down and the
/// given per-interaction gate has elapsed. Passing restarts the gate.
fn take_damage_gate(
    world: &mut World,
    player: Entity,
    now: &SimTime,
    gate: impl Fn(&mut Player) -> &mut Cooldown,
) -> bool {
    let Ok(mut p) = world.get::<&mut Player>(player) else {
        return false;
    };
    if p.shield_active {
        return false;
    }
    let cooldown = gate(&mut *p);
    if !cooldown.is_ready(now) {
        return false;
    }
    cooldown.restart(now);
    true
}
