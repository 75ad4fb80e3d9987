//! Player system: movement, fuel burn, laser fire and shield control.

use hecs::World;
use tracing::debug;

use defender_core::commands::InputIntents;
use defender_core::components::{Hitbox, Player};
use defender_core::enums::Facing;
use defender_core::events::AudioEvent;
use defender_core::tuning::Tuning;
use defender_core::types::{Position, SimTime};

use crate::queries;
use crate::scoring::ScoreState;
use crate::world_setup;

/// Apply one frame of input to the player ship.
pub fn run(
    world: &mut World,
    intents: &InputIntents,
    tuning: &Tuning,
    now: &SimTime,
    dt: f32,
    score: &mut ScoreState,
    next_order: &mut u64,
    audio_events: &mut Vec<AudioEvent>,
) {
    let Some(entity) = queries::player_entity(world) else {
        return;
    };

    let laser = {
        let Ok((player, pos, hitbox)) =
            world.query_one_mut::<(&mut Player, &mut Position, &Hitbox)>(entity)
        else {
            return;
        };

        steer(player, pos, hitbox, intents, tuning, dt);
        update_shield(player, intents, now, score, audio_events);

        if intents.fire && player.shot_cooldown.is_ready(now) {
            player.shot_cooldown.restart(now);
            let muzzle = Position::new(
                pos.x + player.facing.sign() * hitbox.width / 2.0,
                pos.y,
            );
            Some((muzzle, player.facing))
        } else {
            None
        }
    };

    if let Some((muzzle, facing)) = laser {
        world_setup::spawn_laser(world, tuning, next_order, muzzle, facing);
        audio_events.push(AudioEvent::LaserFired { position: muzzle });
    }
}

/// Move per axis, keeping the ship's box inside the arena. Fuel is burned
/// once for each axis that actually moved.
fn steer(
    player: &mut Player,
    pos: &mut Position,
    hitbox: &Hitbox,
    intents: &InputIntents,
    tuning: &Tuning,
    dt: f32,
) {
    let dx = intents.horizontal();
    let dy = intents.vertical();

    if dx < 0.0 {
        player.facing = Facing::Left;
    } else if dx > 0.0 {
        player.facing = Facing::Right;
    }

    let half_w = hitbox.width / 2.0;
    let half_h = hitbox.height / 2.0;
    let step = tuning.player_speed * dt;

    let new_x = clamp_axis(pos.x + dx * step, half_w, tuning.arena_width - half_w);
    let new_y = clamp_axis(pos.y + dy * step, half_h, tuning.arena_height - half_h);

    let mut burned = 0.0;
    if dx != 0.0 && new_x != pos.x {
        pos.x = new_x;
        burned += tuning.fuel_per_move;
    }
    if dy != 0.0 && new_y != pos.y {
        pos.y = new_y;
        burned += tuning.fuel_per_move;
    }
    player.fuel = (player.fuel - burned).clamp(0.0, tuning.max_fuel);
}

fn update_shield(
    player: &mut Player,
    intents: &InputIntents,
    now: &SimTime,
    score: &mut ScoreState,
    audio_events: &mut Vec<AudioEvent>,
) {
    if player.shield_active && player.shield_cooldown.is_ready(now) {
        player.shield_active = false;
        debug!("shield expired");
    }

    if intents.shield && score.shields > 0 && player.shield_cooldown.is_ready(now) {
        player.shield_active = true;
        player.shield_cooldown.restart(now);
        score.shields -= 1;
        audio_events.push(AudioEvent::ShieldActivated);
        debug!(shields_left = score.shields, "shield raised");
    }
}

fn clamp_axis(value: f32, lo: f32, hi: f32) -> f32 {
    if hi < lo {
        return (lo + hi) / 2.0;
    }
    value.clamp(lo, hi)
}
