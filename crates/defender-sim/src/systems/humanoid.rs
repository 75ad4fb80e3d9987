//! Humanoid system: patrol, follow captor, fall, and abduction.

use hecs::{Entity, World};
use tracing::{debug, warn};

use defender_core::components::{Captor, Humanoid, Lander, Player};
use defender_core::constants::{HUMANOID_ABDUCTION_Y, HUMANOID_PATROL_MARGIN};
use defender_core::enums::HumanoidState;
use defender_core::events::AudioEvent;
use defender_core::tuning::Tuning;
use defender_core::types::Position;

use crate::queries;
use crate::scoring::ScoreState;

/// Where a captured humanoid should be this frame, or why it can't be held.
enum Hold {
    At(Position),
    Lost,
}

pub fn run(
    world: &mut World,
    tuning: &Tuning,
    dt: f32,
    score: &mut ScoreState,
    audio_events: &mut Vec<AudioEvent>,
) {
    for entity in queries::ordered::<Humanoid>(world) {
        let (state, captor) = match world.get::<&Humanoid>(entity) {
            Ok(h) => (h.state, h.captor),
            Err(_) => continue,
        };

        match state {
            HumanoidState::Roaming => patrol(world, entity, tuning, dt),
            HumanoidState::Falling => fall(world, entity, tuning, dt),
            HumanoidState::CapturedByLander | HumanoidState::CapturedByPlayer => {
                let hold = captor.map_or(Hold::Lost, |c| captor_hold(world, entity, c));
                follow(world, entity, hold, score, audio_events);
            }
            HumanoidState::Destroyed => {}
        }
    }
}

fn patrol(world: &mut World, entity: Entity, tuning: &Tuning, dt: f32) {
    let Ok((humanoid, pos)) = world.query_one_mut::<(&mut Humanoid, &mut Position)>(entity)
    else {
        return;
    };
    pos.x += humanoid.patrol_dir * tuning.humanoid_patrol_speed * dt;
    if pos.x < HUMANOID_PATROL_MARGIN {
        humanoid.patrol_dir = 1.0;
    } else if pos.x > tuning.arena_width - HUMANOID_PATROL_MARGIN {
        humanoid.patrol_dir = -1.0;
    }
}

fn fall(world: &mut World, entity: Entity, tuning: &Tuning, dt: f32) {
    let Ok((humanoid, pos)) = world.query_one_mut::<(&mut Humanoid, &mut Position)>(entity)
    else {
        return;
    };
    pos.y += tuning.humanoid_fall_speed * dt;
    if pos.y >= tuning.ground_y && humanoid.land(pos, tuning.ground_y) {
        debug!(?entity, x = pos.x, "humanoid landed");
    }
}

/// Validate the captor handle and find where the humanoid hangs.
fn captor_hold(world: &World, humanoid: Entity, captor: Captor) -> Hold {
    match captor {
        Captor::Lander(lander) => {
            let Ok(mut query) = world.query_one::<(&Lander, &Position)>(lander) else {
                warn!(?humanoid, ?lander, "captor lander no longer exists");
                return Hold::Lost;
            };
            match query.get() {
                Some((l, pos)) if !l.destroyed && l.carrying == Some(humanoid) => Hold::At(*pos),
                Some(_) => Hold::Lost,
                None => {
                    warn!(?humanoid, ?lander, "captor handle is not a lander");
                    Hold::Lost
                }
            }
        }
        Captor::Player => {
            let carried = world
                .query::<(&Player, &Position)>()
                .iter()
                .find(|(_, (p, _))| p.carrying == Some(humanoid))
                .map(|(_, (_, pos))| *pos);
            match carried {
                Some(pos) => Hold::At(pos),
                None => {
                    warn!(?humanoid, "player no longer carries this humanoid");
                    Hold::Lost
                }
            }
        }
    }
}

fn follow(
    world: &mut World,
    entity: Entity,
    hold: Hold,
    score: &mut ScoreState,
    audio_events: &mut Vec<AudioEvent>,
) {
    let Ok((humanoid, pos)) = world.query_one_mut::<(&mut Humanoid, &mut Position)>(entity)
    else {
        return;
    };

    let at = match hold {
        Hold::At(at) => at,
        Hold::Lost => {
            if humanoid.release() {
                debug!(?entity, "humanoid dropped by vanished captor");
            }
            return;
        }
    };

    *pos = at;

    // Carried off the top of the arena by a lander.
    if humanoid.state == HumanoidState::CapturedByLander
        && pos.y <= HUMANOID_ABDUCTION_Y
        && humanoid.destroy()
    {
        score.humanoid_abducted();
        audio_events.push(AudioEvent::HumanoidKilled { position: *pos });
        debug!(?entity, alive = score.humanoids_alive, "humanoid abducted");
    }
}
