//! Scripted pilot: reads the last snapshot and decides the next frame's keys.
//!
//! Priorities, highest first: rescue (carry down, catch falling humanoids),
//! refuel when low, then hunt the nearest lander. Fire is held whenever a
//! run is in progress; the shield goes up when a lander or missile is close.

use defender_core::commands::InputIntents;
use defender_core::enums::{GamePhase, HumanoidState, ProjectileOwner};
use defender_core::state::GameStateSnapshot;
use defender_core::types::Position;

use crate::game_loop::InputSource;

/// Closer than this (centre to centre) and the shield goes up.
pub const SHIELD_RANGE: f32 = 120.0;
pub const MISSILE_SHIELD_RANGE: f32 = 80.0;
/// Horizontal stand-off kept from the hunted lander.
pub const ENGAGE_RANGE: f32 = 300.0;
/// Fuel below which a visible pickup takes priority over hunting.
pub const LOW_FUEL: f32 = 60.0;
/// Per-axis tolerance before the pilot bothers to move.
pub const DEADBAND: f32 = 6.0;

#[derive(Debug, Clone, Default)]
pub struct Autopilot;

impl Autopilot {
    pub fn new() -> Self {
        Self
    }

    pub fn decide(&self, last: Option<&GameStateSnapshot>) -> InputIntents {
        let Some(snap) = last else {
            return start();
        };
        match snap.phase {
            GamePhase::Splash => return start(),
            GamePhase::GameOverWin | GamePhase::GameOverLose => return InputIntents::idle(),
            GamePhase::Playing => {}
        }
        let Some(player) = &snap.player else {
            return InputIntents::idle();
        };
        let at = player.position;

        let mut intents = if player.carrying_humanoid {
            InputIntents {
                down: true,
                ..InputIntents::idle()
            }
        } else if let Some(falling) = nearest(
            &at,
            snap.humanoids
                .iter()
                .filter(|h| h.state == HumanoidState::Falling)
                .map(|h| h.position),
        ) {
            steer(&at, &falling, 0.0)
        } else if let Some(fuel) = snap
            .fuel_pickup
            .as_ref()
            .filter(|f| f.visible && player.fuel < LOW_FUEL)
        {
            steer(&at, &fuel.position, 0.0)
        } else if let Some(lander) = nearest(&at, snap.landers.iter().map(|l| l.position)) {
            steer(&at, &lander, ENGAGE_RANGE)
        } else {
            InputIntents::idle()
        };

        intents.fire = !player.carrying_humanoid;

        let lander_close = snap
            .landers
            .iter()
            .any(|l| l.position.distance_to(&at) < SHIELD_RANGE);
        let missile_close = snap
            .projectiles
            .iter()
            .filter(|p| p.owner == ProjectileOwner::Lander)
            .any(|p| p.position.distance_to(&at) < MISSILE_SHIELD_RANGE);
        intents.shield =
            (lander_close || missile_close) && !player.shield_active && snap.hud.shields > 0;

        intents
    }
}

impl InputSource for Autopilot {
    fn next_intents(&mut self, last: Option<&GameStateSnapshot>) -> InputIntents {
        self.decide(last)
    }
}

fn start() -> InputIntents {
    InputIntents {
        start: true,
        ..InputIntents::idle()
    }
}

fn nearest(from: &Position, candidates: impl Iterator<Item = Position>) -> Option<Position> {
    candidates.min_by(|a, b| a.distance_to(from).total_cmp(&b.distance_to(from)))
}

/// Keys that move `from` toward `to`. Horizontal movement stops once within
/// `stand_off` of the target's x.
fn steer(from: &Position, to: &Position, stand_off: f32) -> InputIntents {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let range = stand_off.max(DEADBAND);
    InputIntents {
        left: dx < -range,
        right: dx > range,
        up: dy < -DEADBAND,
        down: dy > DEADBAND,
        ..InputIntents::idle()
    }
}
