//! Terminal-condition checks run once per frame after collisions.

use hecs::World;
use tracing::info;

use defender_core::components::Player;
use defender_core::enums::{GamePhase, LossReason};
use defender_core::tuning::Tuning;

use crate::scoring::ScoreState;

/// Decide whether the run ended this frame. Loss conditions are checked
/// first (lives, then humanoids, then fuel); a win needs lives to spare.
pub fn run(world: &World, tuning: &Tuning, score: &mut ScoreState) -> GamePhase {
    let fuel = world
        .query::<&Player>()
        .iter()
        .next()
        .map(|(_, p)| p.fuel);

    let loss = if score.lives == 0 {
        Some(LossReason::LivesExhausted)
    } else if score.humanoids_alive == 0 {
        score.all_humanoids_dead = true;
        Some(LossReason::AllHumanoidsKilled)
    } else if fuel.is_some_and(|f| f <= 0.0) {
        Some(LossReason::OutOfFuel)
    } else {
        None
    };

    if let Some(reason) = loss {
        score.loss_reason = Some(reason);
        info!(?reason, score = score.score, "game over: lost");
        return GamePhase::GameOverLose;
    }

    if score.landers_destroyed > tuning.win_landers_destroyed && score.lives > 0 {
        info!(
            score = score.score,
            landers_destroyed = score.landers_destroyed,
            "game over: won"
        );
        return GamePhase::GameOverWin;
    }

    GamePhase::Playing
}
