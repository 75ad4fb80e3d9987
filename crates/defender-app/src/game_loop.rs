//! Game loop: drives the simulation engine at 60 Hz.
//!
//! Each frame asks the input source for intents, advances the engine by a
//! fixed delta-time, and sleeps until the next frame is due. The loop ends
//! when the run is over or the frame limit is reached.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use defender_core::commands::InputIntents;
use defender_core::enums::{GamePhase, LossReason};
use defender_core::events::AudioEvent;
use defender_core::state::GameStateSnapshot;
use defender_sim::engine::SimulationEngine;

pub const FRAME_RATE: u32 = 60;

/// Nominal duration of one frame.
pub const FRAME_DURATION: Duration = Duration::from_nanos(1_000_000_000 / FRAME_RATE as u64);

/// Supplies one frame of input, given what the previous frame looked like.
pub trait InputSource {
    fn next_intents(&mut self, last: Option<&GameStateSnapshot>) -> InputIntents;
}

/// Whether the loop sleeps between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    RealTime,
    /// As fast as the engine allows. Used by tests.
    Unthrottled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub phase: GamePhase,
    pub score: i64,
    pub landers_destroyed: u32,
    pub loss_reason: Option<LossReason>,
}

/// Run until game over or `max_frames` frames have been ticked.
pub fn run(
    engine: &mut SimulationEngine,
    input: &mut impl InputSource,
    max_frames: Option<u64>,
    pacing: Pacing,
) -> RunSummary {
    let dt = FRAME_DURATION.as_secs_f32();
    let mut last: Option<GameStateSnapshot> = None;
    let mut frames = 0u64;
    let mut next_frame_time = Instant::now();

    loop {
        if max_frames.is_some_and(|max| frames >= max) {
            info!(frames, "frame limit reached");
            break;
        }

        // 1. Poll input
        let intents = input.next_intents(last.as_ref());

        // 2. Advance one frame
        let snapshot = engine.tick(dt, &intents);
        frames += 1;

        // 3. Report what a renderer would play
        for event in &snapshot.audio_events {
            log_audio_event(event);
        }

        let over = snapshot.phase.is_game_over();
        last = Some(snapshot);
        if over {
            break;
        }

        // 4. Sleep until the next frame
        if pacing == Pacing::RealTime {
            next_frame_time += FRAME_DURATION;
            let now = Instant::now();
            if next_frame_time > now {
                std::thread::sleep(next_frame_time - now);
            } else if now - next_frame_time > FRAME_DURATION * 2 {
                // Too far behind; reset to avoid catch-up spiral
                next_frame_time = now;
            }
        }
    }

    let hud = last.map(|s| s.hud).unwrap_or_default();
    RunSummary {
        frames,
        phase: engine.phase(),
        score: hud.score,
        landers_destroyed: hud.landers_destroyed,
        loss_reason: hud.loss_reason,
    }
}

fn log_audio_event(event: &AudioEvent) {
    match event {
        AudioEvent::PlayerCrash { lives_remaining } => {
            info!(lives_remaining, "player hit");
        }
        AudioEvent::HumanoidKilled { position } => {
            info!(x = position.x, y = position.y, "humanoid lost");
        }
        other => debug!(event = ?other, "audio cue"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use defender_sim::engine::SimConfig;

    /// Presses start once, then holds fire.
    struct Scripted {
        frames_seen: u64,
    }

    impl InputSource for Scripted {
        fn next_intents(&mut self, last: Option<&GameStateSnapshot>) -> InputIntents {
            self.frames_seen += 1;
            let playing = last.is_some_and(|s| s.phase == GamePhase::Playing);
            InputIntents {
                start: !playing,
                fire: playing,
                ..InputIntents::idle()
            }
        }
    }

    #[test]
    fn test_frame_duration_constant() {
        // 60Hz = 16.666ms per frame
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(FRAME_DURATION.as_nanos(), expected_nanos as u128);
    }

    #[test]
    fn test_stops_at_frame_limit() {
        let mut engine = SimulationEngine::new(SimConfig::default());
        let mut input = Scripted { frames_seen: 0 };

        let summary = run(&mut engine, &mut input, Some(30), Pacing::Unthrottled);

        assert_eq!(summary.frames, 30);
        assert_eq!(input.frames_seen, 30);
        assert_eq!(summary.phase, GamePhase::Playing);
        assert_eq!(engine.time().frame, 30);
    }

    #[test]
    fn test_stops_at_game_over() {
        let tuning = defender_core::tuning::Tuning {
            // Burn through the tank on the first move.
            max_fuel: 0.05,
            ..Default::default()
        };
        let mut engine = SimulationEngine::new(SimConfig { seed: 1, tuning });

        struct Mover;
        impl InputSource for Mover {
            fn next_intents(&mut self, _last: Option<&GameStateSnapshot>) -> InputIntents {
                InputIntents {
                    start: true,
                    right: true,
                    ..InputIntents::idle()
                }
            }
        }

        let summary = run(&mut engine, &mut Mover, Some(1000), Pacing::Unthrottled);

        assert_eq!(summary.phase, GamePhase::GameOverLose);
        assert_eq!(summary.loss_reason, Some(LossReason::OutOfFuel));
        assert_eq!(summary.frames, 1);
    }

    #[test]
    fn test_snapshot_serialization_under_3ms() {
        let mut engine = SimulationEngine::new(SimConfig::default());
        let mut input = Scripted { frames_seen: 0 };
        run(&mut engine, &mut input, Some(300), Pacing::Unthrottled);

        let snapshot = engine.tick(FRAME_DURATION.as_secs_f32(), &InputIntents::idle());
        let start = Instant::now();
        let json = serde_json::to_string(&snapshot).unwrap();
        let elapsed = start.elapsed();

        assert!(
            elapsed < Duration::from_millis(3),
            "Snapshot serialization took {:?}, should be <3ms",
            elapsed
        );
        assert!(!json.is_empty());
    }
}
