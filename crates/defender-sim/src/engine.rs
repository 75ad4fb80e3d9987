//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, applies per-frame input
//! intents, runs all systems, and produces `GameStateSnapshot`s. Completely
//! headless (no window or audio dependency), enabling deterministic testing.

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use defender_core::commands::InputIntents;
use defender_core::enums::GamePhase;
use defender_core::events::AudioEvent;
use defender_core::highscores::{HighScoreTable, ScoreEntry};
use defender_core::state::GameStateSnapshot;
use defender_core::tuning::Tuning;
use defender_core::types::SimTime;

use defender_lander_ai::profiles::LanderProfile;

use crate::scoring::ScoreState;
use crate::systems;
use crate::systems::spawner::SpawnScheduler;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed and dt sequence = same run.
    pub seed: u64,
    pub tuning: Tuning,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tuning: Tuning::default(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    tuning: Tuning,
    lander_profile: LanderProfile,
    rng: ChaCha8Rng,
    next_order: u64,
    despawn_buffer: Vec<Entity>,
    audio_events: Vec<AudioEvent>,
    spawner: SpawnScheduler,
    score: ScoreState,

    // --- High scores ---
    high_scores: HighScoreTable,
    score_submitted: bool,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config. Starts on
    /// the splash screen with an empty world.
    pub fn new(config: SimConfig) -> Self {
        let time = SimTime::default();
        Self {
            world: World::new(),
            time,
            phase: GamePhase::default(),
            lander_profile: LanderProfile::from_tuning(&config.tuning),
            spawner: SpawnScheduler::new(&config.tuning, &time),
            score: ScoreState::new(&config.tuning),
            tuning: config.tuning,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            next_order: 0,
            despawn_buffer: Vec::new(),
            audio_events: Vec::new(),
            high_scores: HighScoreTable::new(),
            score_submitted: false,
        }
    }

    /// Seed the high-score table from a store.
    pub fn with_high_scores(mut self, entries: Vec<ScoreEntry>) -> Self {
        self.high_scores = HighScoreTable::from_entries(entries);
        self
    }

    /// Advance the simulation by one frame of `dt` seconds and return the
    /// resulting snapshot. Negative or non-finite `dt` counts as zero.
    pub fn tick(&mut self, dt: f32, intents: &InputIntents) -> GameStateSnapshot {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };

        self.handle_phase_input(intents);

        if self.phase == GamePhase::Playing {
            self.time.advance(dt);
            self.run_systems(dt, intents);
        }

        let audio_events = std::mem::take(&mut self.audio_events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            audio_events,
            &self.score,
        )
    }

    /// Record the finished run's score under `name`.
    ///
    /// Accepted only on a game-over screen and only once per run. Returns
    /// the entry's rank, or `None` when it was refused or did not make
    /// the table. The name is stored as given.
    pub fn submit_high_score(&mut self, name: &str) -> Option<usize> {
        if !self.can_submit_high_score() {
            return None;
        }
        self.score_submitted = true;
        let rank = self.high_scores.add_entry(name, self.score.score);
        info!(player = name, score = self.score.score, ?rank, "high score submitted");
        rank
    }

    pub fn can_submit_high_score(&self) -> bool {
        self.phase.is_game_over() && !self.score_submitted
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get a read-only reference to the score state.
    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    pub fn high_scores(&self) -> &HighScoreTable {
        &self.high_scores
    }

    /// Mutable world access for tests that stage exact situations.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[cfg(test)]
    pub fn score_mut(&mut self) -> &mut ScoreState {
        &mut self.score
    }

    /// Splash -> Playing on start; GameOver -> Playing on confirm-reset.
    fn handle_phase_input(&mut self, intents: &InputIntents) {
        match self.phase {
            GamePhase::Splash if intents.start => {
                self.start_run();
                info!("run started");
            }
            GamePhase::GameOverWin | GamePhase::GameOverLose if intents.confirm_reset => {
                self.start_run();
                info!("run reset");
            }
            _ => {}
        }
    }

    /// Restore every counter and entity collection to initial values.
    fn start_run(&mut self) {
        self.time = SimTime::default();
        self.score = ScoreState::new(&self.tuning);
        self.spawner = SpawnScheduler::new(&self.tuning, &self.time);
        self.next_order = 0;
        self.audio_events.clear();
        self.score_submitted = false;
        world_setup::setup_run(&mut self.world, &mut self.rng, &self.tuning, &self.time);
        self.phase = GamePhase::Playing;
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f32, intents: &InputIntents) {
        // 1. Player (movement, fuel, fire, shield)
        systems::player::run(
            &mut self.world,
            intents,
            &self.tuning,
            &self.time,
            dt,
            &mut self.score,
            &mut self.next_order,
            &mut self.audio_events,
        );
        // 2. Lander AI (targeting, movement, missile fire)
        systems::lander_ai::run(
            &mut self.world,
            &self.lander_profile,
            &self.tuning,
            &self.time,
            dt,
            &mut self.next_order,
            &mut self.audio_events,
        );
        // 3. Humanoids (patrol, carry, fall, abduction)
        systems::humanoid::run(
            &mut self.world,
            &self.tuning,
            dt,
            &mut self.score,
            &mut self.audio_events,
        );
        // 4. Projectile flight
        systems::projectiles::run(&mut self.world, &self.tuning, dt);
        // 5. Collisions
        systems::collision::run(
            &mut self.world,
            &self.tuning,
            &self.time,
            &mut self.rng,
            &mut self.score,
            &mut self.audio_events,
        );
        // 6. Spawning
        systems::spawner::run(
            &mut self.world,
            &mut self.rng,
            &self.tuning,
            &self.time,
            &mut self.spawner,
            &mut self.score,
            &mut self.next_order,
        );
        // 7. Win / lose
        let next_phase = systems::game_state::run(&self.world, &self.tuning, &mut self.score);
        if next_phase != self.phase {
            debug!(from = ?self.phase, to = ?next_phase, "phase change");
            self.phase = next_phase;
        }
        // 8. Cleanup (destroyed entities)
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
    }
}
