//! Aggregate counters for one run.
//!
//! Stored on `SimulationEngine`, NOT as ECS entities.

use defender_core::enums::LossReason;
use defender_core::tuning::Tuning;

/// Running score and resource counters tracked by the engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreState {
    /// Never clamped; friendly fire can drive it negative.
    pub score: i64,
    pub lives: u32,
    pub shields: u32,
    pub humanoids_alive: u32,
    pub humanoids_spawned: u32,
    pub landers_spawned: u32,
    pub landers_destroyed: u32,
    pub all_humanoids_dead: bool,
    pub loss_reason: Option<LossReason>,
}

impl ScoreState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            score: 0,
            lives: tuning.initial_lives,
            shields: tuning.initial_shields,
            humanoids_alive: tuning.humanoid_lifetime_cap,
            humanoids_spawned: 0,
            landers_spawned: 0,
            landers_destroyed: 0,
            all_humanoids_dead: false,
            loss_reason: None,
        }
    }

    /// A player laser destroyed a lander.
    pub fn lander_shot(&mut self, tuning: &Tuning) {
        self.score += tuning.lander_kill_bonus;
        self.landers_destroyed += 1;
    }

    /// The player rammed a lander. Costs a life, scores nothing.
    pub fn lander_crashed(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        self.landers_destroyed += 1;
    }

    pub fn missile_hit(&mut self) {
        self.lives = self.lives.saturating_sub(1);
    }

    /// Friendly fire on a humanoid.
    pub fn humanoid_shot(&mut self, tuning: &Tuning) {
        self.score -= tuning.humanoid_kill_penalty;
        self.humanoids_alive = self.humanoids_alive.saturating_sub(1);
    }

    pub fn humanoid_abducted(&mut self) {
        self.humanoids_alive = self.humanoids_alive.saturating_sub(1);
    }
}
