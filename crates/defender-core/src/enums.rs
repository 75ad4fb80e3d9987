//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Horizontal facing of the player ship.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// Unit x-component of this facing.
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// Humanoid lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HumanoidState {
    /// Patrolling the ground line.
    #[default]
    Roaming,
    /// Carried upward by a lander.
    CapturedByLander,
    /// Carried by the player ship.
    CapturedByPlayer,
    /// Dropped and falling toward the ground line.
    Falling,
    /// Abducted or shot. Terminal.
    Destroyed,
}

/// Projectile variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Fired horizontally by the player.
    Laser,
    /// Fired by a lander toward the player's position at launch.
    Missile,
}

/// Who fired a projectile. Decides which collision pairs apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileOwner {
    Player,
    Lander,
}

/// Top-level game phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen. No simulation updates.
    #[default]
    Splash,
    Playing,
    GameOverWin,
    GameOverLose,
}

impl GamePhase {
    pub fn is_game_over(self) -> bool {
        matches!(self, GamePhase::GameOverWin | GamePhase::GameOverLose)
    }
}

/// Why a run ended in `GameOverLose`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossReason {
    LivesExhausted,
    AllHumanoidsKilled,
    OutOfFuel,
}
