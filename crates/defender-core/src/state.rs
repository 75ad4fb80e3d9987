//! Render snapshot: the complete visible state handed to the renderer each frame.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::AudioEvent;
use crate::types::{Position, SimTime};

/// Read-only export of one frame. The renderer performs no mutation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    /// Absent on the splash screen.
    pub player: Option<PlayerView>,
    pub landers: Vec<LanderView>,
    pub humanoids: Vec<HumanoidView>,
    pub projectiles: Vec<ProjectileView>,
    pub fuel_pickup: Option<FuelPickupView>,
    pub hud: HudView,
    pub audio_events: Vec<AudioEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Position,
    pub facing: Facing,
    pub fuel: f32,
    pub shield_active: bool,
    pub carrying_humanoid: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanderView {
    /// Stable entity id for the frame's lifetime of this lander.
    pub id: u64,
    pub position: Position,
    pub target: Position,
    pub destroyed: bool,
    pub carrying_humanoid: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HumanoidView {
    pub id: u64,
    pub position: Position,
    pub state: HumanoidState,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: u64,
    pub position: Position,
    pub kind: ProjectileKind,
    pub owner: ProjectileOwner,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuelPickupView {
    pub position: Position,
    pub visible: bool,
}

/// Counters shown on the heads-up display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HudView {
    /// May be negative.
    pub score: i64,
    pub lives: u32,
    pub shields: u32,
    pub fuel: f32,
    pub humanoids_alive: u32,
    pub landers_destroyed: u32,
    pub landers_spawned: u32,
    pub all_humanoids_dead: bool,
    /// Set once the run ends in `GameOverLose`.
    pub loss_reason: Option<LossReason>,
}
