//! Events emitted by the simulation for audio feedback.

use serde::{Deserialize, Serialize};

use crate::types::Position;

/// Discrete sound cues, emitted at the moment they occur and drained into
/// the frame's snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioEvent {
    /// Player laser fired.
    LaserFired { position: Position },
    /// Lander missile launched.
    MissileFired { position: Position },
    /// Lander destroyed by a laser or a crash.
    LanderExplosion { position: Position },
    ShieldActivated,
    /// Player lost a life.
    PlayerCrash { lives_remaining: u32 },
    /// Humanoid abducted or shot.
    HumanoidKilled { position: Position },
    FuelCollected,
}
