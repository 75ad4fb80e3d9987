//! Input intents supplied to the simulation once per frame.
//!
//! The core never reads raw platform events; an external collector polls
//! whatever device it likes and fills in this struct.

use serde::{Deserialize, Serialize};

/// Polled boolean intents for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputIntents {
    // --- Movement ---
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,

    // --- Actions ---
    /// Fire a laser along the current facing.
    pub fire: bool,
    /// Raise the shield, if one is available.
    pub shield: bool,

    // --- Phase control ---
    /// Leave the splash screen.
    pub start: bool,
    /// Start a fresh run from a game-over screen.
    pub confirm_reset: bool,
}

impl InputIntents {
    /// No keys held.
    pub fn idle() -> Self {
        Self::default()
    }

    /// Horizontal axis: -1, 0 or +1. Opposing keys cancel.
    pub fn horizontal(&self) -> f32 {
        (self.right as i8 - self.left as i8) as f32
    }

    /// Vertical axis in screen space (+1 is down). Opposing keys cancel.
    pub fn vertical(&self) -> f32 {
        (self.down as i8 - self.up as i8) as f32
    }
}
