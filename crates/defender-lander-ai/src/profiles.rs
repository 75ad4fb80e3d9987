//! Movement profile for landers.
//!
//! Consolidates the arena geometry and speeds the lander FSM reads, so the
//! FSM never reaches into global tuning.

use defender_core::constants::{
    LANDER_EDGE_MARGIN, LANDER_HOVER_CLEARANCE, LANDER_RELEASE_Y, LANDER_TOP_MARGIN,
};
use defender_core::tuning::Tuning;

/// Behavioral profile shared by every lander in a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LanderProfile {
    pub arena_width: f32,
    pub arena_height: f32,
    /// Ground line roaming humanoids patrol on.
    pub ground_y: f32,
    /// Direct seek speed (px/s).
    pub seek_speed: f32,
    /// Axis-aligned creep speed, also the carry ascent rate (px/s).
    pub creep_speed: f32,
    /// A carrying lander leaves carry mode once above this y.
    pub release_y: f32,
    /// Creep stays this far from the left/right edges.
    pub edge_margin: f32,
    /// Creep never climbs above this y.
    pub top_margin: f32,
    /// Creep stops descending this far above the ground line.
    pub hover_clearance: f32,
}

impl LanderProfile {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            arena_width: tuning.arena_width,
            arena_height: tuning.arena_height,
            ground_y: tuning.ground_y,
            seek_speed: tuning.lander_seek_speed,
            creep_speed: tuning.lander_creep_speed,
            release_y: LANDER_RELEASE_Y,
            edge_margin: LANDER_EDGE_MARGIN,
            top_margin: LANDER_TOP_MARGIN,
            hover_clearance: LANDER_HOVER_CLEARANCE,
        }
    }

    /// Lowest y creep will descend to.
    pub fn hover_y(&self) -> f32 {
        self.ground_y - self.hover_clearance
    }

    /// Strictly inside the arena rectangle.
    pub fn in_arena(&self, x: f32, y: f32) -> bool {
        x > 0.0 && x < self.arena_width && y > 0.0 && y < self.arena_height
    }
}

impl Default for LanderProfile {
    fn default() -> Self {
        Self::from_tuning(&Tuning::default())
    }
}
