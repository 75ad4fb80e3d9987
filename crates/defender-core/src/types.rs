//! Fundamental geometric and simulation-clock types.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// 2D position in arena space (pixels, screen-oriented).
/// x = right, y = down; the origin is the top-left corner of the arena.
/// Entity positions are the centre of the entity's box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Sum of absolute coordinate deltas.
    pub fn manhattan_to(&self, other: &Position) -> f32 {
        (other.x - self.x).abs() + (other.y - self.y).abs()
    }

    /// Straight-line distance to another position.
    pub fn distance_to(&self, other: &Position) -> f32 {
        self.as_vec2().distance(other.as_vec2())
    }

    /// Unit vector pointing at `other`, or `None` when the two coincide.
    pub fn direction_to(&self, other: &Position) -> Option<Vec2> {
        (other.as_vec2() - self.as_vec2()).try_normalize()
    }

    pub fn offset(&self, delta: Vec2) -> Position {
        Position::new(self.x + delta.x, self.y + delta.y)
    }
}

impl From<Vec2> for Position {
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box of the given size centred on `center`.
    pub fn centered(center: &Position, size: Vec2) -> Self {
        let half = size * 0.5;
        let c = center.as_vec2();
        Self {
            min: c - half,
            max: c + half,
        }
    }

    /// Overlap test. Boxes that touch along an edge count as intersecting.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }

    pub fn contains(&self, p: &Position) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Simulation clock. Advances only while the game is being played.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of simulated frames.
    pub frame: u64,
    /// Elapsed simulated time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one frame of `dt` seconds. Negative or non-finite
    /// deltas advance the frame counter but not the clock.
    pub fn advance(&mut self, dt: f32) {
        self.frame += 1;
        if dt.is_finite() && dt > 0.0 {
            self.elapsed_secs += dt as f64;
        }
    }
}

/// A named duration measured against the simulation clock.
///
/// Cooldowns are polled, never awaited: callers ask whether enough time
/// has elapsed since the last restart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cooldown {
    pub duration_secs: f64,
    pub restarted_at: f64,
}

impl Cooldown {
    /// A cooldown that starts counting at `now`.
    pub fn started(duration_secs: f64, now: &SimTime) -> Self {
        Self {
            duration_secs,
            restarted_at: now.elapsed_secs,
        }
    }

    /// A cooldown that is already elapsed at `now`.
    pub fn ready(duration_secs: f64, now: &SimTime) -> Self {
        Self {
            duration_secs,
            restarted_at: now.elapsed_secs - duration_secs,
        }
    }

    pub fn elapsed(&self, now: &SimTime) -> f64 {
        (now.elapsed_secs - self.restarted_at).max(0.0)
    }

    pub fn is_ready(&self, now: &SimTime) -> bool {
        self.elapsed(now) >= self.duration_secs
    }

    pub fn restart(&mut self, now: &SimTime) {
        self.restarted_at = now.elapsed_secs;
    }
}
