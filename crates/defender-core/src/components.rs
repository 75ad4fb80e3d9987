//! ECS components for hecs entities.
//!
//! Components are plain data. The one exception is `Humanoid`, whose
//! state-machine transitions live next to the data they guard so every
//! caller goes through the same terminal-state checks.

use glam::Vec2;
use hecs::Entity;

use crate::enums::*;
use crate::types::{Aabb, Cooldown, Position, SimTime};

/// Collision box size, centred on the entity's `Position`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub width: f32,
    pub height: f32,
}

impl Hitbox {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn bounds(&self, pos: &Position) -> Aabb {
        Aabb::centered(pos, self.size())
    }
}

/// The player's ship.
#[derive(Debug, Clone)]
pub struct Player {
    pub facing: Facing,
    /// Remaining fuel, kept within [0, max].
    pub fuel: f32,
    pub shield_active: bool,
    /// Shield duration and re-arm gate.
    pub shield_cooldown: Cooldown,
    pub shot_cooldown: Cooldown,
    /// Gate on damage from ramming a lander.
    pub crash_cooldown: Cooldown,
    /// Gate on damage from lander missiles.
    pub missile_hit_cooldown: Cooldown,
    /// The humanoid currently carried, if any.
    pub carrying: Option<Entity>,
}

impl Player {
    pub fn is_carrying(&self) -> bool {
        self.carrying.is_some()
    }
}

/// A hostile lander.
#[derive(Debug, Clone)]
pub struct Lander {
    /// Where the lander is currently heading.
    pub target: Position,
    /// Destroyed landers are inert until cleanup removes them.
    pub destroyed: bool,
    /// The humanoid being carried upward, if any.
    pub carrying: Option<Entity>,
    pub fire_cooldown: Cooldown,
}

impl Lander {
    pub fn is_carrying(&self) -> bool {
        self.carrying.is_some()
    }
}

/// Who holds a captured humanoid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Captor {
    Lander(Entity),
    Player,
}

/// A ground unit the player protects.
#[derive(Debug, Clone, PartialEq)]
pub struct Humanoid {
    pub state: HumanoidState,
    /// Valid only while `state` is one of the captured states.
    pub captor: Option<Captor>,
    /// Patrol direction: +1 right, -1 left.
    pub patrol_dir: f32,
}

impl Default for Humanoid {
    fn default() -> Self {
        Self {
            state: HumanoidState::Roaming,
            captor: None,
            patrol_dir: 1.0,
        }
    }
}

impl Humanoid {
    pub fn is_captured(&self) -> bool {
        matches!(
            self.state,
            HumanoidState::CapturedByLander | HumanoidState::CapturedByPlayer
        )
    }

    pub fn is_falling(&self) -> bool {
        self.state == HumanoidState::Falling
    }

    pub fn is_destroyed(&self) -> bool {
        self.state == HumanoidState::Destroyed
    }

    pub fn is_roaming(&self) -> bool {
        self.state == HumanoidState::Roaming
    }

    pub fn is_player_captured(&self) -> bool {
        self.state == HumanoidState::CapturedByPlayer
    }

    /// Hand the humanoid to `captor` and snap it to `at`.
    /// Returns false when the humanoid is destroyed or already held.
    pub fn capture(&mut self, captor: Captor, pos: &mut Position, at: Position) -> bool {
        if self.is_destroyed() || self.is_captured() {
            return false;
        }
        self.state = match captor {
            Captor::Lander(_) => HumanoidState::CapturedByLander,
            Captor::Player => HumanoidState::CapturedByPlayer,
        };
        self.captor = Some(captor);
        *pos = at;
        true
    }

    /// Drop a captured humanoid; it starts falling.
    pub fn release(&mut self) -> bool {
        if !self.is_captured() {
            return false;
        }
        self.state = HumanoidState::Falling;
        self.captor = None;
        true
    }

    /// Place the humanoid on the ground line at `x` and resume patrol.
    pub fn deposit(&mut self, pos: &mut Position, x: f32, ground_y: f32) -> bool {
        if self.is_destroyed() {
            return false;
        }
        self.state = HumanoidState::Roaming;
        self.captor = None;
        *pos = Position::new(x, ground_y);
        true
    }

    /// A falling humanoid reached the ground line.
    pub fn land(&mut self, pos: &mut Position, ground_y: f32) -> bool {
        if !self.is_falling() {
            return false;
        }
        self.state = HumanoidState::Roaming;
        pos.y = ground_y;
        true
    }

    /// Terminal. Returns false if already destroyed.
    pub fn destroy(&mut self) -> bool {
        if self.is_destroyed() {
            return false;
        }
        self.state = HumanoidState::Destroyed;
        self.captor = None;
        true
    }
}

/// A laser or missile in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub kind: ProjectileKind,
    pub owner: ProjectileOwner,
    /// Unit vector fixed at creation.
    pub direction: Vec2,
    pub speed: f32,
    /// Set on first hit or on leaving the arena; removed at end of frame.
    pub destroyed: bool,
}

/// The single fuel canister, recycled in place.
#[derive(Debug, Clone)]
pub struct FuelPickup {
    /// Visibility cycle; the pickup shows after the hidden window.
    pub cycle: Cooldown,
    pub hidden_secs: f64,
}

impl FuelPickup {
    /// Visible while the cycle's elapsed time is in (hidden, duration].
    pub fn is_visible(&self, now: &SimTime) -> bool {
        let elapsed = self.cycle.elapsed(now);
        elapsed > self.hidden_secs && elapsed <= self.cycle.duration_secs
    }

    /// The cycle ran out; the pickup should move and start over.
    pub fn cycle_expired(&self, now: &SimTime) -> bool {
        self.cycle.elapsed(now) >= self.cycle.duration_secs
    }
}

/// Creation sequence number. Entities of one kind are processed in this
/// order wherever "list order" matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SpawnOrder(pub u64);
