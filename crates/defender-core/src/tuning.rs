//! Runtime-fixed tuning values read by the simulation.
//!
//! Built once at startup and handed to the engine; nothing in the
//! simulation mutates it afterwards.

use serde::{Deserialize, Serialize};

use glam::Vec2;

use crate::constants::*;
use crate::types::Aabb;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    pub arena_width: f32,
    pub arena_height: f32,
    pub ground_y: f32,

    pub player_speed: f32,
    pub fuel_per_move: f32,
    pub max_fuel: f32,
    pub initial_lives: u32,
    pub initial_shields: u32,
    pub laser_cooldown_secs: f64,
    pub shield_duration_secs: f64,
    pub deposit_y: f32,

    pub laser_speed: f32,
    pub missile_speed: f32,

    pub lander_seek_speed: f32,
    pub lander_creep_speed: f32,
    pub lander_spawn_interval_secs: f64,
    pub lander_lifetime_cap: u32,
    pub missile_cooldown_secs: f64,

    pub humanoid_patrol_speed: f32,
    pub humanoid_fall_speed: f32,
    pub humanoid_concurrent_target: u32,
    pub humanoid_lifetime_cap: u32,
    pub humanoid_spawn_interval_secs: f64,

    pub fuel_cycle_secs: f64,
    pub fuel_hidden_secs: f64,

    pub crash_damage_cooldown_secs: f64,
    pub missile_damage_cooldown_secs: f64,

    pub lander_kill_bonus: i64,
    pub humanoid_kill_penalty: i64,
    pub win_landers_destroyed: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            ground_y: GROUND_Y,

            player_speed: PLAYER_SPEED,
            fuel_per_move: FUEL_PER_MOVE,
            max_fuel: PLAYER_MAX_FUEL,
            initial_lives: INITIAL_LIVES,
            initial_shields: INITIAL_SHIELDS,
            laser_cooldown_secs: LASER_COOLDOWN,
            shield_duration_secs: SHIELD_DURATION,
            deposit_y: DEPOSIT_Y,

            laser_speed: LASER_SPEED,
            missile_speed: MISSILE_SPEED,

            lander_seek_speed: LANDER_SEEK_SPEED,
            lander_creep_speed: LANDER_CREEP_SPEED,
            lander_spawn_interval_secs: LANDER_SPAWN_INTERVAL,
            lander_lifetime_cap: LANDER_LIFETIME_CAP,
            missile_cooldown_secs: MISSILE_FIRE_COOLDOWN,

            humanoid_patrol_speed: HUMANOID_PATROL_SPEED,
            humanoid_fall_speed: HUMANOID_FALL_SPEED,
            humanoid_concurrent_target: HUMANOID_CONCURRENT_TARGET,
            humanoid_lifetime_cap: HUMANOID_LIFETIME_CAP,
            humanoid_spawn_interval_secs: HUMANOID_SPAWN_INTERVAL,

            fuel_cycle_secs: FUEL_CYCLE,
            fuel_hidden_secs: FUEL_HIDDEN_FOR,

            crash_damage_cooldown_secs: CRASH_DAMAGE_COOLDOWN,
            missile_damage_cooldown_secs: MISSILE_DAMAGE_COOLDOWN,

            lander_kill_bonus: LANDER_KILL_BONUS,
            humanoid_kill_penalty: HUMANOID_KILL_PENALTY,
            win_landers_destroyed: WIN_LANDERS_DESTROYED,
        }
    }
}

impl Tuning {
    /// Simulation/test mode: landers may fire almost immediately.
    pub fn simulation() -> Self {
        Self {
            missile_cooldown_secs: MISSILE_FIRE_COOLDOWN * SIMULATION_MISSILE_COOLDOWN_SCALE,
            ..Self::default()
        }
    }

    /// The playfield rectangle, edges included.
    pub fn arena(&self) -> Aabb {
        Aabb {
            min: Vec2::ZERO,
            max: Vec2::new(self.arena_width, self.arena_height),
        }
    }
}
