//! ECS systems that operate on the simulation world each frame.
//!
//! Systems are pure functions that take `&mut World` (or `&World` for read-only).
//! They do not own state. Entity state lives in components; run-wide
//! counters live in `ScoreState` and are passed in explicitly.

pub mod cleanup;
pub mod collision;
pub mod game_state;
pub mod humanoid;
pub mod lander_ai;
pub mod player;
pub mod projectiles;
pub mod snapshot;
pub mod spawner;
