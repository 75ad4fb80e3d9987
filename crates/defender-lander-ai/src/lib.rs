//! Lander AI for DEFENDER.
//!
//! Implements target selection and the per-frame movement state machine
//! for hostile landers (seek, creep, ascend).

pub mod fsm;
pub mod profiles;
pub mod targeting;

pub use defender_core as core;
