//! Headless DEFENDER runner.
//!
//! This crate wires the simulation to a frame-paced loop, a scripted input
//! source and a JSON high-score file. There is no renderer: snapshots are
//! consumed by the input source and the logs.

pub mod autopilot;
pub mod config;
pub mod game_loop;
pub mod persistence;

pub use defender_core as core;
