//! Core types and definitions for the DEFENDER simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry, the simulation clock, components, input intents, state
//! snapshots, audio events, tuning, and the high-score table.
//! It has no dependency on any windowing, audio, or runtime framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod highscores;
pub mod state;
pub mod tuning;
pub mod types;
