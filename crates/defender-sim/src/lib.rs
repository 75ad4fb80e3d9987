//! Simulation engine for DEFENDER.
//!
//! Owns the hecs ECS world, steps all systems once per frame in a fixed
//! order, and produces GameStateSnapshots for the renderer.

pub mod engine;
pub mod queries;
pub mod scoring;
pub mod systems;
pub mod world_setup;

pub use defender_core as core;
pub use engine::{SimConfig, SimulationEngine};

#[cfg(test)]
mod tests;
