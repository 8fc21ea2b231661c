//! Simulation engine for STARLANCE.
//!
//! Owns the hecs ECS world, runs the combat systems at a fixed tick rate,
//! and produces SimSnapshots for the visual layer.

pub mod engine;
pub mod systems;
pub mod world_setup;

pub use engine::SimulationEngine;
pub use starlance_core as core;

#[cfg(test)]
mod tests;
