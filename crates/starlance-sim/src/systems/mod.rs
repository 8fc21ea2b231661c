//! Simulation systems, run in fixed order each tick by the engine.

pub mod autopilot;
pub mod cleanup;
pub mod combat;
pub mod physics;
pub mod projectiles;
pub mod snapshot;
pub mod targeting;
pub mod weapons;
