//! Autopilot behaviors for STARLANCE ships.
//!
//! Pure functions that compute virtual-joystick output for the five behavior
//! modes based on ship and target state. No ECS dependency — operates on
//! plain data, which keeps every behavior deterministic and testable.

pub mod behavior;
pub mod steering;
