//! Events emitted by the simulation for the visual layer.
//!
//! Hit and destruction effects (flash, explosion debris) are rendered
//! externally; these events carry the timing and the data they need.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Per-tick simulation events.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A projectile struck a ship. Emitted synchronously with damage
    /// application; drives the brief hit flash.
    ShipHit { ship_id: u32, damage: f64 },
    /// A ship's hp reached zero. Carries the last position and scale for
    /// explosion-effect spawning.
    ShipDestroyed {
        ship_id: u32,
        name: String,
        position: DVec3,
        scale: DVec3,
    },
}
