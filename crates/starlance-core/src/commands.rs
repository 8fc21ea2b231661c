//! Player commands sent from the input layer to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::AutopilotKind;

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Flight ---
    /// Raw stick state for the player ship, held until replaced.
    /// Any component beyond the deadzone cancels an engaged autopilot.
    FlightInput { thrust: DVec3, rotation: DVec3 },
    /// Trigger held: fire all of the player ship's weapons each tick.
    SetFiring { held: bool },

    // --- Autopilot ---
    /// Engage an autopilot mode on the player ship. Selecting the mode
    /// that is already engaged toggles it off.
    SetAutopilot { mode: AutopilotKind },
    /// Drop back to manual control.
    DisengageAutopilot,

    // --- Targeting / control ---
    /// Cycle the player ship's target through alive enemies.
    CycleTarget,
    /// Hand player control to the next alive friendly ship.
    SwitchShip,

    // --- Simulation control ---
    /// Set time scale (1.0 = normal, 2.0 = double, 0.0 = paused).
    SetTimeScale { scale: f64 },
    /// Spawn the scene and start simulating.
    StartMission,
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
}
