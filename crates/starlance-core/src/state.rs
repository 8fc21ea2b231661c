//! Simulation snapshot — the complete visible state produced each tick.
//!
//! Snapshots are read-only views for external collaborators (camera, HUD,
//! renderer). The core never blocks on their consumption.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::{AutopilotKind, Faction, GamePhase};
use crate::events::SimEvent;
use crate::types::{Orientation, SimTime};

/// Complete simulation state after one tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub time_scale: f64,
    /// All ships, sorted by ship_id. Dead ships remain listed with
    /// `alive == false` so the visual layer can finish their cleanup.
    pub ships: Vec<ShipView>,
    pub projectiles: Vec<ProjectileView>,
    pub events: Vec<SimEvent>,
    pub player_ship_id: Option<u32>,
}

/// Per-ship read-only state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipView {
    pub ship_id: u32,
    pub name: String,
    pub faction: Faction,
    pub position: DVec3,
    pub orientation: Orientation,
    pub velocity: DVec3,
    pub speed: f64,
    pub hp: f64,
    pub max_hp: f64,
    pub shield: f64,
    pub max_shield: f64,
    pub alive: bool,
    pub player_controlled: bool,
    /// Engaged autopilot mode, if any.
    pub autopilot: Option<AutopilotKind>,
    /// HUD label: mode name, or "OFF" under manual control.
    pub autopilot_label: String,
    pub target_ship_id: Option<u32>,
    /// Distance to the target, when one exists.
    pub target_range: Option<f64>,
    /// Engine-glow intensity in [0,1].
    pub thrust_glow: f64,
}

/// Per-projectile read-only state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: DVec3,
    pub direction: DVec3,
    pub faction: Faction,
    pub owner_ship_id: u32,
}
