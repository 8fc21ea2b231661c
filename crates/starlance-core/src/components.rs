//! ECS components for hecs entities.
//!
//! Components are plain data structs with no game logic.
//! Logic lives in systems, not components.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::{AutopilotMode, Faction};

/// Marks an entity as a ship.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ship;

/// Ship identity and visual footprint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipInfo {
    /// Registry number assigned at spawn, stable for the ship's life.
    /// Used by snapshots and events in place of entity handles.
    pub ship_id: u32,
    pub name: String,
    pub faction: Faction,
    /// Visual scale; the largest axis drives the collision radius.
    pub scale: DVec3,
}

/// Physical handling parameters from the ship class template.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FlightDynamics {
    pub mass: f64,
    pub thrust_force: f64,
    pub rotation_force: f64,
    pub max_speed: f64,
    /// Linear damping coefficient in [0,1), applied once per tick.
    pub drag: f64,
}

/// The virtual joystick — the sole channel through which both player and
/// autopilot affect physics. Exactly one writer per tick.
///
/// thrust (local space):  x = strafe, y = vertical, z = forward/back
/// rotation:              x = pitch,  y = yaw,      z = roll
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ControlInput {
    pub thrust: DVec3,
    pub rotation: DVec3,
}

/// Normalized thrust magnitude in [0,1], written by the physics system each
/// tick. Consumed by the visual layer for engine-glow intensity.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EngineGlow(pub f64);

/// Combat state. `alive` is derived (hp > 0) and monotonic: once false it
/// never flips back — a ship is never revived.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hull {
    pub hp: f64,
    pub max_hp: f64,
    pub shield: f64,
    pub max_shield: f64,
    pub alive: bool,
}

impl Hull {
    pub fn new(hp: f64, shield: f64) -> Self {
        Self {
            hp,
            max_hp: hp,
            shield,
            max_shield: shield,
            alive: true,
        }
    }
}

/// Control-mode state: who flies this ship, what it targets.
///
/// The target is a weak handle into the ship registry; a destroyed ship is
/// observed as "gone" (failed lookup or `alive == false`), never dangling.
#[derive(Debug, Clone)]
pub struct Pilot {
    pub player_controlled: bool,
    pub autopilot: Option<AutopilotMode>,
    pub target: Option<hecs::Entity>,
    /// Fixed pseudo-random bias drawn at spawn; its sign picks the
    /// attack-run break direction.
    pub break_bias: f64,
}

impl Pilot {
    pub fn new(autopilot: Option<AutopilotMode>, break_bias: f64) -> Self {
        Self {
            player_controlled: false,
            autopilot,
            target: None,
            break_bias,
        }
    }
}

/// A weapon mounted on a ship. Stateless between ships.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Weapon {
    pub damage: f64,
    /// Cooldown duration between shots (seconds).
    pub cooldown_secs: f64,
    pub projectile_speed: f64,
    pub range: f64,
    /// Remaining cooldown. May go negative; firing only checks <= 0.
    pub cooldown_remaining: f64,
}

impl Weapon {
    pub fn new(damage: f64, cooldown_secs: f64, projectile_speed: f64, range: f64) -> Self {
        Self {
            damage,
            cooldown_secs,
            projectile_speed,
            range,
            cooldown_remaining: 0.0,
        }
    }

    pub fn can_fire(&self) -> bool {
        self.cooldown_remaining <= 0.0
    }
}

/// All weapons owned by one ship.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeaponRack {
    pub weapons: Vec<Weapon>,
}

/// A projectile in flight. Faction is copied from the owner at spawn and
/// never re-read; direction is a unit vector fixed at spawn.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub owner: hecs::Entity,
    pub owner_ship_id: u32,
    pub faction: Faction,
    pub damage: f64,
    pub speed: f64,
    pub max_range: f64,
    pub direction: DVec3,
    pub distance_traveled: f64,
    pub alive: bool,
}
