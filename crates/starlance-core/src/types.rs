//! Fundamental geometric and simulation types.

use glam::{DQuat, DVec3, EulerRot};
use serde::{Deserialize, Serialize};

/// 3D position in simulation space (world units, Cartesian).
/// +Y is world up; a ship with zero orientation faces -Z.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub DVec3);

/// 3D velocity in simulation space (units/s).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub DVec3);

/// Ship attitude as pitch/yaw/roll Euler angles in degrees.
///
/// Degrees match the rotation-force tuning of the ship class tables:
/// one unit of rotation input on a fighter turns it roughly 48°/s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    pub pitch_deg: f64,
    pub yaw_deg: f64,
    pub roll_deg: f64,
}

/// Orthonormal body axes derived from an [`Orientation`].
#[derive(Debug, Clone, Copy)]
pub struct Basis {
    pub forward: DVec3,
    pub right: DVec3,
    pub up: DVec3,
}

impl Orientation {
    pub fn new(pitch_deg: f64, yaw_deg: f64, roll_deg: f64) -> Self {
        Self {
            pitch_deg,
            yaw_deg,
            roll_deg,
        }
    }

    /// Attitude quaternion: yaw about world Y, then pitch about body X,
    /// then roll about body Z.
    pub fn rotation(&self) -> DQuat {
        DQuat::from_euler(
            EulerRot::YXZ,
            self.yaw_deg.to_radians(),
            self.pitch_deg.to_radians(),
            self.roll_deg.to_radians(),
        )
    }

    /// Body axes in world space. Forward is -Z at zero attitude; positive
    /// pitch angle raises the nose and negative yaw angle turns right.
    pub fn basis(&self) -> Basis {
        let q = self.rotation();
        Basis {
            forward: q * DVec3::NEG_Z,
            right: q * DVec3::X,
            up: q * DVec3::Y,
        }
    }

    pub fn forward(&self) -> DVec3 {
        self.rotation() * DVec3::NEG_Z
    }
}

/// Normalize a vector, short-circuiting to zero when the input is too small
/// to carry a direction.
pub fn safe_normalize(v: DVec3) -> DVec3 {
    let len = v.length();
    if len < 1e-9 {
        DVec3::ZERO
    } else {
        v / len
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Seconds per tick at the fixed tick rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.advance_by(self.dt());
    }

    /// Advance by one tick of `dt` seconds (time-scaled ticks).
    pub fn advance_by(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}
