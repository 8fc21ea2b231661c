//! Shared aiming primitive.

use glam::DVec3;

use starlance_core::constants::{AIM_EPSILON, AIM_GAIN};
use starlance_core::types::{safe_normalize, Basis};

/// Compute rotation input that steers the ship's forward axis toward
/// `target_pos`.
///
/// The direction to the target is projected onto the body right axis (yaw
/// error) and up axis (pitch error); each error is scaled by the aim gain and
/// clamped to [-1, 1]. Roll is never commanded.
///
/// Degenerate case: a target within `AIM_EPSILON` gives no direction to aim
/// from, so the output is exactly zero.
pub fn aim_at(position: DVec3, basis: &Basis, target_pos: DVec3) -> DVec3 {
    let to_target = target_pos - position;
    if to_target.length() < AIM_EPSILON {
        return DVec3::ZERO;
    }
    let dir = safe_normalize(to_target);

    let right_error = dir.dot(basis.right);
    let up_error = dir.dot(basis.up);

    let yaw = (right_error * AIM_GAIN).clamp(-1.0, 1.0);
    let pitch = (-up_error * AIM_GAIN).clamp(-1.0, 1.0);

    DVec3::new(pitch, yaw, 0.0)
}
