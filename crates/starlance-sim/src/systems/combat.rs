//! Damage resolution.

use starlance_core::components::Hull;

/// Apply `amount` damage to a hull: shields absorb first, the remainder
/// comes off hp, hp is floored at zero.
///
/// Returns `true` exactly when this call destroys the ship. A dead hull is
/// left untouched and returns `false`, so destruction is reported once even
/// if several projectiles connect in the same tick.
pub fn apply_damage(hull: &mut Hull, amount: f64) -> bool {
    if !hull.alive {
        return false;
    }

    let mut remaining = amount;
    if hull.shield > 0.0 {
        let absorbed = hull.shield.min(remaining);
        hull.shield -= absorbed;
        remaining -= absorbed;
    }
    if remaining > 0.0 {
        hull.hp -= remaining;
    }

    if hull.hp <= 0.0 {
        hull.hp = 0.0;
        hull.alive = false;
        return true;
    }
    false
}
