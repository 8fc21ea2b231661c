//! Flight-model integration.
//!
//! Reads each ship's control input and advances orientation, velocity, and
//! position for one tick. Rotation is integrated before thrust so the thrust
//! vector uses the tick's new heading.

use glam::DVec3;
use hecs::World;

use starlance_core::components::{ControlInput, EngineGlow, FlightDynamics, Hull};
use starlance_core::constants::{MIN_MASS, ROTATION_RATE_SCALE};
use starlance_core::types::{Orientation, Position, Velocity};

pub fn run(world: &mut World, dt: f64) {
    for (_entity, (dynamics, input, orientation, velocity, position, glow, hull)) in world
        .query_mut::<(
            &FlightDynamics,
            &ControlInput,
            &mut Orientation,
            &mut Velocity,
            &mut Position,
            &mut EngineGlow,
            &Hull,
        )>()
    {
        if !hull.alive {
            continue;
        }
        integrate(dynamics, input, orientation, velocity, position, glow, dt);
    }
}

/// Integrate one ship for one tick of `dt` seconds.
pub fn integrate(
    dynamics: &FlightDynamics,
    input: &ControlInput,
    orientation: &mut Orientation,
    velocity: &mut Velocity,
    position: &mut Position,
    glow: &mut EngineGlow,
    dt: f64,
) {
    let mass = dynamics.mass.max(MIN_MASS);

    // Rotation rate in degrees/s. Integrated with a negative sense, matching
    // the aim controller: negative pitch input raises the nose, positive yaw
    // input turns right.
    let rotation_rate = dynamics.rotation_force / mass * ROTATION_RATE_SCALE;
    orientation.pitch_deg -= input.rotation.x * rotation_rate * dt;
    orientation.yaw_deg -= input.rotation.y * rotation_rate * dt;
    orientation.roll_deg -= input.rotation.z * rotation_rate * dt;

    let basis = orientation.basis();
    let world_force = (basis.forward * input.thrust.z
        + basis.right * input.thrust.x
        + basis.up * input.thrust.y)
        * dynamics.thrust_force;
    velocity.0 += world_force / mass * dt;

    // Drag is a per-tick multiplicative decay, applied even when coasting.
    velocity.0 *= 1.0 - dynamics.drag;

    let speed = velocity.0.length();
    if speed > dynamics.max_speed {
        velocity.0 = velocity.0 / speed * dynamics.max_speed;
    }

    position.0 += velocity.0 * dt;

    glow.0 = (input.thrust.x.abs() + input.thrust.y.abs() + input.thrust.z.abs()).min(1.0);
}
