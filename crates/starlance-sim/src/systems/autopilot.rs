//! Drives ships with an engaged autopilot.
//!
//! Target kinematics are snapshotted up front so behavior evaluation never
//! borrows two ships at once. Ships under manual control are untouched; a
//! ship whose target is gone or dead gets zeroed inputs and coasts.

use std::collections::HashMap;

use glam::DVec3;
use hecs::{Entity, World};

use starlance_core::components::{ControlInput, FlightDynamics, Hull, Pilot, Ship};
use starlance_core::types::{Orientation, Position, Velocity};
use starlance_pilot::behavior::{self, PilotContext};

struct TargetState {
    position: DVec3,
    velocity: DVec3,
    alive: bool,
}

pub fn run(world: &mut World, elapsed_secs: f64, dt: f64) {
    let mut targets: HashMap<Entity, TargetState> = HashMap::new();
    for (entity, (_ship, position, velocity, hull)) in
        world.query::<(&Ship, &Position, &Velocity, &Hull)>().iter()
    {
        targets.insert(
            entity,
            TargetState {
                position: position.0,
                velocity: velocity.0,
                alive: hull.alive,
            },
        );
    }

    for (_entity, (_ship, hull, position, velocity, orientation, dynamics, pilot, input)) in world
        .query_mut::<(
            &Ship,
            &Hull,
            &Position,
            &Velocity,
            &Orientation,
            &FlightDynamics,
            &mut Pilot,
            &mut ControlInput,
        )>()
    {
        if !hull.alive {
            continue;
        }
        let Some(mode) = pilot.autopilot.as_mut() else {
            continue;
        };

        let target = pilot
            .target
            .and_then(|entity| targets.get(&entity))
            .filter(|target| target.alive);
        let Some(target) = target else {
            *input = ControlInput::default();
            continue;
        };

        let ctx = PilotContext {
            position: position.0,
            velocity: velocity.0,
            basis: orientation.basis(),
            max_speed: dynamics.max_speed,
            target_position: target.position,
            target_velocity: target.velocity,
            elapsed_secs,
            break_bias: pilot.break_bias,
        };
        let output = behavior::run(mode, &ctx, dt);
        input.thrust = output.thrust;
        input.rotation = output.rotation;
    }
}
