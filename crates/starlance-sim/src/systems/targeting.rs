//! Target acquisition and reassignment.
//!
//! A ship keeps its target while that target lives. When the target dies or
//! was never set, the nearest living ship of the opposing faction is picked.
//! Ships with nothing left to fight keep a cleared target; their autopilot
//! zeroes inputs and they coast.

use glam::DVec3;
use hecs::{Entity, World};

use starlance_core::components::{Hull, Pilot, Ship, ShipInfo};
use starlance_core::enums::Faction;
use starlance_core::types::Position;

struct Candidate {
    entity: Entity,
    faction: Faction,
    position: DVec3,
    alive: bool,
}

pub fn run(world: &mut World) {
    let roster: Vec<Candidate> = world
        .query::<(&Ship, &ShipInfo, &Hull, &Position)>()
        .iter()
        .map(|(entity, (_ship, info, hull, position))| Candidate {
            entity,
            faction: info.faction,
            position: position.0,
            alive: hull.alive,
        })
        .collect();

    for (_entity, (_ship, info, hull, position, pilot)) in
        world.query_mut::<(&Ship, &ShipInfo, &Hull, &Position, &mut Pilot)>()
    {
        if !hull.alive {
            continue;
        }

        let target_alive = pilot
            .target
            .map(|target| {
                roster
                    .iter()
                    .any(|candidate| candidate.entity == target && candidate.alive)
            })
            .unwrap_or(false);
        if target_alive {
            continue;
        }

        let hostile = info.faction.opposing();
        pilot.target = roster
            .iter()
            .filter(|candidate| candidate.alive && candidate.faction == hostile)
            .min_by(|a, b| {
                let da = (a.position - position.0).length_squared();
                let db = (b.position - position.0).length_squared();
                da.total_cmp(&db)
            })
            .map(|candidate| candidate.entity);
    }
}
