//! Snapshot assembly.

use std::collections::HashMap;

use glam::DVec3;
use hecs::{Entity, World};

use starlance_core::components::{EngineGlow, Hull, Pilot, Projectile, Ship, ShipInfo};
use starlance_core::enums::GamePhase;
use starlance_core::events::SimEvent;
use starlance_core::state::{ProjectileView, ShipView, SimSnapshot};
use starlance_core::types::{Orientation, Position, SimTime, Velocity};

/// Build the read-only view of the world after a tick. Events are moved in
/// and drained; each event is delivered in exactly one snapshot.
pub fn build(
    world: &World,
    time: SimTime,
    phase: GamePhase,
    time_scale: f64,
    player_ship: Option<Entity>,
    events: Vec<SimEvent>,
) -> SimSnapshot {
    let mut registry: HashMap<Entity, (u32, DVec3, bool)> = HashMap::new();
    for (entity, (_ship, info, position, hull)) in
        world.query::<(&Ship, &ShipInfo, &Position, &Hull)>().iter()
    {
        registry.insert(entity, (info.ship_id, position.0, hull.alive));
    }

    let mut ships: Vec<ShipView> = Vec::new();
    for (_entity, (_ship, info, position, orientation, velocity, hull, pilot, glow)) in world
        .query::<(
            &Ship,
            &ShipInfo,
            &Position,
            &Orientation,
            &Velocity,
            &Hull,
            &Pilot,
            &EngineGlow,
        )>()
        .iter()
    {
        let target = pilot.target.and_then(|target| registry.get(&target));
        ships.push(ShipView {
            ship_id: info.ship_id,
            name: info.name.clone(),
            faction: info.faction,
            position: position.0,
            orientation: *orientation,
            velocity: velocity.0,
            speed: velocity.0.length(),
            hp: hull.hp,
            max_hp: hull.max_hp,
            shield: hull.shield,
            max_shield: hull.max_shield,
            alive: hull.alive,
            player_controlled: pilot.player_controlled,
            autopilot: pilot.autopilot.as_ref().map(|mode| mode.kind()),
            autopilot_label: pilot
                .autopilot
                .as_ref()
                .map(|mode| mode.kind().label().to_string())
                .unwrap_or_else(|| "OFF".to_string()),
            target_ship_id: target.map(|&(ship_id, _, _)| ship_id),
            target_range: target.map(|&(_, target_pos, _)| (target_pos - position.0).length()),
            thrust_glow: glow.0,
        });
    }
    ships.sort_by_key(|view| view.ship_id);

    let mut projectiles: Vec<ProjectileView> = Vec::new();
    for (_entity, (projectile, position)) in world.query::<(&Projectile, &Position)>().iter() {
        projectiles.push(ProjectileView {
            position: position.0,
            direction: projectile.direction,
            faction: projectile.faction,
            owner_ship_id: projectile.owner_ship_id,
        });
    }

    let player_ship_id = player_ship
        .and_then(|entity| registry.get(&entity))
        .map(|&(ship_id, _, _)| ship_id);

    SimSnapshot {
        time,
        phase,
        time_scale,
        ships,
        projectiles,
        events,
        player_ship_id,
    }
}
