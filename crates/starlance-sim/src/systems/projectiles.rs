//! Projectile flight, collision, and damage application.
//!
//! Projectiles are processed one at a time: advance, range check, then a
//! distance test against every live hostile ship in iteration order. Damage
//! lands before the next projectile is considered, so a ship destroyed
//! mid-pass is excluded from later hits within the same tick.

use glam::DVec3;
use hecs::{Entity, World};

use starlance_core::components::{Hull, Projectile, Ship, ShipInfo};
use starlance_core::constants::{PROJECTILE_HIT_RADIUS, SHIP_RADIUS_SCALE};
use starlance_core::enums::Faction;
use starlance_core::events::SimEvent;
use starlance_core::types::Position;

struct ShipTarget {
    entity: Entity,
    ship_id: u32,
    name: String,
    faction: Faction,
    position: DVec3,
    scale: DVec3,
    radius: f64,
    alive: bool,
}

pub fn run(world: &mut World, dt: f64, events: &mut Vec<SimEvent>) {
    let mut ships: Vec<ShipTarget> = Vec::new();
    for (entity, (_ship, info, hull, position)) in
        world.query::<(&Ship, &ShipInfo, &Hull, &Position)>().iter()
    {
        ships.push(ShipTarget {
            entity,
            ship_id: info.ship_id,
            name: info.name.clone(),
            faction: info.faction,
            position: position.0,
            scale: info.scale,
            radius: SHIP_RADIUS_SCALE * info.scale.max_element(),
            alive: hull.alive,
        });
    }

    let projectile_entities: Vec<Entity> = world
        .query::<&Projectile>()
        .iter()
        .map(|(entity, _)| entity)
        .collect();

    for projectile_entity in projectile_entities {
        let hit = {
            let Ok(mut projectile) = world.get::<&mut Projectile>(projectile_entity) else {
                continue;
            };
            let Ok(mut position) = world.get::<&mut Position>(projectile_entity) else {
                continue;
            };
            if !projectile.alive {
                continue;
            }

            let step = projectile.direction * projectile.speed * dt;
            position.0 += step;
            projectile.distance_traveled += step.length();
            if projectile.distance_traveled > projectile.max_range {
                projectile.alive = false;
                continue;
            }

            let mut hit = None;
            for (index, ship) in ships.iter().enumerate() {
                if !ship.alive
                    || ship.faction == projectile.faction
                    || ship.entity == projectile.owner
                {
                    continue;
                }
                let hit_radius = PROJECTILE_HIT_RADIUS + ship.radius;
                if (position.0 - ship.position).length() < hit_radius {
                    projectile.alive = false;
                    hit = Some((index, projectile.damage));
                    break;
                }
            }
            hit
        };

        if let Some((index, damage)) = hit {
            let ship = &mut ships[index];
            let destroyed = {
                let Ok(mut hull) = world.get::<&mut Hull>(ship.entity) else {
                    continue;
                };
                super::combat::apply_damage(&mut hull, damage)
            };
            events.push(SimEvent::ShipHit {
                ship_id: ship.ship_id,
                damage,
            });
            if destroyed {
                ship.alive = false;
                events.push(SimEvent::ShipDestroyed {
                    ship_id: ship.ship_id,
                    name: ship.name.clone(),
                    position: ship.position,
                    scale: ship.scale,
                });
            }
        }
    }
}
