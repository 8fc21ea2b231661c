//! Weapon cooldowns and fire decisions.

use std::collections::HashMap;

use glam::DVec3;
use hecs::{Entity, World};

use starlance_core::components::{Hull, Pilot, Projectile, Ship, ShipInfo, Weapon, WeaponRack};
use starlance_core::constants::{AI_FIRE_AIM_DOT, AI_FIRE_MIN_RANGE, MUZZLE_OFFSET};
use starlance_core::enums::Faction;
use starlance_core::types::{Orientation, Position};

/// Count down every mounted weapon. Timers may go negative; firing only
/// checks for non-positive.
pub fn tick_cooldowns(world: &mut World, dt: f64) {
    for (_entity, rack) in world.query_mut::<&mut WeaponRack>() {
        for weapon in rack.weapons.iter_mut() {
            weapon.cooldown_remaining -= dt;
        }
    }
}

/// Decide who shoots this tick and spawn their projectiles.
///
/// The player ship fires whenever the trigger is held. AI ships fire when
/// all of: they have a live target, the nose is within the aim cone, and the
/// target sits inside the primary weapon's range (but not point-blank on top
/// of it). Every ready weapon in the rack discharges together.
pub fn run_fire(world: &mut World, trigger_held: bool) {
    let mut targets: HashMap<Entity, (DVec3, bool)> = HashMap::new();
    for (entity, (_ship, position, hull)) in world.query::<(&Ship, &Position, &Hull)>().iter() {
        targets.insert(entity, (position.0, hull.alive));
    }

    let mut firing: Vec<Entity> = Vec::new();
    for (entity, (_ship, hull, position, orientation, pilot, rack)) in world
        .query::<(&Ship, &Hull, &Position, &Orientation, &Pilot, &WeaponRack)>()
        .iter()
    {
        if !hull.alive || rack.weapons.is_empty() {
            continue;
        }

        let wants_fire = if pilot.player_controlled {
            trigger_held
        } else {
            match pilot.target.and_then(|target| targets.get(&target)) {
                Some(&(target_pos, true)) => {
                    let to_target = target_pos - position.0;
                    let dist = to_target.length();
                    let aligned = dist > 0.0
                        && orientation.forward().dot(to_target / dist) > AI_FIRE_AIM_DOT;
                    aligned && dist >= AI_FIRE_MIN_RANGE && dist < rack.weapons[0].range
                }
                _ => false,
            }
        };
        if wants_fire {
            firing.push(entity);
        }
    }

    let mut spawns: Vec<(Projectile, Position)> = Vec::new();
    for entity in firing {
        let (ship_id, faction, muzzle_base, direction) = {
            let Ok(info) = world.get::<&ShipInfo>(entity) else {
                continue;
            };
            let Ok(position) = world.get::<&Position>(entity) else {
                continue;
            };
            let Ok(orientation) = world.get::<&Orientation>(entity) else {
                continue;
            };
            (
                info.ship_id,
                info.faction,
                position.0,
                orientation.forward(),
            )
        };

        let Ok(mut rack) = world.get::<&mut WeaponRack>(entity) else {
            continue;
        };
        for weapon in rack.weapons.iter_mut() {
            if let Some(projectile) =
                fire_weapon(weapon, entity, ship_id, faction, direction)
            {
                spawns.push((projectile, Position(muzzle_base + direction * MUZZLE_OFFSET)));
            }
        }
    }

    for bundle in spawns {
        world.spawn(bundle);
    }
}

/// Discharge one weapon if its cooldown has elapsed, resetting the timer.
fn fire_weapon(
    weapon: &mut Weapon,
    owner: Entity,
    owner_ship_id: u32,
    faction: Faction,
    direction: DVec3,
) -> Option<Projectile> {
    if !weapon.can_fire() {
        return None;
    }
    weapon.cooldown_remaining = weapon.cooldown_secs;
    Some(Projectile {
        owner,
        owner_ship_id,
        faction,
        damage: weapon.damage,
        speed: weapon.projectile_speed,
        max_range: weapon.range,
        direction,
        distance_traveled: 0.0,
        alive: true,
    })
}
