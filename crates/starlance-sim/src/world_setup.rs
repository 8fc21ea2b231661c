//! Ship class templates and mission scene assembly.

use glam::DVec3;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use starlance_core::components::{
    ControlInput, EngineGlow, FlightDynamics, Hull, Pilot, Ship, ShipInfo, Weapon, WeaponRack,
};
use starlance_core::enums::{AutopilotKind, AutopilotMode, Faction, ShipClassId};
use starlance_core::types::{Orientation, Position, Velocity};

pub struct WeaponSpec {
    pub damage: f64,
    pub cooldown_secs: f64,
    pub projectile_speed: f64,
    pub range: f64,
}

/// Static handling and loadout template for one ship class.
pub struct ShipClass {
    pub name: &'static str,
    pub faction: Faction,
    pub mass: f64,
    pub thrust_force: f64,
    pub rotation_force: f64,
    pub max_speed: f64,
    pub drag: f64,
    pub hp: f64,
    pub shield: f64,
    pub scale: DVec3,
    pub weapons: &'static [WeaponSpec],
    pub default_autopilot: AutopilotKind,
}

const FIGHTER_WEAPONS: &[WeaponSpec] = &[WeaponSpec {
    damage: 10.0,
    cooldown_secs: 0.15,
    projectile_speed: 200.0,
    range: 300.0,
}];

const CARRIER_WEAPONS: &[WeaponSpec] = &[
    WeaponSpec {
        damage: 8.0,
        cooldown_secs: 0.1,
        projectile_speed: 180.0,
        range: 350.0,
    },
    WeaponSpec {
        damage: 30.0,
        cooldown_secs: 0.8,
        projectile_speed: 120.0,
        range: 400.0,
    },
];

const ENEMY_FIGHTER_WEAPONS: &[WeaponSpec] = &[WeaponSpec {
    damage: 8.0,
    cooldown_secs: 0.2,
    projectile_speed: 190.0,
    range: 280.0,
}];

pub fn class_def(class: ShipClassId) -> ShipClass {
    match class {
        ShipClassId::Fighter => ShipClass {
            name: "Fighter",
            faction: Faction::Friendly,
            mass: 10.0,
            thrust_force: 200.0,
            rotation_force: 8.0,
            max_speed: 80.0,
            drag: 0.02,
            hp: 100.0,
            shield: 50.0,
            scale: DVec3::new(1.0, 0.3, 1.5),
            weapons: FIGHTER_WEAPONS,
            default_autopilot: AutopilotKind::KeepAtRange,
        },
        ShipClassId::Carrier => ShipClass {
            name: "Carrier",
            faction: Faction::Friendly,
            mass: 5000.0,
            thrust_force: 8000.0,
            rotation_force: 400.0,
            max_speed: 30.0,
            drag: 0.01,
            hp: 2000.0,
            shield: 500.0,
            scale: DVec3::new(4.0, 2.0, 10.0),
            weapons: CARRIER_WEAPONS,
            default_autopilot: AutopilotKind::KeepAtRange,
        },
        ShipClassId::EnemyFighter => ShipClass {
            name: "Enemy Fighter",
            faction: Faction::Enemy,
            mass: 12.0,
            thrust_force: 210.0,
            rotation_force: 7.5,
            max_speed: 75.0,
            drag: 0.02,
            hp: 80.0,
            shield: 30.0,
            scale: DVec3::new(1.0, 0.3, 1.5),
            weapons: ENEMY_FIGHTER_WEAPONS,
            default_autopilot: AutopilotKind::AttackRun,
        },
    }
}

/// Spawn one ship from its class template.
///
/// The break-direction bias is drawn from the engine RNG here, which makes
/// spawn order part of the deterministic seed contract.
pub fn spawn_ship(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    next_ship_id: &mut u32,
    class: ShipClassId,
    position: DVec3,
) -> Entity {
    let def = class_def(class);
    let ship_id = *next_ship_id;
    *next_ship_id += 1;

    let break_bias: f64 = rng.gen_range(-1.0..1.0);
    let weapons = def
        .weapons
        .iter()
        .map(|spec| Weapon::new(spec.damage, spec.cooldown_secs, spec.projectile_speed, spec.range))
        .collect();

    world.spawn((
        Ship,
        ShipInfo {
            ship_id,
            name: def.name.to_string(),
            faction: def.faction,
            scale: def.scale,
        },
        FlightDynamics {
            mass: def.mass,
            thrust_force: def.thrust_force,
            rotation_force: def.rotation_force,
            max_speed: def.max_speed,
            drag: def.drag,
        },
        Position(position),
        Velocity::default(),
        Orientation::default(),
        ControlInput::default(),
        EngineGlow::default(),
        Hull::new(def.hp, def.shield),
        Pilot::new(
            Some(AutopilotMode::from_kind(def.default_autopilot)),
            break_bias,
        ),
        WeaponRack { weapons },
    ))
}

/// Spawn the mission scene: the player fighter, an escort carrier, and a
/// three-ship hostile patrol. Returns the player entity.
pub fn setup_mission(world: &mut World, rng: &mut ChaCha8Rng, next_ship_id: &mut u32) -> Entity {
    let player = spawn_ship(world, rng, next_ship_id, ShipClassId::Fighter, DVec3::ZERO);
    if let Ok(mut pilot) = world.get::<&mut Pilot>(player) {
        pilot.player_controlled = true;
        pilot.autopilot = None;
    }

    spawn_ship(
        world,
        rng,
        next_ship_id,
        ShipClassId::Carrier,
        DVec3::new(30.0, -5.0, -40.0),
    );

    for position in [
        DVec3::new(100.0, 20.0, 150.0),
        DVec3::new(-80.0, -10.0, 180.0),
        DVec3::new(50.0, 40.0, 200.0),
    ] {
        spawn_ship(world, rng, next_ship_id, ShipClassId::EnemyFighter, position);
    }

    player
}
