//! The simulation engine: owns the world, consumes player commands, and
//! steps the systems at a fixed tick rate.

use std::collections::VecDeque;
use std::mem;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use starlance_core::commands::PlayerCommand;
use starlance_core::components::{ControlInput, Hull, Pilot, Ship, ShipInfo};
use starlance_core::constants::{DT, MANUAL_OVERRIDE_DEADZONE, MAX_TIME_SCALE};
use starlance_core::enums::{AutopilotMode, Faction, GamePhase};
use starlance_core::events::SimEvent;
use starlance_core::state::SimSnapshot;
use starlance_core::types::SimTime;

use crate::systems;
use crate::world_setup;

/// Engine construction parameters.
#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    /// Seed for the deterministic RNG. Two engines with the same seed and
    /// command sequence produce identical snapshots.
    pub seed: u64,
    pub time_scale: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
        }
    }
}

pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    time_scale: f64,
    rng: ChaCha8Rng,
    next_ship_id: u32,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<SimEvent>,
    player_ship: Option<Entity>,
    /// Most recent player stick state, re-applied every tick while under
    /// manual control.
    stick: ControlInput,
    trigger_held: bool,
}

impl SimulationEngine {
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::MainMenu,
            time_scale: config.time_scale.clamp(0.0, MAX_TIME_SCALE),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            next_ship_id: 0,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            player_ship: None,
            stick: ControlInput::default(),
            trigger_held: false,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn player_ship(&self) -> Option<Entity> {
        self.player_ship
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    ///
    /// Commands are always drained; systems only run while the game phase is
    /// Active. The effective tick length is `DT * time_scale`, so a paused
    /// clock (scale 0) still consumes commands and emits snapshots.
    pub fn tick(&mut self) -> SimSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            let dt = DT * self.time_scale;
            self.run_systems(dt);
            self.time.advance_by(dt);
        }

        let events = mem::take(&mut self.events);
        systems::snapshot::build(
            &self.world,
            self.time,
            self.phase,
            self.time_scale,
            self.player_ship,
            events,
        )
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartMission => {
                if self.phase == GamePhase::MainMenu {
                    let player = world_setup::setup_mission(
                        &mut self.world,
                        &mut self.rng,
                        &mut self.next_ship_id,
                    );
                    self.player_ship = Some(player);
                    self.time = SimTime::default();
                    self.stick = ControlInput::default();
                    self.trigger_held = false;
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::SetTimeScale { scale } => {
                self.time_scale = scale.clamp(0.0, MAX_TIME_SCALE);
            }
            PlayerCommand::FlightInput { thrust, rotation } => {
                self.stick = ControlInput { thrust, rotation };
            }
            PlayerCommand::SetFiring { held } => {
                self.trigger_held = held;
            }
            PlayerCommand::SetAutopilot { mode } => {
                if let Some(player) = self.alive_player_ship() {
                    if let Ok(mut pilot) = self.world.get::<&mut Pilot>(player) {
                        // Selecting the engaged mode again toggles it off.
                        let same = pilot
                            .autopilot
                            .as_ref()
                            .map(|current| current.kind() == mode)
                            .unwrap_or(false);
                        pilot.autopilot = if same {
                            None
                        } else {
                            Some(AutopilotMode::from_kind(mode))
                        };
                    }
                }
            }
            PlayerCommand::DisengageAutopilot => {
                if let Some(player) = self.player_ship {
                    if let Ok(mut pilot) = self.world.get::<&mut Pilot>(player) {
                        pilot.autopilot = None;
                    }
                }
            }
            PlayerCommand::CycleTarget => self.cycle_target(),
            PlayerCommand::SwitchShip => self.switch_ship(),
        }
    }

    fn alive_player_ship(&self) -> Option<Entity> {
        let player = self.player_ship?;
        let hull = self.world.get::<&Hull>(player).ok()?;
        hull.alive.then_some(player)
    }

    /// Cycle the player ship's target through living enemies in ship-id order.
    fn cycle_target(&mut self) {
        let Some(player) = self.alive_player_ship() else {
            return;
        };

        let mut enemies: Vec<(u32, Entity)> = self
            .world
            .query::<(&Ship, &ShipInfo, &Hull)>()
            .iter()
            .filter(|(_, (_, info, hull))| hull.alive && info.faction == Faction::Enemy)
            .map(|(entity, (_, info, _))| (info.ship_id, entity))
            .collect();
        enemies.sort_by_key(|&(ship_id, _)| ship_id);
        if enemies.is_empty() {
            return;
        }

        if let Ok(mut pilot) = self.world.get::<&mut Pilot>(player) {
            let current = pilot
                .target
                .and_then(|target| enemies.iter().position(|&(_, entity)| entity == target));
            let next = match current {
                Some(index) => (index + 1) % enemies.len(),
                None => 0,
            };
            pilot.target = Some(enemies[next].1);
        }
    }

    /// Hand player control to the next living friendly ship in ship-id order.
    /// The vacated ship reverts to keep-at-range autopilot with zeroed inputs.
    fn switch_ship(&mut self) {
        let Some(player) = self.player_ship else {
            return;
        };

        let mut friendlies: Vec<(u32, Entity)> = self
            .world
            .query::<(&Ship, &ShipInfo, &Hull)>()
            .iter()
            .filter(|(_, (_, info, hull))| hull.alive && info.faction == Faction::Friendly)
            .map(|(entity, (_, info, _))| (info.ship_id, entity))
            .collect();
        friendlies.sort_by_key(|&(ship_id, _)| ship_id);

        let current = friendlies.iter().position(|&(_, entity)| entity == player);
        let next = match current {
            Some(index) => friendlies[(index + 1) % friendlies.len()].1,
            // Player ship destroyed: fall back to the first living friendly.
            None => match friendlies.first() {
                Some(&(_, entity)) => entity,
                None => return,
            },
        };
        if next == player {
            return;
        }

        if let Ok(mut pilot) = self.world.get::<&mut Pilot>(player) {
            pilot.player_controlled = false;
            pilot.autopilot = Some(AutopilotMode::from_kind(
                starlance_core::enums::AutopilotKind::KeepAtRange,
            ));
        }
        if let Ok(mut input) = self.world.get::<&mut ControlInput>(player) {
            *input = ControlInput::default();
        }

        if let Ok(mut pilot) = self.world.get::<&mut Pilot>(next) {
            pilot.player_controlled = true;
            pilot.autopilot = None;
        }
        if let Ok(mut input) = self.world.get::<&mut ControlInput>(next) {
            *input = ControlInput::default();
        }

        self.player_ship = Some(next);
    }

    fn run_systems(&mut self, dt: f64) {
        self.apply_player_input();
        systems::autopilot::run(&mut self.world, self.time.elapsed_secs, dt);
        systems::physics::run(&mut self.world, dt);
        systems::weapons::tick_cooldowns(&mut self.world, dt);
        systems::weapons::run_fire(&mut self.world, self.trigger_held);
        systems::projectiles::run(&mut self.world, dt, &mut self.events);
        systems::targeting::run(&mut self.world);
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
    }

    /// Route the stick state to the player ship.
    ///
    /// Stick deflection beyond the deadzone cancels an engaged autopilot
    /// (manual override); under manual control the stick is written to the
    /// ship's control input every tick.
    fn apply_player_input(&mut self) {
        let Some(player) = self.alive_player_ship() else {
            return;
        };
        let stick = self.stick;
        let deflected = stick.thrust.length() > MANUAL_OVERRIDE_DEADZONE
            || stick.rotation.x.abs() > MANUAL_OVERRIDE_DEADZONE
            || stick.rotation.y.abs() > MANUAL_OVERRIDE_DEADZONE
            || stick.rotation.z.abs() > MANUAL_OVERRIDE_DEADZONE;

        let manual = {
            let Ok(mut pilot) = self.world.get::<&mut Pilot>(player) else {
                return;
            };
            if deflected && pilot.autopilot.is_some() {
                pilot.autopilot = None;
            }
            pilot.autopilot.is_none()
        };

        if manual {
            if let Ok(mut input) = self.world.get::<&mut ControlInput>(player) {
                *input = stick;
            }
        }
    }
}
