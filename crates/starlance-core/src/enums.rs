//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Combat side. Same-faction ships never damage or target each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Friendly,
    Enemy,
}

impl Faction {
    /// The opposing faction.
    pub fn opposing(self) -> Faction {
        match self {
            Faction::Friendly => Faction::Enemy,
            Faction::Enemy => Faction::Friendly,
        }
    }
}

/// Autopilot behavior selector without per-mode state.
/// Used in commands and snapshots; the stateful variant lives in
/// [`AutopilotMode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AutopilotKind {
    Intercept,
    Evade,
    KeepAtRange,
    Orbit,
    AttackRun,
}

impl AutopilotKind {
    /// Human-readable label for HUD display.
    pub fn label(self) -> &'static str {
        match self {
            AutopilotKind::Intercept => "Intercept",
            AutopilotKind::Evade => "Evade",
            AutopilotKind::KeepAtRange => "Keep Range",
            AutopilotKind::Orbit => "Orbit",
            AutopilotKind::AttackRun => "Attack Run",
        }
    }
}

/// Autopilot behavior mode. A tagged union so that each mode carries its own
/// persistent state; only the attack run needs any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AutopilotMode {
    /// Fly straight at the target with lead prediction.
    Intercept,
    /// Fly away from the target with evasive jinking.
    Evade,
    /// Hold a desired distance from the target.
    KeepAtRange { desired_range: f64 },
    /// Circle the target at a set radius.
    Orbit { radius: f64 },
    /// Approach, fire, break away, reengage. Three-phase state machine.
    AttackRun(AttackRunState),
}

impl AutopilotMode {
    /// Construct a mode from its selector with default parameters.
    /// Attack-run state is initialized here, at construction, never lazily.
    pub fn from_kind(kind: AutopilotKind) -> Self {
        match kind {
            AutopilotKind::Intercept => AutopilotMode::Intercept,
            AutopilotKind::Evade => AutopilotMode::Evade,
            AutopilotKind::KeepAtRange => AutopilotMode::KeepAtRange {
                desired_range: crate::constants::DEFAULT_KEEP_RANGE,
            },
            AutopilotKind::Orbit => AutopilotMode::Orbit {
                radius: crate::constants::DEFAULT_ORBIT_RADIUS,
            },
            AutopilotKind::AttackRun => AutopilotMode::AttackRun(AttackRunState::default()),
        }
    }

    /// The stateless selector for this mode.
    pub fn kind(&self) -> AutopilotKind {
        match self {
            AutopilotMode::Intercept => AutopilotKind::Intercept,
            AutopilotMode::Evade => AutopilotKind::Evade,
            AutopilotMode::KeepAtRange { .. } => AutopilotKind::KeepAtRange,
            AutopilotMode::Orbit { .. } => AutopilotKind::Orbit,
            AutopilotMode::AttackRun(_) => AutopilotKind::AttackRun,
        }
    }
}

/// Attack-run phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackRunPhase {
    /// Intercept the target until within break range.
    #[default]
    Approach,
    /// Peel away laterally and climb for a fixed duration.
    Break,
    /// Turn back toward the target before the next pass.
    Reengage,
}

/// Persistent state for the attack-run behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackRunState {
    pub phase: AttackRunPhase,
    /// Seconds elapsed in the current phase.
    pub phase_timer: f64,
    /// Lateral break direction sign (+1 right, -1 left), fixed when the
    /// approach-to-break transition fires.
    pub break_sign: f64,
}

impl Default for AttackRunState {
    fn default() -> Self {
        Self {
            phase: AttackRunPhase::Approach,
            phase_timer: 0.0,
            break_sign: 1.0,
        }
    }
}

/// Ship class template selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipClassId {
    Fighter,
    Carrier,
    EnemyFighter,
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    MainMenu,
    Active,
    Paused,
}
