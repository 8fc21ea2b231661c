//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Physics ---

/// Rotation rate scale. Tuned so rotation_force units feel consistent at a
/// 60Hz-equivalent frame: degrees-per-tick = input * (force/mass) * dt * this.
pub const ROTATION_RATE_SCALE: f64 = 60.0;

/// Floor applied to mass before dividing (guards degenerate ship defs).
pub const MIN_MASS: f64 = 1e-6;

/// Engine glow becomes visible above this thrust magnitude.
pub const GLOW_VISIBLE_THRESHOLD: f64 = 0.05;

// --- Aiming ---

/// Proportional gain from axis error to rotation input.
pub const AIM_GAIN: f64 = 2.0;

/// Below this distance there is no direction to aim from; output zero.
pub const AIM_EPSILON: f64 = 0.01;

// --- Intercept ---

/// Lead time is distance/max_speed, capped here to prevent wild
/// extrapolation at long range or low speed.
pub const INTERCEPT_MAX_LEAD_SECS: f64 = 2.0;

/// Forward thrust floor while turning, so the ship keeps closing.
pub const INTERCEPT_MIN_THRUST: f64 = 0.3;

// --- Evade ---

/// Distance of the retreat point behind the ship.
pub const EVADE_RETREAT_DISTANCE: f64 = 100.0;

/// Lateral jink amplitude (world units).
pub const EVADE_JINK_AMPLITUDE: f64 = 40.0;

/// Jink oscillation rate (rad/s of sim time).
pub const EVADE_JINK_RATE: f64 = 3.0;

// --- Keep at range ---

/// Default hold distance.
pub const DEFAULT_KEEP_RANGE: f64 = 150.0;

/// Reverse thrust below this fraction of the desired range.
pub const KEEP_RANGE_CLOSE_FACTOR: f64 = 0.7;

/// Close in above this fraction of the desired range.
pub const KEEP_RANGE_FAR_FACTOR: f64 = 1.3;

/// Reverse thrust intensity when too close.
pub const KEEP_RANGE_REVERSE_THRUST: f64 = 0.6;

/// Forward thrust intensity when too far.
pub const KEEP_RANGE_APPROACH_THRUST: f64 = 0.8;

/// Strafe oscillation amplitude while holding.
pub const KEEP_RANGE_STRAFE_AMPLITUDE: f64 = 0.4;

/// Strafe oscillation rate (rad/s of sim time).
pub const KEEP_RANGE_STRAFE_RATE: f64 = 2.0;

/// Slight forward creep while holding.
pub const KEEP_RANGE_CREEP_THRUST: f64 = 0.1;

// --- Orbit ---

/// Default orbit radius.
pub const DEFAULT_ORBIT_RADIUS: f64 = 100.0;

/// Radius error is clamped to +/- this before blending into thrust.
pub const ORBIT_BLEND_CLAMP: f64 = 0.5;

/// Radius error beyond which the aim point snaps to the target (close in)
/// or swings wide along the orbit tangent.
pub const ORBIT_CORRECT_THRESHOLD: f64 = 0.2;

/// Distance of the swing-wide aim point along the orbit tangent.
pub const ORBIT_SWING_DISTANCE: f64 = 100.0;

/// Base forward thrust while orbiting.
pub const ORBIT_BASE_THRUST: f64 = 0.7;

/// Thrust gain applied to the clamped radius error.
pub const ORBIT_BLEND_GAIN: f64 = 0.3;

// --- Attack run ---

/// Approach-to-break transition distance.
pub const ATTACK_RUN_BREAK_RANGE: f64 = 60.0;

/// Break phase duration (seconds).
pub const ATTACK_RUN_BREAK_SECS: f64 = 2.5;

/// Reengage phase duration (seconds).
pub const ATTACK_RUN_REENGAGE_SECS: f64 = 1.5;

/// Reengage aborts back to approach beyond this distance.
pub const ATTACK_RUN_ABORT_RANGE: f64 = 200.0;

/// Break aim point offsets: forward, lateral, climb.
pub const ATTACK_RUN_BREAK_FORWARD: f64 = 50.0;
pub const ATTACK_RUN_BREAK_LATERAL: f64 = 80.0;
pub const ATTACK_RUN_BREAK_CLIMB: f64 = 20.0;

/// Forward thrust while reengaging.
pub const ATTACK_RUN_REENGAGE_THRUST: f64 = 0.6;

// --- Weapons & projectiles ---

/// Projectiles spawn this far ahead of the owner's nose.
pub const MUZZLE_OFFSET: f64 = 2.0;

/// Fixed collision radius added to the per-ship radius.
pub const PROJECTILE_HIT_RADIUS: f64 = 3.0;

/// Per-ship collision radius is this fraction of the largest scale axis.
pub const SHIP_RADIUS_SCALE: f64 = 0.6;

/// AI fires when forward alignment with the target exceeds this
/// (~16 degree cone).
pub const AI_FIRE_AIM_DOT: f64 = 0.96;

/// AI holds fire inside this distance (degenerate aim).
pub const AI_FIRE_MIN_RANGE: f64 = 1.0;

// --- Player control ---

/// Stick input beyond this cancels an engaged autopilot.
pub const MANUAL_OVERRIDE_DEADZONE: f64 = 0.01;

/// Upper bound for the time-scale setting (0 freezes the clock).
pub const MAX_TIME_SCALE: f64 = 4.0;
