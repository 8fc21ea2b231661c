//! The five autopilot behavior modes.
//!
//! [`run`] dispatches on the mode tagged union with a single match; only the
//! attack run mutates persistent state. All oscillation phases are driven by
//! elapsed simulation time, never the wall clock.

use glam::DVec3;

use starlance_core::constants::*;
use starlance_core::enums::{AttackRunPhase, AttackRunState, AutopilotMode};
use starlance_core::types::{safe_normalize, Basis};

use crate::steering::aim_at;

/// Input to one behavior evaluation. All fields are snapshots of the current
/// tick; the target is known to be alive (the caller zeroes output otherwise).
pub struct PilotContext {
    pub position: DVec3,
    pub velocity: DVec3,
    pub basis: Basis,
    pub max_speed: f64,
    pub target_position: DVec3,
    pub target_velocity: DVec3,
    /// Elapsed simulation time in seconds, for jink/strafe oscillation phases.
    pub elapsed_secs: f64,
    /// The ship's fixed break-direction bias; its sign is latched when an
    /// attack run transitions from approach to break.
    pub break_bias: f64,
}

/// Virtual-joystick output of one behavior evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PilotOutput {
    pub thrust: DVec3,
    pub rotation: DVec3,
}

/// Evaluate the ship's autopilot mode for one tick.
pub fn run(mode: &mut AutopilotMode, ctx: &PilotContext, dt: f64) -> PilotOutput {
    match mode {
        AutopilotMode::Intercept => intercept(ctx),
        AutopilotMode::Evade => evade(ctx),
        AutopilotMode::KeepAtRange { desired_range } => keep_at_range(ctx, *desired_range),
        AutopilotMode::Orbit { radius } => orbit(ctx, *radius),
        AutopilotMode::AttackRun(state) => attack_run(state, ctx, dt),
    }
}

/// Fly straight at the target, leading it by its velocity.
///
/// Lead time is distance over max speed, floored at 1 and capped at
/// `INTERCEPT_MAX_LEAD_SECS` so low speeds and long ranges don't extrapolate
/// wildly. Forward thrust equals the alignment dot, floored so the ship keeps
/// closing while it turns.
fn intercept(ctx: &PilotContext) -> PilotOutput {
    let to_target = ctx.target_position - ctx.position;
    let dist = to_target.length();

    let lead_time = (dist / ctx.max_speed.max(1.0)).min(INTERCEPT_MAX_LEAD_SECS);
    let lead_pos = ctx.target_position + ctx.target_velocity * lead_time;

    let rotation = aim_at(ctx.position, &ctx.basis, lead_pos);

    let dot = if dist > 1.0 {
        ctx.basis.forward.dot(safe_normalize(lead_pos - ctx.position))
    } else {
        1.0
    };

    PilotOutput {
        thrust: DVec3::new(0.0, 0.0, dot.max(INTERCEPT_MIN_THRUST)),
        rotation,
    }
}

/// Fly away from the target with an oscillating lateral jink.
fn evade(ctx: &PilotContext) -> PilotOutput {
    let to_target = ctx.target_position - ctx.position;
    let jink = (ctx.elapsed_secs * EVADE_JINK_RATE).sin() * EVADE_JINK_AMPLITUDE;
    let away_pos =
        ctx.position - safe_normalize(to_target) * EVADE_RETREAT_DISTANCE + ctx.basis.right * jink;

    PilotOutput {
        thrust: DVec3::new(0.0, 0.0, 1.0),
        rotation: aim_at(ctx.position, &ctx.basis, away_pos),
    }
}

/// Hold a desired distance: back off when too close, close in when too far,
/// otherwise strafe-oscillate with a slight forward creep.
fn keep_at_range(ctx: &PilotContext, desired_range: f64) -> PilotOutput {
    let dist = (ctx.target_position - ctx.position).length();
    let rotation = aim_at(ctx.position, &ctx.basis, ctx.target_position);

    let thrust = if dist < desired_range * KEEP_RANGE_CLOSE_FACTOR {
        DVec3::new(0.0, 0.0, -KEEP_RANGE_REVERSE_THRUST)
    } else if dist > desired_range * KEEP_RANGE_FAR_FACTOR {
        DVec3::new(0.0, 0.0, KEEP_RANGE_APPROACH_THRUST)
    } else {
        let strafe = (ctx.elapsed_secs * KEEP_RANGE_STRAFE_RATE).sin() * KEEP_RANGE_STRAFE_AMPLITUDE;
        DVec3::new(strafe, 0.0, KEEP_RANGE_CREEP_THRUST)
    };

    PilotOutput { thrust, rotation }
}

/// Circle the target at a set radius.
///
/// The orbit tangent is the cross of the target direction with world up,
/// recomputed against world right when the target sits directly above or
/// below. The radius error picks the aim point: snap to the target when far
/// outside, swing wide along the tangent when far inside, otherwise aim at a
/// point offset from the target by half the radius.
fn orbit(ctx: &PilotContext, radius: f64) -> PilotOutput {
    let to_target = ctx.target_position - ctx.position;
    let dist = to_target.length();

    // Degenerate: sitting on the target. Pure lateral thrust to break out.
    if dist < 1.0 {
        return PilotOutput {
            thrust: DVec3::new(1.0, 0.0, 0.0),
            rotation: DVec3::ZERO,
        };
    }

    let to_target_norm = to_target / dist;
    let mut orbit_dir = to_target_norm.cross(DVec3::Y);
    if orbit_dir.length() < 0.1 {
        orbit_dir = to_target_norm.cross(DVec3::X);
    }
    let orbit_dir = safe_normalize(orbit_dir);

    let radius_error = (dist - radius) / radius;
    let blend = radius_error.clamp(-ORBIT_BLEND_CLAMP, ORBIT_BLEND_CLAMP);

    let aim_point = if radius_error > ORBIT_CORRECT_THRESHOLD {
        ctx.target_position // close in
    } else if radius_error < -ORBIT_CORRECT_THRESHOLD {
        ctx.position + orbit_dir * ORBIT_SWING_DISTANCE // swing wide
    } else {
        ctx.target_position + orbit_dir * radius * 0.5
    };

    PilotOutput {
        thrust: DVec3::new(0.0, 0.0, ORBIT_BASE_THRUST + blend * ORBIT_BLEND_GAIN),
        rotation: aim_at(ctx.position, &ctx.basis, aim_point),
    }
}

/// Intercept, break away past the target, turn back, repeat.
fn attack_run(state: &mut AttackRunState, ctx: &PilotContext, dt: f64) -> PilotOutput {
    let dist = (ctx.target_position - ctx.position).length();

    match state.phase {
        AttackRunPhase::Approach => {
            let output = intercept(ctx);
            if dist < ATTACK_RUN_BREAK_RANGE {
                state.phase = AttackRunPhase::Break;
                state.phase_timer = 0.0;
                state.break_sign = if ctx.break_bias >= 0.0 { 1.0 } else { -1.0 };
            }
            output
        }
        AttackRunPhase::Break => {
            state.phase_timer += dt;
            let break_pos = ctx.position
                + ctx.basis.forward * ATTACK_RUN_BREAK_FORWARD
                + ctx.basis.right * state.break_sign * ATTACK_RUN_BREAK_LATERAL
                + DVec3::Y * ATTACK_RUN_BREAK_CLIMB;
            let output = PilotOutput {
                thrust: DVec3::new(0.0, 0.0, 1.0),
                rotation: aim_at(ctx.position, &ctx.basis, break_pos),
            };
            if state.phase_timer > ATTACK_RUN_BREAK_SECS {
                state.phase = AttackRunPhase::Reengage;
                state.phase_timer = 0.0;
            }
            output
        }
        AttackRunPhase::Reengage => {
            state.phase_timer += dt;
            let output = PilotOutput {
                thrust: DVec3::new(0.0, 0.0, ATTACK_RUN_REENGAGE_THRUST),
                rotation: aim_at(ctx.position, &ctx.basis, ctx.target_position),
            };
            if state.phase_timer > ATTACK_RUN_REENGAGE_SECS || dist > ATTACK_RUN_ABORT_RANGE {
                state.phase = AttackRunPhase::Approach;
                state.phase_timer = 0.0;
            }
            output
        }
    }
}
