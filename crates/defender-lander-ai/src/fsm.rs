//! Lander movement finite state machine.
//!
//! Pure functions that compute one frame of lander motion from its
//! position, target and carry state. No ECS dependency, operates on
//! plain data.

use defender_core::types::Position;

use crate::profiles::LanderProfile;

/// Tolerance for "the target sits on the ground line".
const GROUND_LINE_EPSILON: f32 = 0.5;

/// How the lander moved this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanderMotion {
    /// Destroyed, or already at its target.
    Idle,
    /// Straight line toward a target on the ground line.
    Seek,
    /// Axis-aligned approach, vertical first.
    Creep,
    /// Rising with a captured humanoid.
    Ascend,
}

/// Input to the lander FSM for a single entity.
pub struct LanderContext {
    pub position: Position,
    pub target: Position,
    pub carrying: bool,
    pub destroyed: bool,
    pub dt: f32,
}

/// Output from the lander FSM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LanderUpdate {
    pub new_position: Position,
    pub motion: LanderMotion,
    /// The lander rose past the release line and leaves carry mode.
    pub release_carry: bool,
}

/// Evaluate one frame for one lander.
pub fn evaluate(ctx: &LanderContext, profile: &LanderProfile) -> LanderUpdate {
    let idle = LanderUpdate {
        new_position: ctx.position,
        motion: LanderMotion::Idle,
        release_carry: false,
    };

    if ctx.destroyed || !(ctx.dt.is_finite() && ctx.dt > 0.0) {
        return idle;
    }

    if ctx.carrying {
        return ascend(ctx, profile);
    }

    let Some(direction) = ctx.position.direction_to(&ctx.target) else {
        return idle;
    };

    let step = profile.seek_speed * ctx.dt;
    let remaining = ctx.position.distance_to(&ctx.target);
    let next = ctx.position.offset(direction * step.min(remaining));

    let target_on_ground = (ctx.target.y - profile.ground_y).abs() <= GROUND_LINE_EPSILON;
    if target_on_ground && profile.in_arena(next.x, next.y) {
        return LanderUpdate {
            new_position: next,
            motion: LanderMotion::Seek,
            release_carry: false,
        };
    }

    creep(ctx, profile)
}

fn ascend(ctx: &LanderContext, profile: &LanderProfile) -> LanderUpdate {
    if ctx.position.y >= profile.release_y {
        let new_position = Position::new(
            ctx.position.x,
            ctx.position.y - profile.creep_speed * ctx.dt,
        );
        return LanderUpdate {
            new_position,
            motion: LanderMotion::Ascend,
            release_carry: false,
        };
    }

    LanderUpdate {
        new_position: ctx.position,
        motion: LanderMotion::Idle,
        release_carry: true,
    }
}

/// Vertical toward the target, kept between the top margin and the hover
/// line, then horizontal toward the target clamped away from the side
/// edges. Once the clamped goal is reached the lander holds station.
fn creep(ctx: &LanderContext, profile: &LanderProfile) -> LanderUpdate {
    let step = profile.creep_speed * ctx.dt;
    let pos = ctx.position;

    let top = profile.top_margin;
    let goal_y = ctx.target.y.clamp(top, profile.hover_y().max(top));
    let lo_x = profile.edge_margin;
    let hi_x = (profile.arena_width - profile.edge_margin).max(lo_x);
    let goal_x = ctx.target.x.clamp(lo_x, hi_x);

    let new_position = if (goal_y - pos.y).abs() > f32::EPSILON {
        Position::new(pos.x, approach(pos.y, goal_y, step))
    } else if (goal_x - pos.x).abs() > f32::EPSILON {
        Position::new(approach(pos.x, goal_x, step), pos.y)
    } else {
        return LanderUpdate {
            new_position: pos,
            motion: LanderMotion::Idle,
            release_carry: false,
        };
    };

    LanderUpdate {
        new_position,
        motion: LanderMotion::Creep,
        release_carry: false,
    }
}

/// Move `from` toward `to` by at most `step`.
fn approach(from: f32, to: f32, step: f32) -> f32 {
    if to > from {
        (from + step).min(to)
    } else {
        (from - step).max(to)
    }
}
