//! Line-of-sight detection
//!
//! Computes the bearing from the sentry to an observed agent, offset so the
//! head's visual zero lines up with atan2 space, then compares the signed
//! minimal difference against the head angle. The detection half-angle
//! widens with the head sweep rate for the controlled agent; autonomous
//! agents are judged against the fixed base cone. Turning alone is not
//! movement and is never punished.

use glam::Vec2;

use super::sentry::{Sentry, SentryPhase};
use crate::signed_angle_delta;

/// Base detection half-angle (degrees)
pub const BASE_HALF_ANGLE: f32 = 30.0;
/// Extra half-angle per degree-per-tick of head sweep rate
pub const SWEEP_WIDENING: f32 = 5.0;
/// Offset aligning atan2 bearings with the head's zero direction
const BEARING_OFFSET: f32 = 90.0;

/// Bearing from the sentry to a position, in head-angle space (degrees)
pub fn bearing_to(sentry_pos: Vec2, pos: Vec2) -> f32 {
    let d = pos - sentry_pos;
    d.y.atan2(d.x).to_degrees() + BEARING_OFFSET
}

/// Detection half-angle for the controlled agent under the current sweep rate
pub fn half_angle(head_rate: f32) -> f32 {
    BASE_HALF_ANGLE + SWEEP_WIDENING * head_rate.abs()
}

/// Whether a moving agent at `pos` is exposed to the sentry.
///
/// `moving` is the agent's net movement intent this tick; `widen` selects
/// the rate-widened cone (controlled agent) or the fixed base cone
/// (autonomous agents). The cone asymmetry is intentional.
pub fn exposed(sentry: &Sentry, pos: Vec2, moving: bool, widen: bool) -> bool {
    if sentry.phase != SentryPhase::Watching || !moving {
        return false;
    }
    let diff = signed_angle_delta(sentry.head_angle, bearing_to(sentry.pos, pos)).abs();
    let limit = if widen {
        half_angle(sentry.head_rate)
    } else {
        BASE_HALF_ANGLE
    };
    diff < limit
}
