//! Sentry Run - a red-light/green-light stealth race
//!
//! Core modules:
//! - `sim`: Deterministic simulation (sentry state machine, detection,
//!   projectiles, agents, level progression)
//! - `presentation`: Title/HUD wording for the two presentation variants
//!
//! Rendering, window/input plumbing, and camera control are external
//! collaborators: a renderer reads simulation state between ticks, and an
//! input source delivers intent toggles as a `sim::TickInput` sampled once
//! per tick.

pub mod presentation;
pub mod sim;

pub use presentation::PresentationVariant;
pub use sim::{Session, TickInput, tick};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (nominal 16 ms driver cadence)
    pub const TICK_DT: f32 = 0.016;

    /// Field bounds: x in [FIELD_MIN_X, field_length], y in ±FIELD_HALF_WIDTH
    pub const FIELD_MIN_X: f32 = -500.0;
    pub const FIELD_HALF_WIDTH: f32 = 500.0;

    /// Level-1 base parameters (scaled per level, see `sim::level`)
    pub const BASE_FIELD_LENGTH: f32 = 1000.0;
    pub const BASE_PLAYER_SPEED: f32 = 5.0;
    pub const BASE_TURN_SPEED: f32 = 5.0;
    pub const BASE_SENTRY_TURN_SPEED: f32 = 2.0;
    pub const BASE_PROJECTILE_SPEED: f32 = 15.0;
    pub const BASE_OBSTACLE_COUNT: u32 = 10;

    /// Number of difficulty tiers before the run is won
    pub const MAX_LEVEL: u32 = 5;

    /// Sentry stands this far beyond the finish line
    pub const SENTRY_SETBACK: f32 = 200.0;
    /// Symmetric head sweep range (degrees, ±)
    pub const SENTRY_HEAD_RANGE: f32 = 90.0;

    /// Autonomous agents per level
    pub const NPC_COUNT: usize = 4;
}

/// Wrap an angle in degrees to [0, 360)
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    angle.rem_euclid(360.0)
}

/// Signed minimal angular difference `a - b` in degrees, wrapped to (-180, 180]
#[inline]
pub fn signed_angle_delta(a: f32, b: f32) -> f32 {
    let delta = (a - b).rem_euclid(360.0);
    if delta > 180.0 { delta - 360.0 } else { delta }
}
