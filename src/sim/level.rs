//! Per-level difficulty scaling
//!
//! A `LevelConfig` is a pure function of the level index: linear scaling of
//! field length, obstacle count, and speeds from the level-1 bases. Computed
//! once when a level starts and immutable afterwards.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Scaled parameters for one difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Level index (1-based)
    pub level: u32,
    /// Distance from the start line (x = 0) to the finish line
    pub field_length: f32,
    pub obstacle_count: u32,
    /// Controlled-agent translation speed (units per tick)
    pub player_speed: f32,
    /// Controlled-agent turn speed (degrees per tick, not level-scaled)
    pub turn_speed: f32,
    /// Sentry head sweep rate (degrees per tick)
    pub sentry_turn_speed: f32,
    /// Homing projectile speed (units per tick)
    pub projectile_speed: f32,
}

impl LevelConfig {
    /// Compute the configuration for a level (index >= 1). Pure and
    /// deterministic; no failure modes.
    pub fn compute(level: u32) -> Self {
        let steps = level.saturating_sub(1) as f32;
        Self {
            level,
            field_length: BASE_FIELD_LENGTH * (1.0 + 0.15 * steps),
            obstacle_count: BASE_OBSTACLE_COUNT + 5 * level.saturating_sub(1),
            player_speed: BASE_PLAYER_SPEED * (1.0 + 0.05 * steps),
            turn_speed: BASE_TURN_SPEED,
            sentry_turn_speed: BASE_SENTRY_TURN_SPEED * (1.0 + 0.10 * steps),
            projectile_speed: BASE_PROJECTILE_SPEED * (1.0 + 0.10 * steps),
        }
    }
}
