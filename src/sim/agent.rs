//! Race agents: the controlled player and the autonomous runners
//!
//! Positions are 2D; the rendering height is not simulated. The controlled
//! agent steers freely (facing 0° points along +Y, the finish line lies
//! along +X). Autonomous agents always advance down-field and carry a small
//! heading jitter that only drives lateral drift.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{FIELD_HALF_WIDTH, FIELD_MIN_X};

/// Terminal-state tracking for any racer. Transitions are monotonic within
/// a level: `Active` may become `Eliminated` or `Finished`, never the
/// reverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AgentStatus {
    #[default]
    Active,
    Eliminated,
    Finished,
}

/// The player-driven racer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Player {
    pub pos: Vec2,
    /// Facing angle in degrees, wrapped to [0, 360)
    pub facing: f32,
    pub status: AgentStatus,
}

impl Player {
    /// Unit movement vector for the current facing
    pub fn heading(&self) -> Vec2 {
        let rad = self.facing.to_radians();
        Vec2::new(-rad.sin(), rad.cos())
    }
}

/// Per-agent speed jitter applied to the level's controlled-agent speed
const SPEED_JITTER_MIN: f32 = 0.7;
const SPEED_JITTER_MAX: f32 = 1.3;
/// Spawn scatter around the start area (± both axes)
const SPAWN_SPREAD: f32 = 100.0;
/// First move comes slower than the steady cadence
const FIRST_MOVE_DELAY_MIN: f32 = 0.5;
const FIRST_MOVE_DELAY_MAX: f32 = 2.0;
pub(super) const MOVE_DELAY_MIN: f32 = 0.1;
pub(super) const MOVE_DELAY_MAX: f32 = 0.5;
pub(super) const TURN_DELAY_MIN: f32 = 2.0;
pub(super) const TURN_DELAY_MAX: f32 = 5.0;
/// Heading jitter magnitude (degrees) and the lateral drift it produces
pub(super) const HEADING_JITTER: f32 = 15.0;
pub(super) const LATERAL_FACTOR: f32 = 0.5;
/// Obstacle deflection: forced reversal heading and backward nudge
pub(super) const DEFLECT_HEADING: f32 = 180.0;
pub(super) const DEFLECT_NUDGE: f32 = 20.0;
/// An agent that moved within this window (seconds) is exposed on red
const MOVE_RECENCY: f32 = 0.1;

/// An autonomous racer with randomized movement cadence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Npc {
    pub pos: Vec2,
    /// Small heading jitter in degrees; drives lateral drift only
    pub heading: f32,
    /// Individual speed (level speed with per-agent jitter)
    pub speed: f32,
    pub status: AgentStatus,
    pub last_move_at: f32,
    pub move_delay: f32,
    pub last_turn_at: f32,
    pub turn_delay: f32,
}

impl Npc {
    /// Spawn near the start area with jittered speed and timers
    pub fn spawn(base_speed: f32, now: f32, rng: &mut Pcg32) -> Self {
        Self {
            pos: Vec2::new(
                rng.random_range(-SPAWN_SPREAD..SPAWN_SPREAD),
                rng.random_range(-SPAWN_SPREAD..SPAWN_SPREAD),
            ),
            heading: 0.0,
            speed: base_speed * rng.random_range(SPEED_JITTER_MIN..SPEED_JITTER_MAX),
            status: AgentStatus::Active,
            last_move_at: now,
            move_delay: rng.random_range(FIRST_MOVE_DELAY_MIN..FIRST_MOVE_DELAY_MAX),
            last_turn_at: now,
            turn_delay: rng.random_range(TURN_DELAY_MIN..TURN_DELAY_MAX),
        }
    }

    /// Whether this agent moved recently enough to be exposed on red light
    pub fn moved_recently(&self, now: f32) -> bool {
        now - self.last_move_at < MOVE_RECENCY
    }
}

/// Clamp a position to the field's bounding rectangle
pub fn clamp_to_field(pos: Vec2, field_length: f32) -> Vec2 {
    Vec2::new(
        pos.x.clamp(FIELD_MIN_X, field_length),
        pos.y.clamp(-FIELD_HALF_WIDTH, FIELD_HALF_WIDTH),
    )
}
