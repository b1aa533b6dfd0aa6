//! Sentry phase and head-sweep state machine
//!
//! The sentry alternates between a safe `Idle` (green light) phase and a
//! lethal `Watching` (red light) phase on randomized timers. While watching,
//! the head ping-pongs across the sweep range; while idle it relaxes toward
//! center without ever snapping to exactly zero.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::SENTRY_HEAD_RANGE;

/// Phase duration is redrawn uniformly from this range (seconds) on every flip
const PHASE_DURATION_MIN: f32 = 1.0;
const PHASE_DURATION_MAX: f32 = 3.0;

/// Residual head angle multiplier applied per idle tick
const HEAD_DECAY: f32 = 0.8;
/// Below this residual (degrees) the idle head stops relaxing
const HEAD_SETTLE_EPSILON: f32 = 1.0;

/// Sentry phase: green light or red light
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentryPhase {
    /// Green light - movement is safe
    Idle,
    /// Red light - movement inside the detection cone is lethal
    Watching,
}

/// The stationary hazard entity whose phase gates safe movement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentry {
    /// Fixed position for the level, just beyond the finish line
    pub pos: Vec2,
    pub phase: SentryPhase,
    /// Head angle in degrees, always within ±`SENTRY_HEAD_RANGE`
    pub head_angle: f32,
    /// Signed head rate (degrees per tick); sign flips at the sweep bounds
    pub head_rate: f32,
    /// Simulation time of the last phase flip
    pub phase_changed_at: f32,
    /// Current phase's randomly drawn duration (seconds)
    pub phase_duration: f32,
}

impl Sentry {
    /// Place a sentry for a new level. Starts green with a centered head;
    /// the zero initial duration makes the first tick flip to red.
    pub fn new(pos: Vec2, turn_speed: f32, now: f32) -> Self {
        Self {
            pos,
            phase: SentryPhase::Idle,
            head_angle: 0.0,
            head_rate: turn_speed,
            phase_changed_at: now,
            phase_duration: 0.0,
        }
    }

    /// Advance the phase timer and head sweep by one tick
    pub fn update(&mut self, now: f32, rng: &mut Pcg32) {
        if now - self.phase_changed_at > self.phase_duration {
            self.phase = match self.phase {
                SentryPhase::Idle => SentryPhase::Watching,
                SentryPhase::Watching => SentryPhase::Idle,
            };
            self.phase_changed_at = now;
            self.phase_duration = rng.random_range(PHASE_DURATION_MIN..PHASE_DURATION_MAX);
            log::debug!(
                "sentry phase -> {:?} for {:.2}s",
                self.phase,
                self.phase_duration
            );
        }

        match self.phase {
            SentryPhase::Watching => {
                self.head_angle += self.head_rate;
                if self.head_angle > SENTRY_HEAD_RANGE {
                    self.head_angle = SENTRY_HEAD_RANGE;
                    self.head_rate = -self.head_rate;
                } else if self.head_angle < -SENTRY_HEAD_RANGE {
                    self.head_angle = -SENTRY_HEAD_RANGE;
                    self.head_rate = -self.head_rate;
                }
            }
            SentryPhase::Idle => {
                // Relax toward center; may stay slightly non-zero indefinitely
                if self.head_angle.abs() > HEAD_SETTLE_EPSILON {
                    self.head_angle *= HEAD_DECAY;
                }
            }
        }
    }
}
