//! Static hazard triggers
//!
//! Obstacles are never destroyed; any agent closing within the trigger
//! radius sets one off (a projectile for the controlled agent, a deflection
//! for autonomous agents). Repeated proximity retriggers - there is no
//! cooldown, and the trigger is independent of the sentry phase.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Proximity below which an obstacle triggers
pub const TRIGGER_RADIUS: f32 = 30.0;
/// Placement keeps this margin from the start and finish lines
const MARGIN_X: f32 = 100.0;
/// Lateral placement band (± from the centerline)
const HALF_BAND: f32 = 400.0;

/// A static hazard trigger with a fixed radius
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Vec2,
}

impl Obstacle {
    /// Whether `pos` is inside the trigger radius
    pub fn triggered_by(&self, pos: Vec2) -> bool {
        self.pos.distance(pos) < TRIGGER_RADIUS
    }
}

/// Scatter a level's obstacle field across the play area
pub fn generate(count: u32, field_length: f32, rng: &mut Pcg32) -> Vec<Obstacle> {
    (0..count)
        .map(|_| Obstacle {
            pos: Vec2::new(
                rng.random_range(MARGIN_X..field_length - MARGIN_X),
                rng.random_range(-HALF_BAND..HALF_BAND),
            ),
        })
        .collect()
}
