//! Homing projectile kinematics
//!
//! A projectile re-aims at the controlled agent's live position every tick
//! and advances along the normalized vector - true homing, not
//! fire-and-forget ballistics. The rendering height offset is not simulated.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Distance to the target below which a projectile counts as a hit
pub const HIT_RADIUS: f32 = 20.0;
/// Projectiles farther than this from their target are culled without effect
pub const MAX_RANGE: f32 = 2000.0;

/// Outcome of advancing one projectile for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileStep {
    /// Still in flight
    Flying,
    /// Reached the target this tick; the target is eliminated
    Hit,
    /// Out of range; remove without effect
    Expired,
}

/// A homing hazard in flight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    /// Spawn position; sentry-sourced projectiles are deduped by origin
    pub origin: Vec2,
    pub pos: Vec2,
}

impl Projectile {
    pub fn new(origin: Vec2) -> Self {
        Self { origin, pos: origin }
    }

    /// Re-aim at the target's current position and advance by `speed`.
    ///
    /// The hit check runs before normalization, so a zero-distance vector is
    /// an immediate hit rather than a division by zero.
    pub fn advance(&mut self, target: Vec2, speed: f32) -> ProjectileStep {
        let to_target = target - self.pos;
        let dist = to_target.length();
        if dist < HIT_RADIUS {
            return ProjectileStep::Hit;
        }
        if dist > MAX_RANGE {
            return ProjectileStep::Expired;
        }
        self.pos += to_target / dist * speed;
        ProjectileStep::Flying
    }
}
