//! The authoritative session state
//!
//! One session value owns the sentry, both kinds of agents, projectiles,
//! the obstacle field, the level/timer bookkeeping, and the seeded RNG.
//! It is mutated only inside `tick` and read by the rendering collaborator
//! strictly between ticks. Sessions are never persisted.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::agent::{Npc, Player};
use super::level::LevelConfig;
use super::obstacle::{self, Obstacle};
use super::projectile::Projectile;
use super::sentry::Sentry;
use crate::consts::*;

/// Seconds the level-complete interlude lasts before the next level begins
pub const LEVEL_UP_DISPLAY_SECS: f32 = 1.0;

/// Complete simulation state for one run
#[derive(Debug, Clone)]
pub struct Session {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG threaded into every randomized operation
    pub rng: Pcg32,
    /// Simulation clock (seconds since session start)
    pub time: f32,
    /// Tick counter
    pub ticks: u64,

    /// Current level index (1-based, up to `MAX_LEVEL`)
    pub level: u32,
    pub config: LevelConfig,
    pub sentry: Sentry,
    pub player: Player,
    pub npcs: Vec<Npc>,
    pub projectiles: Vec<Projectile>,
    pub obstacles: Vec<Obstacle>,

    /// Set while the level-up interlude runs (simulation frozen)
    pub level_complete: bool,
    /// Simulation time the interlude started
    pub level_up_at: f32,
    /// Simulation time the current level started
    pub level_start_at: f32,
    /// Accumulated time across completed levels
    pub total_time: f32,
    pub game_over: bool,
    pub game_won: bool,
    /// Final cumulative time, recorded on winning the last level
    pub finish_time: f32,
}

impl Session {
    /// Create a fresh session at level 1
    pub fn new(seed: u64) -> Self {
        let mut session = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time: 0.0,
            ticks: 0,
            level: 1,
            config: LevelConfig::compute(1),
            sentry: Sentry::new(Vec2::ZERO, 0.0, 0.0),
            player: Player::default(),
            npcs: Vec::new(),
            projectiles: Vec::new(),
            obstacles: Vec::new(),
            level_complete: false,
            level_up_at: 0.0,
            level_start_at: 0.0,
            total_time: 0.0,
            game_over: false,
            game_won: false,
            finish_time: 0.0,
        };
        session.begin_level();
        session
    }

    /// Advance to the next difficulty tier after the interlude
    pub(super) fn advance_level(&mut self) {
        self.level += 1;
        self.begin_level();
    }

    /// Reset to level 1 with zeroed cumulative time (restart intent)
    pub(super) fn restart(&mut self) {
        self.level = 1;
        self.total_time = 0.0;
        self.finish_time = 0.0;
        self.begin_level();
    }

    /// (Re)initialize sentry, agents, and obstacles for the current level
    /// with fresh randomization
    fn begin_level(&mut self) {
        self.config = LevelConfig::compute(self.level);
        self.sentry = Sentry::new(
            Vec2::new(self.config.field_length + SENTRY_SETBACK, 0.0),
            self.config.sentry_turn_speed,
            self.time,
        );
        self.player = Player::default();
        self.npcs = (0..NPC_COUNT)
            .map(|_| Npc::spawn(self.config.player_speed, self.time, &mut self.rng))
            .collect();
        self.obstacles = obstacle::generate(
            self.config.obstacle_count,
            self.config.field_length,
            &mut self.rng,
        );
        self.projectiles.clear();
        self.level_complete = false;
        self.game_over = false;
        self.game_won = false;
        self.level_start_at = self.time;
        log::info!(
            "level {} start: finish at {:.0}, {} obstacles",
            self.level,
            self.config.field_length,
            self.obstacles.len()
        );
    }

    /// Elapsed time in the current level on the simulation clock
    pub fn level_elapsed(&self) -> f32 {
        self.time - self.level_start_at
    }

    /// Cumulative session time including the current level
    pub fn session_elapsed(&self) -> f32 {
        self.total_time + self.level_elapsed()
    }
}
