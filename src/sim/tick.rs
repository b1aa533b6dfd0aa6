//! Fixed timestep simulation tick
//!
//! One call advances the whole session: sentry sweep, controlled-agent
//! intents, projectile homing, autonomous-agent decisions, and level
//! progression, in that order. An external clock driver invokes this once
//! per nominal 16 ms tick; the core never self-schedules and a tick runs to
//! completion with no suspension points.

use rand::Rng;

use super::agent::{self, AgentStatus};
use super::detection;
use super::projectile::{Projectile, ProjectileStep};
use super::sentry::SentryPhase;
use super::session::{LEVEL_UP_DISPLAY_SECS, Session};
use crate::consts::MAX_LEVEL;
use crate::wrap_degrees;

/// Input intents for a single tick, sampled as level-triggered booleans.
/// View-toggle and camera intents are rendering-only and never reach the
/// core.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub forward: bool,
    pub backward: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    /// Only actionable while the session is game over
    pub restart: bool,
}

impl TickInput {
    /// Net translation intent: forward and backward cancel
    pub fn net_move(&self) -> f32 {
        (self.forward as i32 - self.backward as i32) as f32
    }
}

/// Advance the session by one fixed timestep
pub fn tick(session: &mut Session, input: &TickInput, dt: f32) {
    session.time += dt;
    session.ticks += 1;

    if session.game_over {
        // Restart while not game over is a no-op, so the check lives here
        if input.restart {
            log::info!("restart requested");
            session.restart();
        }
        return;
    }

    if session.level_complete {
        // Simulation freezes during the level-up interlude
        if session.time - session.level_up_at > LEVEL_UP_DISPLAY_SECS {
            session.advance_level();
        }
        return;
    }

    let now = session.time;
    session.sentry.update(now, &mut session.rng);
    update_player(session, input);
    update_projectiles(session);
    update_npcs(session);
}

/// Apply turn/translation intents to the controlled agent.
///
/// Turning is always permitted; translation only during green light. On red,
/// the attempted movement vector is evaluated for exposure but never applied
/// (freeze-on-red).
fn update_player(session: &mut Session, input: &TickInput) {
    let config = session.config;

    if input.turn_left {
        session.player.facing += config.turn_speed;
    }
    if input.turn_right {
        session.player.facing -= config.turn_speed;
    }
    session.player.facing = wrap_degrees(session.player.facing);

    let net = input.net_move();
    match session.sentry.phase {
        SentryPhase::Idle => {
            if net != 0.0 {
                let step = session.player.heading() * (net * config.player_speed);
                session.player.pos += step;
            }
        }
        SentryPhase::Watching => {
            let caught =
                detection::exposed(&session.sentry, session.player.pos, net != 0.0, true);
            // One projectile per exposure episode: skip if one from the
            // sentry is already in flight
            if caught
                && !session
                    .projectiles
                    .iter()
                    .any(|p| p.origin == session.sentry.pos)
            {
                log::info!("player spotted at {:.0}", session.player.pos);
                session.projectiles.push(Projectile::new(session.sentry.pos));
            }
        }
    }

    session.player.pos = agent::clamp_to_field(session.player.pos, config.field_length);

    if session.player.pos.x >= config.field_length {
        finish_level(session);
    }

    // Obstacles are a phase-independent hazard source with no cooldown
    let player_pos = session.player.pos;
    for i in 0..session.obstacles.len() {
        if session.obstacles[i].triggered_by(player_pos) {
            let origin = session.obstacles[i].pos;
            session.projectiles.push(Projectile::new(origin));
        }
    }
}

/// Handle the controlled agent crossing the finish boundary
fn finish_level(session: &mut Session) {
    if session.level < MAX_LEVEL {
        session.level_complete = true;
        session.level_up_at = session.time;
        session.total_time += session.time - session.level_start_at;
        log::info!(
            "level {} complete, {:.1}s total",
            session.level,
            session.total_time
        );
    } else {
        session.game_won = true;
        session.game_over = true;
        session.finish_time = session.total_time + (session.time - session.level_start_at);
        log::info!("all levels complete in {:.1}s", session.finish_time);
    }
}

/// Advance homing projectiles; a hit eliminates the controlled agent and
/// ends the session in the same tick
fn update_projectiles(session: &mut Session) {
    let target = session.player.pos;
    let speed = session.config.projectile_speed;
    let mut hit = false;
    session.projectiles.retain_mut(|p| match p.advance(target, speed) {
        ProjectileStep::Flying => true,
        ProjectileStep::Hit => {
            hit = true;
            false
        }
        ProjectileStep::Expired => false,
    });
    if hit {
        session.player.status = AgentStatus::Eliminated;
        session.game_over = true;
        log::info!("player eliminated");
    }
}

/// Autonomous-agent decisions: timed advances during green light with
/// occasional heading jitter, obstacle deflection, and the red-light
/// elimination check
fn update_npcs(session: &mut Session) {
    let now = session.time;
    let Session {
        ref mut npcs,
        ref obstacles,
        ref sentry,
        ref mut rng,
        config,
        ..
    } = *session;

    for npc in npcs.iter_mut() {
        if npc.status != AgentStatus::Active {
            continue;
        }

        if sentry.phase == SentryPhase::Idle && now - npc.last_move_at > npc.move_delay {
            npc.pos.x += npc.speed;

            if now - npc.last_turn_at > npc.turn_delay {
                npc.heading = rng.random_range(-agent::HEADING_JITTER..agent::HEADING_JITTER);
                npc.last_turn_at = now;
                npc.turn_delay = rng.random_range(agent::TURN_DELAY_MIN..agent::TURN_DELAY_MAX);
            }
            npc.pos.y += npc.heading.to_radians().sin() * npc.speed * agent::LATERAL_FACTOR;

            npc.last_move_at = now;
            npc.move_delay = rng.random_range(agent::MOVE_DELAY_MIN..agent::MOVE_DELAY_MAX);

            // Obstacle contact deflects, never eliminates: turn around and
            // back off
            for obstacle in obstacles {
                if obstacle.triggered_by(npc.pos) {
                    npc.heading = agent::DEFLECT_HEADING;
                    npc.pos.x -= agent::DEFLECT_NUDGE;
                    break;
                }
            }

            if npc.pos.x >= config.field_length {
                npc.status = AgentStatus::Finished;
                log::info!("npc finished at {:.1}s", now);
            }
        }

        npc.pos = agent::clamp_to_field(npc.pos, config.field_length);

        // Recent movement on red light is judged against the fixed base
        // cone; elimination is instantaneous, no projectile
        if npc.status == AgentStatus::Active
            && detection::exposed(sentry, npc.pos, npc.moved_recently(now), false)
        {
            npc.status = AgentStatus::Eliminated;
            log::info!("npc eliminated at {:.1}s", now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::sentry::SentryPhase;
    use glam::Vec2;
    use proptest::prelude::*;

    /// Pin the sentry in a phase so a test controls exposure exactly
    fn pin_sentry(session: &mut Session, phase: SentryPhase) {
        session.sentry.phase = phase;
        session.sentry.phase_changed_at = session.time;
        session.sentry.phase_duration = 1e6;
    }

    fn forward() -> TickInput {
        TickInput {
            forward: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_boundary_clamp_completes_level() {
        let mut session = Session::new(42);
        pin_sentry(&mut session, SentryPhase::Idle);
        session.player.pos = Vec2::new(999.0, 0.0);
        session.player.facing = 270.0; // down-field

        tick(&mut session, &forward(), TICK_DT);

        assert_eq!(session.player.pos.x, 1000.0);
        assert!(session.level_complete);
        assert!(!session.game_over && !session.game_won);
        assert!((session.total_time - session.time).abs() < 1e-6);
    }

    #[test]
    fn test_interlude_freezes_then_advances() {
        let mut session = Session::new(42);
        pin_sentry(&mut session, SentryPhase::Idle);
        session.player.pos = Vec2::new(999.0, 0.0);
        session.player.facing = 270.0;
        tick(&mut session, &forward(), TICK_DT);
        assert!(session.level_complete);

        // During the interlude nothing moves
        let frozen_pos = session.player.pos;
        tick(&mut session, &forward(), TICK_DT);
        assert_eq!(session.player.pos, frozen_pos);
        assert_eq!(session.level, 1);

        // After the display interval the next level is live
        for _ in 0..((LEVEL_UP_DISPLAY_SECS / TICK_DT) as usize + 2) {
            tick(&mut session, &TickInput::default(), TICK_DT);
        }
        assert_eq!(session.level, 2);
        assert!(!session.level_complete);
        assert_eq!(session.player.pos, Vec2::ZERO);
        assert_eq!(session.config.obstacle_count, 15);
    }

    #[test]
    fn test_finish_at_max_level_wins() {
        let mut session = Session::new(42);
        session.level = MAX_LEVEL;
        session.config = crate::sim::LevelConfig::compute(MAX_LEVEL);
        session.total_time = 50.0;
        pin_sentry(&mut session, SentryPhase::Idle);
        session.player.pos = Vec2::new(session.config.field_length - 1.0, 0.0);
        session.player.facing = 270.0;

        tick(&mut session, &forward(), TICK_DT);

        assert!(session.game_won);
        assert!(session.game_over);
        assert!(!session.level_complete);
        assert!((session.finish_time - (50.0 + session.time)).abs() < 1e-5);
    }

    #[test]
    fn test_exposure_spawns_exactly_one_projectile() {
        let mut session = Session::new(42);
        pin_sentry(&mut session, SentryPhase::Watching);
        session.obstacles.clear();
        // Bearing from the sentry to (500, 0) is 270°; a head near -90°
        // puts the player well inside the widened cone
        session.sentry.head_angle = -80.0;
        session.player.pos = Vec2::new(500.0, 0.0);

        tick(&mut session, &forward(), TICK_DT);

        assert_eq!(session.projectiles.len(), 1);
        assert_eq!(session.projectiles[0].origin, session.sentry.pos);
        // Freeze-on-red: the attempted move was never applied
        assert_eq!(session.player.pos, Vec2::new(500.0, 0.0));

        // A second exposure tick spawns no duplicate
        tick(&mut session, &forward(), TICK_DT);
        assert_eq!(session.projectiles.len(), 1);
    }

    #[test]
    fn test_turning_alone_is_not_movement() {
        let mut session = Session::new(42);
        pin_sentry(&mut session, SentryPhase::Watching);
        session.obstacles.clear();
        session.sentry.head_angle = -80.0;
        session.player.pos = Vec2::new(500.0, 0.0);

        let input = TickInput {
            turn_left: true,
            ..Default::default()
        };
        tick(&mut session, &input, TICK_DT);
        assert!(session.projectiles.is_empty());
        assert_eq!(session.player.facing, BASE_TURN_SPEED);
    }

    #[test]
    fn test_cancelling_intents_are_not_movement() {
        let mut session = Session::new(42);
        pin_sentry(&mut session, SentryPhase::Watching);
        session.obstacles.clear();
        session.sentry.head_angle = -80.0;
        session.player.pos = Vec2::new(500.0, 0.0);

        let input = TickInput {
            forward: true,
            backward: true,
            ..Default::default()
        };
        tick(&mut session, &input, TICK_DT);
        assert!(session.projectiles.is_empty());
    }

    #[test]
    fn test_projectile_hit_ends_session_same_tick() {
        let mut session = Session::new(42);
        pin_sentry(&mut session, SentryPhase::Idle);
        session.obstacles.clear();
        session.player.pos = Vec2::new(300.0, 0.0);
        session.projectiles.push(Projectile::new(Vec2::new(310.0, 0.0)));

        tick(&mut session, &TickInput::default(), TICK_DT);

        assert!(session.game_over);
        assert!(!session.game_won);
        assert_eq!(session.player.status, AgentStatus::Eliminated);
        assert!(session.projectiles.is_empty());
    }

    #[test]
    fn test_out_of_range_projectile_is_culled() {
        let mut session = Session::new(42);
        pin_sentry(&mut session, SentryPhase::Idle);
        session.obstacles.clear();
        session.player.pos = Vec2::new(-400.0, 0.0);
        session
            .projectiles
            .push(Projectile::new(Vec2::new(1900.0, 0.0)));

        tick(&mut session, &TickInput::default(), TICK_DT);

        assert!(session.projectiles.is_empty());
        assert!(!session.game_over);
        assert_eq!(session.player.status, AgentStatus::Active);
    }

    #[test]
    fn test_obstacle_proximity_spawns_regardless_of_phase() {
        let mut session = Session::new(42);
        pin_sentry(&mut session, SentryPhase::Watching);
        session.sentry.head_angle = 90.0; // player nowhere near the cone
        let obstacle_pos = session.obstacles[0].pos;
        session.player.pos = obstacle_pos + Vec2::new(10.0, 0.0);

        tick(&mut session, &TickInput::default(), TICK_DT);

        assert!(session.projectiles.iter().any(|p| p.origin == obstacle_pos));
    }

    #[test]
    fn test_restart_ignored_while_running() {
        let mut session = Session::new(42);
        let mut twin = session.clone();

        let with_restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut session, &with_restart, TICK_DT);
        tick(&mut twin, &TickInput::default(), TICK_DT);

        assert_eq!(session.level, twin.level);
        assert_eq!(session.player, twin.player);
        assert_eq!(session.npcs, twin.npcs);
        assert_eq!(session.sentry, twin.sentry);
        assert_eq!(session.total_time, twin.total_time);
    }

    #[test]
    fn test_restart_resets_after_game_over() {
        let mut session = Session::new(42);
        session.level = 3;
        session.config = crate::sim::LevelConfig::compute(3);
        session.total_time = 99.0;
        session.game_over = true;
        session.player.status = AgentStatus::Eliminated;

        let input = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut session, &input, TICK_DT);

        assert_eq!(session.level, 1);
        assert_eq!(session.total_time, 0.0);
        assert!(!session.game_over);
        assert_eq!(session.player.status, AgentStatus::Active);
        assert_eq!(session.player.pos, Vec2::ZERO);
    }

    #[test]
    fn test_npc_advances_only_on_green() {
        let mut session = Session::new(42);
        pin_sentry(&mut session, SentryPhase::Watching);
        session.obstacles.clear();
        let before: Vec<Vec2> = session.npcs.iter().map(|n| n.pos).collect();

        for _ in 0..100 {
            tick(&mut session, &TickInput::default(), TICK_DT);
        }
        let after: Vec<Vec2> = session.npcs.iter().map(|n| n.pos).collect();
        assert_eq!(before, after);

        pin_sentry(&mut session, SentryPhase::Idle);
        for _ in 0..200 {
            tick(&mut session, &TickInput::default(), TICK_DT);
        }
        assert!(
            session
                .npcs
                .iter()
                .zip(&before)
                .any(|(npc, old)| npc.pos.x > old.x)
        );
    }

    #[test]
    fn test_npc_eliminated_for_recent_movement_on_red() {
        let mut session = Session::new(42);
        pin_sentry(&mut session, SentryPhase::Watching);
        session.obstacles.clear();
        session.sentry.head_angle = -80.0;
        let npc = &mut session.npcs[0];
        npc.pos = Vec2::new(500.0, 0.0);
        npc.last_move_at = session.time; // just moved

        tick(&mut session, &TickInput::default(), TICK_DT);

        assert_eq!(session.npcs[0].status, AgentStatus::Eliminated);
        // Asymmetry: no projectile is spawned for autonomous agents
        assert!(session.projectiles.is_empty());
    }

    #[test]
    fn test_npc_standing_still_survives_red() {
        let mut session = Session::new(42);
        pin_sentry(&mut session, SentryPhase::Watching);
        session.obstacles.clear();
        session.sentry.head_angle = -80.0;
        let npc = &mut session.npcs[0];
        npc.pos = Vec2::new(500.0, 0.0);
        npc.last_move_at = -10.0;

        tick(&mut session, &TickInput::default(), TICK_DT);
        assert_eq!(session.npcs[0].status, AgentStatus::Active);
    }

    #[test]
    fn test_determinism_under_seed() {
        let mut a = Session::new(99999);
        let mut b = Session::new(99999);

        let script = [
            forward(),
            TickInput {
                forward: true,
                turn_left: true,
                ..Default::default()
            },
            TickInput {
                backward: true,
                turn_right: true,
                ..Default::default()
            },
            TickInput::default(),
        ];
        for i in 0..2000 {
            let input = &script[i % script.len()];
            tick(&mut a, input, TICK_DT);
            tick(&mut b, input, TICK_DT);
        }

        assert_eq!(a.ticks, b.ticks);
        assert_eq!(a.player, b.player);
        assert_eq!(a.npcs, b.npcs);
        assert_eq!(a.sentry, b.sentry);
        assert_eq!(a.projectiles, b.projectiles);
        assert_eq!(a.level, b.level);
        assert_eq!(a.game_over, b.game_over);
    }

    proptest! {
        #[test]
        fn prop_positions_stay_in_field(seed in any::<u64>(), steps in 1usize..500) {
            let mut session = Session::new(seed);
            let script = [
                forward(),
                TickInput { forward: true, turn_left: true, ..Default::default() },
                TickInput { backward: true, ..Default::default() },
                TickInput { forward: true, turn_right: true, ..Default::default() },
            ];
            for i in 0..steps {
                tick(&mut session, &script[i % script.len()], TICK_DT);
                let len = session.config.field_length;
                let p = session.player.pos;
                prop_assert!(p.x >= FIELD_MIN_X && p.x <= len);
                prop_assert!(p.y.abs() <= FIELD_HALF_WIDTH);
                for npc in &session.npcs {
                    prop_assert!(npc.pos.x >= FIELD_MIN_X && npc.pos.x <= len);
                    prop_assert!(npc.pos.y.abs() <= FIELD_HALF_WIDTH);
                }
            }
        }

        #[test]
        fn prop_head_angle_stays_in_range(seed in any::<u64>(), steps in 1usize..500) {
            let mut session = Session::new(seed);
            for _ in 0..steps {
                tick(&mut session, &forward(), TICK_DT);
                prop_assert!(session.sentry.head_angle.abs() <= SENTRY_HEAD_RANGE);
            }
        }
    }
}
