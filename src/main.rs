//! Headless demo driver
//!
//! Runs the simulation under a scripted player at fixed timestep and prints
//! a run summary. Useful for smoke-testing rule changes and for profiling
//! the core without a renderer attached.
//!
//! Usage: `sentry-run [seed] [classic|mugunghwa]`

use sentry_run::consts::{MAX_LEVEL, TICK_DT};
use sentry_run::sim::{AgentStatus, SentryPhase, Session, TickInput, tick};
use sentry_run::{PresentationVariant, signed_angle_delta};

/// Down-field facing (the finish line lies along +X)
const FINISH_FACING: f32 = 270.0;
/// The bot stops correcting once within this many degrees of its target
const FACING_TOLERANCE: f32 = 3.0;
/// Distance at which the bot starts steering around an obstacle
const AVOID_RADIUS: f32 = 80.0;

const MAX_TICKS: u64 = 250_000;
const MAX_ATTEMPTS: u32 = 5;

/// Scripted player: run down-field on green, freeze on red, steer around
/// nearby obstacles
fn decide(session: &Session) -> TickInput {
    let player = &session.player;

    let mut target_facing = FINISH_FACING;
    let nearest = session
        .obstacles
        .iter()
        .map(|o| (o.pos, o.pos.distance(player.pos)))
        .filter(|(pos, dist)| *dist < AVOID_RADIUS && pos.x > player.pos.x)
        .min_by(|a, b| a.1.total_cmp(&b.1));
    if let Some((pos, _)) = nearest {
        // Veer toward whichever side of the obstacle the player is on
        target_facing += if player.pos.y >= pos.y { 45.0 } else { -45.0 };
    }

    let delta = signed_angle_delta(target_facing, player.facing);
    TickInput {
        forward: session.sentry.phase == SentryPhase::Idle,
        turn_left: delta > FACING_TOLERANCE,
        turn_right: delta < -FACING_TOLERANCE,
        ..Default::default()
    }
}

fn status_label(status: AgentStatus) -> &'static str {
    match status {
        AgentStatus::Active => "active",
        AgentStatus::Eliminated => "eliminated",
        AgentStatus::Finished => "finished",
    }
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xC0FFEE_u64);
    let variant = args
        .next()
        .and_then(|s| PresentationVariant::from_str(&s))
        .unwrap_or_default();

    println!("{} (seed {seed})", variant.window_title());
    println!("{}", variant.controls_hint());

    let mut session = Session::new(seed);
    let mut attempts = 1u32;
    let mut best_level = 1u32;

    while session.ticks < MAX_TICKS {
        let input = if session.game_over && !session.game_won {
            if attempts >= MAX_ATTEMPTS {
                break;
            }
            attempts += 1;
            TickInput {
                restart: true,
                ..Default::default()
            }
        } else if session.game_over {
            break;
        } else {
            decide(&session)
        };
        best_level = best_level.max(session.level);
        tick(&mut session, &input, TICK_DT);
    }

    println!();
    if session.game_won {
        println!(
            "Cleared all {} levels in {:.1}s ({} attempt(s))",
            MAX_LEVEL, session.finish_time, attempts
        );
    } else if session.game_over {
        println!(
            "{} Reached level {} in {} attempt(s).",
            variant.caught_message(),
            best_level,
            attempts
        );
        println!("{}", variant.restart_hint());
    } else {
        println!(
            "Stopped after {} ticks at level {} ({:.1}s elapsed)",
            session.ticks,
            session.level,
            session.session_elapsed()
        );
    }
    for (i, npc) in session.npcs.iter().enumerate() {
        println!("  runner {}: {}", i + 1, status_label(npc.status));
    }
}
