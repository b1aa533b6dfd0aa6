//! Deterministic red-light/green-light race simulation
//!
//! All gameplay rules live here, behind plain data types and the free
//! function [`tick`]. Rendering, input decoding, and timing are the
//! caller's business; the core holds no handles to any of them. Given the
//! same seed and the same input sequence, a session replays bit-for-bit.

pub mod agent;
pub mod detection;
pub mod level;
pub mod obstacle;
pub mod projectile;
pub mod sentry;
pub mod session;
pub mod tick;

pub use agent::{AgentStatus, Npc, Player};
pub use level::LevelConfig;
pub use obstacle::Obstacle;
pub use projectile::Projectile;
pub use sentry::{Sentry, SentryPhase};
pub use session::Session;
pub use tick::{TickInput, tick};
