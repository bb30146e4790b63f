//! # Breakshot Core
//!
//! Two-player billiards shot-resolution rule engine.
//!
//! This crate turns raw table-physics observations (contact reports, per-step
//! velocities) into discrete game semantics: pocketing, fouls, scoring, turn
//! switching, and rack replenishment. The underlying rigid-body simulation is
//! the [`felt`] world service, consumed as a black box; rendering and input
//! capture are external collaborators fed through [`event::GameNotice`]s.
//!
//! ## Architecture
//!
//! Per-step data flow, leaves first:
//!
//! - [`motion::MotionMonitor`]: edge-triggered motion started/settled
//!   transitions over ball velocities
//! - [`contact::ContactInterpreter`]: classifies contact reports into domain
//!   events (pocket captures, ball-ball collisions)
//! - [`shot::ShotAccumulator`]: collects one shot's worth of domain events
//!   into a [`shot::ShotBundle`]
//! - [`rules::RuleEngine`]: resolves the bundle at the motion-settled
//!   boundary into score/turn updates and table commands
//! - [`rack`]: triangular rack placement for initial setup and re-racks
//! - [`session::Session`]: the synchronous step-loop orchestrator wiring all
//!   of the above to a `felt::World`
//!
//! ## Usage
//!
//! ```
//! use breakshot_core::session::{GameConfig, Session};
//! use glam::Vec2;
//!
//! let mut session = Session::new(GameConfig::default());
//!
//! // Stroke the cue ball toward the rack.
//! let cue = session.cue_position().unwrap();
//! session.stroke(cue + Vec2::new(0.4, 0.0), Vec2::new(-1.0, 0.0), 3.0).unwrap();
//!
//! // Drive the fixed-step loop until the shot resolves.
//! while session.step() {}
//! let notices = session.drain_notices();
//! assert!(!notices.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod ball;
pub mod contact;
pub mod error;
pub mod event;
pub mod motion;
pub mod rack;
pub mod rules;
pub mod session;
pub mod shot;
pub mod table;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use ball::{BallId, BallRegistry, BALL_RADIUS};
pub use contact::ContactInterpreter;
pub use error::GameError;
pub use event::{GameNotice, PlayerId, TableEvent};
pub use motion::MotionMonitor;
pub use rules::{Resolution, RuleEngine, ShotPhase, TableCommand};
pub use session::{GameConfig, Session};
pub use shot::{ShotAccumulator, ShotBundle, ShotFlags};
pub use table::{Table, TableConfig};
