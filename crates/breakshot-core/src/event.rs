//! Players, inbound table events, and outbound game notices.
//!
//! Two tagged-variant queues cross the core's boundary:
//!
//! - [`TableEvent`]: discrete observations flowing *in* from the physics
//!   layer (via the motion monitor and contact interpreter). Feeding these
//!   synthetically is the primary way to test the rule engine without a
//!   real world.
//! - [`GameNotice`]: notifications flowing *out* to presentation
//!   collaborators (score displays, message banners, and the renderer's
//!   mirror of which balls are on the table).

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ball::BallId;

/// Identity of one of the two fixed players.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    /// Player 1 (breaks first).
    One,
    /// Player 2.
    Two,
}

impl PlayerId {
    /// Returns the other player.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }

    /// Index into score tables (`0` or `1`).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::One => write!(f, "Player 1"),
            Self::Two => write!(f, "Player 2"),
        }
    }
}

/// A discrete observation from the table physics, in domain vocabulary.
///
/// `MotionStarted` / `MotionSettled` are strictly edge-triggered (emitted
/// exactly once per transition by the motion monitor). `BallPocketed` may be
/// emitted more than once for the same ball within one shot; downstream
/// consumers treat pocketing as idempotent per ball per shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableEvent {
    /// At least one ball started moving after a period of full rest.
    MotionStarted,
    /// All balls returned to rest after a period of motion.
    MotionSettled,
    /// A ball's center entered a pocket's capture zone.
    BallPocketed(BallId),
    /// Two balls began touching.
    BallsCollided(BallId, BallId),
}

/// Notification for presentation collaborators.
///
/// Foul and action messages are data, not errors: they are emitted once per
/// resolution and cleared afterward, so draining them is showing them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameNotice {
    /// A player's score changed.
    ScoreChanged {
        /// The player whose score changed.
        player: PlayerId,
        /// The new total score (may be negative).
        score: i32,
    },
    /// The current player changed.
    TurnChanged(PlayerId),
    /// A foul was committed; the text names the rule broken.
    Foul(String),
    /// Narration of the shot outcome.
    Action(String),
    /// A ball entered play at the given position (rack, re-rack, respot).
    BallAdded {
        /// The ball that entered play.
        ball: BallId,
        /// Where it was placed.
        position: Vec2,
    },
    /// A ball left play (pocketed).
    BallRemoved(BallId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opponent_is_involutive() {
        assert_eq!(PlayerId::One.opponent(), PlayerId::Two);
        assert_eq!(PlayerId::Two.opponent(), PlayerId::One);
        assert_eq!(PlayerId::One.opponent().opponent(), PlayerId::One);
    }

    #[test]
    fn player_display_names() {
        assert_eq!(PlayerId::One.to_string(), "Player 1");
        assert_eq!(PlayerId::Two.to_string(), "Player 2");
    }

    #[test]
    fn table_event_serde_round_trip() {
        let event = TableEvent::BallPocketed(BallId::new(9));
        let json = serde_json::to_string(&event).unwrap();
        let back: TableEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
