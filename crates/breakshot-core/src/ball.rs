//! Ball identity and the ball-to-body registry.
//!
//! Sixteen fixed balls exist for the whole game: the cue ball plus object
//! balls 1 through 15. Identity is deliberately separated from simulation
//! state: a [`BallId`] is a plain tag, while position and velocity live only
//! in the `felt` body store. The [`BallRegistry`] is the bridge, mapping
//! in-play balls to their current world bodies.
//!
//! A ball is either *in play* (present in the registry, has a body) or
//! *pocketed-pending-rerack* (absent from the registry, no body), never
//! both. Object balls leave the registry when pocketed and return on
//! re-rack; the cue ball only ever leaves transiently between a scratch and
//! its respot.

use std::collections::BTreeMap;
use std::fmt;

use felt::BodyId;
use serde::{Deserialize, Serialize};

/// Ball radius in world units (metres).
pub const BALL_RADIUS: f32 = 0.03;

/// Number of object balls (everything except the cue ball).
pub const OBJECT_BALL_COUNT: usize = 15;

/// Identity of one of the sixteen fixed balls.
///
/// `0` is the cue ball; `1..=15` are the numbered object balls. Identities
/// persist for the game's duration regardless of whether the ball is
/// currently on the table.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BallId(u8);

impl BallId {
    /// The cue ball.
    pub const CUE: BallId = BallId(0);

    /// Creates a ball identity from its number (0 = cue, 1-15 = object).
    ///
    /// # Panics
    ///
    /// Panics if `number > 15`.
    #[must_use]
    pub fn new(number: u8) -> Self {
        assert!(number <= 15, "ball number out of range: {number}");
        Self(number)
    }

    /// Returns the raw ball number (0 for the cue ball).
    #[must_use]
    pub const fn number(self) -> u8 {
        self.0
    }

    /// Returns true if this is the cue ball.
    #[must_use]
    pub const fn is_cue(self) -> bool {
        self.0 == 0
    }

    /// Iterates over all sixteen balls, cue ball first.
    pub fn all() -> impl Iterator<Item = BallId> {
        (0..=15).map(BallId)
    }

    /// Iterates over the fifteen numbered object balls.
    pub fn object_balls() -> impl Iterator<Item = BallId> {
        (1..=15).map(BallId)
    }
}

impl fmt::Debug for BallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BallId({})", self.0)
    }
}

impl fmt::Display for BallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_cue() {
            write!(f, "cue ball")
        } else {
            write!(f, "ball {}", self.0)
        }
    }
}

/// Two-way mapping between in-play balls and their world bodies.
///
/// Both directions use `BTreeMap` for deterministic iteration order. A ball
/// present in the registry is in play; absent means pocketed (or, for the
/// cue ball, awaiting respot).
#[derive(Debug, Clone, Default)]
pub struct BallRegistry {
    by_ball: BTreeMap<BallId, BodyId>,
    by_body: BTreeMap<BodyId, BallId>,
}

impl BallRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a ball as in play with the given body.
    ///
    /// Replaces any previous mapping for either key.
    pub fn insert(&mut self, ball: BallId, body: BodyId) {
        if let Some(old_body) = self.by_ball.insert(ball, body) {
            self.by_body.remove(&old_body);
        }
        self.by_body.insert(body, ball);
    }

    /// Removes a ball from play, returning its body if it was in play.
    pub fn remove(&mut self, ball: BallId) -> Option<BodyId> {
        let body = self.by_ball.remove(&ball)?;
        self.by_body.remove(&body);
        Some(body)
    }

    /// Returns the body of an in-play ball.
    #[must_use]
    pub fn body_of(&self, ball: BallId) -> Option<BodyId> {
        self.by_ball.get(&ball).copied()
    }

    /// Returns the ball identity owning a body, if it is a registered ball.
    #[must_use]
    pub fn ball_of(&self, body: BodyId) -> Option<BallId> {
        self.by_body.get(&body).copied()
    }

    /// Returns true if the ball currently has a body.
    #[must_use]
    pub fn in_play(&self, ball: BallId) -> bool {
        self.by_ball.contains_key(&ball)
    }

    /// Iterates over in-play balls and their bodies, in ball order.
    pub fn iter(&self) -> impl Iterator<Item = (BallId, BodyId)> + '_ {
        self.by_ball.iter().map(|(ball, body)| (*ball, *body))
    }

    /// Number of balls currently in play.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_ball.len()
    }

    /// Returns true if no balls are in play.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_ball.is_empty()
    }
}
