//! Rule engine: the shot-resolution state machine.
//!
//! The engine owns all shared game state (scores, the current player, the
//! pocketed-ball backlog) and advances it exactly once per shot, at the
//! motion-settled boundary. Resolution is pure with respect to the table:
//! instead of mutating the world, [`RuleEngine::resolve`] returns a
//! [`Resolution`] of presentation notices plus [`TableCommand`]s for the
//! session to apply (cue respot, rack replenishment). This keeps the engine
//! fully drivable from synthetic [`crate::shot::ShotBundle`]s in tests.
//!
//! # Resolution order
//!
//! 1. Rack replenishment check (backlog of pocketed object balls reaches the
//!    rack size). This runs first so re-racked balls are back in play before the
//!    turn decision, though the turn never depends on rack state.
//! 2. Foul determination, first-set message wins: wrong ball struck (noted
//!    at stroke time), scratch (detected mid-flight), cue touched nothing
//!    (only determinable at settle). Candidates are checked in that
//!    detection order.
//! 3. Foul application: one point penalty to the shooter, turn passes.
//! 4. Otherwise, pocketing nothing also passes the turn; the shooter keeps
//!    the turn only on a foul-free shot that pockets at least one ball.
//! 5. Scoring: one point per pocketed ball, always credited to whoever was
//!    current *before* any turn switch in this resolution.
//! 6. Scratch respot at the cue ball's pre-shot position.
//!
//! Scores are signed and may go negative; fouls cost a point even at zero.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ball::BallId;
use crate::event::{GameNotice, PlayerId};
use crate::shot::ShotBundle;

/// Object balls per rack; a backlog of this size triggers replenishment.
pub const RACK_SIZE: usize = 14;

/// Points deducted from the shooter for a foul.
pub const FOUL_PENALTY: i32 = 1;

/// Where the engine is in the shot cycle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotPhase {
    /// Cue unarmed; the current player may aim and stroke.
    AwaitingShot,
    /// Balls in motion; new strokes are rejected until resolution.
    ShotInFlight,
}

/// A table mutation requested by shot resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum TableCommand {
    /// Return the listed balls to play in a fresh triangular rack.
    Rerack(Vec<BallId>),
    /// Return the cue ball to play at the given position, at rest.
    RespotCue(Vec2),
}

/// Everything one shot resolution produced.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Resolution {
    /// Presentation notifications, in emission order.
    pub notices: Vec<GameNotice>,
    /// Table mutations for the session to apply.
    pub commands: Vec<TableCommand>,
}

/// The shot-resolution state machine.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    /// Player scores, indexed by [`PlayerId::index`]. Signed.
    scores: [i32; 2],
    /// Exactly one player is current at all times.
    current: PlayerId,
    phase: ShotPhase,
    /// Object balls pocketed since the last rack, in pocketing order.
    backlog: Vec<BallId>,
}

impl RuleEngine {
    /// Creates a fresh engine: scores 0-0, Player 1 to shoot.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scores: [0, 0],
            current: PlayerId::One,
            phase: ShotPhase::AwaitingShot,
            backlog: Vec::new(),
        }
    }

    /// Returns the current shot phase.
    #[must_use]
    pub fn phase(&self) -> ShotPhase {
        self.phase
    }

    /// Returns true if a new stroke may be accepted.
    #[must_use]
    pub fn can_shoot(&self) -> bool {
        self.phase == ShotPhase::AwaitingShot
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    /// A player's score.
    #[must_use]
    pub fn score(&self, player: PlayerId) -> i32 {
        self.scores[player.index()]
    }

    /// Object balls pocketed since the last rack.
    #[must_use]
    pub fn backlog(&self) -> &[BallId] {
        &self.backlog
    }

    /// Enters the in-flight phase. Driven by the motion-started edge.
    pub fn on_motion_started(&mut self) {
        self.phase = ShotPhase::ShotInFlight;
    }

    /// Resolves one settled shot.
    ///
    /// Executed exactly once per motion-settled edge; see the module docs
    /// for the fixed resolution order.
    pub fn resolve(&mut self, bundle: &ShotBundle) -> Resolution {
        self.phase = ShotPhase::AwaitingShot;
        let shooter = self.current;
        let mut notices = Vec::new();
        let mut commands = Vec::new();

        // 1. Rack replenishment. No terminal state exists: reaching a full
        // backlog starts a fresh rack and play continues indefinitely.
        self.backlog.extend(bundle.pocketed.iter().copied());
        if self.backlog.len() >= RACK_SIZE {
            let balls = std::mem::take(&mut self.backlog);
            info!(count = balls.len(), "rack exhausted, re-racking");
            commands.push(TableCommand::Rerack(balls));
        }

        // 2. Foul determination: first-set message wins, in detection order.
        let mut foul: Option<String> = None;
        if bundle.wrong_ball_struck() {
            foul.get_or_insert_with(|| format!("{shooter} struck an object ball with the cue"));
        }
        if bundle.cue_pocketed() {
            foul.get_or_insert_with(|| format!("{shooter} pocketed the cue ball"));
        }
        if !bundle.cue_touched() {
            foul.get_or_insert_with(|| {
                format!("{shooter}'s cue ball did not touch any ball")
            });
        }

        // 3-4. Exactly one of switch/keep happens per resolution.
        let switch_turn = if let Some(reason) = foul {
            info!(shooter = %shooter, %reason, "foul");
            self.scores[shooter.index()] -= FOUL_PENALTY;
            notices.push(GameNotice::ScoreChanged {
                player: shooter,
                score: self.scores[shooter.index()],
            });
            notices.push(GameNotice::Foul(reason));
            notices.push(GameNotice::Action(format!("Foul by {shooter}")));
            true
        } else if bundle.pocketed.is_empty() {
            notices.push(GameNotice::Action(format!("{shooter} did not pocket a ball")));
            true
        } else {
            notices.push(GameNotice::Action(format!(
                "{shooter} pocketed {} ball{}",
                bundle.pocketed.len(),
                if bundle.pocketed.len() == 1 { "" } else { "s" },
            )));
            false
        };

        // 5. Scoring, credited to the pre-resolution shooter.
        for _ in &bundle.pocketed {
            self.scores[shooter.index()] += 1;
            notices.push(GameNotice::ScoreChanged {
                player: shooter,
                score: self.scores[shooter.index()],
            });
        }

        if switch_turn {
            self.current = shooter.opponent();
            notices.push(GameNotice::TurnChanged(self.current));
        }

        // 6. Scratch respot at the pre-shot cue position.
        if bundle.cue_pocketed() {
            commands.push(TableCommand::RespotCue(bundle.cue_start));
        }

        info!(
            shooter = %shooter,
            pocketed = bundle.pocketed.len(),
            switched = switch_turn,
            "shot resolved"
        );
        Resolution { notices, commands }
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}
