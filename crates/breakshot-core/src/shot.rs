//! Shot accumulator: one motion interval's worth of domain events.
//!
//! Between `MotionStarted` and `MotionSettled` the accumulator folds table
//! events into a single [`ShotBundle`]: whether the cue ball touched
//! anything, which object balls were pocketed (first-seen order, idempotent
//! per ball), whether the cue ball itself was pocketed, and where the cue
//! ball rested before the shot (the scratch respot position).
//!
//! Stroke-time observations (striking a non-cue ball) arrive before the
//! motion edge, so they are noted as *pending* flags and carried into the
//! interval when it begins.

use bitflags::bitflags;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::ball::BallId;
use crate::event::TableEvent;

bitflags! {
    /// Boolean facts accumulated over one shot.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct ShotFlags: u8 {
        /// The cue ball touched at least one other ball.
        const CUE_TOUCHED = 1 << 0;
        /// The cue ball was pocketed (scratch).
        const CUE_POCKETED = 1 << 1;
        /// The stroke struck an object ball instead of the cue ball.
        const WRONG_BALL_STRUCK = 1 << 2;
    }
}

/// Read-only snapshot of one resolved motion interval.
///
/// `pocketed` never contains the cue ball; a scratch is tracked solely via
/// [`ShotFlags::CUE_POCKETED`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotBundle {
    /// Boolean shot facts.
    pub flags: ShotFlags,
    /// Object balls pocketed this shot, in detection order.
    pub pocketed: Vec<BallId>,
    /// Cue ball position captured before the shot (scratch respot target).
    pub cue_start: Vec2,
}

impl ShotBundle {
    /// True if the cue ball touched any ball during the shot.
    #[must_use]
    pub fn cue_touched(&self) -> bool {
        self.flags.contains(ShotFlags::CUE_TOUCHED)
    }

    /// True if the cue ball was pocketed during the shot.
    #[must_use]
    pub fn cue_pocketed(&self) -> bool {
        self.flags.contains(ShotFlags::CUE_POCKETED)
    }

    /// True if the stroke struck a ball other than the cue ball.
    #[must_use]
    pub fn wrong_ball_struck(&self) -> bool {
        self.flags.contains(ShotFlags::WRONG_BALL_STRUCK)
    }
}

/// Event-collecting buffer for the shot currently in flight.
#[derive(Debug, Clone, Default)]
pub struct ShotAccumulator {
    flags: ShotFlags,
    /// Flags noted between strokes, carried into the next interval.
    pending_stroke_flags: ShotFlags,
    pocketed: Vec<BallId>,
    cue_start: Vec2,
}

impl ShotAccumulator {
    /// Creates an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Notes that the stroke struck an object ball instead of the cue ball.
    ///
    /// Called at stroke time, before the motion interval begins; the flag is
    /// carried into the interval by [`ShotAccumulator::begin`].
    pub fn note_wrong_ball_struck(&mut self) {
        self.pending_stroke_flags |= ShotFlags::WRONG_BALL_STRUCK;
    }

    /// Starts a new interval: clears the buffer, takes over pending stroke
    /// flags, and captures the cue ball's pre-shot rest position.
    pub fn begin(&mut self, cue_rest: Vec2) {
        self.flags = std::mem::take(&mut self.pending_stroke_flags);
        self.pocketed.clear();
        self.cue_start = cue_rest;
    }

    /// Folds one table event into the buffer.
    ///
    /// Pocketing is idempotent per ball (duplicate emissions are absorbed);
    /// motion edges are ignored here, they drive the caller's control flow.
    pub fn record(&mut self, event: TableEvent) {
        match event {
            TableEvent::BallPocketed(ball) => {
                if ball.is_cue() {
                    self.flags |= ShotFlags::CUE_POCKETED;
                } else if !self.pocketed.contains(&ball) {
                    self.pocketed.push(ball);
                }
            }
            TableEvent::BallsCollided(a, b) => {
                if a.is_cue() || b.is_cue() {
                    self.flags |= ShotFlags::CUE_TOUCHED;
                }
            }
            TableEvent::MotionStarted | TableEvent::MotionSettled => {}
        }
    }

    /// Closes the interval, returning its bundle and clearing the buffer.
    pub fn settle(&mut self) -> ShotBundle {
        ShotBundle {
            flags: std::mem::take(&mut self.flags),
            pocketed: std::mem::take(&mut self.pocketed),
            cue_start: self.cue_start,
        }
    }
}
