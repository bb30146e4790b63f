//! Motion-state monitor: edge-triggered started/settled detection.
//!
//! Each simulation step the monitor counts balls whose speed exceeds a small
//! rest epsilon and latches an "objects moving" boolean. Events fire only on
//! the edges:
//!
//! - rest → motion: [`TableEvent::MotionStarted`]
//! - motion → rest: [`TableEvent::MotionSettled`]
//!
//! Strict edge triggering guarantees the rule engine resolves a shot exactly
//! once per shot, no matter how many steps the balls stay at rest or in
//! flight.
//!
//! # Why an epsilon
//!
//! Comparing float velocities against exact zero can leave the monitor stuck
//! in the moving state forever if residual velocity never reaches 0.0. The
//! `felt` integrator snaps sub-cutoff speeds to exact zero, so either test
//! would terminate against it, but the epsilon keeps the monitor correct
//! against any velocity source (including synthetic test feeds).

use glam::Vec2;

use crate::event::TableEvent;

/// Speed below which a ball counts as at rest (m/s).
pub const REST_EPSILON: f32 = 1e-4;

/// Latched motion-state detector over per-step ball velocities.
#[derive(Debug, Clone)]
pub struct MotionMonitor {
    /// Latched state: true while at least one ball was moving last step.
    moving: bool,
    rest_epsilon: f32,
}

impl MotionMonitor {
    /// Creates a monitor with the default rest epsilon, initially at rest.
    #[must_use]
    pub fn new() -> Self {
        Self::with_epsilon(REST_EPSILON)
    }

    /// Creates a monitor with a custom rest epsilon.
    #[must_use]
    pub fn with_epsilon(rest_epsilon: f32) -> Self {
        Self {
            moving: false,
            rest_epsilon,
        }
    }

    /// Returns true while the monitor considers the table in motion.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.moving
    }

    /// Observes one step's ball velocities.
    ///
    /// Returns `Some(MotionStarted)` on the rest→motion edge,
    /// `Some(MotionSettled)` on the motion→rest edge, and `None` on every
    /// step where the latched state does not change.
    pub fn observe<I>(&mut self, velocities: I) -> Option<TableEvent>
    where
        I: IntoIterator<Item = Vec2>,
    {
        let epsilon_sq = self.rest_epsilon * self.rest_epsilon;
        let moving_count = velocities
            .into_iter()
            .filter(|v| v.length_squared() > epsilon_sq)
            .count();

        match (moving_count > 0, self.moving) {
            (true, false) => {
                self.moving = true;
                Some(TableEvent::MotionStarted)
            }
            (false, true) => {
                self.moving = false;
                Some(TableEvent::MotionSettled)
            }
            _ => None,
        }
    }
}

impl Default for MotionMonitor {
    fn default() -> Self {
        Self::new()
    }
}
