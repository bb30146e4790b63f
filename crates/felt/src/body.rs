//! Body types for the table world.
//!
//! This module provides the rigid-body vocabulary of the [`crate::World`]:
//! - [`BodyId`]: Unique identifier for bodies
//! - [`BodyKind`]: Solid ball vs. non-physical sensor
//! - [`Body`]: Position, velocity, and circle geometry
//!
//! Bodies are circles. Solid balls collide with each other and with the
//! cushion walls; sensors detect overlap without affecting dynamics. A
//! sensor's circle may be offset from its body origin ([`Body::shape_offset`])
//! so that several sensors can share one logical owner frame, the way pocket
//! fixtures hang off a single static table body.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a body in the world.
///
/// `BodyId` is a newtype wrapper around `u64`. IDs are assigned
/// monotonically by the world and never reused, so a removed body's ID
/// stays dangling rather than aliasing a later body.
///
/// # Ordering
///
/// Body IDs are ordered by their numeric value, which gives the world's
/// `BTreeMap` storage a deterministic iteration order.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BodyId(u64);

impl BodyId {
    /// Creates a new `BodyId` from a raw `u64` value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw `u64` value of this identifier.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BodyId({})", self.0)
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Classification of a body's physical role.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyKind {
    /// Solid circular ball: integrated, collides, reflects off cushions.
    Ball,
    /// Non-physical overlap detector (pocket mouth). Never moves, never
    /// affects dynamics.
    Sensor,
}

impl fmt::Display for BodyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ball => write!(f, "Ball"),
            Self::Sensor => write!(f, "Sensor"),
        }
    }
}

/// A circular rigid body (or sensor) on the table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Physical role of this body.
    pub kind: BodyKind,
    /// World position of the body origin.
    pub position: Vec2,
    /// Linear velocity. Always zero for sensors.
    pub velocity: Vec2,
    /// Circle radius.
    pub radius: f32,
    /// Offset of the circle's center from the body origin, in the body's
    /// local frame. Zero for balls; pocket sensors use it to place their
    /// mouth relative to the shared table frame.
    pub shape_offset: Vec2,
}

impl Body {
    /// Creates a solid ball body at the given position.
    #[must_use]
    pub fn ball(position: Vec2, radius: f32) -> Self {
        Self {
            kind: BodyKind::Ball,
            position,
            velocity: Vec2::ZERO,
            radius,
            shape_offset: Vec2::ZERO,
        }
    }

    /// Creates a sensor body whose circle sits at `position + shape_offset`.
    #[must_use]
    pub fn sensor(position: Vec2, shape_offset: Vec2, radius: f32) -> Self {
        Self {
            kind: BodyKind::Sensor,
            position,
            velocity: Vec2::ZERO,
            radius,
            shape_offset,
        }
    }

    /// Returns true if this body is a solid ball.
    #[must_use]
    pub fn is_ball(&self) -> bool {
        self.kind == BodyKind::Ball
    }

    /// Returns true if this body is a sensor.
    #[must_use]
    pub fn is_sensor(&self) -> bool {
        self.kind == BodyKind::Sensor
    }

    /// World position of the circle's geometric center.
    ///
    /// For balls this is the body position itself; for sensors the local
    /// shape offset is applied.
    #[must_use]
    pub fn shape_center(&self) -> Vec2 {
        self.position + self.shape_offset
    }
}
