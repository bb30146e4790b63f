//! Table world: body storage, fixed-timestep stepping, contact reporting.
//!
//! The [`World`] is the container for all bodies on the table. It provides:
//! - Body storage with deterministic iteration order (`BTreeMap`)
//! - Body lifecycle management (add/remove)
//! - A fixed-timestep [`World::step`] that integrates balls, reflects them
//!   off the cushion walls, resolves ball-ball collisions, and reports
//!   contact observations
//! - Ray casting against ball bodies
//!
//! # Determinism
//!
//! Bodies are stored in a `BTreeMap` keyed by monotonically assigned
//! [`BodyId`]s, so collision pairs and reports are always produced in the
//! same order. Integration uses a fixed `dt`; there is no wall-clock input
//! anywhere in the step.
//!
//! # Settling
//!
//! Felt damping is exponential (`velocity *= exp(-damping * dt)`), which on
//! its own never reaches exact zero. Speeds below `rest_cutoff` are snapped
//! to exactly `Vec2::ZERO`, so a ball always comes to true rest in finitely
//! many steps and velocity queries can be compared against zero safely.

use std::collections::{BTreeMap, BTreeSet};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::body::{Body, BodyId, BodyKind};
use crate::Bounds;

// =============================================================================
// Configuration
// =============================================================================

/// Fixed timestep used by default (1/120 second).
///
/// Billiards resolution cares about fast ball-ball interactions, so the
/// world steps at twice a typical render rate.
pub const DEFAULT_DT: f32 = 1.0 / 120.0;

/// Configuration for a table world.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Cushion wall rectangle. Balls reflect off its inner edges.
    pub bounds: Bounds,
    /// Fixed integration timestep in seconds.
    pub dt: f32,
    /// Exponential felt damping coefficient (1/s). Higher stops balls faster.
    pub damping: f32,
    /// Restitution for ball-ball and ball-cushion impacts.
    pub restitution: f32,
    /// Speed below which a ball's velocity is snapped to exact zero (m/s).
    pub rest_cutoff: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            bounds: Bounds::default(),
            dt: DEFAULT_DT,
            damping: 1.2,
            restitution: 0.95,
            rest_cutoff: 0.01,
        }
    }
}

// =============================================================================
// Reports and errors
// =============================================================================

/// A discrete contact observation produced by [`World::step`].
///
/// Reports identify bodies only; interpreting what a contact *means* is the
/// consumer's job. The world guarantees:
///
/// - `Begin` is edge-triggered: a touching pair is reported once when the
///   touch starts, and again only after the pair has separated.
/// - `SensorPersist` is level-triggered: re-reported every step while a ball
///   overlaps a sensor, mirroring a persisted-contact callback.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ContactReport {
    /// Two solid bodies began touching this step.
    Begin {
        /// First body of the pair (lower ID).
        a: BodyId,
        /// Second body of the pair (higher ID).
        b: BodyId,
    },
    /// A body overlapped a sensor this step.
    SensorPersist {
        /// First body of the pair (lower ID).
        a: BodyId,
        /// Second body of the pair (higher ID).
        b: BodyId,
    },
}

/// Result of a successful ray cast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// The ball body that was hit.
    pub body: BodyId,
    /// World-space point where the ray enters the ball.
    pub point: Vec2,
    /// Distance from the ray origin to the hit point.
    pub distance: f32,
}

/// Errors from world body operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WorldError {
    /// The referenced body does not exist (never added, or already removed).
    #[error("unknown body {0}")]
    UnknownBody(BodyId),
    /// The operation requires a ball body but the target is a sensor.
    #[error("body {0} is not a ball")]
    NotABall(BodyId),
}

// =============================================================================
// World
// =============================================================================

/// The table world containing all ball and sensor bodies.
#[derive(Debug, Clone)]
pub struct World {
    config: WorldConfig,
    /// Body storage. `BTreeMap` for deterministic iteration order.
    bodies: BTreeMap<BodyId, Body>,
    /// Next body ID to assign. Monotonic, never reused.
    next_id: u64,
    /// Ball pairs currently in contact, for edge-triggered `Begin` reports.
    touching: BTreeSet<(BodyId, BodyId)>,
}

impl World {
    /// Creates an empty world with the given configuration.
    #[must_use]
    pub fn new(config: WorldConfig) -> Self {
        Self {
            config,
            bodies: BTreeMap::new(),
            next_id: 0,
            touching: BTreeSet::new(),
        }
    }

    /// Returns the world configuration.
    #[must_use]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Adds a solid ball body and returns its ID.
    pub fn add_ball(&mut self, position: Vec2, radius: f32) -> BodyId {
        self.insert(Body::ball(position, radius))
    }

    /// Adds a sensor body whose circle sits at `position + shape_offset`.
    pub fn add_sensor(&mut self, position: Vec2, shape_offset: Vec2, radius: f32) -> BodyId {
        self.insert(Body::sensor(position, shape_offset, radius))
    }

    fn insert(&mut self, body: Body) -> BodyId {
        let id = BodyId::new(self.next_id);
        self.next_id += 1;
        debug!(body = %id, kind = %body.kind, "body added");
        self.bodies.insert(id, body);
        id
    }

    /// Removes a body from the world.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownBody`] if the body does not exist.
    pub fn remove_body(&mut self, id: BodyId) -> Result<Body, WorldError> {
        let body = self.bodies.remove(&id).ok_or(WorldError::UnknownBody(id))?;
        self.touching.retain(|&(a, b)| a != id && b != id);
        debug!(body = %id, "body removed");
        Ok(body)
    }

    /// Returns a reference to a body, if it exists.
    #[must_use]
    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(&id)
    }

    /// Returns true if the body exists in the world.
    #[must_use]
    pub fn contains(&self, id: BodyId) -> bool {
        self.bodies.contains_key(&id)
    }

    /// Returns the world position of a body, if it exists.
    #[must_use]
    pub fn position(&self, id: BodyId) -> Option<Vec2> {
        self.bodies.get(&id).map(|b| b.position)
    }

    /// Returns the velocity of a body, if it exists.
    #[must_use]
    pub fn velocity(&self, id: BodyId) -> Option<Vec2> {
        self.bodies.get(&id).map(|b| b.velocity)
    }

    /// Teleports a body to a new position.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownBody`] if the body does not exist.
    pub fn set_position(&mut self, id: BodyId, position: Vec2) -> Result<(), WorldError> {
        let body = self
            .bodies
            .get_mut(&id)
            .ok_or(WorldError::UnknownBody(id))?;
        body.position = position;
        Ok(())
    }

    /// Sets a ball's velocity directly.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownBody`] if the body does not exist, or
    /// [`WorldError::NotABall`] if it is a sensor.
    pub fn set_velocity(&mut self, id: BodyId, velocity: Vec2) -> Result<(), WorldError> {
        let body = self
            .bodies
            .get_mut(&id)
            .ok_or(WorldError::UnknownBody(id))?;
        if body.kind != BodyKind::Ball {
            return Err(WorldError::NotABall(id));
        }
        body.velocity = velocity;
        Ok(())
    }

    /// Applies an impulse to a ball (unit mass: velocity += impulse).
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownBody`] if the body does not exist, or
    /// [`WorldError::NotABall`] if it is a sensor.
    pub fn apply_impulse(&mut self, id: BodyId, impulse: Vec2) -> Result<(), WorldError> {
        let body = self
            .bodies
            .get_mut(&id)
            .ok_or(WorldError::UnknownBody(id))?;
        if body.kind != BodyKind::Ball {
            return Err(WorldError::NotABall(id));
        }
        body.velocity += impulse;
        Ok(())
    }

    /// Iterates over all ball bodies in ID order.
    pub fn balls(&self) -> impl Iterator<Item = (BodyId, &Body)> {
        self.bodies
            .iter()
            .filter(|(_, b)| b.is_ball())
            .map(|(id, b)| (*id, b))
    }

    /// Iterates over all sensor bodies in ID order.
    pub fn sensors(&self) -> impl Iterator<Item = (BodyId, &Body)> {
        self.bodies
            .iter()
            .filter(|(_, b)| b.is_sensor())
            .map(|(id, b)| (*id, b))
    }

    /// Number of bodies currently in the world.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Returns true if the world contains no bodies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    // =========================================================================
    // Stepping
    // =========================================================================

    /// Advances the world by one fixed timestep and returns the contact
    /// observations made during the step.
    ///
    /// Order within a step:
    /// 1. Integrate balls: `position += velocity * dt`, apply exponential
    ///    damping, snap sub-cutoff speeds to exact zero.
    /// 2. Reflect balls off the cushion walls.
    /// 3. Resolve ball-ball collisions (equal-mass elastic with restitution)
    ///    and report newly begun pairs.
    /// 4. Report every ball-sensor overlap.
    pub fn step(&mut self) -> Vec<ContactReport> {
        self.integrate();
        self.reflect_cushions();

        let mut reports = Vec::new();
        self.resolve_ball_collisions(&mut reports);
        self.report_sensor_overlaps(&mut reports);
        reports
    }

    fn integrate(&mut self) {
        let dt = self.config.dt;
        let decay = (-self.config.damping * dt).exp();
        let cutoff = self.config.rest_cutoff;

        for body in self.bodies.values_mut() {
            if body.kind != BodyKind::Ball {
                continue;
            }
            body.position += body.velocity * dt;
            body.velocity *= decay;
            if body.velocity.length() < cutoff {
                body.velocity = Vec2::ZERO;
            }
        }
    }

    fn reflect_cushions(&mut self) {
        let bounds = self.config.bounds;
        let e = self.config.restitution;

        for body in self.bodies.values_mut() {
            if body.kind != BodyKind::Ball {
                continue;
            }
            let r = body.radius;
            if body.position.x - r < bounds.min.x {
                body.position.x = bounds.min.x + r;
                body.velocity.x = -body.velocity.x * e;
            } else if body.position.x + r > bounds.max.x {
                body.position.x = bounds.max.x - r;
                body.velocity.x = -body.velocity.x * e;
            }
            if body.position.y - r < bounds.min.y {
                body.position.y = bounds.min.y + r;
                body.velocity.y = -body.velocity.y * e;
            } else if body.position.y + r > bounds.max.y {
                body.position.y = bounds.max.y - r;
                body.velocity.y = -body.velocity.y * e;
            }
        }
    }

    fn resolve_ball_collisions(&mut self, reports: &mut Vec<ContactReport>) {
        let ball_ids: Vec<BodyId> = self.balls().map(|(id, _)| id).collect();
        let e = self.config.restitution;
        let mut now_touching = BTreeSet::new();

        for i in 0..ball_ids.len() {
            for j in (i + 1)..ball_ids.len() {
                let (ia, ib) = (ball_ids[i], ball_ids[j]);
                let a = self.bodies[&ia];
                let b = self.bodies[&ib];

                let delta = b.position - a.position;
                let dist = delta.length();
                let touch_dist = a.radius + b.radius;
                if dist >= touch_dist {
                    continue;
                }

                now_touching.insert((ia, ib));
                if !self.touching.contains(&(ia, ib)) {
                    debug!(a = %ia, b = %ib, "contact begin");
                    reports.push(ContactReport::Begin { a: ia, b: ib });
                }

                // Degenerate exact overlap: pick an arbitrary fixed normal.
                let normal = if dist > f32::EPSILON {
                    delta / dist
                } else {
                    Vec2::X
                };

                // Separate the pair so it does not re-penetrate next step.
                let penetration = touch_dist - dist;
                let correction = normal * (penetration * 0.5);
                self.bodies.get_mut(&ia).expect("ball exists").position -= correction;
                self.bodies.get_mut(&ib).expect("ball exists").position += correction;

                // Equal-mass elastic impulse along the contact normal.
                let rel = b.velocity - a.velocity;
                let approaching = rel.dot(normal);
                if approaching < 0.0 {
                    let impulse = -(1.0 + e) * approaching * 0.5;
                    self.bodies.get_mut(&ia).expect("ball exists").velocity -= normal * impulse;
                    self.bodies.get_mut(&ib).expect("ball exists").velocity += normal * impulse;
                }
            }
        }

        self.touching = now_touching;
    }

    fn report_sensor_overlaps(&self, reports: &mut Vec<ContactReport>) {
        for (ball_id, ball) in self.balls() {
            for (sensor_id, sensor) in self.sensors() {
                let center = sensor.shape_center();
                let dist = ball.position.distance(center);
                if dist <= ball.radius + sensor.radius {
                    let (a, b) = if ball_id < sensor_id {
                        (ball_id, sensor_id)
                    } else {
                        (sensor_id, ball_id)
                    };
                    reports.push(ContactReport::SensorPersist { a, b });
                }
            }
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Casts a ray against all ball bodies and returns the nearest hit.
    ///
    /// `dir` does not need to be normalized. Returns `None` if the direction
    /// is degenerate or no ball lies along the ray.
    #[must_use]
    pub fn raycast(&self, origin: Vec2, dir: Vec2) -> Option<RayHit> {
        let dir = dir.try_normalize()?;
        let mut best: Option<RayHit> = None;

        for (id, body) in self.balls() {
            // Ray-circle intersection: project center onto the ray.
            let to_center = body.position - origin;
            let along = to_center.dot(dir);
            if along < 0.0 {
                continue;
            }
            let closest_sq = to_center.length_squared() - along * along;
            let r_sq = body.radius * body.radius;
            if closest_sq > r_sq {
                continue;
            }
            let distance = along - (r_sq - closest_sq).sqrt();
            if distance < 0.0 {
                continue;
            }
            if best.map_or(true, |h| distance < h.distance) {
                best = Some(RayHit {
                    body: id,
                    point: origin + dir * distance,
                    distance,
                });
            }
        }

        best
    }
}

// =============================================================================
// Tests
// =============================================================================
