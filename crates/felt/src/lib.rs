//! # Felt
//!
//! Deterministic 2D table physics service for billiards simulation.
//!
//! Felt models a rectangular table as a flat frictional surface with
//! reflecting cushion walls, circular rigid balls, and circular pocket
//! sensors that detect overlap without affecting dynamics. Integration is
//! fixed-timestep and hand-rolled (`position += velocity * dt` with
//! exponential felt damping), which keeps stepping deterministic across
//! platforms and trivially reproducible in tests.
//!
//! The crate reports discrete contact observations rather than contact
//! manifolds:
//!
//! - [`ContactReport::Begin`]: two solid bodies started touching this step
//! - [`ContactReport::SensorPersist`]: a body overlapped a sensor this step
//!   (re-reported every step while the overlap persists)
//!
//! Game semantics (what a pocket overlap *means*) are deliberately not
//! interpreted here; consumers classify reports themselves.
//!
//! ## Quick Start
//!
//! ```
//! use felt::{Bounds, World, WorldConfig};
//! use glam::Vec2;
//!
//! let mut world = World::new(WorldConfig {
//!     bounds: Bounds::new(2.84, 1.42),
//!     ..WorldConfig::default()
//! });
//!
//! let ball = world.add_ball(Vec2::ZERO, 0.03);
//! world.set_velocity(ball, Vec2::new(1.0, 0.0)).unwrap();
//!
//! let reports = world.step();
//! assert!(reports.is_empty());
//! assert!(world.position(ball).unwrap().x > 0.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod body;
pub mod world;

// Re-exports for convenience
pub use body::{Body, BodyId, BodyKind};
pub use world::{ContactReport, RayHit, World, WorldConfig, WorldError};

/// Axis-aligned rectangular table bounds, centered at the origin.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Bounds {
    /// Minimum corner
    pub min: glam::Vec2,
    /// Maximum corner
    pub max: glam::Vec2,
}

impl Bounds {
    /// Create bounds from dimensions (centered at origin).
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            min: glam::Vec2::new(-width / 2.0, -height / 2.0),
            max: glam::Vec2::new(width / 2.0, height / 2.0),
        }
    }

    /// Create bounds from min/max corners.
    #[must_use]
    pub fn from_min_max(min: glam::Vec2, max: glam::Vec2) -> Self {
        Self { min, max }
    }

    /// Get the center of the bounds.
    #[must_use]
    pub fn center(&self) -> glam::Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Get the size of the bounds.
    #[must_use]
    pub fn size(&self) -> glam::Vec2 {
        self.max - self.min
    }

    /// Check if a point is inside the bounds.
    #[must_use]
    pub fn contains(&self, point: glam::Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Check if a circle of the given radius fits entirely inside the bounds
    /// when centered at `point`.
    #[must_use]
    pub fn contains_circle(&self, point: glam::Vec2, radius: f32) -> bool {
        point.x - radius >= self.min.x
            && point.x + radius <= self.max.x
            && point.y - radius >= self.min.y
            && point.y + radius <= self.max.y
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(2.84, 1.42)
    }
}
