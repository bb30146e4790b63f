//! Table geometry: playfield bounds, pocket placements, and spots.
//!
//! The table is a fixed 2:1 rectangle centered at the origin, with six
//! pockets: four corners and two side pockets at the long rails' midpoints.
//! Pocket sensors all hang off a single static table frame at the origin, so
//! each placement is expressed as a local shape offset from that frame (the
//! way pocket fixtures attach to one table body). Geometry is read-only
//! after construction.

use felt::Bounds;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::ball::BALL_RADIUS;

/// Table dimensions and pocket sizing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Playfield width in world units (metres).
    pub width: f32,
    /// Playfield height in world units (metres).
    pub height: f32,
    /// Radius of each pocket sensor circle.
    pub pocket_radius: f32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            width: 2.84,
            height: 1.42,
            pocket_radius: 0.05,
        }
    }
}

/// Placement of one pocket sensor, relative to the table frame at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PocketSpot {
    /// Local offset of the pocket's geometric center from the table frame.
    pub offset: Vec2,
}

/// Fixed table geometry derived from a [`TableConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Table {
    config: TableConfig,
}

impl Table {
    /// Builds a table from its configuration.
    #[must_use]
    pub fn new(config: TableConfig) -> Self {
        Self { config }
    }

    /// Returns the table configuration.
    #[must_use]
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Cushion bounds of the playfield.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.config.width, self.config.height)
    }

    /// The six pocket placements: four corners plus the two long-rail
    /// midpoints.
    ///
    /// Pocket centers sit one pocket radius inside the cushions. The capture
    /// test requires a ball's center within one ball radius of the pocket
    /// center, and a ball rolling along a solid cushion can never reach an
    /// exact corner, so mouths on the rail line would be unreachable.
    #[must_use]
    pub fn pockets(&self) -> [PocketSpot; 6] {
        let inset = self.config.pocket_radius;
        let px = self.config.width / 2.0 - inset;
        let py = self.config.height / 2.0 - inset;
        [
            PocketSpot { offset: Vec2::new(-px, -py) },
            PocketSpot { offset: Vec2::new(-px, py) },
            PocketSpot { offset: Vec2::new(0.0, -py) },
            PocketSpot { offset: Vec2::new(0.0, py) },
            PocketSpot { offset: Vec2::new(px, -py) },
            PocketSpot { offset: Vec2::new(px, py) },
        ]
    }

    /// Radius of each pocket sensor circle.
    #[must_use]
    pub fn pocket_radius(&self) -> f32 {
        self.config.pocket_radius
    }

    /// Where the cue ball is spotted at the break (and where play aims
    /// from): a quarter table-width toward the head rail.
    #[must_use]
    pub fn head_spot(&self) -> Vec2 {
        Vec2::new(self.config.width * 0.25, 0.0)
    }

    /// Origin slot of the rack triangle on the foot side of the table.
    ///
    /// The triangle's first (widest) row starts here and rows march toward
    /// the cue ball's side.
    #[must_use]
    pub fn rack_origin(&self) -> Vec2 {
        Vec2::new(
            -self.config.width * 0.25 - BALL_RADIUS,
            -4.0 * BALL_RADIUS,
        )
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new(TableConfig::default())
    }
}
