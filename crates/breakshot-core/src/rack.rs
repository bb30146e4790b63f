//! Rack layout: triangular ball placement on the foot of the table.
//!
//! Slots form the classic five-column triangle anchored at the table's
//! [`rack origin`](crate::table::Table::rack_origin): the widest column of
//! five sits on the foot side and each successive column, one ball shorter,
//! steps toward the cue ball's half of the table. Adjacent balls touch
//! exactly (centers two radii apart).
//!
//! Which ball lands in which slot is shuffled with a seeded [`ChaCha8Rng`],
//! so a session's rack order is reproducible from its seed.

use glam::Vec2;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::ball::{BallId, BALL_RADIUS};
use crate::table::Table;

/// Columns in a full triangle; the widest column holds this many balls.
pub const RACK_COLUMNS: usize = 5;

/// Triangle slot positions for `count` balls, in column-major order
/// starting at the widest column.
///
/// A full triangle holds fifteen; a replenishment rack of fourteen simply
/// leaves the last (apex) slot empty.
#[must_use]
pub fn slots(table: &Table, count: usize) -> Vec<Vec2> {
    let origin = table.rack_origin();
    let mut out = Vec::with_capacity(count);
    'columns: for column in 0..RACK_COLUMNS {
        let column_size = RACK_COLUMNS - column;
        for slot in 0..column_size {
            if out.len() == count {
                break 'columns;
            }
            #[allow(clippy::cast_precision_loss)]
            let position = Vec2::new(
                origin.x + 2.0 * BALL_RADIUS * column as f32,
                origin.y + 2.0 * BALL_RADIUS * slot as f32 + column as f32 * BALL_RADIUS,
            );
            out.push(position);
        }
    }
    out
}

/// Assigns the given balls to triangle slots in seeded-shuffled order.
///
/// Returns one `(ball, position)` pair per input ball. The slot geometry is
/// fixed; only the ball-to-slot assignment varies with the seed.
#[must_use]
pub fn layout(table: &Table, balls: &[BallId], seed: u64) -> Vec<(BallId, Vec2)> {
    let mut shuffled = balls.to_vec();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    shuffled.shuffle(&mut rng);

    debug!(count = shuffled.len(), seed, "racking balls");
    shuffled
        .into_iter()
        .zip(slots(table, balls.len()))
        .collect()
}
