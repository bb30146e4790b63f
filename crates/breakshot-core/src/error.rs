//! Error types for game-facing operations.

use thiserror::Error;

/// Errors surfaced by the session API.
///
/// Physics-layer failures are wrapped rather than re-described; rule
/// outcomes (fouls, turn loss) are never errors: they flow through
/// [`crate::event::GameNotice`] instead.
#[derive(Debug, Error)]
pub enum GameError {
    /// A stroke was attempted while balls were still in motion.
    #[error("shot already in flight, wait for the table to settle")]
    ShotInFlight,

    /// The stroke ray passed through the table without hitting any ball.
    #[error("stroke did not strike any ball")]
    NothingStruck,

    /// A failure in the underlying physics world.
    #[error(transparent)]
    World(#[from] felt::WorldError),
}
