// Arena construction errors: malformed figures, missing spawn points

use thiserror::Error;

/// Errors raised while building figures or an arena.
///
/// Runtime geometry never fails; degenerate cases resolve to "no hit" or
/// "no move" instead.
#[derive(Error, Debug, PartialEq, Clone, Copy)]
pub enum ArenaError {
    #[error("No spawn points configured")]
    NoSpawnPoints,
    #[error("Polygon needs at least 3 points, got {0}")]
    TooFewPoints(usize),
    #[error("Polygon has {points} points but {textures} edge textures")]
    TextureMismatch { points: usize, textures: usize },
    #[error("Circle radius must be positive, got {0}")]
    InvalidRadius(f64),
}
