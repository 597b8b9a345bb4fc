//! Error types.
//!
//! [`PuzzleError`] covers malformed input and I/O around the search.
//! [`SearchError`] covers the engine failing on a board that passed the
//! parity check, which means the engine itself is broken. An unsolvable
//! board is not an error; see [`crate::astar::Outcome::Unsolvable`].

use std::path::PathBuf;

use crate::astar::SearchStats;

/// Input that cannot be turned into a [`crate::state::State`], or output that
/// could not be written.
#[derive(Debug, thiserror::Error)]
pub enum PuzzleError {
    /// Board side must be at least 2.
    #[error("invalid board size {0}: expected at least 2")]
    InvalidSize(usize),

    /// Wrong number of cells or a ragged row.
    #[error("shape mismatch: expected {expected} cells, found {found}")]
    ShapeMismatch { expected: usize, found: usize },

    #[error("tile {tile} out of range: expected 0..={max}")]
    TileOutOfRange { tile: u16, max: usize },

    #[error("tile {0} appears more than once")]
    DuplicateTile(u16),

    /// Token in the input text that is not an unsigned integer.
    #[error("parse error: {0}")]
    Parse(String),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure of the search itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The frontier emptied before the goal was reached even though the
    /// parity check approved the start. Either the heuristic or the move
    /// model is wrong.
    #[error("frontier exhausted without reaching the goal ({stats})")]
    Exhausted { stats: SearchStats },
}
