//! # N-Puzzle Solver Library
//!
//! Optimal A* search for the k×k sliding-tile puzzle. The goal arrangement
//! is always `1, 2, ..., k²-1` in row-major order with the blank last.
//!
//! ## Modules
//! - `state`: board arrangement (`State`), blank moves (`Move`), goal test
//!   and successor generation.
//! - `solvability`: inversion-parity check run before any search.
//! - `heuristic`: the four admissible estimates (`Heuristic`).
//! - `node`: search nodes and the arena tree linking them to their parents.
//! - `frontier`: open set with decrease-key and the explored set.
//! - `astar`: the engine (`AStarEngine`) and the `solve` entry point.
//! - `input` / `report`: reading a board from text and writing a solution
//!   file.

#![forbid(unsafe_code)]

pub mod astar;
pub mod error;
pub mod frontier;
pub mod heuristic;
pub mod input;
pub mod node;
pub mod report;
pub mod solvability;
pub mod state;

pub use astar::{solve, AStarEngine, Outcome, Phase, SearchStats, Solution};
pub use error::{PuzzleError, SearchError};
pub use heuristic::Heuristic;
pub use solvability::Solvability;
pub use state::{Move, State};
