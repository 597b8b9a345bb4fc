//! Cost-to-go estimates for A*.
//!
//! Every variant is zero at the goal and never exceeds the true number of
//! remaining slides.

use clap::ValueEnum;
use std::fmt;

use crate::state::State;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum Heuristic {
    /// Non-blank tiles not on their goal cell.
    #[value(alias = "h")]
    Hamming,
    /// Sum of per-tile grid distances to the goal cell.
    #[default]
    #[value(alias = "m")]
    Manhattan,
    /// Sum of per-tile straight-line distances, floored.
    #[value(alias = "e")]
    Euclidean,
    /// Manhattan plus two moves per tile that must leave its goal line to
    /// let another tile past.
    #[value(alias = "l")]
    LinearConflict,
}

impl Heuristic {
    pub const ALL: [Heuristic; 4] = [
        Heuristic::Hamming,
        Heuristic::Manhattan,
        Heuristic::Euclidean,
        Heuristic::LinearConflict,
    ];

    pub fn estimate(&self, state: &State) -> u32 {
        match self {
            Heuristic::Hamming => hamming(state),
            Heuristic::Manhattan => manhattan(state),
            Heuristic::Euclidean => euclidean(state),
            Heuristic::LinearConflict => manhattan(state) + 2 * linear_conflicts(state),
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Heuristic::Hamming => "Hamming",
            Heuristic::Manhattan => "Manhattan",
            Heuristic::Euclidean => "Euclidean",
            Heuristic::LinearConflict => "Linear Conflict",
        };
        write!(f, "{}", s)
    }
}

/// Goal `(row, col)` of a non-blank tile.
fn goal_cell(value: u16, size: usize) -> (usize, usize) {
    let index = usize::from(value) - 1;
    (index / size, index % size)
}

/// `(row, col, goal_row, goal_col)` for every non-blank tile.
fn placed_tiles(state: &State) -> impl Iterator<Item = (usize, usize, usize, usize)> + '_ {
    let size = state.size();
    state
        .tiles()
        .iter()
        .enumerate()
        .filter(|&(_, &value)| value != 0)
        .map(move |(i, &value)| {
            let (goal_row, goal_col) = goal_cell(value, size);
            (i / size, i % size, goal_row, goal_col)
        })
}

fn hamming(state: &State) -> u32 {
    placed_tiles(state)
        .filter(|&(row, col, goal_row, goal_col)| (row, col) != (goal_row, goal_col))
        .count() as u32
}

fn manhattan(state: &State) -> u32 {
    placed_tiles(state)
        .map(|(row, col, goal_row, goal_col)| row.abs_diff(goal_row) + col.abs_diff(goal_col))
        .sum::<usize>() as u32
}

fn euclidean(state: &State) -> u32 {
    let distance: f64 = placed_tiles(state)
        .map(|(row, col, goal_row, goal_col)| {
            let dr = row.abs_diff(goal_row) as f64;
            let dc = col.abs_diff(goal_col) as f64;
            dr.hypot(dc)
        })
        .sum();
    distance.floor() as u32
}

/// Tiles that have to step out of their goal row or column, summed over
/// every row and column.
fn linear_conflicts(state: &State) -> u32 {
    let size = state.size();
    let mut rows: Vec<Vec<usize>> = vec![Vec::new(); size];
    let mut cols: Vec<Vec<usize>> = vec![Vec::new(); size];

    // tiles are visited in row-major order, so each line is filled left to
    // right (rows) or top to bottom (columns)
    for (row, col, goal_row, goal_col) in placed_tiles(state) {
        if row == goal_row {
            rows[row].push(goal_col);
        }
        if col == goal_col {
            cols[col].push(goal_row);
        }
    }

    rows.iter()
        .chain(cols.iter())
        .map(|line| tiles_to_remove(line))
        .sum()
}

/// Given the goal positions of tiles already in their goal line, in current
/// order, counts how many must leave the line. Tiles that stay keep their
/// relative order, so at most a longest increasing run of goal positions
/// can stay.
fn tiles_to_remove(goals: &[usize]) -> u32 {
    // longest[i]: longest increasing subsequence ending at goals[i]
    let mut longest = vec![1usize; goals.len()];
    for i in 0..goals.len() {
        for j in 0..i {
            if goals[j] < goals[i] {
                longest[i] = longest[i].max(longest[j] + 1);
            }
        }
    }
    let keep = longest.iter().copied().max().unwrap_or(0);
    (goals.len() - keep) as u32
}
