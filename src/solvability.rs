use tracing::debug;

use crate::state::State;

/// Parity analysis of a start state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Solvability {
    /// Pairs of non-blank tiles out of order in row-major reading.
    pub inversions: usize,
    /// Row of the blank counted from the bottom, starting at 1.
    pub blank_row_from_bottom: usize,
    pub solvable: bool,
}

/// Decides whether `state` can reach the goal by counting inversions.
///
/// Odd side: solvable iff the inversion count is even.
/// Even side: solvable iff the blank's row from the bottom is even and the
/// inversion count is odd, or the row is odd and the count is even.
pub fn check(state: &State) -> Solvability {
    let size = state.size();
    let inversions = count_inversions(state.tiles());
    let (blank_row, _) = state.blank();
    let blank_row_from_bottom = size - blank_row;

    let solvable = if size % 2 == 1 {
        inversions % 2 == 0
    } else {
        let row_even = blank_row_from_bottom % 2 == 0;
        let inv_odd = inversions % 2 == 1;
        (row_even && inv_odd) || (!row_even && !inv_odd)
    };

    debug!(size, inversions, blank_row_from_bottom, solvable, "solvability checked");

    Solvability {
        inversions,
        blank_row_from_bottom,
        solvable,
    }
}

pub fn is_solvable(state: &State) -> bool {
    check(state).solvable
}

fn count_inversions(flattened: &[u16]) -> usize {
    flattened
        .iter()
        .enumerate()
        .filter(|&(_, &val)| val != 0)
        .map(|(i, &val)| {
            flattened[i + 1..]
                .iter()
                .filter(|&&next| next != 0 && next < val)
                .count()
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(size: usize, tiles: &[u16]) -> State {
        State::new(size, tiles.to_vec()).unwrap()
    }

    #[test]
    fn goal_is_solvable_for_odd_and_even_sides() {
        for size in 2..=5 {
            let report = check(&State::goal(size).unwrap());
            assert_eq!(report.inversions, 0);
            assert_eq!(report.blank_row_from_bottom, 1);
            assert!(report.solvable, "goal of size {size} must be solvable");
        }
    }

    #[test]
    fn swapped_pair_is_unsolvable_on_odd_board() {
        let report = check(&state(3, &[1, 2, 3, 4, 5, 6, 8, 7, 0]));
        assert_eq!(report.inversions, 1);
        assert!(!report.solvable);
    }

    #[test]
    fn inversions_ignore_the_blank() {
        assert_eq!(count_inversions(&[0, 1, 2, 3]), 0);
        assert_eq!(count_inversions(&[3, 0, 2, 1]), 3);
    }

    #[test]
    fn even_board_depends_on_blank_row() {
        // blank moved up one row from the goal: one slide, still solvable
        let up = State::goal(4).unwrap().slide(crate::state::Move::Up).unwrap();
        let report = check(&up);
        assert_eq!(report.blank_row_from_bottom, 2);
        assert_eq!(report.inversions, 3);
        assert!(report.solvable);

        // famous 14-15 swap
        let swapped = state(4, &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 15, 14, 0]);
        assert!(!is_solvable(&swapped));
    }

    #[test]
    fn two_by_two_classification() {
        assert!(is_solvable(&state(2, &[1, 2, 0, 3])));
        assert!(is_solvable(&state(2, &[0, 1, 3, 2])));
        assert!(!is_solvable(&state(2, &[2, 1, 3, 0])));
    }
}
