use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::astar::Solution;
use crate::error::PuzzleError;

/// Plain-text solution file: the move count, the node counters, then every
/// state on the path with a `---` line after each.
pub fn render_solution(solution: &Solution) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = writeln!(out, "Minimum number of moves {} moves", solution.cost());
    let _ = writeln!(
        out,
        "Expanded: {}, Explored: {}",
        solution.stats.expanded, solution.stats.generated
    );
    out.push_str("Path states:\n");
    for state in solution.states() {
        for row in state.rows() {
            for tile in row {
                let _ = write!(out, "{} ", tile);
            }
            out.push('\n');
        }
        out.push_str("---\n");
    }
    out
}

pub fn write_solution(solution: &Solution, path: &Path) -> Result<(), PuzzleError> {
    fs::write(path, render_solution(solution)).map_err(|source| PuzzleError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astar::{solve, Outcome};
    use crate::heuristic::Heuristic;
    use crate::state::State;

    fn two_move_solution() -> Solution {
        let start = State::new(3, vec![1, 2, 3, 4, 0, 6, 7, 5, 8]).unwrap();
        match solve(&start, Heuristic::Manhattan).unwrap() {
            Outcome::Solved(solution) => solution,
            Outcome::Unsolvable(_) => panic!("example is solvable"),
        }
    }

    #[test]
    fn renders_header_and_every_state() {
        let solution = two_move_solution();
        let text = render_solution(&solution);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Minimum number of moves 2 moves");
        assert_eq!(
            lines[1],
            format!(
                "Expanded: {}, Explored: {}",
                solution.stats.expanded, solution.stats.generated
            )
        );
        assert_eq!(lines[2], "Path states:");
        assert_eq!(&lines[3..7], &["1 2 3 ", "4 0 6 ", "7 5 8 ", "---"]);
        assert_eq!(&lines[11..15], &["1 2 3 ", "4 5 6 ", "7 8 0 ", "---"]);
        assert_eq!(lines.len(), 15);
    }

    #[test]
    fn writes_to_disk() {
        let solution = two_move_solution();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.txt");

        write_solution(&solution, &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), render_solution(&solution));
    }

    #[test]
    fn unwritable_path_reports_io_error() {
        let solution = two_move_solution();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("output.txt");

        let err = write_solution(&solution, &path).unwrap_err();
        assert!(matches!(err, PuzzleError::Io { .. }));
        assert!(err.to_string().contains("output.txt"));
    }
}
