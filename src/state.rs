use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;

use crate::error::PuzzleError;

/// Direction the blank travels when a tile slides into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// Expansion order. Fixed so that ties among equal-cost nodes resolve the
    /// same way on every run.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Up => "Up",
            Move::Down => "Down",
            Move::Left => "Left",
            Move::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

/// One arrangement of a k×k board, stored row-major. `0` is the blank.
///
/// A `State` is never edited in place: [`State::slide`] returns a new one.
/// Equality and hashing compare the tiles positionally.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct State {
    size: usize,
    tiles: Box<[u16]>,
    blank: usize,
}

impl State {
    /// Builds a state from row-major tiles, checking that they form a
    /// permutation of `0..size*size`.
    pub fn new(size: usize, tiles: Vec<u16>) -> Result<Self, PuzzleError> {
        let cells = cell_count(size)?;
        if tiles.len() != cells {
            return Err(PuzzleError::ShapeMismatch {
                expected: cells,
                found: tiles.len(),
            });
        }

        let mut seen = vec![false; cells];
        for &tile in &tiles {
            let value = usize::from(tile);
            if value >= cells {
                return Err(PuzzleError::TileOutOfRange { tile, max: cells - 1 });
            }
            if seen[value] {
                return Err(PuzzleError::DuplicateTile(tile));
            }
            seen[value] = true;
        }

        // a permutation of 0..cells always contains the blank
        let blank = tiles.iter().position(|&t| t == 0).unwrap_or_default();
        Ok(Self {
            size,
            tiles: tiles.into_boxed_slice(),
            blank,
        })
    }

    /// Builds a state from a square matrix of rows.
    pub fn from_rows(rows: &[Vec<u16>]) -> Result<Self, PuzzleError> {
        let size = rows.len();
        if let Some(row) = rows.iter().find(|row| row.len() != size) {
            return Err(PuzzleError::ShapeMismatch {
                expected: size,
                found: row.len(),
            });
        }
        Self::new(size, rows.iter().flatten().copied().collect())
    }

    /// The solved arrangement: `1, 2, ..., k²-1` in row-major order with the
    /// blank in the bottom-right cell.
    pub fn goal(size: usize) -> Result<Self, PuzzleError> {
        let cells = cell_count(size)?;
        let tiles = (1..cells)
            .map(|v| v as u16)
            .chain(std::iter::once(0))
            .collect();
        Self::new(size, tiles)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn tiles(&self) -> &[u16] {
        &self.tiles
    }

    pub fn tile(&self, row: usize, col: usize) -> u16 {
        self.tiles[row * self.size + col]
    }

    /// `(row, col)` of the blank.
    pub fn blank(&self) -> (usize, usize) {
        (self.blank / self.size, self.blank % self.size)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u16]> {
        self.tiles.chunks(self.size)
    }

    /// Checks every cell against the goal arrangement, including that the
    /// last cell holds the blank.
    pub fn is_goal(&self) -> bool {
        let last = self.tiles.len() - 1;
        self.tiles[last] == 0
            && self.tiles[..last]
                .iter()
                .enumerate()
                .all(|(i, &tile)| usize::from(tile) == i + 1)
    }

    /// Slides the blank one cell in `movement`'s direction, or `None` when
    /// that would leave the board.
    pub fn slide(&self, movement: Move) -> Option<Self> {
        let (dr, dc) = movement.as_offset();
        let (row, col) = self.blank();

        let new_row = row as isize + dr;
        let new_col = col as isize + dc;
        let bound = self.size as isize;
        if new_row < 0 || new_row >= bound || new_col < 0 || new_col >= bound {
            return None;
        }

        let target = new_row as usize * self.size + new_col as usize;
        let mut tiles = self.tiles.clone();
        tiles.swap(self.blank, target);
        Some(Self {
            size: self.size,
            tiles,
            blank: target,
        })
    }

    /// Every legal successor, in [`Move::ALL`] order.
    pub fn successors(&self) -> impl Iterator<Item = (Move, State)> + '_ {
        Move::ALL
            .into_iter()
            .filter_map(move |movement| self.slide(movement).map(|next| (movement, next)))
    }

    /// The move that turns `self` into `next`, if they are one slide apart.
    pub fn move_to(&self, next: &State) -> Option<Move> {
        Move::ALL
            .into_iter()
            .find(|&movement| self.slide(movement).as_ref() == Some(next))
    }

    /// Walks the blank `moves` random steps away from the goal. Never undoes
    /// the previous step, so short scrambles are not wasted. The result is
    /// always solvable.
    pub fn scrambled<R: Rng + ?Sized>(
        size: usize,
        moves: usize,
        rng: &mut R,
    ) -> Result<Self, PuzzleError> {
        let mut state = Self::goal(size)?;
        let mut last: Option<Move> = None;

        for _ in 0..moves {
            let options: Vec<(Move, State)> = state
                .successors()
                .filter(|(movement, _)| Some(movement.opposite()) != last)
                .collect();
            if let Some((movement, next)) = options.choose(rng).cloned() {
                last = Some(movement);
                state = next;
            }
        }

        Ok(state)
    }
}

/// Cells on a board of side `size`; tiles must fit in a `u16`.
fn cell_count(size: usize) -> Result<usize, PuzzleError> {
    match size.checked_mul(size) {
        Some(cells) if size >= 2 && cells <= usize::from(u16::MAX) => Ok(cells),
        _ => Err(PuzzleError::InvalidSize(size)),
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = (self.tiles.len() - 1).to_string().len();
        for row in self.rows() {
            for &val in row {
                write!(f, "{:>width$} ", val, width = width)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.rows()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn state(rows: &[&[u16]]) -> State {
        let rows: Vec<Vec<u16>> = rows.iter().map(|r| r.to_vec()).collect();
        State::from_rows(&rows).unwrap()
    }

    #[test]
    fn goal_places_blank_last() {
        let goal = State::goal(3).unwrap();
        assert_eq!(goal.tiles(), &[1, 2, 3, 4, 5, 6, 7, 8, 0]);
        assert_eq!(goal.blank(), (2, 2));
        assert!(goal.is_goal());
    }

    #[test]
    fn is_goal_requires_blank_in_last_cell() {
        let s = state(&[&[0, 1, 2], &[3, 4, 5], &[6, 7, 8]]);
        assert!(!s.is_goal());
        let s = state(&[&[1, 2, 3], &[4, 5, 6], &[7, 0, 8]]);
        assert!(!s.is_goal());
    }

    #[test]
    fn rejects_malformed_boards() {
        assert!(matches!(State::new(1, vec![0]), Err(PuzzleError::InvalidSize(1))));
        assert!(matches!(
            State::new(2, vec![0, 1, 2]),
            Err(PuzzleError::ShapeMismatch { expected: 4, found: 3 })
        ));
        assert!(matches!(
            State::new(2, vec![0, 1, 2, 4]),
            Err(PuzzleError::TileOutOfRange { tile: 4, max: 3 })
        ));
        assert!(matches!(
            State::new(2, vec![0, 1, 1, 2]),
            Err(PuzzleError::DuplicateTile(1))
        ));
        assert!(matches!(
            State::from_rows(&[vec![1, 2], vec![3]]),
            Err(PuzzleError::ShapeMismatch { expected: 2, found: 1 })
        ));
    }

    #[test]
    fn slide_swaps_blank_with_neighbour() {
        let s = state(&[&[1, 2, 3], &[4, 0, 6], &[7, 5, 8]]);
        let down = s.slide(Move::Down).unwrap();
        assert_eq!(down.tiles(), &[1, 2, 3, 4, 5, 6, 7, 0, 8]);
        assert_eq!(down.blank(), (2, 1));
        // original is untouched
        assert_eq!(s.blank(), (1, 1));
    }

    #[test]
    fn slide_off_the_board_is_rejected() {
        let goal = State::goal(3).unwrap();
        assert!(goal.slide(Move::Down).is_none());
        assert!(goal.slide(Move::Right).is_none());
        assert!(goal.slide(Move::Up).is_some());
    }

    #[test]
    fn successors_follow_fixed_order() {
        let s = state(&[&[1, 2, 3], &[4, 0, 6], &[7, 5, 8]]);
        let moves: Vec<Move> = s.successors().map(|(m, _)| m).collect();
        assert_eq!(moves, vec![Move::Up, Move::Down, Move::Left, Move::Right]);

        let corner = State::goal(3).unwrap();
        let moves: Vec<Move> = corner.successors().map(|(m, _)| m).collect();
        assert_eq!(moves, vec![Move::Up, Move::Left]);
    }

    #[test]
    fn move_to_recovers_direction() {
        let s = State::goal(3).unwrap();
        let next = s.slide(Move::Left).unwrap();
        assert_eq!(s.move_to(&next), Some(Move::Left));
        assert_eq!(next.move_to(&s), Some(Move::Right));
        assert_eq!(s.move_to(&s), None);
    }

    #[test]
    fn scramble_is_reproducible_for_a_seed() {
        let a = State::scrambled(4, 40, &mut StdRng::seed_from_u64(7)).unwrap();
        let b = State::scrambled(4, 40, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.size(), 4);
    }

    #[test]
    fn display_pads_columns() {
        let goal = State::goal(4).unwrap();
        let text = goal.to_string();
        assert_eq!(text.lines().next(), Some(" 1  2  3  4 "));
        assert_eq!(text.lines().last(), Some("13 14 15  0 "));
    }
}
