use crate::{GameError, Position};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Largest number of cells a board may hold.
pub const MAX_CELLS: usize = 1 << 20;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    Hidden(bool),
    Revealed(u8),
    Flagged(bool),
}

/// The true game state: where the mines are and what the player has uncovered.
#[derive(Debug)]
pub struct Board {
    cells: HashMap<Position, Cell>,
    mines: HashSet<Position>,
    height: usize,
    width: usize,
}

impl Board {
    pub fn new(height: usize, width: usize, mines_count: usize) -> Result<Self, GameError> {
        Self::with_rng(height, width, mines_count, &mut rand::thread_rng())
    }

    pub fn with_seed(
        height: usize,
        width: usize,
        mines_count: usize,
        seed: u64,
    ) -> Result<Self, GameError> {
        Self::with_rng(height, width, mines_count, &mut StdRng::seed_from_u64(seed))
    }

    /// Builds a board with a fixed mine layout.
    pub fn with_mines(
        height: usize,
        width: usize,
        mines: impl IntoIterator<Item = Position>,
    ) -> Result<Self, GameError> {
        let mut board = Self::empty(height, width)?;
        for pos in mines {
            if !board.is_within_bounds(pos) {
                return Err(GameError::OutOfBounds(pos));
            }
            board.cells.insert(pos, Cell::Hidden(true));
            board.mines.insert(pos);
        }
        Ok(board)
    }

    fn with_rng<R: Rng>(
        height: usize,
        width: usize,
        mines_count: usize,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        if mines_count > Self::cell_count(height, width)? {
            return Err(GameError::TooManyMines {
                height,
                width,
                mines: mines_count,
            });
        }

        let mut board = Self::empty(height, width)?;
        board.place_mines(mines_count, rng);
        Ok(board)
    }

    fn cell_count(height: usize, width: usize) -> Result<usize, GameError> {
        if height == 0 || width == 0 {
            return Err(GameError::EmptyBoard { height, width });
        }
        height
            .checked_mul(width)
            .filter(|&cells| cells <= MAX_CELLS)
            .ok_or(GameError::BoardTooLarge {
                height,
                width,
                max: MAX_CELLS,
            })
    }

    fn empty(height: usize, width: usize) -> Result<Self, GameError> {
        let cells = Self::cell_count(height, width)?;
        let mut board = Board {
            cells: HashMap::with_capacity(cells),
            mines: HashSet::new(),
            height,
            width,
        };
        for pos in board.iter_positions() {
            board.cells.insert(pos, Cell::Hidden(false));
        }
        Ok(board)
    }

    fn place_mines<R: Rng>(&mut self, mines_count: usize, rng: &mut R) {
        while self.mines.len() < mines_count {
            let row = rng.gen_range(0..self.height);
            let col = rng.gen_range(0..self.width);
            let pos = Position::new(row, col);

            if self.mines.insert(pos) {
                self.cells.insert(pos, Cell::Hidden(true));
            }
        }
    }

    pub fn is_within_bounds(&self, pos: Position) -> bool {
        pos.is_within(self.height, self.width)
    }

    pub fn get_cell(&self, pos: Position) -> Result<&Cell, GameError> {
        self.cells.get(&pos).ok_or(GameError::OutOfBounds(pos))
    }

    pub fn is_mine(&self, pos: Position) -> Result<bool, GameError> {
        self.get_cell(pos)?;
        Ok(self.mines.contains(&pos))
    }

    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> {
        pos.neighbors(self.height, self.width)
    }

    /// Number of mines within one row and column of `pos`, not counting `pos`.
    pub fn nearby_mines(&self, pos: Position) -> Result<u8, GameError> {
        self.get_cell(pos)?;
        Ok(self
            .neighbors(pos)
            .filter(|p| self.mines.contains(p))
            .count() as u8)
    }

    /// Uncovers `pos`. Returns the neighbouring mine count, or `None` if `pos`
    /// was a mine.
    pub fn reveal(&mut self, pos: Position) -> Result<Option<u8>, GameError> {
        match *self.get_cell(pos)? {
            Cell::Revealed(_) => Err(GameError::AlreadyRevealed(pos)),
            Cell::Hidden(true) | Cell::Flagged(true) => {
                self.cells.insert(pos, Cell::Revealed(0));
                Ok(None)
            }
            Cell::Hidden(false) | Cell::Flagged(false) => {
                let count = self.nearby_mines(pos)?;
                self.cells.insert(pos, Cell::Revealed(count));
                Ok(Some(count))
            }
        }
    }

    pub fn flag(&mut self, pos: Position) -> Result<(), GameError> {
        match *self.get_cell(pos)? {
            Cell::Revealed(_) => Err(GameError::AlreadyRevealed(pos)),
            Cell::Hidden(has_mine) | Cell::Flagged(has_mine) => {
                self.cells.insert(pos, Cell::Flagged(has_mine));
                Ok(())
            }
        }
    }

    /// Cells the player has flagged as mines.
    pub fn mines_found(&self) -> HashSet<Position> {
        self.cells
            .iter()
            .filter_map(|(&pos, cell)| matches!(cell, Cell::Flagged(_)).then_some(pos))
            .collect()
    }

    /// True iff the flagged cells are exactly the mines.
    pub fn won(&self) -> bool {
        self.mines_found() == self.mines
    }

    pub fn mines(&self) -> &HashSet<Position> {
        &self.mines
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn mines_count(&self) -> usize {
        self.mines.len()
    }

    pub fn revealed_count(&self) -> usize {
        self.cells
            .values()
            .filter(|cell| matches!(cell, Cell::Revealed(_)))
            .count()
    }

    /// Row-major iteration over every cell on the board.
    pub fn iter_positions(&self) -> impl Iterator<Item = Position> {
        let width = self.width;
        (0..self.height).flat_map(move |row| (0..width).map(move |col| Position::new(row, col)))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "--".repeat(self.width) + "-";
        for row in 0..self.height {
            writeln!(f, "{rule}")?;
            for col in 0..self.width {
                let pos = Position::new(row, col);
                let glyph = match self.cells.get(&pos) {
                    Some(Cell::Flagged(true)) => 'F',
                    Some(Cell::Flagged(false)) => '?',
                    _ if self.mines.contains(&pos) => 'X',
                    Some(Cell::Revealed(0)) => '.',
                    Some(Cell::Revealed(n)) => char::from(b'0' + n),
                    _ => ' ',
                };
                write!(f, "|{glyph}")?;
            }
            writeln!(f, "|")?;
        }
        write!(f, "{rule}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        assert_eq!(
            Board::new(2, 2, 5).unwrap_err(),
            GameError::TooManyMines {
                height: 2,
                width: 2,
                mines: 5
            }
        );
        assert!(matches!(
            Board::new(0, 3, 0),
            Err(GameError::EmptyBoard { .. })
        ));
        assert_eq!(
            Board::with_mines(2, 2, [p(2, 0)]).unwrap_err(),
            GameError::OutOfBounds(p(2, 0))
        );
    }

    #[test]
    fn test_rejects_oversized_dimensions() {
        assert!(matches!(
            Board::new(1 << 33, 1 << 33, 1),
            Err(GameError::BoardTooLarge { .. })
        ));
        assert!(matches!(
            Board::with_mines(usize::MAX, 2, Vec::new()),
            Err(GameError::BoardTooLarge { .. })
        ));
        assert!(matches!(
            Board::with_seed(MAX_CELLS + 1, 1, 0, 0),
            Err(GameError::BoardTooLarge { .. })
        ));
    }

    #[test]
    fn test_seeded_layout_is_reproducible() {
        let a = Board::with_seed(8, 8, 10, 42).unwrap();
        let b = Board::with_seed(8, 8, 10, 42).unwrap();
        assert_eq!(a.mines(), b.mines());
        assert_eq!(a.mines_count(), 10);
    }

    #[test]
    fn test_nearby_mines() {
        let board = Board::with_mines(3, 3, [p(0, 0), p(2, 2)]).unwrap();
        assert_eq!(board.nearby_mines(p(1, 1)).unwrap(), 2);
        assert_eq!(board.nearby_mines(p(0, 2)).unwrap(), 0);
        assert_eq!(board.nearby_mines(p(0, 1)).unwrap(), 1);
        assert!(board.nearby_mines(p(3, 0)).is_err());
        assert!(board.is_mine(p(0, 0)).unwrap());
        assert!(!board.is_mine(p(1, 1)).unwrap());
    }

    #[test]
    fn test_reveal() {
        let mut board = Board::with_mines(1, 3, [p(0, 2)]).unwrap();
        assert_eq!(board.reveal(p(0, 1)).unwrap(), Some(1));
        assert_eq!(
            board.reveal(p(0, 1)).unwrap_err(),
            GameError::AlreadyRevealed(p(0, 1))
        );
        assert_eq!(board.reveal(p(0, 2)).unwrap(), None);
        assert_eq!(board.revealed_count(), 2);
    }

    #[test]
    fn test_won_requires_exact_flags() {
        let mut board = Board::with_mines(2, 2, [p(0, 0), p(1, 1)]).unwrap();
        assert!(!board.won());

        board.flag(p(0, 0)).unwrap();
        assert!(!board.won(), "subset of mines must not win");

        board.flag(p(1, 1)).unwrap();
        assert!(board.won());

        board.flag(p(0, 1)).unwrap();
        assert!(!board.won(), "superset of mines must not win");
    }

    #[test]
    fn test_display_marks_mines() {
        let board = Board::with_mines(1, 2, [p(0, 1)]).unwrap();
        assert_eq!(board.to_string(), "-----\n| |X|\n-----");
    }
}
