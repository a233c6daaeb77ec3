use std::fmt;

/// A cell coordinate on a 0-indexed `height x width` grid.
///
/// Ordering is row-major, which is what move selection relies on to stay
/// reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Cells within one row and column of `self` that fall inside the board,
    /// excluding `self`.
    pub fn neighbors(&self, height: usize, width: usize) -> impl Iterator<Item = Position> {
        let origin = *self;
        (-1isize..=1).flat_map(move |dr| {
            (-1isize..=1).filter_map(move |dc| {
                if dr == 0 && dc == 0 {
                    return None;
                }
                let row = origin.row.checked_add_signed(dr)?;
                let col = origin.col.checked_add_signed(dc)?;
                (row < height && col < width).then_some(Position::new(row, col))
            })
        })
    }

    pub fn is_within(&self, height: usize, width: usize) -> bool {
        self.row < height && self.col < width
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Position::new(row, col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_position_creation() {
        let pos = Position::new(5, 10);
        assert_eq!(pos.row, 5);
        assert_eq!(pos.col, 10);
        assert_eq!(Position::from((5, 10)), pos);
    }

    #[test]
    fn test_interior_neighbors() {
        let pos = Position::new(1, 1);
        let neighbors: Vec<Position> = pos.neighbors(3, 3).collect();

        assert_eq!(neighbors.len(), 8);
        assert!(neighbors.contains(&Position::new(0, 0))); // Top-left
        assert!(neighbors.contains(&Position::new(0, 1))); // Top
        assert!(neighbors.contains(&Position::new(0, 2))); // Top-right
        assert!(neighbors.contains(&Position::new(1, 0))); // Left
        assert!(neighbors.contains(&Position::new(1, 2))); // Right
        assert!(neighbors.contains(&Position::new(2, 0))); // Bottom-left
        assert!(neighbors.contains(&Position::new(2, 1))); // Bottom
        assert!(neighbors.contains(&Position::new(2, 2))); // Bottom-right
        assert!(!neighbors.contains(&pos));
    }

    #[test]
    fn test_neighbors_clipped_at_edges() {
        assert_eq!(Position::new(0, 0).neighbors(3, 3).count(), 3);
        assert_eq!(Position::new(0, 1).neighbors(3, 3).count(), 5);
        assert_eq!(Position::new(2, 2).neighbors(3, 3).count(), 3);
        assert_eq!(Position::new(0, 0).neighbors(1, 1).count(), 0);

        let row: HashSet<Position> = Position::new(0, 1).neighbors(1, 3).collect();
        assert_eq!(
            row,
            HashSet::from([Position::new(0, 0), Position::new(0, 2)])
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Position::new(2, 7).to_string(), "(2, 7)");
    }
}
