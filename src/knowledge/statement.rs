use crate::Position;
use itertools::Itertools;
use std::collections::HashSet;
use std::fmt;

/// A logical sentence about the board: exactly `count` of `cells` are mines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub(super) cells: HashSet<Position>,
    pub(super) count: usize,
}

impl Statement {
    pub fn new(cells: impl IntoIterator<Item = Position>, count: usize) -> Self {
        let cells: HashSet<Position> = cells.into_iter().collect();
        debug_assert!(
            count <= cells.len(),
            "statement claims {count} mines among {} cells",
            cells.len()
        );
        Self { cells, count }
    }

    pub fn cells(&self) -> &HashSet<Position> {
        &self.cells
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Every remaining cell, if the statement forces all of them to be mines.
    pub fn known_mines(&self) -> Option<&HashSet<Position>> {
        (self.count > 0 && self.count == self.cells.len()).then_some(&self.cells)
    }

    /// Every remaining cell, if the statement forces all of them to be safe.
    pub fn known_safes(&self) -> Option<&HashSet<Position>> {
        (self.count == 0).then_some(&self.cells)
    }

    /// True when the statement no longer tells us anything new once applied.
    pub fn is_terminal(&self) -> bool {
        self.is_empty() || self.known_safes().is_some() || self.known_mines().is_some()
    }

    /// Drops a cell now known to be a mine. Returns whether the cell was present.
    pub fn mark_mine(&mut self, pos: Position) -> bool {
        if !self.cells.remove(&pos) {
            return false;
        }
        debug_assert!(self.count > 0, "mine {pos} removed from a zero-count statement");
        self.count = self.count.saturating_sub(1);
        true
    }

    /// Drops a cell now known to be safe. Returns whether the cell was present.
    pub fn mark_safe(&mut self, pos: Position) -> bool {
        self.cells.remove(&pos)
    }

    pub fn is_strict_subset_of(&self, other: &Statement) -> bool {
        self.cells.len() < other.cells.len() && self.cells.is_subset(&other.cells)
    }

    /// Set-difference inference: if `subset` covers part of `self`, the rest of
    /// `self` holds exactly `self.count - subset.count` mines.
    pub fn subtract(&mut self, subset: &Statement) {
        debug_assert!(subset.is_strict_subset_of(self));
        debug_assert!(
            subset.count <= self.count,
            "subset {} holds more mines than {}",
            subset,
            self
        );
        self.cells.retain(|pos| !subset.cells.contains(pos));
        self.count = self.count.saturating_sub(subset.count);
    }

    /// Upholds `0 <= count <= |cells|`.
    pub fn is_consistent(&self) -> bool {
        self.count <= self.cells.len()
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}}} = {}",
            self.cells.iter().sorted().join(", "),
            self.count
        )
    }
}
