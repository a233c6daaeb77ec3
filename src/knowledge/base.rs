use super::statement::Statement;
use crate::config::{AgentConfig, Saturation};
use crate::{GameError, Position};
use itertools::Itertools;
use std::collections::HashSet;
use tracing::{debug, trace};

/// The AI player's view of the board: confirmed facts plus the statements
/// that have not been fully resolved yet.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    pub(super) height: usize,
    pub(super) width: usize,
    config: AgentConfig,
    pub(super) moves_made: HashSet<Position>,
    pub(super) mines: HashSet<Position>,
    pub(super) safes: HashSet<Position>,
    pub(super) statements: Vec<Statement>,
}

impl KnowledgeBase {
    pub fn new(height: usize, width: usize) -> Self {
        Self::with_config(height, width, AgentConfig::default())
    }

    pub fn with_config(height: usize, width: usize, config: AgentConfig) -> Self {
        Self {
            height,
            width,
            config,
            moves_made: HashSet::new(),
            mines: HashSet::new(),
            safes: HashSet::new(),
            statements: Vec::new(),
        }
    }

    pub fn moves_made(&self) -> &HashSet<Position> {
        &self.moves_made
    }

    pub fn mines(&self) -> &HashSet<Position> {
        &self.mines
    }

    pub fn safes(&self) -> &HashSet<Position> {
        &self.safes
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Records `pos` as a mine and removes it from every active statement.
    pub fn mark_mine(&mut self, pos: Position) {
        debug_assert!(!self.safes.contains(&pos), "{pos} is already known safe");
        if self.mines.insert(pos) {
            debug!(%pos, "learned mine");
        }
        for statement in &mut self.statements {
            statement.mark_mine(pos);
        }
    }

    /// Records `pos` as safe and removes it from every active statement.
    pub fn mark_safe(&mut self, pos: Position) {
        debug_assert!(!self.mines.contains(&pos), "{pos} is already known to be a mine");
        if self.safes.insert(pos) {
            debug!(%pos, "learned safe cell");
        }
        for statement in &mut self.statements {
            statement.mark_safe(pos);
        }
    }

    /// Ingests a revealed cell and the number of mines around it, then runs
    /// inference according to the configured [`Saturation`].
    ///
    /// Revealing the same cell twice is ignored.
    pub fn add_knowledge(&mut self, pos: Position, count: usize) {
        if !self.moves_made.insert(pos) {
            trace!(%pos, "cell already played, skipping");
            return;
        }
        self.mark_safe(pos);

        let mut statement = Statement::new(
            pos.neighbors(self.height, self.width)
                .filter(|cell| !self.safes.contains(cell)),
            count,
        );
        let known_mines: Vec<Position> = statement
            .cells()
            .intersection(&self.mines)
            .copied()
            .collect();
        for mine in known_mines {
            statement.mark_mine(mine);
        }

        if self.statements.contains(&statement) {
            trace!(%statement, "duplicate statement");
        } else {
            debug!(%pos, %statement, "new statement");
            self.statements.push(statement);
        }

        self.saturate();
    }

    fn saturate(&mut self) {
        match self.config.saturation {
            Saturation::FixedPoint => {
                let mut passes = 1;
                while self.resolve_pass() {
                    passes += 1;
                }
                trace!(passes, statements = self.statements.len(), "saturated");
            }
            Saturation::Passes(passes) => {
                for _ in 0..passes {
                    self.resolve_pass();
                }
            }
        }
    }

    /// One sweep over the active statements. Returns whether anything changed.
    ///
    /// Statements are visited by index; a resolved statement is removed at its
    /// own index before the sweep moves on, so nothing is skipped or visited
    /// twice.
    fn resolve_pass(&mut self) -> bool {
        let mut changed = false;
        let mut idx = 0;
        while idx < self.statements.len() {
            if self.resolve_at(idx) {
                self.statements.remove(idx);
                changed = true;
                continue;
            }
            changed |= self.derive_from(idx);
            idx += 1;
        }
        changed
    }

    /// Applies the statement at `idx` if its truth is fully determined.
    /// Returns true when the statement is spent and should be dropped.
    fn resolve_at(&mut self, idx: usize) -> bool {
        let statement = &self.statements[idx];
        if !statement.is_terminal() {
            return false;
        }
        let all_mines = statement.known_mines().is_some();

        trace!(%statement, "resolving");
        let cells: Vec<Position> = statement.cells().iter().copied().sorted().collect();
        for pos in cells {
            if all_mines {
                self.mark_mine(pos);
            } else {
                self.mark_safe(pos);
            }
        }
        true
    }

    /// Subset derivation between the statement at `idx` and every other one.
    /// Whichever side is the strict superset is weakened; the subset is kept.
    fn derive_from(&mut self, idx: usize) -> bool {
        let mut changed = false;
        for other in 0..self.statements.len() {
            if other == idx {
                continue;
            }
            let (this, that) = pair_mut(&mut self.statements, idx, other);
            if this.is_empty() || that.is_empty() {
                continue;
            }
            if that.is_strict_subset_of(this) {
                trace!(superset = %this, subset = %that, "deriving");
                this.subtract(that);
                changed = true;
            } else if this.is_strict_subset_of(that) {
                trace!(superset = %that, subset = %this, "deriving");
                that.subtract(this);
                changed = true;
            }
        }
        changed
    }

    /// Checks that no cell is both safe and a mine and that every statement
    /// keeps `count <= |cells|`.
    pub fn verify(&self) -> Result<(), GameError> {
        if let Some(pos) = self.safes.intersection(&self.mines).next() {
            return Err(GameError::Inconsistent(format!(
                "{pos} is marked both safe and mine"
            )));
        }
        if let Some(statement) = self.statements.iter().find(|s| !s.is_consistent()) {
            return Err(GameError::Inconsistent(format!(
                "statement {statement} claims more mines than cells"
            )));
        }
        Ok(())
    }
}

fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(a, b);
    if a < b {
        let (left, right) = items.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = items.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}
