use super::base::KnowledgeBase;
use crate::Position;
use itertools::iproduct;
use std::collections::HashMap;

/// A move proposed by the knowledge base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// The cell is known to be safe.
    Safe(Position),
    /// No safe cell is known; this is the least suspicious candidate.
    Guess(Position),
}

impl Move {
    pub fn position(&self) -> Position {
        match *self {
            Move::Safe(pos) | Move::Guess(pos) => pos,
        }
    }
}

impl KnowledgeBase {
    /// A known-safe cell that has not been played yet, lowest row-major first.
    pub fn make_safe_move(&self) -> Option<Position> {
        self.safes.difference(&self.moves_made).min().copied()
    }

    /// Additive mine-likelihood proxy: each active statement contributes
    /// `count / |cells|` to every cell it mentions. Recomputed on every call.
    pub fn mine_scores(&self) -> HashMap<Position, f64> {
        let mut scores = HashMap::new();
        for statement in self.statements.iter().filter(|s| !s.is_empty()) {
            let weight = statement.count() as f64 / statement.cells().len() as f64;
            for &pos in statement.cells() {
                *scores.entry(pos).or_insert(0.0) += weight;
            }
        }
        scores
    }

    /// The lowest-scoring cell mentioned by any statement. Without any
    /// statements, the first cell in row-major order that is neither played
    /// nor a known mine. `None` when no such cell exists.
    pub fn make_random_move(&self) -> Option<Position> {
        self.mine_scores()
            .into_iter()
            .filter(|(pos, _)| !self.mines.contains(pos) && !self.moves_made.contains(pos))
            .min_by(|(a, score_a), (b, score_b)| {
                score_a.total_cmp(score_b).then_with(|| a.cmp(b))
            })
            .map(|(pos, _)| pos)
            .or_else(|| self.first_unplayed())
    }

    fn first_unplayed(&self) -> Option<Position> {
        iproduct!(0..self.height, 0..self.width)
            .map(Position::from)
            .find(|pos| !self.mines.contains(pos) && !self.moves_made.contains(pos))
    }

    /// A safe move if one is known, otherwise the heuristic pick.
    pub fn next_move(&self) -> Option<Move> {
        self.make_safe_move()
            .map(Move::Safe)
            .or_else(|| self.make_random_move().map(Move::Guess))
    }
}

#[cfg(test)]
mod tests {
    use crate::knowledge::{KnowledgeBase, Move, Statement};
    use crate::Position;

    fn p(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn test_safe_move_skips_played_cells() {
        let mut kb = KnowledgeBase::new(1, 3);
        assert_eq!(kb.make_safe_move(), None);

        kb.add_knowledge(p(0, 0), 0);
        assert_eq!(kb.make_safe_move(), Some(p(0, 1)));

        kb.add_knowledge(p(0, 1), 0);
        assert_eq!(kb.make_safe_move(), Some(p(0, 2)));

        kb.add_knowledge(p(0, 2), 0);
        assert_eq!(kb.make_safe_move(), None);
    }

    #[test]
    fn test_safe_move_does_not_mutate() {
        let mut kb = KnowledgeBase::new(1, 3);
        kb.add_knowledge(p(0, 0), 0);
        let moves = kb.moves_made().clone();
        kb.make_safe_move();
        kb.make_random_move();
        assert_eq!(kb.moves_made(), &moves);
    }

    #[test]
    fn test_empty_knowledge_falls_back_row_major() {
        let mut kb = KnowledgeBase::new(2, 2);
        assert_eq!(kb.make_random_move(), Some(p(0, 0)));

        kb.moves_made.insert(p(0, 0));
        kb.mines.insert(p(0, 1));
        assert_eq!(kb.make_random_move(), Some(p(1, 0)));
    }

    #[test]
    fn test_no_move_when_board_exhausted() {
        let mut kb = KnowledgeBase::new(1, 2);
        kb.moves_made.insert(p(0, 0));
        kb.mines.insert(p(0, 1));
        assert_eq!(kb.make_random_move(), None);
        assert_eq!(kb.next_move(), None);
    }

    #[test]
    fn test_random_move_prefers_lowest_score() {
        let mut kb = KnowledgeBase::new(3, 3);
        kb.statements.push(Statement::new([p(0, 0), p(0, 1)], 1));
        kb.statements
            .push(Statement::new([p(0, 1), p(1, 0), p(1, 1), p(2, 2)], 1));

        let scores = kb.mine_scores();
        assert_eq!(scores[&p(0, 0)], 0.5);
        assert_eq!(scores[&p(0, 1)], 0.75);
        assert_eq!(scores[&p(1, 0)], 0.25);

        // (1, 0), (1, 1) and (2, 2) tie at 0.25; row-major order breaks it.
        assert_eq!(kb.make_random_move(), Some(p(1, 0)));
        assert_eq!(kb.next_move(), Some(Move::Guess(p(1, 0))));
    }

    #[test]
    fn test_scores_do_not_carry_over() {
        let mut kb = KnowledgeBase::new(3, 3);
        kb.statements.push(Statement::new([p(0, 0), p(0, 1)], 1));
        let first = kb.mine_scores();
        let second = kb.mine_scores();
        assert_eq!(first, second);

        kb.statements.clear();
        assert!(kb.mine_scores().is_empty());
    }

    #[test]
    fn test_next_move_prefers_safe() {
        let mut kb = KnowledgeBase::new(1, 3);
        kb.add_knowledge(p(0, 0), 0);
        let next = kb.next_move().unwrap();
        assert_eq!(next, Move::Safe(p(0, 1)));
        assert!(kb.safes().contains(&next.position()));
        assert!(!kb.moves_made().contains(&next.position()));
    }
}
