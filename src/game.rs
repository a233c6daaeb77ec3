use crate::config::{AgentConfig, GameConfig};
use crate::knowledge::{KnowledgeBase, Move};
use crate::{Board, Cell, GameError};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Won,
    Lost,
    /// The agent ran out of moves without flagging every mine.
    Stuck,
}

/// What happened during a single [`Game::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Revealed { mv: Move, count: u8 },
    Exploded(Move),
    NoMoves,
}

/// An AI-driven game: the agent picks cells, the board answers with counts.
pub struct Game {
    board: Board,
    agent: KnowledgeBase,
    state: GameState,
    turns: usize,
}

impl Game {
    pub fn new(config: &GameConfig) -> Result<Self, GameError> {
        let board = match config.seed {
            Some(seed) => Board::with_seed(config.height, config.width, config.mines, seed)?,
            None => Board::new(config.height, config.width, config.mines)?,
        };
        Ok(Self::from_board(board, config.agent))
    }

    pub fn from_board(board: Board, agent: AgentConfig) -> Self {
        let (height, width) = board.dimensions();
        Self {
            board,
            agent: KnowledgeBase::with_config(height, width, agent),
            state: GameState::Playing,
            turns: 0,
        }
    }

    pub fn step(&mut self) -> Result<Turn, GameError> {
        if self.state != GameState::Playing {
            return Err(GameError::InvalidGameState);
        }

        let Some(mv) = self.agent.next_move() else {
            self.flag_known_mines()?;
            self.state = if self.board.won() {
                GameState::Won
            } else {
                GameState::Stuck
            };
            info!(turns = self.turns, state = ?self.state, "no moves left");
            return Ok(Turn::NoMoves);
        };

        let pos = mv.position();
        self.turns += 1;
        match self.board.reveal(pos)? {
            None => {
                self.state = GameState::Lost;
                info!(%pos, turns = self.turns, "hit a mine");
                Ok(Turn::Exploded(mv))
            }
            Some(count) => {
                debug!(%pos, count, ?mv, "revealed");
                self.agent.add_knowledge(pos, count.into());
                self.agent.verify()?;
                self.flag_known_mines()?;

                if self.board.won() {
                    self.state = GameState::Won;
                    info!(turns = self.turns, "all mines flagged");
                }
                Ok(Turn::Revealed { mv, count })
            }
        }
    }

    /// Steps until the game is over.
    pub fn play(&mut self) -> Result<GameState, GameError> {
        while self.state == GameState::Playing {
            self.step()?;
        }
        Ok(self.state)
    }

    fn flag_known_mines(&mut self) -> Result<(), GameError> {
        for &pos in self.agent.mines() {
            if !matches!(self.board.get_cell(pos)?, Cell::Flagged(_)) {
                self.board.flag(pos)?;
            }
        }
        Ok(())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn agent(&self) -> &KnowledgeBase {
        &self.agent
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn turns(&self) -> usize {
        self.turns
    }
}
