pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod knowledge;
pub mod position;

pub use board::{Board, Cell};
pub use config::{AgentConfig, GameConfig, Saturation};
pub use error::GameError;
pub use game::{Game, GameState, Turn};
pub use knowledge::{KnowledgeBase, Move, Statement};
pub use position::Position;
