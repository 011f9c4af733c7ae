//! Connect4 bots built on the Quadrant search engines.
//!
//! Every strategy sits behind the [`Bot`] trait: given the current board,
//! return a column from `board.valid_columns()` for the bot's own piece.
//! Bots own their random number generator, so a bot built with a seed
//! plays the same game every time.
//!
//! | kind          | bot                     | engine                        |
//! |---------------|-------------------------|-------------------------------|
//! | `random`      | [`RandomBot`]           | uniform over valid columns    |
//! | `lookahead`   | [`OneStepLookAheadBot`] | best immediate heuristic      |
//! | `minimax`     | [`MinimaxBot`]          | `adversarial`, minimax        |
//! | `expectimax`  | [`ExpectimaxBot`]       | `adversarial`, expectimax     |
//! | `mcts`        | [`MonteCarloBot`]       | `mcts`, with tree reuse       |
//! | `annealing`   | [`AnnealingBot`]        | `optimizers::anneal`          |
//! | `genetic`     | [`GeneticBot`]          | `optimizers::evolve`          |
//!
//! Use [`build_bot`] to construct any of them from a [`CentralConfig`].
//!
//! ```
//! use bots::{build_bot, Bot, BotKind};
//! use engine_config::CentralConfig;
//! use games_connect4::{Board, Piece};
//!
//! let mut config = CentralConfig::default();
//! config.common.seed = Some(7);
//! config.minimax.depth = 2;
//!
//! let mut bot = build_bot(BotKind::Minimax, Piece::Red, &config).unwrap();
//! let board = Board::new();
//! let column = bot.decide_move(&board).unwrap();
//! assert!(board.is_valid_column(column));
//! ```
//!
//! [`CentralConfig`]: engine_config::CentralConfig

mod arena;
mod factory;
mod optimize;
mod search;
mod simple;

pub use arena::{play_game, GameRecord, Tally};
pub use factory::{build_bot, evaluator_from_config, BotKind};
pub use optimize::{AnnealingBot, GeneticBot};
pub use search::{ExpectimaxBot, MinimaxBot, MonteCarloBot};
pub use simple::{OneStepLookAheadBot, RandomBot};

use games_connect4::{Board, Piece};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;

/// Errors a bot can return instead of a move.
#[derive(Debug, Error)]
pub enum BotError {
    #[error("No legal moves available")]
    NoLegalMoves,

    #[error("Not {expected}'s turn ({found} to move)")]
    WrongTurn { expected: Piece, found: Piece },

    #[error("Unknown bot kind: {0}")]
    UnknownBot(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Adversarial search failed: {0}")]
    Adversarial(#[from] adversarial::SearchError),

    #[error("MCTS failed: {0}")]
    Mcts(#[from] mcts::SearchError),

    #[error("Optimizer failed: {0}")]
    Optimizer(#[from] optimizers::OptimizerError),

    #[error("Board error: {0}")]
    Board(#[from] games_connect4::BoardError),
}

/// A Connect4 player.
pub trait Bot: Send {
    /// Short name for logs and result tables.
    fn name(&self) -> &str;

    /// The piece this bot plays.
    fn piece(&self) -> Piece;

    /// Choose a column for [`Bot::piece`] on `board`.
    ///
    /// On success the column is one of `board.valid_columns()`.
    fn decide_move(&mut self, board: &Board) -> Result<u8, BotError>;
}

/// Seeded when a seed is given, from OS entropy otherwise.
pub(crate) fn make_rng(seed: Option<u64>) -> ChaCha20Rng {
    match seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_entropy(),
    }
}

#[cfg(test)]
mod tests;
