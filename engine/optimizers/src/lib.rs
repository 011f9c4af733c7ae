//! Stateless single-ply move optimizers.
//!
//! Both optimizers treat the choice of column as a tiny search space and
//! score a candidate by dropping the piece and evaluating the result with a
//! [`heuristic::Evaluator`]. Neither looks past the next move.
//!
//! - [`anneal`]: simulated annealing over columns with a geometric cooling
//!   schedule and a bias toward adjacent columns.
//! - [`evolve`]: a generational genetic search where a genome is a column.

pub mod annealing;
pub mod genetic;

pub use annealing::{anneal, AnnealingConfig};
pub use genetic::{evolve, GeneticConfig};

use games_connect4::BoardError;
use thiserror::Error;

/// Errors that can occur in the optimizers.
#[derive(Debug, Error)]
pub enum OptimizerError {
    #[error("No legal moves available")]
    NoLegalMoves,

    #[error("Board error: {0}")]
    Board(#[from] BoardError),
}
