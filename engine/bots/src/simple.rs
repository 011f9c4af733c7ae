//! Bots that look no further than the next ply.

use games_connect4::{Board, Piece};
use heuristic::Evaluator;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;
use tracing::debug;

use crate::{make_rng, Bot, BotError};

/// Plays a uniformly random valid column.
#[derive(Debug)]
pub struct RandomBot {
    piece: Piece,
    rng: ChaCha20Rng,
}

impl RandomBot {
    pub fn new(piece: Piece, seed: Option<u64>) -> Self {
        Self {
            piece,
            rng: make_rng(seed),
        }
    }
}

impl Bot for RandomBot {
    fn name(&self) -> &str {
        "random"
    }

    fn piece(&self) -> Piece {
        self.piece
    }

    fn decide_move(&mut self, board: &Board) -> Result<u8, BotError> {
        board
            .valid_columns()
            .choose(&mut self.rng)
            .copied()
            .ok_or(BotError::NoLegalMoves)
    }
}

/// Plays the column whose resulting position scores best for its piece.
/// Equal scores are broken at random.
#[derive(Debug)]
pub struct OneStepLookAheadBot {
    piece: Piece,
    evaluator: Evaluator,
    rng: ChaCha20Rng,
}

impl OneStepLookAheadBot {
    pub fn new(piece: Piece, evaluator: Evaluator, seed: Option<u64>) -> Self {
        Self {
            piece,
            evaluator,
            rng: make_rng(seed),
        }
    }

    /// Score after dropping into each valid column, in column order.
    pub fn column_scores(&self, board: &Board) -> Result<Vec<(u8, i64)>, BotError> {
        board
            .valid_columns()
            .into_iter()
            .map(|column| {
                let child = board.with_move(column, self.piece)?;
                Ok((column, self.evaluator.score(&child, self.piece)))
            })
            .collect()
    }
}

impl Bot for OneStepLookAheadBot {
    fn name(&self) -> &str {
        "lookahead"
    }

    fn piece(&self) -> Piece {
        self.piece
    }

    fn decide_move(&mut self, board: &Board) -> Result<u8, BotError> {
        let scores = self.column_scores(board)?;
        let best = scores
            .iter()
            .map(|&(_, score)| score)
            .max()
            .ok_or(BotError::NoLegalMoves)?;
        let tied: Vec<u8> = scores
            .iter()
            .filter(|&&(_, score)| score == best)
            .map(|&(column, _)| column)
            .collect();

        let column = *tied.choose(&mut self.rng).ok_or(BotError::NoLegalMoves)?;
        debug!(column, score = best, ties = tied.len(), "Lookahead move");
        Ok(column)
    }
}
