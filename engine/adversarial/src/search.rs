//! Recursive minimax / expectimax walk with alpha-beta bounds.
//!
//! The walk is stateless across calls: every invocation re-derives the tree
//! from the board it is given and only ever mutates clones of it.

use games_connect4::{Board, BoardError, Piece};
use heuristic::Evaluator;
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::debug;

use crate::config::{ExpectationMode, SearchConfig, Variant};
use crate::{LOSS_SCORE, WIN_SCORE};

/// Unbounded alpha / beta.
pub(crate) const NEG_INF: i64 = i64::MIN;
pub(crate) const POS_INF: i64 = i64::MAX;

/// Errors that can occur during adversarial search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("No legal moves available")]
    NoLegalMoves,

    #[error("Game is already over ({0} has four in a row)")]
    GameOver(Piece),

    #[error("Board error: {0}")]
    Board(#[from] BoardError),
}

/// Result of an adversarial search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// Column to play
    pub column: u8,

    /// Backed-up value of the root from the searching piece's perspective
    pub value: i64,

    /// Number of positions visited
    pub nodes: u64,
}

/// Minimax / expectimax strategy object.
#[derive(Debug, Clone)]
pub struct AdversarialSearch {
    evaluator: Evaluator,
    config: SearchConfig,
}

impl AdversarialSearch {
    pub fn new(evaluator: Evaluator, config: SearchConfig) -> Self {
        Self { evaluator, config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Pick a column for `piece` on `board`.
    ///
    /// The board must have at least one valid column and no completed line.
    /// The returned column is always one of `board.valid_columns()`.
    pub fn choose_move(
        &self,
        board: &Board,
        piece: Piece,
        rng: &mut ChaCha20Rng,
    ) -> Result<SearchResult, SearchError> {
        if let Some(winner) = board.winner() {
            return Err(SearchError::GameOver(winner));
        }
        if board.valid_columns().is_empty() {
            return Err(SearchError::NoLegalMoves);
        }

        let depth = self.config.depth.max(1);
        let mut walk = Walk::new(&self.evaluator, self.config.variant, piece, rng);
        let (column, value) = walk.search(board, depth, NEG_INF, POS_INF, true)?;
        let column = column.ok_or(SearchError::NoLegalMoves)?;

        debug!(
            column,
            value,
            depth,
            nodes = walk.nodes,
            variant = ?self.config.variant,
            "Adversarial search complete"
        );

        Ok(SearchResult {
            column,
            value,
            nodes: walk.nodes,
        })
    }
}

/// State threaded through one recursive search.
pub(crate) struct Walk<'a> {
    evaluator: &'a Evaluator,
    variant: Variant,
    piece: Piece,
    rng: &'a mut ChaCha20Rng,
    pub(crate) nodes: u64,
}

impl<'a> Walk<'a> {
    pub(crate) fn new(
        evaluator: &'a Evaluator,
        variant: Variant,
        piece: Piece,
        rng: &'a mut ChaCha20Rng,
    ) -> Self {
        Self {
            evaluator,
            variant,
            piece,
            rng,
            nodes: 0,
        }
    }

    /// Returns the chosen column (None at leaves) and the backed-up value.
    pub(crate) fn search(
        &mut self,
        board: &Board,
        depth: u32,
        mut alpha: i64,
        mut beta: i64,
        maximizing: bool,
    ) -> Result<(Option<u8>, i64), SearchError> {
        self.nodes += 1;

        // Terminal checks come before the depth cutoff. Remaining depth is
        // folded in so a quicker win (or a later loss) scores higher.
        if board.winning_move(self.piece) {
            return Ok((None, WIN_SCORE + depth as i64));
        }
        if board.winning_move(self.piece.opponent()) {
            return Ok((None, LOSS_SCORE - depth as i64));
        }
        let valid = board.valid_columns();
        if valid.is_empty() {
            return Ok((None, 0));
        }
        if depth == 0 {
            return Ok((None, self.evaluator.score(board, self.piece)));
        }

        // Random fallback so a cutoff on the first branch still yields a legal column
        let mut column = valid[self.rng.gen_range(0..valid.len())];

        if maximizing {
            let mut value = NEG_INF;
            for &col in &valid {
                let child = board.with_move(col, self.piece)?;
                let (_, score) = self.search(&child, depth - 1, alpha, beta, false)?;
                if score > value {
                    value = score;
                    column = col;
                }
                alpha = alpha.max(value);
                if alpha >= beta {
                    break;
                }
            }
            return Ok((Some(column), value));
        }

        let opponent = self.piece.opponent();
        match self.variant {
            Variant::Minimax => {
                let mut value = POS_INF;
                for &col in &valid {
                    let child = board.with_move(col, opponent)?;
                    let (_, score) = self.search(&child, depth - 1, alpha, beta, true)?;
                    if score < value {
                        value = score;
                        column = col;
                    }
                    beta = beta.min(value);
                    if alpha >= beta {
                        break;
                    }
                }
                Ok((Some(column), value))
            }
            Variant::Expectimax(ExpectationMode::Faithful) => {
                let branching = valid.len() as i64;
                let mut value = 0;
                for &col in &valid {
                    let child = board.with_move(col, opponent)?;
                    let (_, score) = self.search(&child, depth - 1, alpha, beta, true)?;
                    if score <= value {
                        value = score;
                        column = col;
                    }
                    beta = value.div_euclid(branching);
                    if alpha >= beta {
                        break;
                    }
                }
                Ok((Some(column), value))
            }
            Variant::Expectimax(ExpectationMode::Average) => {
                let branching = valid.len() as i64;
                let mut total = 0i64;
                let mut lowest = POS_INF;
                for &col in &valid {
                    let child = board.with_move(col, opponent)?;
                    // Bounds from above do not apply under an average
                    let (_, score) = self.search(&child, depth - 1, NEG_INF, POS_INF, true)?;
                    total += score;
                    if score < lowest {
                        lowest = score;
                        column = col;
                    }
                }
                Ok((Some(column), total.div_euclid(branching)))
            }
        }
    }
}
