//! Bots backed by the single-ply optimizers.

use games_connect4::{Board, Piece};
use heuristic::Evaluator;
use optimizers::{anneal, evolve, AnnealingConfig, GeneticConfig};
use rand_chacha::ChaCha20Rng;

use crate::{make_rng, Bot, BotError};

/// Simulated annealing over the next column.
#[derive(Debug)]
pub struct AnnealingBot {
    piece: Piece,
    evaluator: Evaluator,
    config: AnnealingConfig,
    rng: ChaCha20Rng,
}

impl AnnealingBot {
    pub fn new(
        piece: Piece,
        evaluator: Evaluator,
        config: AnnealingConfig,
        seed: Option<u64>,
    ) -> Self {
        Self {
            piece,
            evaluator,
            config,
            rng: make_rng(seed),
        }
    }
}

impl Bot for AnnealingBot {
    fn name(&self) -> &str {
        "annealing"
    }

    fn piece(&self) -> Piece {
        self.piece
    }

    fn decide_move(&mut self, board: &Board) -> Result<u8, BotError> {
        Ok(anneal(
            board,
            self.piece,
            &self.evaluator,
            &self.config,
            &mut self.rng,
        )?)
    }
}

/// Genetic search over the next column.
#[derive(Debug)]
pub struct GeneticBot {
    piece: Piece,
    evaluator: Evaluator,
    config: GeneticConfig,
    rng: ChaCha20Rng,
}

impl GeneticBot {
    pub fn new(
        piece: Piece,
        evaluator: Evaluator,
        config: GeneticConfig,
        seed: Option<u64>,
    ) -> Self {
        Self {
            piece,
            evaluator,
            config,
            rng: make_rng(seed),
        }
    }
}

impl Bot for GeneticBot {
    fn name(&self) -> &str {
        "genetic"
    }

    fn piece(&self) -> Piece {
        self.piece
    }

    fn decide_move(&mut self, board: &Board) -> Result<u8, BotError> {
        Ok(evolve(
            board,
            self.piece,
            &self.evaluator,
            &self.config,
            &mut self.rng,
        )?)
    }
}
