//! Bots backed by the tree searches: minimax, expectimax and MCTS.

use adversarial::{AdversarialSearch, ExpectationMode, SearchConfig, Variant};
use games_connect4::{Board, Piece};
use heuristic::Evaluator;
use mcts::{MctsConfig, MctsPlayer};
use rand_chacha::ChaCha20Rng;

use crate::{make_rng, Bot, BotError};

/// Depth-limited minimax with alpha-beta pruning.
#[derive(Debug)]
pub struct MinimaxBot {
    piece: Piece,
    search: AdversarialSearch,
    rng: ChaCha20Rng,
}

impl MinimaxBot {
    pub fn new(piece: Piece, evaluator: Evaluator, depth: u32, seed: Option<u64>) -> Self {
        let config = SearchConfig::minimax().with_depth(depth);
        Self {
            piece,
            search: AdversarialSearch::new(evaluator, config),
            rng: make_rng(seed),
        }
    }

    pub fn search(&self) -> &AdversarialSearch {
        &self.search
    }
}

impl Bot for MinimaxBot {
    fn name(&self) -> &str {
        "minimax"
    }

    fn piece(&self) -> Piece {
        self.piece
    }

    fn decide_move(&mut self, board: &Board) -> Result<u8, BotError> {
        let result = self.search.choose_move(board, self.piece, &mut self.rng)?;
        Ok(result.column)
    }
}

/// Expectimax: the opponent's plies are scored as chance nodes.
#[derive(Debug)]
pub struct ExpectimaxBot {
    piece: Piece,
    search: AdversarialSearch,
    rng: ChaCha20Rng,
}

impl ExpectimaxBot {
    pub fn new(
        piece: Piece,
        evaluator: Evaluator,
        depth: u32,
        mode: ExpectationMode,
        seed: Option<u64>,
    ) -> Self {
        let config = SearchConfig::default()
            .with_depth(depth)
            .with_variant(Variant::Expectimax(mode));
        Self {
            piece,
            search: AdversarialSearch::new(evaluator, config),
            rng: make_rng(seed),
        }
    }

    pub fn search(&self) -> &AdversarialSearch {
        &self.search
    }
}

impl Bot for ExpectimaxBot {
    fn name(&self) -> &str {
        "expectimax"
    }

    fn piece(&self) -> Piece {
        self.piece
    }

    fn decide_move(&mut self, board: &Board) -> Result<u8, BotError> {
        let result = self.search.choose_move(board, self.piece, &mut self.rng)?;
        Ok(result.column)
    }
}

/// Monte Carlo tree search that keeps its tree between moves.
///
/// MCTS searches for the side to move, so the bot must only be asked for a
/// move on its own turn.
#[derive(Debug)]
pub struct MonteCarloBot {
    piece: Piece,
    player: MctsPlayer,
    rng: ChaCha20Rng,
}

impl MonteCarloBot {
    pub fn new(piece: Piece, config: MctsConfig, seed: Option<u64>) -> Self {
        Self {
            piece,
            player: MctsPlayer::new(config),
            rng: make_rng(seed),
        }
    }

    pub fn player(&self) -> &MctsPlayer {
        &self.player
    }

    /// Forget the retained tree, e.g. between games.
    pub fn reset(&mut self) {
        self.player.reset();
    }
}

impl Bot for MonteCarloBot {
    fn name(&self) -> &str {
        "mcts"
    }

    fn piece(&self) -> Piece {
        self.piece
    }

    fn decide_move(&mut self, board: &Board) -> Result<u8, BotError> {
        let to_move = board.current_player();
        if to_move != self.piece {
            return Err(BotError::WrongTurn {
                expected: self.piece,
                found: to_move,
            });
        }
        if board.valid_columns().is_empty() {
            return Err(BotError::NoLegalMoves);
        }

        let result = self.player.choose_move(board, &mut self.rng)?;
        Ok(result.column)
    }
}
