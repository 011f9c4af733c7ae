//! Stateful MCTS player that carries its tree from turn to turn.
//!
//! Before searching, the retained tree is advanced by the opponent's last
//! move; after searching, it is advanced by the chosen move. Statistics
//! gathered under the surviving subtree are reused by the next search.

use games_connect4::Board;
use rand_chacha::ChaCha20Rng;
use tracing::{debug, warn};

use crate::config::MctsConfig;
use crate::search::{MctsSearch, SearchError, SearchResult};
use crate::tree::MctsTree;

/// MCTS player with tree reuse across turns.
#[derive(Debug, Clone)]
pub struct MctsPlayer {
    config: MctsConfig,
    tree: Option<MctsTree>,
}

impl MctsPlayer {
    pub fn new(config: MctsConfig) -> Self {
        Self { config, tree: None }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// The retained tree, if any.
    pub fn tree(&self) -> Option<&MctsTree> {
        self.tree.as_ref()
    }

    /// Drop the retained tree; the next search starts fresh.
    pub fn reset(&mut self) {
        self.tree = None;
    }

    /// Advance the retained tree by a move that was played.
    ///
    /// If the move was never expanded, the tree is dropped and the next
    /// search starts from a single fresh node.
    pub fn advance(&mut self, column: u8) {
        if let Some(tree) = self.tree.as_mut() {
            if !tree.reroot(column) {
                debug!(column, "Played move not in tree, starting fresh");
                self.tree = None;
            }
        }
    }

    /// Search `board` and return the chosen column, keeping the tree for
    /// the next call.
    pub fn choose_move(
        &mut self,
        board: &Board,
        rng: &mut ChaCha20Rng,
    ) -> Result<SearchResult, SearchError> {
        if let Some(last) = board.last_move() {
            self.advance(last);
        }

        let tree = match self.tree.take() {
            Some(tree) if tree.root_board() == board => tree,
            Some(tree) => {
                warn!(
                    retained_moves = tree.root_board().moves_played(),
                    board_moves = board.moves_played(),
                    "Retained tree does not match the board, resetting"
                );
                MctsTree::new(board.clone())
            }
            None => MctsTree::new(board.clone()),
        };

        let mut search = MctsSearch::from_tree(self.config.clone(), tree);
        let result = search.run(rng)?;

        let mut tree = search.into_tree();
        if !tree.reroot(result.column) {
            tree = MctsTree::new(board.with_move(result.column, board.current_player())?);
        }
        self.tree = Some(tree);

        Ok(result)
    }
}
