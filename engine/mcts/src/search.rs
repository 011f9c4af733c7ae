//! MCTS search implementation.
//!
//! Implements the core MCTS algorithm:
//! 1. Selection: Traverse tree using UCT to find a node with untried columns
//! 2. Expansion: Add one child for a random untried column
//! 3. Simulation: Play uniformly random moves until the game ends
//! 4. Backpropagation: Credit the result to every node on the path

use std::time::Instant;

use games_connect4::{Board, BoardError};
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::MctsConfig;
use crate::node::NodeId;
use crate::tree::MctsTree;

/// Errors that can occur during MCTS search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("No legal moves available")]
    NoLegalMoves,

    #[error("Root has no children after search (zero budget or finished game)")]
    DegenerateTree,

    #[error("Board error: {0}")]
    Board(#[from] BoardError),
}

/// Result of an MCTS search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    /// Column to play
    pub column: u8,

    /// Win rate of the chosen child
    pub win_rate: f64,

    /// Iterations performed by this call
    pub iterations: u32,

    /// Root visits, including any inherited from earlier searches
    pub root_visits: u32,
}

/// MCTS search state.
pub struct MctsSearch {
    tree: MctsTree,
    config: MctsConfig,
}

impl MctsSearch {
    /// Create a new MCTS search with a fresh tree rooted at `board`.
    pub fn new(config: MctsConfig, board: &Board) -> Self {
        Self::from_tree(config, MctsTree::new(board.clone()))
    }

    /// Continue searching an existing tree.
    pub fn from_tree(config: MctsConfig, tree: MctsTree) -> Self {
        Self { tree, config }
    }

    /// Run the search until the iteration or time budget is exhausted.
    pub fn run(&mut self, rng: &mut ChaCha20Rng) -> Result<SearchResult, SearchError> {
        if self.tree.root_board().valid_columns().is_empty() {
            return Err(SearchError::NoLegalMoves);
        }

        let start = Instant::now();
        let mut iterations = 0;

        for _ in 0..self.config.max_iterations {
            self.simulate(rng)?;
            iterations += 1;

            if let Some(budget) = self.config.time_budget {
                if start.elapsed() > budget {
                    break;
                }
            }
        }

        let (column, win_rate) = self.tree.best_action().ok_or(SearchError::DegenerateTree)?;
        let root_visits = self.tree.get(self.tree.root()).visit_count;

        debug!(
            column,
            win_rate,
            iterations,
            root_visits,
            nodes = self.tree.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "MCTS search complete"
        );

        Ok(SearchResult {
            column,
            win_rate,
            iterations,
            root_visits,
        })
    }

    /// Run a single iteration (select -> expand -> rollout -> backpropagate).
    fn simulate(&mut self, rng: &mut ChaCha20Rng) -> Result<(), SearchError> {
        // Selection: traverse to a leaf
        let (mut leaf_id, depth) = self.select();

        // Expansion: one random untried column
        let leaf = self.tree.get(leaf_id);
        if !leaf.untried.is_empty() {
            let column = leaf.untried[rng.gen_range(0..leaf.untried.len())];
            let board = leaf.board.with_move(column, leaf.board.current_player())?;
            leaf_id = self.tree.add_child(leaf_id, column, board);
        }

        // Simulation: random playout on a copy of the focal position
        let mut state = self.tree.get(leaf_id).board.clone();
        let mut rollout_len = 0u32;
        while !state.is_terminal() {
            let valid = state.valid_columns();
            let column = valid[rng.gen_range(0..valid.len())];
            state.play(column)?;
            rollout_len += 1;
        }

        // Backpropagation
        self.tree.backpropagate(leaf_id, &state);

        trace!(
            leaf = leaf_id.0,
            depth,
            rollout_len,
            winner = ?state.winner(),
            "MCTS simulation complete"
        );

        Ok(())
    }

    /// Descend by UCT while the node is fully expanded and has children.
    fn select(&self) -> (NodeId, u32) {
        let mut current = self.tree.root();
        let mut depth = 0;

        while !self.tree.get(current).is_leaf() {
            match self.tree.select_child(current, self.config.exploration) {
                Some(child_id) => {
                    current = child_id;
                    depth += 1;
                }
                None => break,
            }
        }

        (current, depth)
    }

    /// Get the search tree (for inspection/debugging).
    pub fn tree(&self) -> &MctsTree {
        &self.tree
    }

    /// Hand the tree back for reuse on the next turn.
    pub fn into_tree(self) -> MctsTree {
        self.tree
    }
}

/// Convenience function to run a single search from a fresh tree.
pub fn run_mcts(
    board: &Board,
    config: MctsConfig,
    rng: &mut ChaCha20Rng,
) -> Result<SearchResult, SearchError> {
    let mut search = MctsSearch::new(config, board);
    search.run(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use games_connect4::Piece;
    use rand::SeedableRng;

    fn board(rows: &[&str]) -> Board {
        Board::from_rows(rows).unwrap()
    }

    fn winning_position() -> Board {
        // Red to move; column 3 completes the bottom row
        board(&[
            ".......", //
            ".......", //
            ".......", //
            ".......", //
            "YYY....", //
            "RRR....", //
        ])
    }

    #[test]
    fn test_mcts_basic_search() {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let result = run_mcts(&Board::new(), MctsConfig::for_testing(), &mut rng).unwrap();

        assert!(result.column < 7);
        assert_eq!(result.iterations, 500);
        assert_eq!(result.root_visits, 500);
        assert!((0.0..=1.0).contains(&result.win_rate));
    }

    #[test]
    fn test_root_visits_match_iterations() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let mut search = MctsSearch::new(
            MctsConfig::for_testing().with_iterations(300),
            &Board::new(),
        );
        search.run(&mut rng).unwrap();

        let tree = search.tree();
        let root = tree.get(tree.root());
        assert_eq!(root.visit_count, 300);

        // Each child is credited only by iterations that passed through the root
        let child_visits: u32 = root
            .children
            .iter()
            .map(|(_, id)| tree.get(*id).visit_count)
            .sum();
        assert!(child_visits <= root.visit_count);

        // Below the root a node's first visit is the one that created it
        for (index, node) in tree.arena().iter().enumerate() {
            let sum: u32 = node
                .children
                .iter()
                .map(|(_, id)| tree.get(*id).visit_count)
                .sum();
            if NodeId(index as u32) == tree.root() {
                assert!(sum <= node.visit_count);
            } else {
                assert!(node.visit_count >= 1, "node={}", index);
                assert!(sum < node.visit_count, "node={}", index);
            }
        }
    }

    #[test]
    fn test_search_continues_from_existing_tree() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let config = MctsConfig::for_testing().with_iterations(200);

        let mut search = MctsSearch::new(config.clone(), &Board::new());
        search.run(&mut rng).unwrap();

        let mut search = MctsSearch::from_tree(config, search.into_tree());
        let result = search.run(&mut rng).unwrap();

        assert_eq!(result.iterations, 200);
        assert_eq!(result.root_visits, 400);
    }

    #[test]
    fn test_mcts_finds_winning_move() {
        for seed in 0..5 {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            let config = MctsConfig::for_testing().with_iterations(1000);
            let result = run_mcts(&winning_position(), config, &mut rng).unwrap();

            assert_eq!(result.column, 3, "seed={}", seed);
            // Every rollout through the winning child ends immediately in a win
            assert!((result.win_rate - 1.0).abs() < 1e-12, "seed={}", seed);
        }
    }

    #[test]
    fn test_winning_child_is_terminal_leaf() {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let mut search = MctsSearch::new(
            MctsConfig::for_testing().with_iterations(300),
            &winning_position(),
        );
        search.run(&mut rng).unwrap();

        let tree = search.tree();
        let winning = tree
            .child(tree.root(), 3)
            .expect("Child for column 3 should exist");
        let node = tree.get(winning);

        assert_eq!(node.piece, Piece::Red);
        assert!(node.board.winning_move(Piece::Red));
        assert!(node.untried.is_empty());
        assert!(node.children.is_empty());
        assert!((node.wins - node.visit_count as f64).abs() < 1e-12);
    }

    #[test]
    fn test_single_valid_column() {
        let b = board(&[
            "RYRYRY.", //
            "RYRYRYR", //
            "YRYRYRY", //
            "YRYRYRY", //
            "RYRYRYR", //
            "RYRYRYR", //
        ]);
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let result = run_mcts(&b, MctsConfig::for_testing().with_iterations(20), &mut rng).unwrap();

        assert_eq!(result.column, 6);
        // The only reply fills the board without a line
        assert!((result.win_rate - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_same_seed_same_move() {
        let b = board(&[
            ".......", //
            ".......", //
            ".......", //
            "...Y...", //
            "..RR...", //
            "..YRY..", //
        ]);
        let config = MctsConfig::for_testing();

        let a = run_mcts(&b, config.clone(), &mut ChaCha20Rng::seed_from_u64(9)).unwrap();
        let c = run_mcts(&b, config, &mut ChaCha20Rng::seed_from_u64(9)).unwrap();
        assert_eq!(a, c);
    }

    #[test]
    fn test_zero_budget_is_degenerate() {
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let config = MctsConfig::for_testing().with_iterations(0);
        let err = run_mcts(&Board::new(), config, &mut rng).unwrap_err();
        assert!(matches!(err, SearchError::DegenerateTree));
    }

    #[test]
    fn test_finished_game_is_degenerate() {
        let b = board(&[
            ".......", //
            ".......", //
            ".......", //
            ".......", //
            "YYY....", //
            "RRRR...", //
        ]);
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let err = run_mcts(&b, MctsConfig::for_testing(), &mut rng).unwrap_err();
        assert!(matches!(err, SearchError::DegenerateTree));
    }

    #[test]
    fn test_full_board_has_no_moves() {
        let b = board(&[
            "RYRYRYR", //
            "RYRYRYR", //
            "YRYRYRY", //
            "YRYRYRY", //
            "RYRYRYR", //
            "RYRYRYR", //
        ]);
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let err = run_mcts(&b, MctsConfig::for_testing(), &mut rng).unwrap_err();
        assert!(matches!(err, SearchError::NoLegalMoves));
    }

    #[test]
    fn test_time_budget_stops_early() {
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let config = MctsConfig::for_testing()
            .with_iterations(u32::MAX)
            .with_time_budget(Some(std::time::Duration::from_millis(20)));
        let result = run_mcts(&Board::new(), config, &mut rng).unwrap();

        assert!(result.iterations >= 1);
        assert!(result.iterations < u32::MAX);
        assert_eq!(result.root_visits, result.iterations);
    }
}
