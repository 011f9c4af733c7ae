//! Monte Carlo Tree Search (MCTS) for Connect 4.
//!
//! The search builds a statistics tree over board positions by running
//! iterations. Each iteration consists of four phases:
//!
//! 1. **Selection**: Descend from the root by UCT (Upper Confidence bound
//!    for Trees) while the current node is fully expanded
//! 2. **Expansion**: Add a child for one uniformly random untried column
//! 3. **Simulation**: Play uniformly random moves from the new position until
//!    the game is won or the board is full
//! 4. **Backpropagation**: Walk back to the root, crediting each node with
//!    the result from the point of view of the player who moved into it
//!
//! After the budget is spent the root child with the highest win rate is
//! played. This is not the most-visited child: a rarely explored move with a
//! perfect record beats a heavily explored one that is merely good.
//!
//! # Usage
//!
//! ```rust
//! use games_connect4::Board;
//! use mcts::{MctsConfig, MctsPlayer};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let mut player = MctsPlayer::new(MctsConfig::for_testing());
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//!
//! let board = Board::new();
//! let result = player.choose_move(&board, &mut rng).unwrap();
//! println!("Best column: {} (win rate {:.2})", result.column, result.win_rate);
//! ```
//!
//! # Tree reuse
//!
//! [`MctsPlayer`] keeps its [`MctsTree`] between calls. Each call first
//! advances the tree by the opponent's last move and afterwards by its own,
//! so statistics gathered for the line actually played carry over. When the
//! move played was never expanded the tree starts over from a single node.
//!
//! # Configuration
//!
//! The [`MctsConfig`] struct controls search behavior:
//!
//! - `max_iterations`: Iteration budget per search (default: 20000)
//! - `time_budget`: Wall-clock budget, checked once per iteration (default: 2s)
//! - `exploration`: UCT exploration constant (default: sqrt(2))

pub mod config;
pub mod node;
pub mod player;
pub mod search;
pub mod tree;

// Re-export main types
pub use config::MctsConfig;
pub use node::{MctsNode, NodeId};
pub use player::MctsPlayer;
pub use search::{run_mcts, MctsSearch, SearchError, SearchResult};
pub use tree::{MctsTree, TreeStats};
