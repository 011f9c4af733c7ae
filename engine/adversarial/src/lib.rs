//! Depth-limited adversarial search for Connect 4.
//!
//! Two interchangeable strategies share one recursive walk:
//!
//! - **Minimax**: maximize on our plies, minimize on the opponent's, with
//!   alpha-beta bounds cutting off subtrees that cannot change the root choice.
//! - **Expectimax**: the opponent's ply is an expectation step instead of a
//!   minimization. The default [`ExpectationMode::Faithful`] keeps the running
//!   minimum of the replies (never above 0) and derives the pruning bound as
//!   `floor(value / branching)`; [`ExpectationMode::Average`] computes a true
//!   uniform average without pruning.
//!
//! Terminal positions are scored before the heuristic: a line of four for us
//! is [`WIN_SCORE`], for the opponent [`LOSS_SCORE`], a full board 0. Win and
//! loss scores are pushed further from zero by the remaining depth so the
//! search prefers the fastest win and the slowest loss.
//!
//! # Usage
//!
//! ```rust
//! use adversarial::{AdversarialSearch, SearchConfig};
//! use games_connect4::{Board, Piece};
//! use heuristic::Evaluator;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let config = SearchConfig::default().with_depth(3);
//! let search = AdversarialSearch::new(Evaluator::standard(), config);
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//! let result = search.choose_move(&Board::new(), Piece::Red, &mut rng).unwrap();
//! assert!(result.column < 7);
//! ```

pub mod config;
pub mod search;

pub use config::{ExpectationMode, SearchConfig, Variant};
pub use search::{AdversarialSearch, SearchError, SearchResult};

/// Reward for a position where the searching piece has four in a row.
/// Several orders of magnitude above any heuristic score.
pub const WIN_SCORE: i64 = 100_000_000_000_000;

/// Reward for a position where the opponent has four in a row.
pub const LOSS_SCORE: i64 = -WIN_SCORE;
