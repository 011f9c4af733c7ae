//! Heuristic position evaluation for Connect 4.
//!
//! A position is scored from one player's point of view by sliding a
//! four-cell window over every horizontal, vertical and diagonal line on the
//! board and summing per-window contributions, plus a bonus for each of the
//! player's pieces in the center column.
//!
//! The evaluator is a plain value: it holds its weights and an optional
//! per-column multiplier profile, and scoring never mutates the board, so it
//! can be shared freely between searches.
//!
//! ```rust
//! use games_connect4::{Board, Piece};
//! use heuristic::Evaluator;
//!
//! let mut board = Board::new();
//! board.drop_piece(3, Piece::Red).unwrap();
//!
//! let evaluator = Evaluator::standard();
//! assert_eq!(evaluator.score(&board, Piece::Red), 3); // one center piece
//! ```

mod window;

pub use window::{windows, Window, WINDOW_COUNT};

use games_connect4::{Board, Piece, CENTER_COL, COLS, CONNECT, ROWS};

/// Symmetric column profile favouring the center.
pub const POSITIONAL_PROFILE: [f64; COLS] = [1.0, 2.0, 3.0, 4.0, 3.0, 2.0, 1.0];

/// Per-window and positional weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Weights {
    /// Four of the player's pieces.
    pub four: i64,
    /// Three of the player's pieces and one empty cell.
    pub three: i64,
    /// Two of the player's pieces and two empty cells.
    pub two: i64,
    /// Three opponent pieces and one empty cell. Negative.
    pub opponent_three: i64,
    /// Per piece of the player's in the center column.
    pub center: i64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            four: 100,
            three: 5,
            two: 2,
            opponent_three: -4,
            center: 3,
        }
    }
}

/// Window-scanning position evaluator.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Evaluator {
    weights: Weights,
    column_profile: Option<[f64; COLS]>,
}

impl Evaluator {
    /// Default weights, no column profile.
    pub fn standard() -> Self {
        Self::default()
    }

    /// Default weights scaled by [`POSITIONAL_PROFILE`].
    pub fn positional() -> Self {
        Self::default().with_column_profile(POSITIONAL_PROFILE)
    }

    /// Builder pattern: replace the weights.
    pub fn with_weights(mut self, weights: Weights) -> Self {
        self.weights = weights;
        self
    }

    /// Builder pattern: multiply each window's score by the mean profile
    /// value of the columns it spans.
    pub fn with_column_profile(mut self, profile: [f64; COLS]) -> Self {
        self.column_profile = Some(profile);
        self
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    pub fn column_profile(&self) -> Option<&[f64; COLS]> {
        self.column_profile.as_ref()
    }

    /// Score a single window for `piece`.
    pub fn score_window(&self, cells: &[Option<Piece>; CONNECT], piece: Piece) -> i64 {
        let count = |target: Option<Piece>| cells.iter().filter(|&&c| c == target).count();
        let mine = count(Some(piece));
        let theirs = count(Some(piece.opponent()));
        let empty = count(None);

        let mut score = if mine == 4 {
            self.weights.four
        } else if mine == 3 && empty == 1 {
            self.weights.three
        } else if mine == 2 && empty == 2 {
            self.weights.two
        } else {
            0
        };

        if theirs == 3 && empty == 1 {
            score += self.weights.opponent_three;
        }

        score
    }

    /// Score the whole board from `piece`'s point of view.
    pub fn score(&self, board: &Board, piece: Piece) -> i64 {
        let center_count = (0..ROWS)
            .filter(|&row| board.cell(CENTER_COL, row) == Some(piece))
            .count() as i64;
        let center = center_count * self.weights.center;

        match &self.column_profile {
            None => {
                center
                    + windows(board)
                        .map(|w| self.score_window(&w.cells, piece))
                        .sum::<i64>()
            }
            Some(profile) => {
                let weighted: f64 = windows(board)
                    .map(|w| {
                        let base = self.score_window(&w.cells, piece);
                        if base == 0 {
                            return 0.0;
                        }
                        let mean =
                            w.columns.iter().map(|&c| profile[c]).sum::<f64>() / CONNECT as f64;
                        base as f64 * mean
                    })
                    .sum();
                center + weighted.round() as i64
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: &[&str]) -> Board {
        Board::from_rows(rows).unwrap()
    }

    #[test]
    fn test_default_weights() {
        let w = Weights::default();
        assert_eq!(w.four, 100);
        assert_eq!(w.three, 5);
        assert_eq!(w.two, 2);
        assert_eq!(w.opponent_three, -4);
        assert_eq!(w.center, 3);
    }

    #[test]
    fn test_score_window() {
        let eval = Evaluator::standard();
        let (r, y) = (Some(Piece::Red), Some(Piece::Yellow));

        assert_eq!(eval.score_window(&[r, r, r, r], Piece::Red), 100);
        assert_eq!(eval.score_window(&[r, r, None, r], Piece::Red), 5);
        assert_eq!(eval.score_window(&[r, None, None, r], Piece::Red), 2);
        assert_eq!(eval.score_window(&[y, y, None, y], Piece::Red), -4);
        assert_eq!(eval.score_window(&[r, y, None, None], Piece::Red), 0);
        assert_eq!(eval.score_window(&[r, r, r, y], Piece::Red), 0);
        assert_eq!(eval.score_window(&[None; 4], Piece::Red), 0);
    }

    #[test]
    fn test_empty_board_scores_zero() {
        let eval = Evaluator::standard();
        assert_eq!(eval.score(&Board::new(), Piece::Red), 0);
        assert_eq!(eval.score(&Board::new(), Piece::Yellow), 0);
    }

    #[test]
    fn test_center_bonus() {
        let b = board(&[
            ".......", //
            ".......", //
            ".......", //
            ".......", //
            ".......", //
            "...R...", //
        ]);
        let eval = Evaluator::standard();
        assert_eq!(eval.score(&b, Piece::Red), 3);
        assert_eq!(eval.score(&b, Piece::Yellow), 0);
    }

    #[test]
    fn test_three_in_a_row_beats_empty_board() {
        let b = board(&[
            ".......", //
            ".......", //
            ".......", //
            ".......", //
            ".......", //
            "RRR....", //
        ]);
        let eval = Evaluator::standard();

        // Window 0-3 is three plus one empty (+5), window 1-4 is two plus two empty (+2)
        assert_eq!(eval.score(&b, Piece::Red), 7);
        assert!(eval.score(&b, Piece::Red) > eval.score(&Board::new(), Piece::Red));
        // The same three are a threat from Yellow's side
        assert_eq!(eval.score(&b, Piece::Yellow), -4);
    }

    #[test]
    fn test_positional_profile_scales_windows() {
        let b = board(&[
            ".......", //
            ".......", //
            ".......", //
            ".......", //
            ".......", //
            "RRR....", //
        ]);
        let eval = Evaluator::positional();

        // 5 * mean(1,2,3,4) + 2 * mean(2,3,4,3) = 12.5 + 6.0
        assert_eq!(eval.score(&b, Piece::Red), 19);
    }

    #[test]
    fn test_positional_profile_prefers_center_windows() {
        let edge = board(&[
            ".......", //
            ".......", //
            ".......", //
            ".......", //
            ".......", //
            "YY...RR", //
        ]);
        let center = board(&[
            ".......", //
            ".......", //
            ".......", //
            ".......", //
            ".......", //
            "YY.RR..", //
        ]);

        let standard = Evaluator::standard();
        let positional = Evaluator::positional();

        let center_gain =
            positional.score(&center, Piece::Red) - standard.score(&center, Piece::Red);
        let edge_gain = positional.score(&edge, Piece::Red) - standard.score(&edge, Piece::Red);
        assert!(center_gain > edge_gain);
    }

    #[test]
    fn test_custom_weights() {
        let b = board(&[
            ".......", //
            ".......", //
            ".......", //
            ".......", //
            ".......", //
            "RRR....", //
        ]);
        let eval = Evaluator::standard().with_weights(Weights {
            three: 50,
            ..Weights::default()
        });
        assert_eq!(eval.score(&b, Piece::Red), 52);
    }

    #[test]
    fn test_completed_line_scores_four_weight() {
        let b = board(&[
            ".......", //
            ".......", //
            ".......", //
            ".......", //
            "YYY....", //
            "RRRR...", //
        ]);
        let eval = Evaluator::standard();
        // 100 for the four, 5 for the window 1-4 (RRR + empty), 2 for 2-5,
        // 3 for the center piece, -4 for Yellow's open three above
        assert_eq!(eval.score(&b, Piece::Red), 100 + 5 + 2 + 3 - 4);
    }
}
