//! Connect 4 board shared by every Quadrant bot.
//!
//! Connect 4 is a two-player connection game where players drop colored discs
//! into a 7-column, 6-row vertically suspended grid. The objective is to be
//! the first to form a horizontal, vertical, or diagonal line of four discs.
//!
//! The search engines never own a real game board: they receive a snapshot,
//! clone it, and explore hypothetical futures on the clones.
//!
//! # Board Layout
//!
//! The board is stored in row-major order, with row 0 at the bottom:
//! ```text
//! Row 5: [35][36][37][38][39][40][41]  <- Top
//! Row 4: [28][29][30][31][32][33][34]
//! Row 3: [21][22][23][24][25][26][27]
//! Row 2: [14][15][16][17][18][19][20]
//! Row 1: [ 7][ 8][ 9][10][11][12][13]
//! Row 0: [ 0][ 1][ 2][ 3][ 4][ 5][ 6]  <- Bottom
//!         Col 0  1  2  3  4  5  6
//! ```
//!
//! # Usage
//!
//! ```rust
//! use games_connect4::{Board, Piece};
//!
//! let mut board = Board::new();
//! board.drop_piece(3, Piece::Red).unwrap();
//! assert_eq!(board.current_player(), Piece::Yellow);
//! assert_eq!(board.last_move(), Some(3));
//! ```

use std::fmt;

use thiserror::Error;

/// Board dimensions
pub const COLS: usize = 7;
pub const ROWS: usize = 6;
pub const BOARD_SIZE: usize = COLS * ROWS; // 42

/// Index of the center column.
pub const CENTER_COL: usize = COLS / 2;

/// Number of pieces in a row needed to win.
pub const CONNECT: usize = 4;

/// Line directions as (column step, row step): horizontal, vertical,
/// ascending diagonal, descending diagonal.
pub const DIRECTIONS: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// A player's disc. Red always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Piece {
    Red = 1,
    Yellow = 2,
}

impl Piece {
    /// The other player.
    #[inline]
    pub fn opponent(self) -> Piece {
        match self {
            Piece::Red => Piece::Yellow,
            Piece::Yellow => Piece::Red,
        }
    }

    /// Decode a raw cell value (0 = empty).
    pub fn from_cell(value: u8) -> Option<Piece> {
        match value {
            1 => Some(Piece::Red),
            2 => Some(Piece::Yellow),
            _ => None,
        }
    }

    /// Single-character symbol used by `Display` and `Board::from_rows`.
    pub fn symbol(self) -> char {
        match self {
            Piece::Red => 'R',
            Piece::Yellow => 'Y',
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize - 1
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Piece::Red => write!(f, "Red"),
            Piece::Yellow => write!(f, "Yellow"),
        }
    }
}

/// Contract violations when mutating or building a board.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("Column {0} is out of range (board has {COLS} columns)")]
    ColumnOutOfRange(u8),

    #[error("Column {0} is full")]
    ColumnFull(u8),

    #[error("Invalid board layout: {0}")]
    InvalidLayout(String),
}

/// Connect4 board state
///
/// Holds the grid, whose turn it is, the last column played, and which
/// players have completed a line. Cloning produces a fully independent copy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// 0=empty, 1=Red, 2=Yellow; row-major with row 0 at the bottom
    cells: [u8; BOARD_SIZE],
    /// Number of pieces in each column (0-6)
    column_heights: [u8; COLS],
    /// Player expected to move next
    current_player: Piece,
    /// Column of the most recent drop
    last_move: Option<u8>,
    /// Whether Red / Yellow has four in a row somewhere
    wins: [bool; 2],
}

impl Board {
    /// Create an empty board with Red to move.
    pub fn new() -> Self {
        Self {
            cells: [0; BOARD_SIZE],
            column_heights: [0; COLS],
            current_player: Piece::Red,
            last_move: None,
            wins: [false; 2],
        }
    }

    /// Build a board from text rows, top row first.
    ///
    /// Each row has exactly `COLS` characters: `.` for empty, `R` for Red and
    /// `Y` for Yellow. Pieces must rest on the bottom or on another piece.
    /// The side to move is Yellow when Red has more pieces, Red otherwise.
    pub fn from_rows(rows: &[&str]) -> Result<Self, BoardError> {
        if rows.len() != ROWS {
            return Err(BoardError::InvalidLayout(format!(
                "expected {} rows, got {}",
                ROWS,
                rows.len()
            )));
        }

        let mut board = Self::new();
        for (i, line) in rows.iter().enumerate() {
            let row = ROWS - 1 - i;
            let symbols: Vec<char> = line.chars().collect();
            if symbols.len() != COLS {
                return Err(BoardError::InvalidLayout(format!(
                    "row {} has {} cells, expected {}",
                    row,
                    symbols.len(),
                    COLS
                )));
            }
            for (col, symbol) in symbols.into_iter().enumerate() {
                board.cells[Self::pos(col, row)] = match symbol {
                    '.' => 0,
                    'R' => Piece::Red as u8,
                    'Y' => Piece::Yellow as u8,
                    other => {
                        return Err(BoardError::InvalidLayout(format!(
                            "unexpected symbol {:?} at column {}, row {}",
                            other, col, row
                        )))
                    }
                };
            }
        }

        // Reconstruct column heights and reject floating pieces
        for col in 0..COLS {
            let height = (0..ROWS)
                .take_while(|&row| board.cells[Self::pos(col, row)] != 0)
                .count();
            if (height..ROWS).any(|row| board.cells[Self::pos(col, row)] != 0) {
                return Err(BoardError::InvalidLayout(format!(
                    "column {} has a floating piece",
                    col
                )));
            }
            board.column_heights[col] = height as u8;
        }

        let count = |piece: Piece| board.cells.iter().filter(|&&c| c == piece as u8).count();
        board.current_player = if count(Piece::Red) > count(Piece::Yellow) {
            Piece::Yellow
        } else {
            Piece::Red
        };

        for col in 0..COLS {
            for row in 0..board.column_heights[col] as usize {
                if board.completes_line_at(col, row) {
                    if let Some(piece) = Piece::from_cell(board.cells[Self::pos(col, row)]) {
                        board.wins[piece.index()] = true;
                    }
                }
            }
        }

        Ok(board)
    }

    /// Convert column and row to board index
    #[inline]
    fn pos(col: usize, row: usize) -> usize {
        row * COLS + col
    }

    /// Piece at (col, row), row 0 being the bottom. Out-of-range reads are empty.
    #[inline]
    pub fn cell(&self, col: usize, row: usize) -> Option<Piece> {
        if col >= COLS || row >= ROWS {
            return None;
        }
        Piece::from_cell(self.cells[Self::pos(col, row)])
    }

    /// Read-only copy of the grid, indexed `[row][col]` with row 0 at the bottom.
    pub fn grid(&self) -> [[Option<Piece>; COLS]; ROWS] {
        let mut grid = [[None; COLS]; ROWS];
        for (row, line) in grid.iter_mut().enumerate() {
            for (col, slot) in line.iter_mut().enumerate() {
                *slot = self.cell(col, row);
            }
        }
        grid
    }

    /// Number of pieces in a column.
    #[inline]
    pub fn column_height(&self, col: usize) -> usize {
        self.column_heights.get(col).map_or(ROWS, |&h| h as usize)
    }

    /// Row a piece dropped into `col` would land on, if the column has room.
    pub fn next_open_row(&self, col: usize) -> Option<usize> {
        let height = self.column_height(col);
        (height < ROWS).then_some(height)
    }

    /// Whether a piece can be dropped into `col`.
    #[inline]
    pub fn is_valid_column(&self, col: u8) -> bool {
        (col as usize) < COLS && self.column_heights[col as usize] < ROWS as u8
    }

    /// Columns accepting a piece, in ascending order. Empty when the board is full.
    pub fn valid_columns(&self) -> Vec<u8> {
        (0..COLS as u8)
            .filter(|&col| self.is_valid_column(col))
            .collect()
    }

    /// Drop `piece` into `column` and return the row it landed on.
    ///
    /// After the drop the opponent of `piece` is to move and `last_move`
    /// is `column`.
    pub fn drop_piece(&mut self, column: u8, piece: Piece) -> Result<usize, BoardError> {
        let col = column as usize;
        if col >= COLS {
            return Err(BoardError::ColumnOutOfRange(column));
        }
        if self.column_heights[col] >= ROWS as u8 {
            return Err(BoardError::ColumnFull(column));
        }

        let row = self.column_heights[col] as usize;
        self.cells[Self::pos(col, row)] = piece as u8;
        self.column_heights[col] += 1;

        if self.completes_line_at(col, row) {
            self.wins[piece.index()] = true;
        }

        self.current_player = piece.opponent();
        self.last_move = Some(column);
        Ok(row)
    }

    /// Drop a piece for the player whose turn it is.
    pub fn play(&mut self, column: u8) -> Result<usize, BoardError> {
        self.drop_piece(column, self.current_player)
    }

    /// Copy the board and drop `piece` into `column` on the copy.
    pub fn with_move(&self, column: u8, piece: Piece) -> Result<Board, BoardError> {
        let mut next = self.clone();
        next.drop_piece(column, piece)?;
        Ok(next)
    }

    /// Check if the piece at (col, row) is part of a line of four
    fn completes_line_at(&self, col: usize, row: usize) -> bool {
        let player = self.cells[Self::pos(col, row)];
        if player == 0 {
            return false;
        }

        for (dc, dr) in DIRECTIONS {
            let mut count = 1; // Count the piece itself

            // Count in positive direction
            let (mut c, mut r) = (col as i32 + dc, row as i32 + dr);
            while c >= 0 && c < COLS as i32 && r >= 0 && r < ROWS as i32 {
                if self.cells[Self::pos(c as usize, r as usize)] != player {
                    break;
                }
                count += 1;
                c += dc;
                r += dr;
            }

            // Count in negative direction
            let (mut c, mut r) = (col as i32 - dc, row as i32 - dr);
            while c >= 0 && c < COLS as i32 && r >= 0 && r < ROWS as i32 {
                if self.cells[Self::pos(c as usize, r as usize)] != player {
                    break;
                }
                count += 1;
                c -= dc;
                r -= dr;
            }

            if count >= CONNECT {
                return true;
            }
        }

        false
    }

    /// True iff `piece` has four in a row anywhere on the board.
    #[inline]
    pub fn winning_move(&self, piece: Piece) -> bool {
        self.wins[piece.index()]
    }

    /// The player holding a line of four, if any.
    pub fn winner(&self) -> Option<Piece> {
        [Piece::Red, Piece::Yellow]
            .into_iter()
            .find(|&piece| self.winning_move(piece))
    }

    /// Whether every column is full.
    pub fn is_full(&self) -> bool {
        self.column_heights.iter().all(|&h| h >= ROWS as u8)
    }

    /// Either side has won or no column accepts another piece.
    pub fn is_terminal(&self) -> bool {
        self.wins.iter().any(|&w| w) || self.is_full()
    }

    /// Player expected to move next.
    #[inline]
    pub fn current_player(&self) -> Piece {
        self.current_player
    }

    /// Player who made the most recent move (or would have, on an empty board).
    #[inline]
    pub fn previous_player(&self) -> Piece {
        self.current_player.opponent()
    }

    /// Column of the most recent drop.
    #[inline]
    pub fn last_move(&self) -> Option<u8> {
        self.last_move
    }

    /// Total number of pieces on the board.
    pub fn moves_played(&self) -> usize {
        self.column_heights.iter().map(|&h| h as usize).sum()
    }

    /// Game result from `piece`'s point of view: 1.0 win, 0.0 loss, 0.5 otherwise.
    pub fn translate_outcome(&self, piece: Piece) -> f64 {
        if self.winning_move(piece) {
            1.0
        } else if self.winning_move(piece.opponent()) {
            0.0
        } else {
            0.5
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    /// Renders rows top first, in the format accepted by `Board::from_rows`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..ROWS).rev() {
            for col in 0..COLS {
                let symbol = self.cell(col, row).map_or('.', Piece::symbol);
                write!(f, "{}", symbol)?;
            }
            if row > 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
