//! Enumeration of every four-cell window on the board.

use games_connect4::{Board, Piece, COLS, CONNECT, DIRECTIONS, ROWS};

/// Number of windows on a 6x7 board: 24 horizontal, 21 vertical, 12 + 12 diagonal.
pub const WINDOW_COUNT: usize = 69;

/// Four consecutive cells along one direction, with the columns they occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub cells: [Option<Piece>; CONNECT],
    pub columns: [usize; CONNECT],
}

/// Iterate over all windows in all four scan directions.
pub fn windows(board: &Board) -> impl Iterator<Item = Window> + '_ {
    DIRECTIONS.into_iter().flat_map(move |(dc, dr)| {
        (0..COLS).flat_map(move |col| {
            (0..ROWS).filter_map(move |row| window_at(board, col, row, dc, dr))
        })
    })
}

fn window_at(board: &Board, col: usize, row: usize, dc: i32, dr: i32) -> Option<Window> {
    let span = CONNECT as i32 - 1;
    let end_col = col as i32 + dc * span;
    let end_row = row as i32 + dr * span;
    if !(0..COLS as i32).contains(&end_col) || !(0..ROWS as i32).contains(&end_row) {
        return None;
    }

    let mut cells = [None; CONNECT];
    let mut columns = [0; CONNECT];
    for k in 0..CONNECT {
        let c = (col as i32 + dc * k as i32) as usize;
        let r = (row as i32 + dr * k as i32) as usize;
        cells[k] = board.cell(c, r);
        columns[k] = c;
    }
    Some(Window { cells, columns })
}
