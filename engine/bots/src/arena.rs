//! Bot-vs-bot games.

use games_connect4::{Board, Piece};
use tracing::{debug, info};

use crate::{Bot, BotError};

/// Result of one finished game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    /// Winning piece, or None for a draw.
    pub winner: Option<Piece>,
    /// Columns in the order they were played.
    pub moves: Vec<u8>,
    /// Final position.
    pub board: Board,
}

/// Play one game from the empty board. Red moves first.
pub fn play_game(red: &mut dyn Bot, yellow: &mut dyn Bot) -> Result<GameRecord, BotError> {
    let mut board = Board::new();
    let mut moves = Vec::new();

    while !board.is_terminal() {
        let mover: &mut dyn Bot = match board.current_player() {
            Piece::Red => &mut *red,
            Piece::Yellow => &mut *yellow,
        };
        let column = mover.decide_move(&board)?;
        board.play(column)?;
        moves.push(column);
        debug!(bot = mover.name(), column, ply = moves.len(), "Move played");
    }

    Ok(GameRecord {
        winner: board.winner(),
        moves,
        board,
    })
}

/// Win/draw counts for two named contestants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    pub first_wins: u32,
    pub second_wins: u32,
    pub draws: u32,
}

impl Tally {
    /// Count a game in which the first contestant played `first_piece`.
    pub fn record(&mut self, first_piece: Piece, winner: Option<Piece>) {
        match winner {
            None => self.draws += 1,
            Some(piece) if piece == first_piece => self.first_wins += 1,
            Some(_) => self.second_wins += 1,
        }
    }

    pub fn games(&self) -> u32 {
        self.first_wins + self.second_wins + self.draws
    }

    pub fn log_summary(&self, first: &str, second: &str) {
        info!(
            first,
            second,
            first_wins = self.first_wins,
            second_wins = self.second_wins,
            draws = self.draws,
            games = self.games(),
            "Arena finished"
        );
    }
}
