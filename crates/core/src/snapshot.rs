//! Immutable game snapshot
//!
//! A snapshot is the full game state at one point in time and the only thing
//! observers ever see. Transitions build a new snapshot; none of the helpers
//! here mutate `self`.

use serde::Serialize;

use crate::board::Board;
use crate::pieces::Piece;
use crate::rng::SimpleRng;
use crate::types::{Cell, GameStatus, EMPTY, FILLED};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub status: GameStatus,
    pub board: Board,
    /// Active piece, tracked apart from the board until it locks
    pub piece: Option<Piece>,
    pub sound_enabled: bool,
    /// Rows removed by the lock that produced this snapshot (0 otherwise)
    pub cleared_rows: u8,
    /// Shape source for the next spawn
    #[serde(skip)]
    pub rng: SimpleRng,
}

impl GameSnapshot {
    /// Welcome screen: empty board, no piece, sound on
    pub fn new(width: u8, height: u8, seed: u32) -> Self {
        Self {
            status: GameStatus::Welcome,
            board: Board::new(width, height),
            piece: None,
            sound_enabled: true,
            cleared_rows: 0,
            rng: SimpleRng::new(seed),
        }
    }

    pub fn width(&self) -> u8 {
        self.board.width()
    }

    pub fn height(&self) -> u8 {
        self.board.height()
    }

    /// Empty board of the same size, no piece, given status.
    ///
    /// Keeps the sound setting and the shape source.
    pub fn fresh(&self, status: GameStatus) -> Self {
        Self {
            status,
            board: Board::new(self.width(), self.height()),
            piece: None,
            sound_enabled: self.sound_enabled,
            cleared_rows: 0,
            rng: self.rng,
        }
    }

    pub fn with_status(&self, status: GameStatus) -> Self {
        Self {
            status,
            cleared_rows: 0,
            ..self.clone()
        }
    }

    /// Same state with the active piece moved to `piece`.
    pub fn with_piece(&self, piece: Piece) -> Self {
        Self {
            piece: Some(piece),
            cleared_rows: 0,
            ..self.clone()
        }
    }

    pub fn with_sound_enabled(&self, sound_enabled: bool) -> Self {
        Self {
            sound_enabled,
            cleared_rows: 0,
            ..self.clone()
        }
    }

    /// Cell as drawn on screen: board cell, or filled where the active piece is.
    pub fn visible_cell(&self, x: i8, y: i8) -> Cell {
        if self.piece.is_some_and(|p| p.occupies(x, y)) {
            return FILLED;
        }
        self.board.get(x, y).unwrap_or(EMPTY)
    }

}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self::new(crate::types::BOARD_WIDTH, crate::types::BOARD_HEIGHT, 1)
    }
}
