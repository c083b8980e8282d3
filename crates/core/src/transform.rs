//! Transformation engine - validates and applies piece transforms
//!
//! All functions are pure: they read a snapshot and return a new one.
//!
//! - Left / Right / Rotate are rejected (`None`) when the target collides.
//! - Down / FastDown move one row, or lock the piece when the row below is blocked.
//! - Fall moves straight down until blocked, then locks.
//!
//! A lock merges the piece into the board. If that completes rows the result is
//! `LineClearing` with the full rows still on the board and no active piece;
//! [`finish_line_clear`] removes them later. Otherwise the next piece spawns,
//! or the game is over when the spawn position is taken.

use tracing::trace;

use crate::board::Board;
use crate::pieces::Piece;
use crate::snapshot::GameSnapshot;
use crate::types::{GameStatus, TransformKind};

/// Every occupied cell of the piece is inside the board and empty.
pub fn can_place(board: &Board, piece: &Piece) -> bool {
    board.can_place(piece)
}

/// Apply `kind` to the active piece.
///
/// Returns None when the transform is rejected, including when there is no
/// active piece. Down-style transforms are never rejected while a piece is
/// active: a blocked move becomes a lock.
pub fn attempt_transform(snapshot: &GameSnapshot, kind: TransformKind) -> Option<GameSnapshot> {
    let piece = snapshot.piece?;

    match kind {
        TransformKind::Left => shift(snapshot, piece.translated(-1, 0)),
        TransformKind::Right => shift(snapshot, piece.translated(1, 0)),
        TransformKind::Rotate => shift(snapshot, piece.rotated()),
        TransformKind::Down | TransformKind::FastDown => {
            let moved = piece.translated(0, 1);
            if can_place(&snapshot.board, &moved) {
                Some(snapshot.with_piece(moved))
            } else {
                Some(lock(snapshot, piece))
            }
        }
        TransformKind::Fall => Some(lock(snapshot, drop_position(&snapshot.board, piece))),
    }
}

fn shift(snapshot: &GameSnapshot, candidate: Piece) -> Option<GameSnapshot> {
    if can_place(&snapshot.board, &candidate) {
        Some(snapshot.with_piece(candidate))
    } else {
        trace!(?candidate, "transform rejected: collision");
        None
    }
}

/// Lowest position the piece reaches by moving straight down.
pub fn drop_position(board: &Board, piece: Piece) -> Piece {
    let mut landed = piece;
    loop {
        let next = landed.translated(0, 1);
        if !can_place(board, &next) {
            return landed;
        }
        landed = next;
    }
}

/// Merge `piece` into the board and decide what follows.
pub fn lock(snapshot: &GameSnapshot, piece: Piece) -> GameSnapshot {
    let board = snapshot.board.lock_piece(&piece);
    let full_rows = board.find_full_rows();

    if full_rows.is_empty() {
        spawn(&GameSnapshot {
            board,
            piece: None,
            cleared_rows: 0,
            ..snapshot.clone()
        })
    } else {
        GameSnapshot {
            status: GameStatus::LineClearing,
            board,
            piece: None,
            cleared_rows: full_rows.len() as u8,
            ..snapshot.clone()
        }
    }
}

/// Remove the full rows of a `LineClearing` snapshot and spawn the next piece.
pub fn finish_line_clear(snapshot: &GameSnapshot) -> GameSnapshot {
    let rows = snapshot.board.find_full_rows();
    let board = snapshot.board.clear_rows(&rows);
    spawn(&GameSnapshot {
        board,
        piece: None,
        cleared_rows: 0,
        ..snapshot.clone()
    })
}

/// Draw the next shape and place it at the spawn position.
///
/// Running with the new piece, or GameOver (no piece) when the spawn
/// position collides with the board.
pub fn spawn(snapshot: &GameSnapshot) -> GameSnapshot {
    let mut rng = snapshot.rng;
    let piece = Piece::spawn(rng.next_shape(), snapshot.width());

    if can_place(&snapshot.board, &piece) {
        GameSnapshot {
            status: GameStatus::Running,
            piece: Some(piece),
            rng,
            ..snapshot.clone()
        }
    } else {
        GameSnapshot {
            status: GameStatus::GameOver,
            piece: None,
            rng,
            ..snapshot.clone()
        }
    }
}

/// New game: empty board, first piece spawned.
pub fn start_game(snapshot: &GameSnapshot) -> GameSnapshot {
    spawn(&snapshot.fresh(GameStatus::Running))
}
