//! Pieces module - tetromino shapes and the active piece value
//!
//! Every orientation is a set of four mino offsets inside a 4x4 box whose
//! topmost occupied row is offset 0, so a piece spawned at y = 0 is fully
//! on the board. Rotation steps through the shape's orientations in order and
//! wraps; there is no wall kick table.

use serde::Serialize;

use crate::types::ShapeKind;

/// Offset of a single mino relative to piece origin
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from piece origin
pub type PieceShape = [MinoOffset; 4];

const I_SHAPES: [PieceShape; 2] = [
    [(0, 0), (1, 0), (2, 0), (3, 0)],
    [(1, 0), (1, 1), (1, 2), (1, 3)],
];

const O_SHAPES: [PieceShape; 1] = [[(1, 0), (2, 0), (1, 1), (2, 1)]];

const T_SHAPES: [PieceShape; 4] = [
    [(1, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (2, 1), (1, 2)],
    [(0, 0), (1, 0), (2, 0), (1, 1)],
    [(1, 0), (0, 1), (1, 1), (1, 2)],
];

const S_SHAPES: [PieceShape; 2] = [
    [(1, 0), (2, 0), (0, 1), (1, 1)],
    [(1, 0), (1, 1), (2, 1), (2, 2)],
];

const Z_SHAPES: [PieceShape; 2] = [
    [(0, 0), (1, 0), (1, 1), (2, 1)],
    [(2, 0), (1, 1), (2, 1), (1, 2)],
];

const J_SHAPES: [PieceShape; 4] = [
    [(0, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (2, 0), (1, 1), (1, 2)],
    [(0, 0), (1, 0), (2, 0), (2, 1)],
    [(1, 0), (1, 1), (0, 2), (1, 2)],
];

const L_SHAPES: [PieceShape; 4] = [
    [(2, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (1, 2), (2, 2)],
    [(0, 0), (1, 0), (2, 0), (0, 1)],
    [(0, 0), (1, 0), (1, 1), (1, 2)],
];

/// All orientations of a shape, in rotation order.
pub fn rotations(kind: ShapeKind) -> &'static [PieceShape] {
    match kind {
        ShapeKind::I => &I_SHAPES,
        ShapeKind::O => &O_SHAPES,
        ShapeKind::T => &T_SHAPES,
        ShapeKind::S => &S_SHAPES,
        ShapeKind::Z => &Z_SHAPES,
        ShapeKind::J => &J_SHAPES,
        ShapeKind::L => &L_SHAPES,
    }
}

/// Get the shape (mino offsets) for a piece kind and rotation index.
///
/// The index wraps modulo the shape's rotation count.
pub fn get_shape(kind: ShapeKind, rotation: u8) -> PieceShape {
    let shapes = rotations(kind);
    shapes[rotation as usize % shapes.len()]
}

/// Spawn origin x for a board of the given width (3 on a 10-wide board).
pub fn spawn_x(board_width: u8) -> i8 {
    ((i16::from(board_width) - 4) / 2) as i8
}

/// Active falling piece
///
/// A value type: moves and rotations return a new piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Piece {
    pub kind: ShapeKind,
    pub rotation: u8,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Create a piece in its first orientation at (x, y)
    pub fn new(kind: ShapeKind, x: i8, y: i8) -> Self {
        Self {
            kind,
            rotation: 0,
            x,
            y,
        }
    }

    /// Create a piece at the spawn position of a board `board_width` wide
    pub fn spawn(kind: ShapeKind, board_width: u8) -> Self {
        Self::new(kind, spawn_x(board_width), 0)
    }

    /// Get the shape (mino offsets) for current rotation
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Absolute board coordinates of the four minos
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.shape().map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    pub fn occupies(&self, x: i8, y: i8) -> bool {
        self.cells().contains(&(x, y))
    }

    pub fn translated(&self, dx: i8, dy: i8) -> Piece {
        Piece {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Next orientation, wrapping after the last one.
    pub fn rotated(&self) -> Piece {
        Piece {
            rotation: (self.rotation + 1) % self.kind.rotation_count(),
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_tables_match_rotation_counts() {
        for kind in ShapeKind::ALL {
            assert_eq!(rotations(kind).len(), kind.rotation_count() as usize);
        }
    }

    #[test]
    fn test_every_orientation_starts_at_row_zero() {
        for kind in ShapeKind::ALL {
            for shape in rotations(kind) {
                let top = shape.iter().map(|&(_, dy)| dy).min().unwrap();
                assert_eq!(top, 0, "{:?} {:?}", kind, shape);
                assert!(shape.iter().all(|&(dx, dy)| (0..4).contains(&dx) && (0..4).contains(&dy)));
            }
        }
    }

    #[test]
    fn test_spawn_is_centered() {
        let piece = Piece::spawn(ShapeKind::T, 10);
        assert_eq!((piece.x, piece.y, piece.rotation), (3, 0, 0));
        assert_eq!(spawn_x(4), 0);
    }

    #[test]
    fn test_rotation_wraps() {
        let mut piece = Piece::new(ShapeKind::J, 3, 0);
        for expected in [1, 2, 3, 0] {
            piece = piece.rotated();
            assert_eq!(piece.rotation, expected);
        }
        let o = Piece::new(ShapeKind::O, 3, 0);
        assert_eq!(o.rotated(), o);
    }

    #[test]
    fn test_cells_follow_origin() {
        let piece = Piece::new(ShapeKind::I, 2, 5);
        assert_eq!(piece.cells(), [(2, 5), (3, 5), (4, 5), (5, 5)]);
        assert!(piece.translated(0, 1).occupies(5, 6));
    }
}
