//! Pieces module tests - shapes, rotation order and spawn

use brick_tetris::core::pieces::{get_shape, rotations, spawn_x};
use brick_tetris::core::Piece;
use brick_tetris::types::ShapeKind;

#[test]
fn test_rotation_counts() {
    let counts: Vec<usize> = ShapeKind::ALL.iter().map(|&k| rotations(k).len()).collect();
    // I, O, T, S, Z, J, L
    assert_eq!(counts, vec![2, 1, 4, 2, 2, 4, 4]);

    for kind in ShapeKind::ALL {
        assert_eq!(rotations(kind).len(), kind.rotation_count() as usize);
    }
}

#[test]
fn test_every_orientation_fits_box_with_top_row_zero() {
    for kind in ShapeKind::ALL {
        for shape in rotations(kind) {
            assert!(shape.iter().all(|&(x, y)| (0..4).contains(&x) && (0..4).contains(&y)));
            assert_eq!(shape.iter().map(|&(_, y)| y).min(), Some(0), "{:?}", kind);
        }
    }
}

#[test]
fn test_i_piece_shapes() {
    assert_eq!(get_shape(ShapeKind::I, 0), [(0, 0), (1, 0), (2, 0), (3, 0)]);
    assert_eq!(get_shape(ShapeKind::I, 1), [(1, 0), (1, 1), (1, 2), (1, 3)]);
    // Wraps.
    assert_eq!(get_shape(ShapeKind::I, 2), get_shape(ShapeKind::I, 0));
}

#[test]
fn test_rotation_cycles_back() {
    for kind in ShapeKind::ALL {
        let start = Piece::new(kind, 3, 5);
        let mut piece = start;
        for _ in 0..kind.rotation_count() {
            piece = piece.rotated();
        }
        assert_eq!(piece, start, "{:?}", kind);
    }
}

#[test]
fn test_o_rotation_is_identity() {
    let piece = Piece::new(ShapeKind::O, 3, 0);
    assert_eq!(piece.rotated(), piece);
}

#[test]
fn test_spawn_position() {
    assert_eq!(spawn_x(10), 3);
    assert_eq!(spawn_x(4), 0);
    assert_eq!(spawn_x(64), 30);
    assert_eq!(spawn_x(200), 98);

    let piece = Piece::spawn(ShapeKind::T, 10);
    assert_eq!((piece.x, piece.y, piece.rotation), (3, 0, 0));
}

#[test]
fn test_translate_keeps_shape() {
    let piece = Piece::new(ShapeKind::L, 2, 2);
    let moved = piece.translated(1, 3);
    assert_eq!((moved.x, moved.y), (3, 5));
    assert_eq!(moved.shape(), piece.shape());
}
