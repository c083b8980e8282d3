//! Board module - the playfield grid
//!
//! The board is a width x height grid where each cell is empty (0) or filled (1).
//! Uses a flat vector in row-major order (y * width + x).
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.
//!
//! A `Board` is a value: every operation that changes cells returns a new board
//! and leaves `self` untouched, so snapshots holding the old board never observe
//! the change.

use serde::Serialize;

use crate::pieces::Piece;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH, EMPTY, FILLED};

/// The game board
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Board {
    width: u8,
    height: u8,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            cells: vec![EMPTY; width as usize * height as usize],
        }
    }

    /// Build a board from text rows: `#` is filled, anything else is empty.
    ///
    /// Returns None when rows are ragged or the grid is empty.
    ///
    /// ```
    /// use brick_tetris_core::Board;
    ///
    /// let board = Board::from_rows(&["....", "#..#"]).unwrap();
    /// assert_eq!(board.width(), 4);
    /// assert!(board.is_cell_filled(3, 1));
    /// assert!(!board.is_cell_filled(1, 1));
    /// ```
    pub fn from_rows(rows: &[&str]) -> Option<Self> {
        let width = rows.first()?.chars().count();
        if width == 0 || width > i8::MAX as usize || rows.len() > i8::MAX as usize {
            return None;
        }
        let mut cells = Vec::with_capacity(width * rows.len());
        for row in rows {
            if row.chars().count() != width {
                return None;
            }
            cells.extend(row.chars().map(|c| if c == '#' { FILLED } else { EMPTY }));
        }
        Some(Self {
            width: width as u8,
            height: rows.len() as u8,
            cells,
        })
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if x < 0 || x as u8 >= self.width || y < 0 || y as u8 >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// True if the cell is filled or outside the board.
    ///
    /// Walls and floor count as filled, so this is the collision test.
    pub fn is_cell_filled(&self, x: i8, y: i8) -> bool {
        self.get(x, y).map_or(true, |cell| cell != EMPTY)
    }

    /// Check if position is out of bounds
    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        self.index(x, y).is_none()
    }

    /// Every cell of the piece is inside the board and empty.
    pub fn can_place(&self, piece: &Piece) -> bool {
        piece
            .cells()
            .iter()
            .all(|&(x, y)| !self.is_cell_filled(x, y))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height as usize {
            return false;
        }
        self.row(y).iter().all(|&cell| cell != EMPTY)
    }

    fn row(&self, y: usize) -> &[Cell] {
        let width = self.width as usize;
        &self.cells[y * width..(y + 1) * width]
    }

    /// Rows top to bottom, for views.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width as usize)
    }

    /// Indices of all full rows, top to bottom.
    pub fn find_full_rows(&self) -> Vec<usize> {
        (0..self.height as usize)
            .filter(|&y| self.is_row_full(y))
            .collect()
    }

    /// Remove the given rows in one pass.
    ///
    /// Rows above a removed row shift down by the number of removed rows below
    /// them; the vacated top rows are empty. Indices outside the board are ignored.
    pub fn clear_rows(&self, rows: &[usize]) -> Board {
        let width = self.width as usize;
        let mut cells = vec![EMPTY; self.cells.len()];
        let mut write_y = self.height as usize;

        // Scan from bottom to top, compacting kept rows at the bottom.
        for read_y in (0..self.height as usize).rev() {
            if rows.contains(&read_y) {
                continue;
            }
            write_y -= 1;
            let dst = write_y * width;
            cells[dst..dst + width].copy_from_slice(self.row(read_y));
        }

        Board {
            width: self.width,
            height: self.height,
            cells,
        }
    }

    /// Merge the piece's cells into a new board.
    ///
    /// The piece must be placeable; debug builds panic otherwise.
    pub fn lock_piece(&self, piece: &Piece) -> Board {
        debug_assert!(
            self.can_place(piece),
            "locking piece {:?} onto occupied or out-of-bounds cells",
            piece
        );
        self.with_cells_filled(piece.cells())
    }

    /// New board with the given cells filled. Out-of-bounds cells are skipped.
    pub fn with_cells_filled(&self, cells: impl IntoIterator<Item = (i8, i8)>) -> Board {
        let mut next = self.clone();
        for (x, y) in cells {
            if let Some(idx) = next.index(x, y) {
                next.cells[idx] = FILLED;
            }
        }
        next
    }

    /// New board with row `y` completely filled.
    pub fn with_row_filled(&self, y: usize) -> Board {
        self.with_row(y, FILLED)
    }

    /// New board with row `y` completely empty.
    pub fn with_row_cleared(&self, y: usize) -> Board {
        self.with_row(y, EMPTY)
    }

    fn with_row(&self, y: usize, cell: Cell) -> Board {
        let mut next = self.clone();
        if y < self.height as usize {
            let width = self.width as usize;
            next.cells[y * width..(y + 1) * width].fill(cell);
        }
        next
    }

    /// Number of filled cells
    pub fn mass(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell != EMPTY).count()
    }

    pub fn is_empty(&self) -> bool {
        self.mass() == 0
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BOARD_WIDTH, BOARD_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ShapeKind;

    #[test]
    fn test_board_index_calculation() {
        let board = Board::default();
        assert_eq!(board.index(0, 0), Some(0));
        assert_eq!(board.index(9, 0), Some(9));
        assert_eq!(board.index(0, 1), Some(10));
        assert_eq!(board.index(9, 19), Some(199));
        assert_eq!(board.index(-1, 0), None);
        assert_eq!(board.index(10, 0), None);
        assert_eq!(board.index(0, 20), None);
    }

    #[test]
    fn test_out_of_bounds_counts_as_filled() {
        let board = Board::new(4, 4);
        assert!(board.is_cell_filled(-1, 0));
        assert!(board.is_cell_filled(4, 0));
        assert!(board.is_cell_filled(0, 4));
        assert!(board.is_cell_filled(0, -1));
        assert!(!board.is_cell_filled(3, 3));
    }

    #[test]
    fn test_lock_piece_leaves_source_untouched() {
        let board = Board::default();
        let piece = Piece::new(ShapeKind::O, 0, 18);
        let locked = board.lock_piece(&piece);

        assert!(board.is_empty());
        assert_eq!(locked.mass(), 4);
        assert!(locked.is_cell_filled(1, 18));
        assert!(locked.is_cell_filled(2, 19));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn test_lock_unplaceable_piece_panics_in_debug() {
        let board = Board::default();
        board.lock_piece(&Piece::new(ShapeKind::I, 8, 0));
    }

    #[test]
    fn test_clear_rows_shifts_down() {
        let board = Board::from_rows(&[
            "#...", //
            ".#..", //
            "####", //
            "..#.", //
            "####",
        ])
        .unwrap();

        let rows = board.find_full_rows();
        assert_eq!(rows, vec![2, 4]);

        let cleared = board.clear_rows(&rows);
        let expected = Board::from_rows(&[
            "....", //
            "....", //
            "#...", //
            ".#..", //
            "..#.",
        ])
        .unwrap();
        assert_eq!(cleared, expected);
    }

    #[test]
    fn test_row_fill_and_clear() {
        let board = Board::new(3, 3).with_row_filled(2);
        assert!(board.is_row_full(2));
        assert_eq!(board.mass(), 3);
        assert!(board.with_row_cleared(2).is_empty());
        // Out of range rows are ignored.
        assert_eq!(board.with_row_filled(7), board);
    }

    #[test]
    fn test_from_rows_rejects_ragged_input() {
        assert!(Board::from_rows(&["..", "..."]).is_none());
        assert!(Board::from_rows(&[]).is_none());
    }
}
