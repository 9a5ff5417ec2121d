use crate::piece::{Cell, Piece};

pub const ROWS: usize = 20;
pub const COLS: usize = 10;

pub type Row = [Cell; COLS];

const EMPTY_ROW: Row = [Cell::Empty; COLS];

/// Result of transferring a piece into the grid.
#[must_use]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LockOutcome {
    Locked,
    /// Some cell of the piece was still above row 0; nothing was written.
    ToppedOut,
}

/// The grid of locked cells. Always `ROWS` rows of `COLS` cells.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Playfield {
    rows: Vec<Row>,
}

impl Playfield {
    pub fn new() -> Self {
        Self {
            rows: vec![EMPTY_ROW; ROWS],
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Panics if `row` or `col` is outside the grid.
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        assert!(
            row < ROWS && col < COLS,
            "playfield query out of range: row {row}, col {col}"
        );
        self.rows[row][col]
    }

    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.cell(row, col).is_filled()
    }

    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        assert!(
            row < ROWS && col < COLS,
            "playfield write out of range: row {row}, col {col}"
        );
        self.rows[row][col] = cell;
    }

    /// Writes every occupied cell of `piece` into the grid.
    ///
    /// The whole piece is checked first: if any occupied cell lies above the
    /// visible field the grid is left untouched and `ToppedOut` is returned.
    /// Cells must otherwise be inside the grid, which the collision checks
    /// guarantee for any piece the controller locks.
    pub fn lock(&mut self, piece: &Piece) -> LockOutcome {
        if piece.blocks().any(|(pos, _)| pos.y < 0) {
            return LockOutcome::ToppedOut;
        }
        for (pos, cell) in piece.blocks() {
            self.set(pos.y as usize, pos.x as usize, cell);
        }
        LockOutcome::Locked
    }

    pub fn is_row_full(&self, row: usize) -> bool {
        self.rows[row].iter().all(|cell| cell.is_filled())
    }

    /// Indices of every full row, top to bottom.
    pub fn find_full_rows(&self) -> Vec<usize> {
        (0..ROWS).filter(|&row| self.is_row_full(row)).collect()
    }

    /// Removes the given rows and drops everything above them, returning how
    /// many rows were removed. Duplicate indices are counted once.
    pub fn clear_and_collapse(&mut self, rows: &[usize]) -> usize {
        assert!(
            rows.iter().all(|&row| row < ROWS),
            "cannot clear rows outside the playfield: {rows:?}"
        );

        let mut kept: Vec<Row> = self
            .rows
            .iter()
            .enumerate()
            .filter(|(index, _)| !rows.contains(index))
            .map(|(_, row)| *row)
            .collect();
        let cleared = ROWS - kept.len();

        let mut collapsed = vec![EMPTY_ROW; cleared];
        collapsed.append(&mut kept);
        self.rows = collapsed;

        cleared
    }

    pub fn filled_count_in_row(&self, row: usize) -> usize {
        self.rows[row].iter().filter(|cell| cell.is_filled()).count()
    }

    pub fn total_filled_cells(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|cell| cell.is_filled())
            .count()
    }
}

impl Default for Playfield {
    fn default() -> Self {
        Self::new()
    }
}
