// ============================================================================
// Configuration
// ============================================================================

/// Side length of every piece pattern.
pub const PATTERN_SIZE: usize = 4;
pub const KIND_COUNT: usize = 7;

// The field is 10 cells wide and drawn in double columns, so x = 4 centers
// the 4x4 box. y = -3 leaves the piece mostly above the field on spawn.
pub const SPAWN_X: i16 = 4;
pub const SPAWN_Y: i16 = -3;

// ============================================================================
// Types
// ============================================================================

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Position {
    pub x: i16,
    pub y: i16,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Kind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(Kind),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

impl Kind {
    pub const ALL: [Kind; KIND_COUNT] = [
        Kind::I,
        Kind::J,
        Kind::L,
        Kind::O,
        Kind::S,
        Kind::T,
        Kind::Z,
    ];

    /// Position of this kind in [`Kind::ALL`], used to index per-kind counters.
    pub fn index(self) -> usize {
        match self {
            Kind::I => 0,
            Kind::J => 1,
            Kind::L => 2,
            Kind::O => 3,
            Kind::S => 4,
            Kind::T => 5,
            Kind::Z => 6,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Cell code written into the playfield when this kind locks (1..=7).
    pub fn code(self) -> u8 {
        self.index() as u8 + 1
    }

    pub fn letter(self) -> char {
        match self {
            Kind::I => 'I',
            Kind::J => 'J',
            Kind::L => 'L',
            Kind::O => 'O',
            Kind::S => 'S',
            Kind::T => 'T',
            Kind::Z => 'Z',
        }
    }

    /// Catalog pattern for this kind, in its spawn orientation.
    pub fn shape(self) -> Pattern {
        let rows = match self {
            Kind::I => [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]],
            Kind::J => [[0, 0, 0, 0], [1, 1, 1, 0], [0, 0, 1, 0], [0, 0, 0, 0]],
            Kind::L => [[0, 0, 0, 0], [0, 1, 1, 1], [0, 1, 0, 0], [0, 0, 0, 0]],
            Kind::O => [[0, 0, 0, 0], [0, 1, 1, 0], [0, 1, 1, 0], [0, 0, 0, 0]],
            Kind::S => [[0, 0, 0, 0], [0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0]],
            Kind::T => [[0, 0, 0, 0], [1, 1, 1, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
            Kind::Z => [[0, 0, 0, 0], [1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0]],
        };
        Pattern::from_mask(self, rows)
    }
}

impl Cell {
    /// 0 for an empty cell, otherwise the code of the kind that filled it.
    pub fn code(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Filled(kind) => kind.code(),
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Cell::Empty),
            n => Kind::from_index(n as usize - 1).map(Cell::Filled),
        }
    }

    pub fn is_filled(self) -> bool {
        self != Cell::Empty
    }
}

// ============================================================================
// Pattern
// ============================================================================

/// A 4x4 block of cells describing one orientation of a piece.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Pattern {
    cells: [[Cell; PATTERN_SIZE]; PATTERN_SIZE],
}

impl Pattern {
    fn from_mask(kind: Kind, mask: [[u8; PATTERN_SIZE]; PATTERN_SIZE]) -> Self {
        let mut cells = [[Cell::Empty; PATTERN_SIZE]; PATTERN_SIZE];
        for (row, bits) in mask.iter().enumerate() {
            for (col, bit) in bits.iter().enumerate() {
                if *bit != 0 {
                    cells[row][col] = Cell::Filled(kind);
                }
            }
        }
        Self { cells }
    }

    pub fn cells(&self) -> &[[Cell; PATTERN_SIZE]; PATTERN_SIZE] {
        &self.cells
    }

    /// Non-empty cells as `(row, col, cell)`, scanned row by row.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, line)| {
            line.iter()
                .enumerate()
                .filter(|(_, cell)| cell.is_filled())
                .map(move |(col, cell)| (row, col, *cell))
        })
    }

    pub fn rotated(&self, direction: Rotation) -> Self {
        let mut next = *self;
        match direction {
            Rotation::Clockwise => {
                next.transpose();
                next.reverse_rows();
            }
            Rotation::CounterClockwise => {
                next.reverse_rows();
                next.transpose();
            }
        }
        next
    }

    fn transpose(&mut self) {
        for row in 0..PATTERN_SIZE {
            for col in (row + 1)..PATTERN_SIZE {
                let upper = self.cells[row][col];
                self.cells[row][col] = self.cells[col][row];
                self.cells[col][row] = upper;
            }
        }
    }

    fn reverse_rows(&mut self) {
        for line in self.cells.iter_mut() {
            line.reverse();
        }
    }
}

// ============================================================================
// Active Piece
// ============================================================================

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Piece {
    pub kind: Kind,
    /// World coordinate of the pattern's top-left corner.
    pub position: Position,
    pub pattern: Pattern,
}

impl Piece {
    pub fn spawn(kind: Kind) -> Self {
        Self::new_at(kind, SPAWN_X, SPAWN_Y)
    }

    pub fn new_at(kind: Kind, x: i16, y: i16) -> Self {
        Self {
            kind,
            position: Position { x, y },
            pattern: kind.shape(),
        }
    }

    /// World positions of every occupied cell, together with the cell.
    pub fn blocks(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.pattern.occupied().map(move |(row, col, cell)| {
            (
                Position {
                    x: self.position.x + col as i16,
                    y: self.position.y + row as i16,
                },
                cell,
            )
        })
    }

    pub fn moved(&self, dx: i16, dy: i16) -> Self {
        Self {
            kind: self.kind,
            position: Position {
                x: self.position.x + dx,
                y: self.position.y + dy,
            },
            pattern: self.pattern,
        }
    }

    pub fn rotated(&self, direction: Rotation) -> Self {
        Self {
            kind: self.kind,
            position: self.position,
            pattern: self.pattern.rotated(direction),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_rotations_restore_every_pattern() {
        for kind in Kind::ALL {
            for direction in [Rotation::Clockwise, Rotation::CounterClockwise] {
                let original = kind.shape();
                let mut pattern = original;
                for _ in 0..4 {
                    pattern = pattern.rotated(direction);
                }
                assert_eq!(pattern, original, "{:?} {:?}", kind, direction);
            }
        }
    }

    #[test]
    fn clockwise_then_counter_clockwise_is_identity() {
        for kind in Kind::ALL {
            let original = kind.shape();
            let back = original
                .rotated(Rotation::Clockwise)
                .rotated(Rotation::CounterClockwise);
            assert_eq!(back, original);
        }
    }

    #[test]
    fn clockwise_turns_horizontal_i_vertical() {
        let rotated = Kind::I.shape().rotated(Rotation::Clockwise);
        let cells: Vec<_> = rotated.occupied().map(|(r, c, _)| (r, c)).collect();
        assert_eq!(cells, vec![(0, 2), (1, 2), (2, 2), (3, 2)]);
    }

    #[test]
    fn every_shape_has_four_cells_of_its_own_code() {
        for kind in Kind::ALL {
            let cells: Vec<_> = kind.shape().occupied().collect();
            assert_eq!(cells.len(), 4);
            assert!(cells.iter().all(|(_, _, cell)| cell.code() == kind.code()));
        }
    }

    #[test]
    fn cell_codes_round_trip_through_kinds() {
        assert_eq!(Cell::from_code(0), Some(Cell::Empty));
        assert_eq!(Cell::from_code(4), Some(Cell::Filled(Kind::O)));
        assert_eq!(Cell::from_code(8), None);
    }
}
