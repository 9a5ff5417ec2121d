//! Placement checks for a candidate piece.
//!
//! Every predicate takes the candidate as built by [`Piece::moved`] or
//! [`Piece::rotated`]; callers commit the candidate only when it does not
//! collide.

use crate::piece::Piece;
use crate::playfield::{Playfield, COLS, ROWS};

const LAST_ROW: i16 = ROWS as i16 - 1;
const LAST_COL: i16 = COLS as i16 - 1;

/// True if the piece reaches below the floor or overlaps a locked cell.
///
/// Cells on row 0 or above it never hit locked cells, so a piece entering the
/// field can only be stopped by the floor. Cells outside the side walls are
/// left to [`collides_with_bounds`].
pub fn collides_with_locked(field: &Playfield, piece: &Piece) -> bool {
    piece.blocks().any(|(pos, _)| {
        if pos.y > LAST_ROW {
            return true;
        }
        pos.y > 0
            && (0..=LAST_COL).contains(&pos.x)
            && field.is_occupied(pos.y as usize, pos.x as usize)
    })
}

/// True if the piece reaches below the floor or past either side wall.
pub fn collides_with_bounds(piece: &Piece) -> bool {
    piece
        .blocks()
        .any(|(pos, _)| pos.y > LAST_ROW || pos.x < 0 || pos.x > LAST_COL)
}

pub fn collides(field: &Playfield, piece: &Piece) -> bool {
    collides_with_locked(field, piece) || collides_with_bounds(piece)
}
