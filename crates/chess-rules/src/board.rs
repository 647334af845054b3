//! The 8x8 piece grid.

use chess_core::{Color, Piece, PieceKind, Square};
use std::fmt;

/// The board: 64 cells, each holding an optional piece.
///
/// Cells are addressed through [`Square`]. `Board` carries no turn or rights
/// state; that lives in [`Position`](crate::Position).
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Piece>; 64],
}

impl Board {
    /// Creates a board with no pieces.
    pub const fn empty() -> Self {
        Board { cells: [None; 64] }
    }

    /// Builds a board from a FEN piece-placement field.
    ///
    /// The field must already have been validated by
    /// [`Fen::parse`](chess_core::Fen::parse); unrecognized characters are
    /// skipped rather than re-reported here.
    pub(crate) fn from_placement(placement: &str) -> Self {
        let mut board = Board::empty();
        for (i, rank_str) in placement.split('/').take(8).enumerate() {
            // FEN lists rank 8 first
            let rank = 7 - i as u8;
            let mut file = 0u8;
            for c in rank_str.chars() {
                if let Some(run) = c.to_digit(10) {
                    file += run as u8;
                } else if let Some(piece) = Piece::from_fen_char(c) {
                    if let Some(sq) = Square::new(file, rank) {
                        board.cells[sq.index() as usize] = Some(piece);
                    }
                    file += 1;
                }
            }
        }
        board
    }

    /// Returns the piece on the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.index() as usize]
    }

    /// Returns true if the given square holds no piece.
    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.cells[sq.index() as usize].is_none()
    }

    /// Sets or clears the given square.
    #[inline]
    pub(crate) fn set(&mut self, sq: Square, piece: Option<Piece>) {
        self.cells[sq.index() as usize] = piece;
    }

    /// Moves whatever sits on `from` to `to`, overwriting `to` and clearing
    /// `from`.
    pub(crate) fn relocate(&mut self, from: Square, to: Square) {
        self.cells[to.index() as usize] = self.cells[from.index() as usize];
        self.cells[from.index() as usize] = None;
    }

    /// Finds the king of the given color by full-board scan.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, p)| p.color == color && p.is(PieceKind::King))
            .map(|(sq, _)| sq)
    }

    /// Counts pieces of the given kind and color.
    pub fn count(&self, kind: PieceKind, color: Color) -> usize {
        self.pieces()
            .filter(|(_, p)| p.color == color && p.is(kind))
            .count()
    }

    /// Iterates over all occupied squares, a1 through h8.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    /// Returns a read-only snapshot of the grid.
    ///
    /// Row 0 is Black's back rank (rank 8), matching the orientation a board
    /// renderer draws from White's perspective.
    pub fn grid(&self) -> [[Option<Piece>; 8]; 8] {
        let mut grid = [[None; 8]; 8];
        for (sq, piece) in self.pieces() {
            grid[7 - sq.rank() as usize][sq.file() as usize] = Some(piece);
        }
        grid
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            for file in 0..8 {
                let cell = Square::new(file, rank).and_then(|sq| self.piece_at(sq));
                match cell {
                    Some(piece) => write!(f, "{}", piece.to_fen_char())?,
                    None => write!(f, ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Fen;

    fn startpos() -> Board {
        let fen = Fen::parse(Fen::STARTPOS).unwrap();
        Board::from_placement(&fen.placement)
    }

    #[test]
    fn startpos_placement() {
        let board = startpos();
        assert_eq!(
            board.piece_at(Square::E1),
            Some(Piece::new(PieceKind::King, Color::White))
        );
        assert_eq!(
            board.piece_at(Square::D8),
            Some(Piece::new(PieceKind::Queen, Color::Black))
        );
        assert_eq!(
            board.piece_at(Square::from_name("b2").unwrap()),
            Some(Piece::new(PieceKind::Pawn, Color::White))
        );
        assert!(board.is_empty(Square::from_name("e4").unwrap()));
        assert_eq!(board.pieces().count(), 32);
    }

    #[test]
    fn king_scan() {
        let board = startpos();
        assert_eq!(board.king_square(Color::White), Some(Square::E1));
        assert_eq!(board.king_square(Color::Black), Some(Square::E8));
        assert_eq!(Board::empty().king_square(Color::White), None);
    }

    #[test]
    fn relocate_overwrites_destination() {
        let mut board = startpos();
        let e2 = Square::from_name("e2").unwrap();
        let e7 = Square::from_name("e7").unwrap();
        board.relocate(e2, e7);
        assert!(board.is_empty(e2));
        assert_eq!(
            board.piece_at(e7),
            Some(Piece::new(PieceKind::Pawn, Color::White))
        );
        assert_eq!(board.pieces().count(), 31);
    }

    #[test]
    fn grid_orientation() {
        let grid = startpos().grid();
        // Row 0 is rank 8: Black's back rank.
        assert_eq!(grid[0][4], Some(Piece::new(PieceKind::King, Color::Black)));
        assert_eq!(grid[7][4], Some(Piece::new(PieceKind::King, Color::White)));
        assert_eq!(grid[4][4], None);
    }

    #[test]
    fn count_pieces() {
        let board = startpos();
        assert_eq!(board.count(PieceKind::Pawn, Color::White), 8);
        assert_eq!(board.count(PieceKind::King, Color::Black), 1);
        assert_eq!(board.count(PieceKind::Queen, Color::White), 1);
    }
}
