//! Chess piece representation.
//!
//! A piece is a tagged pair of [`PieceKind`] and [`Color`]; board cells hold
//! `Option<Piece>` so an empty square is simply `None`.

use crate::Color;

/// The six kinds of chess pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    King = 0,
    Queen = 1,
    Rook = 2,
    Bishop = 3,
    Knight = 4,
    Pawn = 5,
}

impl PieceKind {
    /// All piece kinds in order.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::King,
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Pawn,
    ];

    /// Returns true for the long-range sliding pieces (bishop, rook, queen).
    #[inline]
    pub const fn is_slider(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)
    }

    /// Returns the lowercase FEN letter for this kind.
    pub const fn letter(self) -> char {
        match self {
            PieceKind::King => 'k',
            PieceKind::Queen => 'q',
            PieceKind::Rook => 'r',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'n',
            PieceKind::Pawn => 'p',
        }
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PieceKind::King => "King",
            PieceKind::Queen => "Queen",
            PieceKind::Rook => "Rook",
            PieceKind::Bishop => "Bishop",
            PieceKind::Knight => "Knight",
            PieceKind::Pawn => "Pawn",
        };
        write!(f, "{}", name)
    }
}

/// A piece on the board: a kind belonging to a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    /// Creates a piece of the given kind and color.
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Piece { kind, color }
    }

    /// Parses a FEN piece letter. Uppercase is White, lowercase is Black.
    pub const fn from_fen_char(c: char) -> Option<Self> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'k' => PieceKind::King,
            'q' => PieceKind::Queen,
            'r' => PieceKind::Rook,
            'b' => PieceKind::Bishop,
            'n' => PieceKind::Knight,
            'p' => PieceKind::Pawn,
            _ => return None,
        };
        Some(Piece { kind, color })
    }

    /// Returns the FEN letter for this piece.
    pub const fn to_fen_char(self) -> char {
        match self.color {
            Color::White => self.kind.letter().to_ascii_uppercase(),
            Color::Black => self.kind.letter(),
        }
    }

    /// Returns true if this piece has the given kind.
    #[inline]
    pub const fn is(self, kind: PieceKind) -> bool {
        self.kind as u8 == kind as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fen_char_roundtrip() {
        for kind in PieceKind::ALL {
            for color in [Color::White, Color::Black] {
                let piece = Piece::new(kind, color);
                assert_eq!(Piece::from_fen_char(piece.to_fen_char()), Some(piece));
            }
        }
    }

    #[test]
    fn from_fen_char_cases() {
        assert_eq!(
            Piece::from_fen_char('P'),
            Some(Piece::new(PieceKind::Pawn, Color::White))
        );
        assert_eq!(
            Piece::from_fen_char('k'),
            Some(Piece::new(PieceKind::King, Color::Black))
        );
        assert_eq!(Piece::from_fen_char('x'), None);
        assert_eq!(Piece::from_fen_char('1'), None);
    }

    #[test]
    fn is_slider() {
        assert!(PieceKind::Bishop.is_slider());
        assert!(PieceKind::Rook.is_slider());
        assert!(PieceKind::Queen.is_slider());
        assert!(!PieceKind::King.is_slider());
        assert!(!PieceKind::Knight.is_slider());
        assert!(!PieceKind::Pawn.is_slider());
    }

    #[test]
    fn is_kind() {
        let piece = Piece::new(PieceKind::Rook, Color::Black);
        assert!(piece.is(PieceKind::Rook));
        assert!(!piece.is(PieceKind::Queen));
    }
}
