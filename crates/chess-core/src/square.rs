//! Board square representation.

use std::fmt;

/// A square on the chess board, indexed 0-63.
///
/// Squares use little-endian rank-file mapping: a1 = 0, b1 = 1, ..., h8 = 63.
/// File 0 is the a-file and rank 0 is White's back rank; callers that present
/// the board from Black's side of the grid translate at the edge.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Creates a square from file and rank indices (both 0-7).
    #[inline]
    pub const fn new(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Square(rank * 8 + file))
        } else {
            None
        }
    }

    /// Creates a square from index (0-63).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Square(index))
        } else {
            None
        }
    }

    /// Parses a square from its name in algebraic notation (e.g., "e4").
    pub const fn from_name(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        Self::new(file, rank)
    }

    /// Returns the index (0-63).
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Returns the file index (0 = a-file, 7 = h-file).
    #[inline]
    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    /// Returns the rank index (0 = rank 1, 7 = rank 8).
    #[inline]
    pub const fn rank(self) -> u8 {
        self.0 / 8
    }

    /// Returns the square displaced by the given file and rank deltas, or
    /// `None` if that would leave the board.
    #[inline]
    pub const fn offset(self, file_delta: i8, rank_delta: i8) -> Option<Self> {
        let file = self.file() as i8 + file_delta;
        let rank = self.rank() as i8 + rank_delta;
        if file < 0 || rank < 0 {
            return None;
        }
        Self::new(file as u8, rank as u8)
    }

    /// Returns the square name in algebraic notation.
    pub fn name(self) -> String {
        let file = (b'a' + self.file()) as char;
        let rank = (b'1' + self.rank()) as char;
        format!("{}{}", file, rank)
    }

    /// Iterates over all 64 squares, a1 through h8.
    pub fn all() -> impl Iterator<Item = Square> {
        (0u8..64).map(Square)
    }

    // Squares referenced by the castling rules.
    pub const A1: Square = Square(0);
    pub const B1: Square = Square(1);
    pub const C1: Square = Square(2);
    pub const D1: Square = Square(3);
    pub const E1: Square = Square(4);
    pub const F1: Square = Square(5);
    pub const G1: Square = Square(6);
    pub const H1: Square = Square(7);
    pub const A8: Square = Square(56);
    pub const B8: Square = Square(57);
    pub const C8: Square = Square(58);
    pub const D8: Square = Square(59);
    pub const E8: Square = Square(60);
    pub const F8: Square = Square(61);
    pub const G8: Square = Square(62);
    pub const H8: Square = Square(63);
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.name())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_and_accessors() {
        let e4 = Square::new(4, 3).unwrap();
        assert_eq!(e4.file(), 4);
        assert_eq!(e4.rank(), 3);
        assert_eq!(e4.index(), 28);
        assert_eq!(Square::new(8, 0), None);
        assert_eq!(Square::new(0, 8), None);
    }

    #[test]
    fn from_name() {
        assert_eq!(Square::from_name("a1"), Some(Square::A1));
        assert_eq!(Square::from_name("e4"), Square::new(4, 3));
        assert_eq!(Square::from_name("h8"), Some(Square::H8));
        assert_eq!(Square::from_name("i1"), None);
        assert_eq!(Square::from_name("a9"), None);
        assert_eq!(Square::from_name(""), None);
        assert_eq!(Square::from_name("e44"), None);
    }

    #[test]
    fn name_roundtrip() {
        for sq in Square::all() {
            assert_eq!(Square::from_name(&sq.name()), Some(sq));
        }
    }

    #[test]
    fn offset() {
        let e4 = Square::from_name("e4").unwrap();
        assert_eq!(e4.offset(0, 1), Square::from_name("e5"));
        assert_eq!(e4.offset(-1, -1), Square::from_name("d3"));
        assert_eq!(Square::A1.offset(-1, 0), None);
        assert_eq!(Square::H8.offset(0, 1), None);
    }

    #[test]
    fn all_covers_board() {
        assert_eq!(Square::all().count(), 64);
    }
}
