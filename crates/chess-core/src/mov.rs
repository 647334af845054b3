//! Move representation.
//!
//! A move is an origin/destination pair. Special-move semantics (castling,
//! en passant, promotion) are derived by the engine from the position the
//! move is applied to, so no flags are carried here; the move log is plain
//! coordinate notation such as "e2e4".

use crate::Square;
use std::fmt;

/// An origin/destination pair in the engine's canonical frame.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    /// Creates a move from origin and destination squares.
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Move { from, to }
    }

    /// Parses coordinate notation (e.g., "e2e4").
    pub fn from_coord(s: &str) -> Option<Self> {
        if s.len() != 4 || !s.is_ascii() {
            return None;
        }
        let from = Square::from_name(&s[0..2])?;
        let to = Square::from_name(&s[2..4])?;
        Some(Move { from, to })
    }

    /// Returns the coordinate notation for this move.
    pub fn to_coord(self) -> String {
        format!("{}{}", self.from, self.to)
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_coord())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_coord())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coord_roundtrip() {
        let m = Move::from_coord("e2e4").unwrap();
        assert_eq!(m.from, Square::from_name("e2").unwrap());
        assert_eq!(m.to, Square::from_name("e4").unwrap());
        assert_eq!(m.to_coord(), "e2e4");
    }

    #[test]
    fn from_coord_rejects_malformed() {
        assert!(Move::from_coord("").is_none());
        assert!(Move::from_coord("e2").is_none());
        assert!(Move::from_coord("e2e").is_none());
        assert!(Move::from_coord("e2e4q").is_none());
        assert!(Move::from_coord("i2e4").is_none());
        assert!(Move::from_coord("e2e9").is_none());
    }

    #[test]
    fn debug_display() {
        let m = Move::from_coord("g1f3").unwrap();
        assert_eq!(format!("{:?}", m), "Move(g1f3)");
        assert_eq!(format!("{}", m), "g1f3");
    }
}
