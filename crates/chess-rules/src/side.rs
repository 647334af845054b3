//! Per-side status and castling bookkeeping.

use chess_core::Square;

/// Status tracked for one side.
///
/// The two castling-eligibility flags are the authoritative gate consulted
/// before a castling move is generated. They are monotonic: there are revoke
/// methods but no way to re-grant a right within a game. The moved/captured
/// history flags record why a right was lost and are checked independently
/// by the castling rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SideState {
    /// The king's square, refreshed by full-board scan whenever threats are
    /// recomputed.
    pub king: Square,
    /// True if this side's king is currently attacked.
    pub in_check: bool,
    /// True once the king has moved.
    pub king_moved: bool,
    /// True once the a-file rook's home square has been vacated.
    pub a_rook_moved: bool,
    /// True once the h-file rook's home square has been vacated.
    pub h_rook_moved: bool,
    /// True once a capture landed on the a-file rook's home square.
    pub a_rook_captured: bool,
    /// True once a capture landed on the h-file rook's home square.
    pub h_rook_captured: bool,
    kingside_castling: bool,
    queenside_castling: bool,
}

impl SideState {
    /// Creates the state for a side whose king stands on `king`, with the
    /// given castling rights from the position string.
    pub(crate) fn new(king: Square, kingside: bool, queenside: bool) -> Self {
        SideState {
            king,
            in_check: false,
            king_moved: false,
            a_rook_moved: false,
            h_rook_moved: false,
            a_rook_captured: false,
            h_rook_captured: false,
            kingside_castling: kingside,
            queenside_castling: queenside,
        }
    }

    /// Returns true if this side still holds its kingside castling right.
    #[inline]
    pub fn can_castle_kingside(&self) -> bool {
        self.kingside_castling
    }

    /// Returns true if this side still holds its queenside castling right.
    #[inline]
    pub fn can_castle_queenside(&self) -> bool {
        self.queenside_castling
    }

    /// Permanently revokes the kingside castling right.
    pub(crate) fn revoke_kingside(&mut self) {
        self.kingside_castling = false;
    }

    /// Permanently revokes the queenside castling right.
    pub(crate) fn revoke_queenside(&mut self) {
        self.queenside_castling = false;
    }

    /// Permanently revokes both castling rights.
    pub(crate) fn revoke_both(&mut self) {
        self.kingside_castling = false;
        self.queenside_castling = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_side_state() {
        let side = SideState::new(Square::E1, true, false);
        assert_eq!(side.king, Square::E1);
        assert!(!side.in_check);
        assert!(side.can_castle_kingside());
        assert!(!side.can_castle_queenside());
        assert!(!side.king_moved);
        assert!(!side.a_rook_moved && !side.h_rook_moved);
        assert!(!side.a_rook_captured && !side.h_rook_captured);
    }

    #[test]
    fn revocation_is_permanent() {
        let mut side = SideState::new(Square::E8, true, true);
        side.revoke_kingside();
        assert!(!side.can_castle_kingside());
        assert!(side.can_castle_queenside());

        side.revoke_both();
        assert!(!side.can_castle_kingside());
        assert!(!side.can_castle_queenside());
    }
}
