//! Position state: board, side statuses, turn, and en-passant target.

use crate::{threats, Board, SideState};
use chess_core::{Color, Fen, FenError, Piece, PieceKind, Square};
use thiserror::Error;

/// Errors that can occur when loading a position.
///
/// All variants are fatal: a failed load yields no position at all.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PositionError {
    #[error(transparent)]
    Fen(#[from] FenError),

    #[error("expected exactly one {color} king, found {count}")]
    KingCount { color: Color, count: usize },
}

/// A complete position: the grid plus everything needed to judge legality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub(crate) board: Board,
    pub(crate) sides: [SideState; 2],
    pub(crate) side_to_move: Color,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
}

impl Position {
    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        Self::from_fen(Fen::STARTPOS).expect("STARTPOS is valid")
    }

    /// Loads a position from a six-field FEN string.
    ///
    /// Fails on any malformed field and when either side does not have
    /// exactly one king; a partially loaded position is never returned.
    pub fn from_fen(fen: &str) -> Result<Self, PositionError> {
        let fen = Fen::parse(fen)?;
        let board = Board::from_placement(&fen.placement);

        let white_king = Self::locate_king(&board, Color::White)?;
        let black_king = Self::locate_king(&board, Color::Black)?;

        let mut white = SideState::new(white_king, fen.white_kingside, fen.white_queenside);
        let mut black = SideState::new(black_king, fen.black_kingside, fen.black_queenside);
        Self::sanitize_castling(&board, Color::White, &mut white);
        Self::sanitize_castling(&board, Color::Black, &mut black);

        let mut position = Position {
            board,
            sides: [white, black],
            side_to_move: fen.active,
            en_passant: fen.en_passant,
            halfmove_clock: fen.halfmove_clock,
            fullmove_number: fen.fullmove_number,
        };
        position.refresh_check();
        Ok(position)
    }

    fn locate_king(board: &Board, color: Color) -> Result<Square, PositionError> {
        let count = board.count(PieceKind::King, color);
        match board.king_square(color) {
            Some(sq) if count == 1 => Ok(sq),
            _ => Err(PositionError::KingCount { color, count }),
        }
    }

    /// Revokes any loaded castling right the placement cannot back: the king
    /// must stand on its home square and the wing's rook on its corner. A
    /// right granted by the rights field but contradicted by the placement
    /// is treated as already lost.
    fn sanitize_castling(board: &Board, color: Color, side: &mut SideState) {
        let (king_home, a_corner, h_corner) = match color {
            Color::White => (Square::E1, Square::A1, Square::H1),
            Color::Black => (Square::E8, Square::A8, Square::H8),
        };
        if side.king != king_home {
            side.revoke_both();
            return;
        }
        let rook = Some(Piece::new(PieceKind::Rook, color));
        if board.piece_at(a_corner) != rook {
            side.revoke_queenside();
        }
        if board.piece_at(h_corner) != rook {
            side.revoke_kingside();
        }
    }

    /// Returns the board.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the status of the given side.
    #[inline]
    pub fn side(&self, color: Color) -> &SideState {
        &self.sides[color.index()]
    }

    #[inline]
    pub(crate) fn side_mut(&mut self, color: Color) -> &mut SideState {
        &mut self.sides[color.index()]
    }

    /// Returns the side to move.
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Returns the current en-passant target square, if any.
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Returns the half-move clock.
    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Returns the full-move number.
    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Returns true if the given side's king is currently attacked.
    #[inline]
    pub fn is_check(&self, color: Color) -> bool {
        self.side(color).in_check
    }

    /// Recomputes both kings' squares by full-board scan and both sides'
    /// check flags from the opposing attack sets.
    ///
    /// Called after every applied move; queries never rely on stale king
    /// coordinates across turns.
    pub(crate) fn refresh_check(&mut self) {
        for color in [Color::White, Color::Black] {
            if let Some(king) = self.board.king_square(color) {
                self.side_mut(color).king = king;
            }
        }
        for color in [Color::White, Color::Black] {
            let enemy = threats::attacked_squares(&self.board, color.opposite());
            let king = self.side(color).king;
            self.side_mut(color).in_check = enemy.contains(&king);
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}
