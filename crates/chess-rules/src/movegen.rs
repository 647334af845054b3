//! Legal move generation.
//!
//! Candidates come from the same directional logic as threat computation
//! (pawns excepted: pushes and captures differ), then pass a legality filter
//! that simulates each candidate on a scratch copy of the board and rejects
//! any that leave the mover's own king attacked. The live position is never
//! mutated by a query.

use crate::{threats, Board, Position};
use chess_core::{Color, Piece, PieceKind, Square};

/// Returns every destination the piece on `from` may legally move to this
/// turn.
///
/// Empty if the square holds no piece, the piece belongs to the side not on
/// move, or no destination survives the legality filter. Castling
/// destinations are included for the king. No generation order is promised.
pub fn legal_moves(position: &Position, from: Square) -> Vec<Square> {
    let piece = match position.board.piece_at(from) {
        Some(p) => p,
        None => return Vec::new(),
    };
    if piece.color != position.side_to_move {
        return Vec::new();
    }

    let mut moves: Vec<Square> = if piece.is(PieceKind::Pawn) {
        pawn_candidates(position, from, piece.color)
    } else {
        threats::attacks_from(&position.board, from, piece)
            .into_iter()
            .collect()
    };

    moves.retain(|&to| is_legal(position, from, to));

    if piece.is(PieceKind::King) {
        moves.extend(castling_destinations(position, piece.color));
    }

    moves
}

/// Destinations from `legal_moves(from)` that sit on the far rank and will
/// trigger promotion of the pawn on `from`.
pub fn promotion_squares(position: &Position, from: Square) -> Vec<Square> {
    match position.board.piece_at(from) {
        Some(p) if p.is(PieceKind::Pawn) => {
            let far_rank = p.color.promotion_rank();
            legal_moves(position, from)
                .into_iter()
                .filter(|to| to.rank() == far_rank)
                .collect()
        }
        _ => Vec::new(),
    }
}

/// Pseudo-legal pawn candidates: capture diagonals holding an enemy piece or
/// the en-passant target, plus forward pushes.
fn pawn_candidates(position: &Position, from: Square, color: Color) -> Vec<Square> {
    let mut candidates = Vec::new();

    for to in threats::pawn_diagonals(from, color) {
        let capturable = match position.board.piece_at(to) {
            Some(target) => target.color != color,
            None => position.en_passant == Some(to),
        };
        if capturable {
            candidates.push(to);
        }
    }

    let dir = color.pawn_direction();
    if let Some(one) = from.offset(0, dir) {
        if position.board.is_empty(one) {
            candidates.push(one);
            if from.rank() == color.pawn_rank() {
                if let Some(two) = one.offset(0, dir) {
                    if position.board.is_empty(two) {
                        candidates.push(two);
                    }
                }
            }
        }
    }

    candidates
}

/// Legality filter for one candidate destination.
fn is_legal(position: &Position, from: Square, to: Square) -> bool {
    match position.board.piece_at(to) {
        // own piece blocks the destination
        Some(target) if target.color == position.side_to_move => return false,
        // king capture is never a realizable move
        Some(target) if target.is(PieceKind::King) => return false,
        _ => {}
    }
    !leaves_king_attacked(position, from, to)
}

/// Simulates the candidate on a scratch board and reports whether the
/// mover's king ends up attacked. Pure: the position is untouched and no
/// state needs restoring afterwards.
fn leaves_king_attacked(position: &Position, from: Square, to: Square) -> bool {
    let board = simulate(position, from, to);
    let us = position.side_to_move;
    match board.king_square(us) {
        Some(king) => threats::attacked_squares(&board, us.opposite()).contains(&king),
        None => false,
    }
}

/// Applies a candidate relocation to a copy of the board, including the
/// passed-pawn removal of an en-passant capture. Returns the new board.
pub(crate) fn simulate(position: &Position, from: Square, to: Square) -> Board {
    let mut board = position.board.clone();
    if let Some(piece) = board.piece_at(from) {
        if piece.is(PieceKind::Pawn) && position.en_passant == Some(to) {
            if let Some(passed) = to.offset(0, -piece.color.pawn_direction()) {
                board.set(passed, None);
            }
        }
    }
    board.relocate(from, to);
    board
}

/// Returns the castling destination squares currently available to `color`'s
/// king, recomputed on every call.
pub fn castling_destinations(position: &Position, color: Color) -> Vec<Square> {
    let mut destinations = Vec::new();
    if castling_possible(position, color, true) {
        destinations.push(match color {
            Color::White => Square::G1,
            Color::Black => Square::G8,
        });
    }
    if castling_possible(position, color, false) {
        destinations.push(match color {
            Color::White => Square::C1,
            Color::Black => Square::C8,
        });
    }
    destinations
}

/// Returns true if `color` may castle to the given wing right now.
///
/// Requires the eligibility flag, no current check, an unmoved king and an
/// unmoved/uncaptured rook on the relevant corner, empty squares strictly
/// between king and rook, and an unattacked king path (f/g kingside, d/c
/// queenside). The king and rook must actually stand on their home squares;
/// the flags alone are not trusted.
pub fn castling_possible(position: &Position, color: Color, kingside: bool) -> bool {
    let side = position.side(color);

    let king_home = match color {
        Color::White => Square::E1,
        Color::Black => Square::E8,
    };
    let (rook_home, _) = rook_castling_squares(color, kingside);
    if side.king != king_home
        || position.board.piece_at(rook_home) != Some(Piece::new(PieceKind::Rook, color))
    {
        return false;
    }

    if kingside {
        if !side.can_castle_kingside()
            || side.in_check
            || side.king_moved
            || side.h_rook_moved
            || side.h_rook_captured
        {
            return false;
        }
    } else if !side.can_castle_queenside()
        || side.in_check
        || side.king_moved
        || side.a_rook_moved
        || side.a_rook_captured
    {
        return false;
    }

    let (between, king_path): (&[Square], &[Square]) = match (color, kingside) {
        (Color::White, true) => (&[Square::F1, Square::G1], &[Square::F1, Square::G1]),
        (Color::White, false) => (
            &[Square::B1, Square::C1, Square::D1],
            &[Square::D1, Square::C1],
        ),
        (Color::Black, true) => (&[Square::F8, Square::G8], &[Square::F8, Square::G8]),
        (Color::Black, false) => (
            &[Square::B8, Square::C8, Square::D8],
            &[Square::D8, Square::C8],
        ),
    };

    if between.iter().any(|&sq| !position.board.is_empty(sq)) {
        return false;
    }

    let enemy = threats::attacked_squares(&position.board, color.opposite());
    king_path.iter().all(|sq| !enemy.contains(sq))
}

/// The rook relocation performed by a castling move on the given wing.
pub(crate) fn rook_castling_squares(color: Color, kingside: bool) -> (Square, Square) {
    match (color, kingside) {
        (Color::White, true) => (Square::H1, Square::F1),
        (Color::White, false) => (Square::A1, Square::D1),
        (Color::Black, true) => (Square::H8, Square::F8),
        (Color::Black, false) => (Square::A8, Square::D8),
    }
}
