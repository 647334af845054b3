//! Threat computation: the squares each piece attacks.
//!
//! Sliding pieces (bishop, rook, queen) project along direction rays, adding
//! every empty square passed through plus the first occupied square reached,
//! then stop. Knights, kings, and pawn capture diagonals add fixed offsets.
//! Pawns threaten only diagonally, never straight ahead.

use crate::Board;
use chess_core::{Color, Piece, PieceKind, Square};
use std::collections::BTreeSet;

/// Rook directions as (file, rank) deltas.
const ORTHOGONALS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Bishop directions as (file, rank) deltas.
const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Knight jump offsets.
const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// King step offsets.
const KING_STEPS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// Returns the set of squares attacked by `by`'s pieces on the given board.
///
/// Duplicates across multiple attackers coalesce through set semantics.
pub fn attacked_squares(board: &Board, by: Color) -> BTreeSet<Square> {
    let mut attacked = BTreeSet::new();
    for (sq, piece) in board.pieces() {
        if piece.color == by {
            collect_attacks(board, sq, piece, &mut attacked);
        }
    }
    attacked
}

/// Returns the squares attacked by a single piece standing on `from`.
pub(crate) fn attacks_from(board: &Board, from: Square, piece: Piece) -> BTreeSet<Square> {
    let mut attacked = BTreeSet::new();
    collect_attacks(board, from, piece, &mut attacked);
    attacked
}

/// The two capture diagonals ahead of a pawn, clipped to the board.
pub(crate) fn pawn_diagonals(from: Square, color: Color) -> impl Iterator<Item = Square> {
    let dir = color.pawn_direction();
    [(-1, dir), (1, dir)]
        .into_iter()
        .filter_map(move |(df, dr)| from.offset(df, dr))
}

fn collect_attacks(board: &Board, from: Square, piece: Piece, out: &mut BTreeSet<Square>) {
    match piece.kind {
        PieceKind::Pawn => out.extend(pawn_diagonals(from, piece.color)),
        PieceKind::Knight => step_attacks(from, &KNIGHT_JUMPS, out),
        PieceKind::King => step_attacks(from, &KING_STEPS, out),
        PieceKind::Bishop => ray_attacks(board, from, &DIAGONALS, out),
        PieceKind::Rook => ray_attacks(board, from, &ORTHOGONALS, out),
        PieceKind::Queen => {
            ray_attacks(board, from, &DIAGONALS, out);
            ray_attacks(board, from, &ORTHOGONALS, out);
        }
    }
}

fn step_attacks(from: Square, steps: &[(i8, i8)], out: &mut BTreeSet<Square>) {
    for &(df, dr) in steps {
        if let Some(sq) = from.offset(df, dr) {
            out.insert(sq);
        }
    }
}

fn ray_attacks(board: &Board, from: Square, directions: &[(i8, i8)], out: &mut BTreeSet<Square>) {
    for &(df, dr) in directions {
        let mut sq = from;
        while let Some(next) = sq.offset(df, dr) {
            out.insert(next);
            if !board.is_empty(next) {
                // first blocker is attacked, nothing beyond it
                break;
            }
            sq = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Fen;

    fn board(fen: &str) -> Board {
        let fen = Fen::parse(fen).unwrap();
        Board::from_placement(&fen.placement)
    }

    fn names(set: &BTreeSet<Square>) -> Vec<String> {
        set.iter().map(|sq| sq.name()).collect()
    }

    #[test]
    fn rook_rays_stop_at_blockers() {
        let b = board("8/8/8/3p4/8/3R1P2/8/4k2K w - - 0 1");
        let d3 = Square::from_name("d3").unwrap();
        let piece = b.piece_at(d3).unwrap();
        let attacks = attacks_from(&b, d3, piece);

        // Up the d-file through d4, including the blocking pawn on d5.
        assert!(attacks.contains(&Square::from_name("d4").unwrap()));
        assert!(attacks.contains(&Square::from_name("d5").unwrap()));
        assert!(!attacks.contains(&Square::from_name("d6").unwrap()));

        // Along the rank up to and including the friendly pawn on f3.
        assert!(attacks.contains(&Square::from_name("e3").unwrap()));
        assert!(attacks.contains(&Square::from_name("f3").unwrap()));
        assert!(!attacks.contains(&Square::from_name("g3").unwrap()));
    }

    #[test]
    fn bishop_covers_open_diagonals() {
        let b = board("8/8/8/8/4B3/8/8/k6K w - - 0 1");
        let e4 = Square::from_name("e4").unwrap();
        let attacks = attacks_from(&b, e4, b.piece_at(e4).unwrap());
        assert_eq!(attacks.len(), 13);
        assert!(attacks.contains(&Square::from_name("a8").unwrap()));
        assert!(attacks.contains(&Square::H1));
        assert!(!attacks.contains(&Square::from_name("e5").unwrap()));
    }

    #[test]
    fn knight_ignores_blockers() {
        let b = board("8/8/8/8/8/8/PPP5/N6K w - - 0 1");
        let a1 = Square::A1;
        let attacks = attacks_from(&b, a1, b.piece_at(a1).unwrap());
        assert_eq!(names(&attacks), vec!["c2", "b3"]);
    }

    #[test]
    fn pawn_threatens_only_diagonals() {
        let b = board("8/8/8/8/8/4P3/8/k6K w - - 0 1");
        let e3 = Square::from_name("e3").unwrap();
        let attacks = attacks_from(&b, e3, b.piece_at(e3).unwrap());
        assert_eq!(names(&attacks), vec!["d4", "f4"]);

        let b = board("8/4p3/8/8/8/8/8/k6K w - - 0 1");
        let e7 = Square::from_name("e7").unwrap();
        let attacks = attacks_from(&b, e7, b.piece_at(e7).unwrap());
        assert_eq!(names(&attacks), vec!["d6", "f6"]);
    }

    #[test]
    fn pawn_diagonals_clip_at_edge() {
        let attacks: Vec<Square> = pawn_diagonals(Square::from_name("a2").unwrap(), Color::White)
            .collect();
        assert_eq!(attacks, vec![Square::from_name("b3").unwrap()]);
    }

    #[test]
    fn startpos_attack_set() {
        let b = board(Fen::STARTPOS);
        let attacked = attacked_squares(&b, Color::White);
        // Whole of rank 3 is covered by the pawn wall.
        for file in 0..8u8 {
            let sq = Square::new(file, 2).unwrap();
            assert!(attacked.contains(&sq), "rank-3 square {} uncovered", sq);
        }
        // Nothing beyond rank 3 except knight squares already on it.
        assert!(!attacked.contains(&Square::from_name("e4").unwrap()));
        // Back-rank pieces defend their neighbors; duplicates collapse.
        assert!(attacked.contains(&Square::from_name("e2").unwrap()));
    }

    #[test]
    fn queen_combines_rook_and_bishop() {
        let b = board("8/8/8/8/3Q4/8/8/k6K w - - 0 1");
        let d4 = Square::from_name("d4").unwrap();
        let queen = attacks_from(&b, d4, b.piece_at(d4).unwrap());
        assert_eq!(queen.len(), 27);
    }
}
