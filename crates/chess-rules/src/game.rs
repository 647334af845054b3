//! Game-state controller: turn sequencing, move application, and
//! termination detection.

use crate::{movegen, threats, Position, PositionError};
use chess_core::{Color, Move, Piece, PieceKind, Square};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt;

/// The lifecycle state of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// The side to move has at least one legal move.
    Active,
    /// The side to move is checkmated; the contained color is the winner.
    Checkmate(Color),
    /// The side to move has no legal move and is not in check.
    Stalemate,
}

impl GameState {
    /// Returns true if no further moves can be played.
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameState::Active)
    }
}

/// Errors returned when a move submission is rejected.
///
/// A rejected submission leaves the game completely unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The move is not legal in the current position.
    IllegalMove(String),
    /// The origin square holds a piece of the side not on move.
    OutOfTurn,
    /// The game has already ended.
    GameOver,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::IllegalMove(mv) => write!(f, "illegal move: {}", mv),
            GameError::OutOfTurn => write!(f, "it is not that side's turn"),
            GameError::GameOver => write!(f, "the game is over"),
        }
    }
}

impl Error for GameError {}

/// A running game: the live position, the move log, and the lifecycle state.
#[derive(Debug, Clone)]
pub struct Game {
    position: Position,
    start_fen: String,
    moves: Vec<Move>,
    state: GameState,
}

impl Game {
    /// Starts a game from the standard starting position.
    pub fn new() -> Self {
        let mut game = Game {
            position: Position::startpos(),
            start_fen: chess_core::Fen::STARTPOS.to_string(),
            moves: Vec::new(),
            state: GameState::Active,
        };
        game.state = game.evaluate_termination();
        game
    }

    /// Starts a game from an arbitrary position string.
    ///
    /// The lifecycle state is evaluated immediately, so a game may begin
    /// already checkmated or stalemated.
    pub fn from_fen(fen: &str) -> Result<Self, PositionError> {
        let position = Position::from_fen(fen)?;
        let mut game = Game {
            position,
            start_fen: fen.to_string(),
            moves: Vec::new(),
            state: GameState::Active,
        };
        game.state = game.evaluate_termination();
        Ok(game)
    }

    /// Submits a move. On success the move is applied, logged, and the turn
    /// passes; on failure nothing changes.
    pub fn try_move(&mut self, from: Square, to: Square) -> Result<(), GameError> {
        if self.state.is_terminal() {
            return Err(GameError::GameOver);
        }
        let piece = match self.position.board.piece_at(from) {
            Some(p) => p,
            None => {
                return Err(GameError::IllegalMove(Move::new(from, to).to_coord()));
            }
        };
        if piece.color != self.position.side_to_move {
            return Err(GameError::OutOfTurn);
        }
        if !movegen::legal_moves(&self.position, from).contains(&to) {
            return Err(GameError::IllegalMove(Move::new(from, to).to_coord()));
        }

        self.apply(from, to, piece);
        Ok(())
    }

    /// Applies an already validated move.
    fn apply(&mut self, from: Square, to: Square, piece: Piece) {
        let us = piece.color;
        let mut captured = self.position.board.piece_at(to).is_some();

        // Castling: a king travelling two files. The rook jump and the
        // right revocations happen here; the king relocation below is the
        // same as for any move.
        let castles = piece.is(PieceKind::King) && from.file().abs_diff(to.file()) == 2;
        if castles {
            let kingside = to.file() > from.file();
            let (rook_from, rook_to) = movegen::rook_castling_squares(us, kingside);
            self.position.board.relocate(rook_from, rook_to);
            let side = self.position.side_mut(us);
            side.king_moved = true;
            if kingside {
                side.h_rook_moved = true;
            } else {
                side.a_rook_moved = true;
            }
            side.revoke_both();
        }

        // En-passant capture: the passed pawn sits behind the target square.
        if piece.is(PieceKind::Pawn) && self.position.en_passant == Some(to) {
            if let Some(passed) = to.offset(0, -us.pawn_direction()) {
                self.position.board.set(passed, None);
                captured = true;
            }
        }

        self.position.board.relocate(from, to);

        // A double pawn push arms the en-passant target for exactly one
        // reply; any other move clears it.
        self.position.en_passant = if piece.is(PieceKind::Pawn)
            && from.rank() == us.pawn_rank()
            && from.file() == to.file()
            && from.rank().abs_diff(to.rank()) == 2
        {
            from.offset(0, us.pawn_direction())
        } else {
            None
        };

        self.update_castling_flags(from, to, piece, captured);

        // Auto-queen on reaching the far rank.
        if piece.is(PieceKind::Pawn) && to.rank() == us.promotion_rank() {
            self.position
                .board
                .set(to, Some(Piece::new(PieceKind::Queen, us)));
        }

        if piece.is(PieceKind::Pawn) || captured {
            self.position.halfmove_clock = 0;
        } else {
            self.position.halfmove_clock += 1;
        }
        if us == Color::Black {
            self.position.fullmove_number += 1;
        }

        self.moves.push(Move::new(from, to));
        self.position.side_to_move = us.opposite();
        self.position.refresh_check();
        self.state = self.evaluate_termination();
    }

    /// Square-keyed castling bookkeeping: vacating a king or rook home
    /// square marks it moved, a capture landing on a rook home square marks
    /// it captured. Either way the corresponding right is revoked for good.
    fn update_castling_flags(&mut self, from: Square, to: Square, piece: Piece, captured: bool) {
        if piece.is(PieceKind::King) {
            let side = self.position.side_mut(piece.color);
            side.king_moved = true;
            side.revoke_both();
        }

        if from == Square::A1 {
            let side = self.position.side_mut(Color::White);
            side.a_rook_moved = true;
            side.revoke_queenside();
        } else if from == Square::H1 {
            let side = self.position.side_mut(Color::White);
            side.h_rook_moved = true;
            side.revoke_kingside();
        } else if from == Square::A8 {
            let side = self.position.side_mut(Color::Black);
            side.a_rook_moved = true;
            side.revoke_queenside();
        } else if from == Square::H8 {
            let side = self.position.side_mut(Color::Black);
            side.h_rook_moved = true;
            side.revoke_kingside();
        }

        if !captured {
            return;
        }
        if to == Square::A1 {
            let side = self.position.side_mut(Color::White);
            side.a_rook_captured = true;
            side.revoke_queenside();
        } else if to == Square::H1 {
            let side = self.position.side_mut(Color::White);
            side.h_rook_captured = true;
            side.revoke_kingside();
        } else if to == Square::A8 {
            let side = self.position.side_mut(Color::Black);
            side.a_rook_captured = true;
            side.revoke_queenside();
        } else if to == Square::H8 {
            let side = self.position.side_mut(Color::Black);
            side.h_rook_captured = true;
            side.revoke_kingside();
        }
    }

    /// Classifies the position for the side now on move.
    fn evaluate_termination(&self) -> GameState {
        let us = self.position.side_to_move;
        let any_move = self
            .position
            .board
            .pieces()
            .filter(|(_, p)| p.color == us)
            .any(|(from, _)| !movegen::legal_moves(&self.position, from).is_empty());
        if any_move {
            GameState::Active
        } else if self.position.is_check(us) {
            GameState::Checkmate(us.opposite())
        } else {
            GameState::Stalemate
        }
    }

    /// Takes back the most recent move, if any, and returns it.
    ///
    /// Reconstruction replays the remaining log as plain relocations over
    /// the stored starting position. Captures and castling-right history do
    /// not come back, so the rebuilt position is an approximation kept only
    /// close enough for casual takebacks.
    pub fn undo_move(&mut self) -> Option<Move> {
        let undone = self.moves.pop()?;

        let mut position = Position::from_fen(&self.start_fen)
            .expect("start_fen was validated at construction");
        for mv in &self.moves {
            position.board.relocate(mv.from, mv.to);
            position.side_to_move = position.side_to_move.opposite();
        }
        position.refresh_check();
        self.position = position;
        self.state = self.evaluate_termination();
        Some(undone)
    }

    /// Returns the live position.
    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Returns a renderer-oriented snapshot of the board. Row 0 is rank 8.
    pub fn grid(&self) -> [[Option<Piece>; 8]; 8] {
        self.position.board.grid()
    }

    /// Returns the piece on the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.position.board.piece_at(sq)
    }

    /// Returns the side to move.
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move
    }

    /// Returns every legal destination for the piece on `from` this turn.
    pub fn legal_moves(&self, from: Square) -> Vec<Square> {
        movegen::legal_moves(&self.position, from)
    }

    /// Returns true if moving `from` to `to` would be accepted this turn.
    pub fn is_legal_move(&self, from: Square, to: Square) -> bool {
        !self.state.is_terminal() && movegen::legal_moves(&self.position, from).contains(&to)
    }

    /// Returns the legal destinations from `from` that promote the pawn
    /// standing there.
    pub fn promotion_squares(&self, from: Square) -> Vec<Square> {
        movegen::promotion_squares(&self.position, from)
    }

    /// Returns the set of squares `by` currently attacks.
    pub fn attacked_squares(&self, by: Color) -> BTreeSet<Square> {
        threats::attacked_squares(&self.position.board, by)
    }

    /// Returns true if the given side's king is attacked.
    #[inline]
    pub fn is_check(&self, color: Color) -> bool {
        self.position.is_check(color)
    }

    /// Returns the lifecycle state.
    #[inline]
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Returns the winner, if the game ended in checkmate.
    pub fn winner(&self) -> Option<Color> {
        match self.state {
            GameState::Checkmate(color) => Some(color),
            _ => None,
        }
    }

    /// Returns the moves played so far, oldest first.
    #[inline]
    pub fn move_log(&self) -> &[Move] {
        &self.moves
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
