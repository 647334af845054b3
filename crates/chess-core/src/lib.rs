//! Core types for chess.
//!
//! This crate provides the vocabulary shared by the rules engine:
//! - [`Color`] and [`Piece`] / [`PieceKind`] for piece identity
//! - [`Square`] for board coordinates
//! - [`Move`] for origin/destination pairs in coordinate notation
//! - [`Fen`] for parsing position-description strings

mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use fen::{Fen, FenError};
pub use mov::Move;
pub use piece::{Piece, PieceKind};
pub use square::Square;
