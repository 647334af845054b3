//! Complete rules of chess on top of the primitives in `chess-core`.
//!
//! [`Game`] is the main entry point: it owns a [`Position`], validates and
//! applies moves, keeps the move log, and classifies checkmate and
//! stalemate. The lower layers are exposed for callers that want to query a
//! position directly, such as a board renderer highlighting legal
//! destinations or threatened squares.

mod board;
mod game;
pub mod movegen;
mod position;
mod side;
mod threats;

pub use board::Board;
pub use game::{Game, GameError, GameState};
pub use movegen::{castling_destinations, castling_possible, legal_moves, promotion_squares};
pub use position::{Position, PositionError};
pub use side::SideState;
pub use threats::attacked_squares;
