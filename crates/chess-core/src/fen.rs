//! FEN (Forsyth-Edwards Notation) position parsing.
//!
//! This is the engine's only position-import path. Parsing is strict: any
//! malformed field is a fatal initialization error and no partially parsed
//! value is produced.

use crate::{Color, Square};
use thiserror::Error;

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 6 fields, got {0}")]
    FieldCount(usize),

    #[error("invalid piece placement: {0}")]
    PiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    ActiveColor(String),

    #[error("invalid castling rights: unrecognized character '{0}'")]
    CastlingRights(char),

    #[error("invalid en passant target: '{0}'")]
    EnPassantTarget(String),

    #[error("invalid half-move clock: '{0}'")]
    HalfmoveClock(String),

    #[error("invalid full-move number: '{0}'")]
    FullmoveNumber(String),
}

/// A validated FEN record.
///
/// The piece-placement field is kept as its validated string form; the other
/// five fields are parsed into typed values. Consumers walk the placement
/// rank by rank (rank 8 first, ranks separated by '/').
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fen {
    /// Piece placement, e.g. "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR".
    pub placement: String,
    /// The side to move.
    pub active: Color,
    /// White's kingside castling right.
    pub white_kingside: bool,
    /// White's queenside castling right.
    pub white_queenside: bool,
    /// Black's kingside castling right.
    pub black_kingside: bool,
    /// Black's queenside castling right.
    pub black_queenside: bool,
    /// En-passant target square, if any.
    pub en_passant: Option<Square>,
    /// Half-move clock (moves since the last pawn advance or capture).
    pub halfmove_clock: u32,
    /// Full-move number (starts at 1, increments after Black's move).
    pub fullmove_number: u32,
}

impl Fen {
    /// The standard starting position.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses a six-field FEN string.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(FenError::FieldCount(fields.len()));
        }

        Self::validate_placement(fields[0])?;

        let active = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::ActiveColor(other.to_string())),
        };

        let mut white_kingside = false;
        let mut white_queenside = false;
        let mut black_kingside = false;
        let mut black_queenside = false;
        if fields[2] != "-" {
            for c in fields[2].chars() {
                match c {
                    'K' => white_kingside = true,
                    'Q' => white_queenside = true,
                    'k' => black_kingside = true,
                    'q' => black_queenside = true,
                    other => return Err(FenError::CastlingRights(other)),
                }
            }
        }

        let en_passant = if fields[3] == "-" {
            None
        } else {
            match Square::from_name(fields[3]) {
                Some(sq) => Some(sq),
                None => return Err(FenError::EnPassantTarget(fields[3].to_string())),
            }
        };

        let halfmove_clock = fields[4]
            .parse::<u32>()
            .map_err(|_| FenError::HalfmoveClock(fields[4].to_string()))?;

        let fullmove_number = fields[5]
            .parse::<u32>()
            .map_err(|_| FenError::FullmoveNumber(fields[5].to_string()))?;

        Ok(Fen {
            placement: fields[0].to_string(),
            active,
            white_kingside,
            white_queenside,
            black_kingside,
            black_queenside,
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    fn validate_placement(placement: &str) -> Result<(), FenError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::PiecePlacement(format!(
                "expected 8 ranks, got {}",
                ranks.len()
            )));
        }

        for (i, rank) in ranks.iter().enumerate() {
            let mut width = 0u32;
            for c in rank.chars() {
                match c {
                    '1'..='8' => width += c.to_digit(10).unwrap_or(0),
                    _ if crate::Piece::from_fen_char(c).is_some() => width += 1,
                    _ => {
                        return Err(FenError::PiecePlacement(format!(
                            "unrecognized character '{}' in rank {}",
                            c,
                            8 - i
                        )));
                    }
                }
            }
            if width != 8 {
                return Err(FenError::PiecePlacement(format!(
                    "rank {} describes {} squares, expected 8",
                    8 - i,
                    width
                )));
            }
        }

        Ok(())
    }
}

impl Default for Fen {
    fn default() -> Self {
        Self::parse(Self::STARTPOS).expect("STARTPOS is valid")
    }
}
