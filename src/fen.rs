//! Placement-string import and export.
//!
//! Only the first field of a FEN record (the piece placement) is read; side to
//! move, castling rights, en passant and clocks are ignored if present.

use tracing::{debug, warn};

use crate::board::BoardState;
use crate::error::ParseError;
use crate::types::{Piece, Square};

/// First whitespace-delimited field of a FEN record
fn placement_field(fen: &str) -> Option<&str> {
    fen.split_whitespace().next()
}

/// Strict import: every rank must be listed and cover exactly 8 squares.
pub fn parse_placement(fen: &str) -> Result<BoardState, ParseError> {
    let field = placement_field(fen).ok_or(ParseError::Empty)?;

    let rank_count = field.split('/').count();
    if rank_count != 8 {
        return Err(ParseError::RankCount(rank_count));
    }

    let mut board = BoardState::empty();
    let mut row = 0usize;
    let mut col = 0usize;
    for (index, ch) in field.char_indices() {
        match ch {
            '/' => {
                if col != 8 {
                    return Err(ParseError::RankLength { rank: row, squares: col });
                }
                row += 1;
                col = 0;
            }
            '1'..='8' => col += ch as usize - '0' as usize,
            _ => {
                let piece =
                    Piece::from_char(ch).ok_or(ParseError::InvalidCharacter { ch, index })?;
                if col < 8 {
                    board.set(Square::from_index((row * 8 + col) as u8), piece);
                }
                col += 1;
            }
        }
    }
    if col != 8 {
        return Err(ParseError::RankLength { rank: row, squares: col });
    }

    debug!(placement = field, "imported placement");
    Ok(board)
}

/// Best-effort import that never fails.
///
/// Rank separators are ignored and the position counter runs across the whole
/// string, so ranks of the wrong length shift every later piece. Unrecognized
/// characters are skipped without advancing, pieces past the last square are
/// dropped.
pub fn parse_placement_lenient(fen: &str) -> BoardState {
    let mut board = BoardState::empty();
    let Some(field) = placement_field(fen) else {
        return board;
    };

    let mut position = 0usize;
    for (index, ch) in field.char_indices() {
        if ch == '/' {
            continue;
        }
        if let Some(run) = ch.to_digit(10) {
            position += run as usize;
            continue;
        }
        match Piece::from_char(ch) {
            Some(piece) if position < Square::COUNT => {
                board.set(Square::from_index(position as u8), piece);
                position += 1;
            }
            Some(piece) => {
                warn!(%piece, position, "dropping piece placed past the last square");
                position += 1;
            }
            None => warn!(%ch, index, "skipping unrecognized placement character"),
        }
    }
    board
}

/// Export the placement field for `board`
pub fn to_placement(board: &BoardState) -> String {
    let mut out = String::new();

    for row in 0..8 {
        let mut empty_count = 0u8;

        for col in 0..8 {
            match board.piece_at_row_col(row, col) {
                Some(piece) => {
                    if empty_count > 0 {
                        out.push(char::from(b'0' + empty_count));
                        empty_count = 0;
                    }
                    out.push(piece.to_char());
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if row < 7 {
            out.push('/');
        }
    }

    out
}
