//! Fixed-length text snapshot of a board.
//!
//! One character per square in scan order: `'0'` for an empty square,
//! `PNBRQK` for White pieces and `pnbrqk` for Black ones.

use std::fmt;

use crate::board::BoardState;
use crate::error::CodecError;
use crate::types::{Color, Piece, Square};

pub const EMPTY_SQUARE: char = '0';
pub const SNAPSHOT_LEN: usize = 64;

/// Snapshot character for a square's contents
pub fn cell_to_char(cell: Option<&Piece>) -> char {
    cell.map_or(EMPTY_SQUARE, Piece::to_char)
}

pub fn encode(board: &BoardState) -> String {
    Square::all()
        .map(|sq| cell_to_char(board.piece_at(sq)))
        .collect()
}

/// Inverse of [`encode`] for every piece kind.
pub fn decode(snapshot: &str) -> Result<BoardState, CodecError> {
    let len = snapshot.chars().count();
    if len != SNAPSHOT_LEN {
        return Err(CodecError::Length(len));
    }

    let mut board = BoardState::empty();
    for (index, ch) in snapshot.chars().enumerate() {
        if ch == EMPTY_SQUARE {
            continue;
        }
        let piece = Piece::from_char(ch).ok_or(CodecError::InvalidCharacter { ch, index })?;
        board.set(Square::from_index(index as u8), piece);
    }
    Ok(board)
}

/// Occupancy and color of a snapshot character; `None` means empty.
///
/// Characters outside the snapshot alphabet read as empty.
pub fn classify(ch: char) -> Option<Color> {
    Piece::from_char(ch).map(|p| p.color)
}

/// A validated snapshot string
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Snapshot(String);

impl Snapshot {
    pub fn of(board: &BoardState) -> Self {
        Snapshot(encode(board))
    }

    pub fn parse(s: &str) -> Result<Self, CodecError> {
        // decode validates length and alphabet
        decode(s)?;
        Ok(Snapshot(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn char_at(&self, sq: Square) -> char {
        // Only ASCII is ever stored
        self.0.as_bytes()[sq.index()] as char
    }

    pub fn color_at(&self, sq: Square) -> Option<Color> {
        classify(self.char_at(sq))
    }

    pub fn to_board(&self) -> BoardState {
        let mut board = BoardState::empty();
        for sq in Square::all() {
            if let Some(piece) = Piece::from_char(self.char_at(sq)) {
                board.set(sq, piece);
            }
        }
        board
    }

    /// One row per line, top row first
    pub fn rows(&self) -> impl Iterator<Item = &str> {
        (0..8).map(move |row| &self.0[row * 8..row * 8 + 8])
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&BoardState> for Snapshot {
    fn from(board: &BoardState) -> Self {
        Snapshot::of(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::parse_placement;
    use crate::types::PieceKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn encode_starting_board() {
        let snapshot = encode(&BoardState::new());
        assert_eq!(snapshot.len(), SNAPSHOT_LEN);
        assert_eq!(&snapshot[0..8], "rnbqkbnr");
        assert_eq!(&snapshot[8..16], "pppppppp");
        assert_eq!(&snapshot[16..48], "0".repeat(32));
        assert_eq!(&snapshot[48..56], "PPPPPPPP");
        assert_eq!(&snapshot[56..64], "RNBQKBNR");
    }

    #[test]
    fn decode_restores_every_kind() {
        for fen in [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR",
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R",
            "8/8/8/3pP3/8/8/8/8",
            "8/8/8/8/8/8/8/8",
        ] {
            let board = parse_placement(fen).unwrap();
            assert_eq!(decode(&encode(&board)).unwrap(), board);
        }
    }

    #[test]
    fn decode_rejects_bad_snapshots() {
        assert_eq!(decode("0000"), Err(CodecError::Length(4)));
        let mut bad = "0".repeat(63);
        bad.push('x');
        assert_eq!(
            decode(&bad),
            Err(CodecError::InvalidCharacter { ch: 'x', index: 63 })
        );
    }

    #[test]
    fn classify_agrees_with_encode() {
        assert_eq!(classify(EMPTY_SQUARE), None);
        for kind in PieceKind::ALL {
            for color in [Color::White, Color::Black] {
                let ch = cell_to_char(Some(&Piece::new(color, kind)));
                assert_eq!(classify(ch), Some(color), "{ch}");
            }
        }
        assert_eq!(classify('z'), None);
    }

    #[test]
    fn snapshot_queries() {
        let board = BoardState::new();
        let snapshot = Snapshot::of(&board);
        let e2 = Square::from_algebraic("e2").unwrap();
        let e4 = Square::from_algebraic("e4").unwrap();
        assert_eq!(snapshot.char_at(e2), 'P');
        assert_eq!(snapshot.color_at(e2), Some(Color::White));
        assert_eq!(snapshot.color_at(e4), None);
        assert_eq!(snapshot.to_board(), board);
        assert_eq!(snapshot.rows().next(), Some("rnbqkbnr"));
        assert_eq!(Snapshot::parse(snapshot.as_str()), Ok(snapshot));
        assert!(Snapshot::parse("ppp").is_err());
    }
}
