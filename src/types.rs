use std::fmt;

use tracing::{error, warn};

use crate::error::{ChessError, ChessResult};

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Uppercase letters are White (the first player), lowercase are Black.
    pub fn from_case(c: char) -> Option<Color> {
        if c.is_ascii_uppercase() {
            Some(Color::White)
        } else if c.is_ascii_lowercase() {
            Some(Color::Black)
        } else {
            None
        }
    }

    pub fn other_color(&self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Index into per-color tables
    pub fn index(&self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    pub fn to_human(&self) -> &str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_human())
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Case-insensitive letter lookup (`p`, `n`, `b`, `r`, `q`, `k`)
    pub fn from_char(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }

    /// Uppercase letter for the kind
    pub fn to_char(&self) -> char {
        match self {
            Self::Pawn => 'P',
            Self::Knight => 'N',
            Self::Bishop => 'B',
            Self::Rook => 'R',
            Self::Queen => 'Q',
            Self::King => 'K',
        }
    }

    /// Is the piece a sliding piece (one which can move multiple square in a given direction)
    pub fn is_sliding(&self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)
    }

    pub fn to_human(&self) -> &str {
        match self {
            Self::Pawn => "pawn",
            Self::Knight => "knight",
            Self::Bishop => "bishop",
            Self::Rook => "rook",
            Self::Queen => "queen",
            Self::King => "king",
        }
    }

    /// Kind number used by the host framework, 1..=6. Zero is reserved for
    /// "not assigned".
    fn host_number(&self) -> u8 {
        match self {
            Self::Pawn => 1,
            Self::Knight => 2,
            Self::Bishop => 3,
            Self::Rook => 4,
            Self::Queen => 5,
            Self::King => 6,
        }
    }
}

/// Offset the host framework adds to a kind number to mark a Black piece.
const HOST_BLACK_TAG: u8 = 128;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// Piece for a placement/snapshot letter; case selects the color.
    pub fn from_char(c: char) -> Option<Piece> {
        let color = Color::from_case(c)?;
        let kind = PieceKind::from_char(c)?;
        Some(Piece { color, kind })
    }

    pub fn to_char(&self) -> char {
        let c = self.kind.to_char();
        match self.color {
            Color::White => c,
            Color::Black => c.to_ascii_lowercase(),
        }
    }

    pub fn to_symbol(&self) -> &str {
        match (self.color, self.kind) {
            (Color::White, PieceKind::Pawn) => "♙",
            (Color::White, PieceKind::Knight) => "♘",
            (Color::White, PieceKind::Bishop) => "♗",
            (Color::White, PieceKind::Rook) => "♖",
            (Color::White, PieceKind::Queen) => "♕",
            (Color::White, PieceKind::King) => "♔",
            (Color::Black, PieceKind::Pawn) => "♟︎",
            (Color::Black, PieceKind::Knight) => "♞",
            (Color::Black, PieceKind::Bishop) => "♝",
            (Color::Black, PieceKind::Rook) => "♜",
            (Color::Black, PieceKind::Queen) => "♛",
            (Color::Black, PieceKind::King) => "♚",
        }
    }

    /// Numeric tag the host framework stores on its piece objects.
    pub fn host_tag(&self) -> u8 {
        match self.color {
            Color::White => self.kind.host_number(),
            Color::Black => self.kind.host_number() + HOST_BLACK_TAG,
        }
    }

    /// Inverse of [`Piece::host_tag`]. A tag whose kind is unassigned (0) is
    /// reported and yields no piece.
    pub fn from_host_tag(tag: u8) -> Option<Piece> {
        let (color, number) = if tag < HOST_BLACK_TAG {
            (Color::White, tag)
        } else {
            (Color::Black, tag - HOST_BLACK_TAG)
        };
        if number == 0 {
            error!(tag, "chess piece not assigned");
            return None;
        }
        let kind = PieceKind::ALL.into_iter().find(|k| k.host_number() == number);
        if kind.is_none() {
            warn!(tag, "unknown piece tag");
        }
        kind.map(|kind| Piece { color, kind })
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Board square, `row * 8 + col`.
///
/// Row 0 is the first rank of a placement string (rank 8, Black's back rank),
/// row 7 is White's back rank. Column 0 is the a-file.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    pub const COUNT: usize = 64;

    pub fn new(index: u8) -> ChessResult<Square> {
        if (index as usize) < Self::COUNT {
            Ok(Square(index))
        } else {
            Err(ChessError::OutOfBounds {
                row: (index / 8) as i32,
                col: (index % 8) as i32,
            })
        }
    }

    /// Caller guarantees `index < 64`.
    pub(crate) const fn from_index(index: u8) -> Square {
        Square(index)
    }

    pub fn from_row_col(row: i32, col: i32) -> ChessResult<Square> {
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Ok(Square((row * 8 + col) as u8))
        } else {
            Err(ChessError::OutOfBounds { row, col })
        }
    }

    /// Parse `e4` style coordinates.
    pub fn from_algebraic(s: &str) -> ChessResult<Square> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(ChessError::InvalidSquare(s.to_string()));
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(ChessError::InvalidSquare(s.to_string()));
        }
        let col = (file - b'a') as i32;
        let row = 7 - (rank - b'1') as i32;
        Square::from_row_col(row, col)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }

    pub fn row(&self) -> i32 {
        (self.0 >> 3) as i32
    }

    pub fn col(&self) -> i32 {
        (self.0 & 7) as i32
    }

    /// Single-bit bitboard for this square
    pub fn to_bb(&self) -> u64 {
        1u64 << self.0
    }

    /// Square displaced by (d_row, d_col), if still on the board
    pub fn offset(&self, d_row: i32, d_col: i32) -> Option<Square> {
        Square::from_row_col(self.row() + d_row, self.col() + d_col).ok()
    }

    pub fn all() -> impl Iterator<Item = Square> {
        (0..Self::COUNT as u8).map(Square)
    }

    pub fn to_algebraic(&self) -> String {
        format!(
            "{}{}",
            (b'a' + self.col() as u8) as char,
            (b'8' - self.row() as u8) as char
        )
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_algebraic())
    }
}

/// A pseudo-legal move. `piece` is the kind of the mover when the move was
/// generated; it is not re-checked when the move is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub piece: PieceKind,
}

impl Move {
    pub fn new(from: Square, to: Square, piece: PieceKind) -> Self {
        Self { from, to, piece }
    }

    pub fn to_human(&self) -> String {
        format!("{} from {} to {}", self.piece.to_human(), self.from, self.to)
    }

    /// Long algebraic form, piece letter omitted for pawns (`e2e4`, `Ng1f3`)
    pub fn to_algebraic(&self) -> String {
        match self.piece {
            PieceKind::Pawn => format!("{}{}", self.from, self.to),
            kind => format!("{}{}{}", kind.to_char(), self.from, self.to),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_algebraic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_case() {
        assert_eq!(Color::from_case('K'), Some(Color::White));
        assert_eq!(Color::from_case('k'), Some(Color::Black));
        assert_eq!(Color::from_case('3'), None);
    }

    #[test]
    fn test_other_color() {
        assert_eq!(Color::White.other_color(), Color::Black);
        assert_eq!(Color::Black.other_color(), Color::White);
    }

    #[test]
    fn test_piece_kind_from_char() {
        assert_eq!(PieceKind::from_char('p'), Some(PieceKind::Pawn));
        assert_eq!(PieceKind::from_char('N'), Some(PieceKind::Knight));
        assert_eq!(PieceKind::from_char('b'), Some(PieceKind::Bishop));
        assert_eq!(PieceKind::from_char('R'), Some(PieceKind::Rook));
        assert_eq!(PieceKind::from_char('q'), Some(PieceKind::Queen));
        assert_eq!(PieceKind::from_char('K'), Some(PieceKind::King));
        assert_eq!(PieceKind::from_char('x'), None);
    }

    #[test]
    fn test_is_sliding() {
        assert!(PieceKind::Bishop.is_sliding());
        assert!(PieceKind::Rook.is_sliding());
        assert!(PieceKind::Queen.is_sliding());
        assert!(!PieceKind::Pawn.is_sliding());
        assert!(!PieceKind::Knight.is_sliding());
        assert!(!PieceKind::King.is_sliding());
    }

    #[test]
    fn test_piece_char_round_trip() {
        for kind in PieceKind::ALL {
            for color in [Color::White, Color::Black] {
                let piece = Piece::new(color, kind);
                assert_eq!(Piece::from_char(piece.to_char()), Some(piece));
            }
        }
        assert_eq!(Piece::new(Color::Black, PieceKind::Knight).to_char(), 'n');
    }

    #[test]
    fn test_host_tag() {
        let white_pawn = Piece::new(Color::White, PieceKind::Pawn);
        let black_king = Piece::new(Color::Black, PieceKind::King);
        assert_eq!(white_pawn.host_tag(), 1);
        assert_eq!(black_king.host_tag(), 134);
        assert_eq!(Piece::from_host_tag(134), Some(black_king));
        assert_eq!(Piece::from_host_tag(1), Some(white_pawn));
    }

    #[test]
    fn test_unassigned_host_tag_yields_no_piece() {
        assert_eq!(Piece::from_host_tag(0), None);
        assert_eq!(Piece::from_host_tag(128), None);
        assert_eq!(Piece::from_host_tag(7), None);
    }

    #[test]
    fn test_square_from_row_col() {
        let sq = Square::from_row_col(6, 4).unwrap();
        assert_eq!(sq.index(), 52);
        assert_eq!(sq.row(), 6);
        assert_eq!(sq.col(), 4);
        assert_eq!(
            Square::from_row_col(8, 0),
            Err(ChessError::OutOfBounds { row: 8, col: 0 })
        );
        assert!(Square::from_row_col(0, -1).is_err());
        assert!(Square::new(64).is_err());
    }

    #[test]
    fn test_square_algebraic() {
        assert_eq!(Square::from_algebraic("a8").unwrap().index(), 0);
        assert_eq!(Square::from_algebraic("h1").unwrap().index(), 63);
        assert_eq!(Square::from_algebraic("e2").unwrap(), Square::from_row_col(6, 4).unwrap());
        assert_eq!(Square::from_row_col(4, 4).unwrap().to_algebraic(), "e4");
        assert!(Square::from_algebraic("i1").is_err());
        assert!(Square::from_algebraic("a9").is_err());
        assert!(Square::from_algebraic("e").is_err());
    }

    #[test]
    fn test_square_offset() {
        let a8 = Square::from_algebraic("a8").unwrap();
        assert_eq!(a8.offset(-1, 0), None);
        assert_eq!(a8.offset(1, 1), Square::from_algebraic("b7").ok());
    }

    #[test]
    fn test_move_to_algebraic() {
        let e2 = Square::from_algebraic("e2").unwrap();
        let e4 = Square::from_algebraic("e4").unwrap();
        let g1 = Square::from_algebraic("g1").unwrap();
        let f3 = Square::from_algebraic("f3").unwrap();
        assert_eq!(Move::new(e2, e4, PieceKind::Pawn).to_algebraic(), "e2e4");
        assert_eq!(Move::new(g1, f3, PieceKind::Knight).to_string(), "Ng1f3");
    }
}
