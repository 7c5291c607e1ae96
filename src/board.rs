use std::fmt;

use itertools::Itertools;

use crate::types::{Color, Move, Piece, PieceKind, Square};

pub const STARTING_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

/// The authoritative 8x8 board: one optional piece per square.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    cells: [Option<Piece>; 64],
}

impl Default for BoardState {
    fn default() -> Self {
        Self::empty()
    }
}

impl BoardState {
    pub fn empty() -> Self {
        Self { cells: [None; 64] }
    }

    /// Board set up with the standard starting position
    pub fn new() -> Self {
        // The starting placement is well formed, the lenient import cannot drop anything
        crate::fen::parse_placement_lenient(STARTING_PLACEMENT)
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<&Piece> {
        self.cells[sq.index()].as_ref()
    }

    /// Point query by (row, col); off-board coordinates hold nothing
    pub fn piece_at_row_col(&self, row: i32, col: i32) -> Option<&Piece> {
        Square::from_row_col(row, col)
            .ok()
            .and_then(|sq| self.piece_at(sq))
    }

    /// Color of the piece on `sq`, if any
    #[inline]
    pub fn color_at(&self, sq: Square) -> Option<Color> {
        self.piece_at(sq).map(|p| p.color)
    }

    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.cells[sq.index()].is_none()
    }

    /// Put `piece` on `sq`, replacing whatever was there
    pub fn set(&mut self, sq: Square, piece: Piece) -> Option<Piece> {
        self.cells[sq.index()].replace(piece)
    }

    /// Empty `sq`, returning the piece that was on it
    pub fn clear(&mut self, sq: Square) -> Option<Piece> {
        self.cells[sq.index()].take()
    }

    /// Move whatever stands on `mv.from` to `mv.to`, returning the piece that
    /// was captured there. Nothing is validated and an empty origin is a no-op.
    pub fn apply_move(&mut self, mv: &Move) -> Option<Piece> {
        let piece = self.clear(mv.from)?;
        self.set(mv.to, piece)
    }

    pub fn clear_all(&mut self) {
        self.cells = [None; 64];
    }

    /// All occupied squares as a bitboard
    pub fn get_occupied(&self) -> u64 {
        self.bb_where(|_| true)
    }

    /// Squares holding pieces of `color`
    pub fn get_pieces_bb(&self, color: Color) -> u64 {
        self.bb_where(|p| p.color == color)
    }

    /// Squares holding pieces of the given color and kind
    pub fn get_piece_bb(&self, color: Color, kind: PieceKind) -> u64 {
        self.bb_where(|p| p.color == color && p.kind == kind)
    }

    fn bb_where(&self, pred: impl Fn(&Piece) -> bool) -> u64 {
        self.pieces()
            .filter(|(_, p)| pred(*p))
            .fold(0u64, |acc, (sq, _)| acc | sq.to_bb())
    }

    /// Occupied squares in scan order
    pub fn pieces(&self) -> impl Iterator<Item = (Square, &Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    pub fn count(&self, color: Color) -> usize {
        self.pieces().filter(|(_, p)| p.color == color).count()
    }

    /// Square of the king of `color`, the first found in scan order
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, p)| p.color == color && p.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    pub fn draw_board(&self) -> String {
        (0..8)
            .map(|row| {
                let cells = (0..8)
                    .map(|col| match self.piece_at_row_col(row, col) {
                        Some(p) => p.to_symbol(),
                        None => ".",
                    })
                    .join(" ");
                format!("{} {}", 8 - row, cells)
            })
            .chain(std::iter::once("  a b c d e f g h".to_string()))
            .join("\n")
    }

    pub fn draw_to_terminal(&self) {
        println!("{}", self.draw_board());
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.draw_board())
    }
}
