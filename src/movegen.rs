use crate::bitboard::{AttackTables, BitboardIter, Direction, ATTACK_TABLES};
use crate::board::BoardState;
use crate::codec;
use crate::error::CodecError;
use crate::types::*;

/// Enough for any reachable position
const MAX_MOVES: usize = 218;

/// Pseudo-legal move generation for one side.
///
/// Moves obey piece geometry and occupancy only: nothing is filtered for
/// leaving the mover's king in check, and castling, en passant and promotion
/// are never produced. Moves come out in square scan order (a8..h1); within a
/// square the order is described on each rule function.
pub struct MoveGenerator<'a> {
    board: &'a BoardState,
    color: Color,
    tables: &'a AttackTables,
    moves: Vec<Move>,
}

impl<'a> MoveGenerator<'a> {
    pub fn new(board: &'a BoardState, color: Color) -> Self {
        Self::with_tables(board, color, &ATTACK_TABLES)
    }

    pub fn with_tables(board: &'a BoardState, color: Color, tables: &'a AttackTables) -> Self {
        Self {
            board,
            color,
            tables,
            moves: Vec::with_capacity(MAX_MOVES),
        }
    }

    pub fn collect(&mut self) -> Vec<Move> {
        let board = self.board;
        let occupied = board.get_occupied();
        let friendly = board.get_pieces_bb(self.color);

        for (from, piece) in board.pieces() {
            if piece.color != self.color {
                continue;
            }
            match piece.kind {
                PieceKind::Pawn => self.generate_pawn_moves(from),
                PieceKind::Knight => {
                    let attacks = self.tables.knight_attacks(from);
                    self.generate_leaper_moves(from, PieceKind::Knight, attacks, friendly)
                }
                PieceKind::King => {
                    let attacks = self.tables.king_attacks(from);
                    self.generate_leaper_moves(from, PieceKind::King, attacks, friendly)
                }
                kind @ (PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen) => {
                    self.generate_slider_moves(from, kind, occupied, friendly)
                }
            }
        }

        std::mem::take(&mut self.moves)
    }

    /// Row delta of a pawn step for the side to move
    fn pawn_direction(&self) -> i32 {
        match self.color {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Row the side's pawns start on
    fn pawn_home_row(&self) -> i32 {
        match self.color {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// Single push, double push, then captures towards the lower and the
    /// higher column. Any occupant blocks a push; only an enemy piece can be
    /// captured.
    fn generate_pawn_moves(&mut self, from: Square) {
        let direction = self.pawn_direction();

        if let Some(one) = from.offset(direction, 0) {
            if self.board.is_empty(one) {
                self.moves.push(Move::new(from, one, PieceKind::Pawn));

                if from.row() == self.pawn_home_row() {
                    if let Some(two) = from.offset(2 * direction, 0) {
                        if self.board.is_empty(two) {
                            self.moves.push(Move::new(from, two, PieceKind::Pawn));
                        }
                    }
                }
            }
        }

        let enemy = self.color.other_color();
        for side in [-1, 1] {
            if let Some(target) = from.offset(direction, side) {
                if self.board.color_at(target) == Some(enemy) {
                    self.moves.push(Move::new(from, target, PieceKind::Pawn));
                }
            }
        }
    }

    /// Table destinations not held by a friendly piece, ascending square order
    fn generate_leaper_moves(&mut self, from: Square, kind: PieceKind, attacks: u64, friendly: u64) {
        for to in BitboardIter(attacks & !friendly) {
            self.moves.push(Move::new(from, to, kind));
        }
    }

    /// Ray by ray in [`Direction`] order, nearest square first. A ray ends on
    /// the first enemy piece or just before the first friendly one.
    fn generate_slider_moves(&mut self, from: Square, kind: PieceKind, occupied: u64, friendly: u64) {
        for &direction in Direction::for_kind(kind) {
            let targets = self.tables.ray_attacks(direction, from, occupied) & !friendly;
            let iter = BitboardIter(targets);
            if direction.goes_to_higher() {
                self.moves.extend(iter.map(|to| Move::new(from, to, kind)));
            } else {
                self.moves.extend(iter.rev().map(|to| Move::new(from, to, kind)));
            }
        }
    }
}

/// All pseudo-legal moves for `side` on `board`
pub fn generate_all_moves(board: &BoardState, side: Color) -> Vec<Move> {
    MoveGenerator::new(board, side).collect()
}

/// Same as [`generate_all_moves`], reading the board from a text snapshot
pub fn generate_from_snapshot(snapshot: &str, side: Color) -> Result<Vec<Move>, CodecError> {
    let board = codec::decode(snapshot)?;
    Ok(generate_all_moves(&board, side))
}
