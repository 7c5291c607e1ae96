//! A game in progress: the board, whose turn it is, and the cached move list.
//!
//! The move list is regenerated at setup and at the end of every turn. The two
//! queries a drag-and-drop front end needs, [`GameSession::moves_from`] and
//! [`GameSession::is_legal`], only ever read that cached list.

use tracing::{debug, info};

use crate::bitboard::{AttackTables, ATTACK_TABLES};
use crate::board::BoardState;
use crate::codec::{self, Snapshot};
use crate::error::{ChessError, ChessResult};
use crate::fen::parse_placement;
use crate::movegen::MoveGenerator;
use crate::types::{Color, Move, Piece, Square};

pub struct GameSession {
    board: BoardState,
    side_to_move: Color,
    tables: &'static AttackTables,
    moves: Vec<Move>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// Standard starting position, White to move
    pub fn new() -> Self {
        Self::with_board(BoardState::new(), Color::White)
    }

    pub fn from_placement(placement: &str, side_to_move: Color) -> ChessResult<Self> {
        Ok(Self::with_board(parse_placement(placement)?, side_to_move))
    }

    pub fn with_board(board: BoardState, side_to_move: Color) -> Self {
        let mut session = Self {
            board,
            side_to_move,
            tables: &ATTACK_TABLES,
            moves: Vec::new(),
        };
        session.regenerate();
        session
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Moves generated for the side to move at the last regeneration
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Rebuild the cached move list from the current board
    pub fn regenerate(&mut self) {
        self.moves = MoveGenerator::with_tables(&self.board, self.side_to_move, self.tables).collect();
        debug!(side = %self.side_to_move, count = self.moves.len(), "regenerated moves");
    }

    /// Is there a piece of the side to move on `sq`
    fn owns(&self, sq: Square) -> bool {
        self.board.color_at(sq) == Some(self.side_to_move)
    }

    /// Destinations available to the piece on `from`. Empty when the square is
    /// empty or holds a piece of the side not on move.
    pub fn moves_from(&self, from: Square) -> Vec<Square> {
        if !self.owns(from) {
            return Vec::new();
        }
        self.moves
            .iter()
            .filter(|m| m.from == from)
            .map(|m| m.to)
            .collect()
    }

    /// Can the piece on `from` be picked up
    pub fn can_move_from(&self, from: Square) -> bool {
        self.owns(from) && self.moves.iter().any(|m| m.from == from)
    }

    pub fn is_legal(&self, from: Square, to: Square) -> bool {
        self.find_move(from, to).is_some()
    }

    /// [`GameSession::is_legal`] for raw host coordinates; anything off the board is rejected
    pub fn is_legal_coords(&self, from_row: i32, from_col: i32, to_row: i32, to_col: i32) -> bool {
        match (
            Square::from_row_col(from_row, from_col),
            Square::from_row_col(to_row, to_col),
        ) {
            (Ok(from), Ok(to)) => self.is_legal(from, to),
            _ => false,
        }
    }

    fn find_move(&self, from: Square, to: Square) -> Option<Move> {
        if !self.owns(from) {
            return None;
        }
        self.moves
            .iter()
            .find(|m| m.from == from && m.to == to)
            .copied()
    }

    /// Play `from`-`to` if it is in the cached list, then end the turn.
    pub fn apply_move(&mut self, from: Square, to: Square) -> ChessResult<Move> {
        if self.board.is_empty(from) {
            return Err(ChessError::EmptySquare(from));
        }
        let mv = self
            .find_move(from, to)
            .ok_or(ChessError::IllegalMove { from, to })?;

        let captured = self.board.apply_move(&mv);
        info!(side = %self.side_to_move, mv = %mv, captured = ?captured, "move played");
        self.end_turn();
        Ok(mv)
    }

    /// Hand the move to the other side and rebuild the move list
    pub fn end_turn(&mut self) {
        self.side_to_move = self.side_to_move.other_color();
        self.regenerate();
    }

    /// Host-driven placement; call [`GameSession::regenerate`] when done editing
    pub fn place_piece(&mut self, sq: Square, piece: Piece) -> Option<Piece> {
        self.board.set(sq, piece)
    }

    pub fn clear_square(&mut self, sq: Square) -> Option<Piece> {
        self.board.clear(sq)
    }

    pub fn state_string(&self) -> String {
        codec::encode(&self.board)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::of(&self.board)
    }

    pub fn initial_state_string() -> String {
        codec::encode(&BoardState::new())
    }

    /// Replace the board from a snapshot and rebuild the move list. The board
    /// is untouched when the snapshot is rejected.
    pub fn set_state_string(&mut self, snapshot: &str) -> ChessResult<()> {
        self.board = codec::decode(snapshot)?;
        self.regenerate();
        Ok(())
    }

    /// No termination rules are implemented, so nobody ever wins
    pub fn winner(&self) -> Option<Color> {
        None
    }

    pub fn is_draw(&self) -> bool {
        false
    }

    /// Remove every piece, as when the host tears the game down
    pub fn stop(&mut self) {
        self.board.clear_all();
        self.moves.clear();
        debug!("game stopped");
    }
}
