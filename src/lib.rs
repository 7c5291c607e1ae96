pub mod types;
pub mod error;
pub mod bitboard;
pub mod board;
pub mod fen;
pub mod codec;
pub mod movegen;
pub mod session;
pub mod perft;
