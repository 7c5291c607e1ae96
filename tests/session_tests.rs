//! End-to-end checks of the public API: import a position, generate moves,
//! query and play them through a session.
//!
//! Run with: cargo test --test session_tests

use chess_core::bitboard::{king_attacks, knight_attacks, BitboardIter};
use chess_core::board::{BoardState, STARTING_PLACEMENT};
use chess_core::codec::{decode, encode};
use chess_core::fen::{parse_placement, parse_placement_lenient};
use chess_core::movegen::generate_all_moves;
use chess_core::session::GameSession;
use chess_core::types::{Color, Move, PieceKind, Square};
use pretty_assertions::assert_eq;

fn sq(s: &str) -> Square {
    Square::from_algebraic(s).unwrap()
}

#[test]
fn attack_tables_stay_on_board_and_are_symmetric() {
    for origin in Square::all() {
        for target in BitboardIter(knight_attacks(origin)) {
            let (dr, dc) = ((origin.row() - target.row()).abs(), (origin.col() - target.col()).abs());
            assert!((dr, dc) == (1, 2) || (dr, dc) == (2, 1));
            assert!(knight_attacks(target) & origin.to_bb() != 0);
        }
        for target in BitboardIter(king_attacks(origin)) {
            assert!(king_attacks(target) & origin.to_bb() != 0);
        }
    }
}

#[test]
fn starting_placement_imports_32_pieces() {
    let board = parse_placement(STARTING_PLACEMENT).unwrap();
    assert_eq!(board.count(Color::White), 16);
    assert_eq!(board.count(Color::Black), 16);
    assert_eq!(board.king_square(Color::White).map(|s| s.col()), Some(4));
    assert_eq!(board.king_square(Color::Black).map(|s| s.col()), Some(4));
    for row in 2..6 {
        for col in 0..8 {
            assert!(board.piece_at_row_col(row, col).is_none());
        }
    }
}

#[test]
fn codec_round_trips_imported_boards() {
    for fen in [
        STARTING_PLACEMENT,
        "8/pppppppp/8/8/8/8/PPPPPPPP/8",
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R",
    ] {
        let board = parse_placement(fen).unwrap();
        assert_eq!(decode(&encode(&board)).unwrap(), board);
    }
}

#[test]
fn opening_has_twenty_moves_for_each_side() {
    let board = BoardState::new();
    assert_eq!(generate_all_moves(&board, Color::White).len(), 20);
    assert_eq!(generate_all_moves(&board, Color::Black).len(), 20);
}

#[test]
fn lenient_and_strict_import_agree_on_valid_input() {
    let fen = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";
    assert_eq!(parse_placement_lenient(fen), parse_placement(fen).unwrap());
}

#[test]
fn short_game_through_the_session() {
    let mut session = GameSession::new();

    session.apply_move(sq("e2"), sq("e4")).unwrap();
    session.apply_move(sq("d7"), sq("d5")).unwrap();
    assert_eq!(session.side_to_move(), Color::White);

    // the e4 pawn can now push or take on d5
    assert_eq!(session.moves_from(sq("e4")), vec![sq("e5"), sq("d5")]);
    let capture = session.apply_move(sq("e4"), sq("d5")).unwrap();
    assert_eq!(capture, Move::new(sq("e4"), sq("d5"), PieceKind::Pawn));
    assert_eq!(session.board().count(Color::Black), 15);

    // black queen now sees down the open d-file to the pawn on d5
    assert!(session.is_legal(sq("d8"), sq("d5")));
    assert!(!session.is_legal(sq("d8"), sq("d4")));
}

#[test]
fn is_legal_matches_the_latest_list_only() {
    let mut session = GameSession::new();
    let white_moves = session.moves().to_vec();
    session.apply_move(sq("g1"), sq("f3")).unwrap();

    for m in &white_moves {
        assert!(!session.is_legal(m.from, m.to), "{m} is white's, black is on move");
    }
    for m in session.moves() {
        assert!(session.is_legal(m.from, m.to));
    }
    for s in Square::all() {
        assert!(!session.is_legal(s, s));
    }
}

#[test]
fn saved_state_restores_into_a_fresh_session() {
    let mut session = GameSession::new();
    session.apply_move(sq("b1"), sq("c3")).unwrap();
    let saved = session.state_string();

    let mut restored = GameSession::new();
    restored.set_state_string(&saved).unwrap();
    restored.end_turn();
    assert_eq!(restored.side_to_move(), Color::Black);
    assert_eq!(restored.moves(), session.moves());
}
