use rayon::prelude::*;

use crate::board::BoardState;
use crate::movegen::generate_all_moves;
use crate::types::{Color, Move};

/// Count the leaf nodes of the pseudo-legal move tree of `depth` plies.
pub fn run_perft_test(board: &BoardState, side: Color, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = generate_all_moves(board, side);
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0;
    for m in moves {
        let mut b = board.clone();
        b.apply_move(&m);
        nodes += run_perft_test(&b, side.other_color(), depth - 1);
    }
    nodes
}

/// Node count below each root move, root moves searched in parallel.
/// Results keep the generator's move order.
pub fn split_perft(board: &BoardState, side: Color, depth: u8) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    generate_all_moves(board, side)
        .into_par_iter()
        .map(|m| {
            let mut b = board.clone();
            b.apply_move(&m);
            (m, run_perft_test(&b, side.other_color(), depth - 1))
        })
        .collect()
}

/// Total of [`split_perft`]
pub fn parallel_perft(board: &BoardState, side: Color, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    split_perft(board, side, depth).iter().map(|(_, n)| n).sum()
}
