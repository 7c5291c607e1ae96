//! Command-line front end for the rules core.
//!
//! Usage:
//!   cargo run --release -- moves --placement "8/8/8/8/3Q4/8/8/8" --side white
//!   cargo run --release -- snapshot
//!   cargo run --release -- perft --depth 4
//!   cargo run --release -- play --plies 10 --seed 7
//!
//! Set `RUST_LOG=debug` (or pass `--verbose`) to see generation and turn logs.

use std::time::Instant;

use chess_core::board::STARTING_PLACEMENT;
use chess_core::fen::to_placement;
use chess_core::perft::split_perft;
use chess_core::session::GameSession;
use chess_core::types::Color;
use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{eyre, Result};
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "chess_core")]
#[command(about = "Pseudo-legal chess move generation")]
struct Args {
    /// Log at debug level regardless of RUST_LOG
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the board and every pseudo-legal move for one side
    Moves {
        /// Piece placement (first FEN field; other fields are ignored)
        #[arg(short, long, default_value = STARTING_PLACEMENT)]
        placement: String,

        #[arg(short, long, value_enum, default_value_t = Side::White)]
        side: Side,
    },
    /// Print the 64-character state snapshot of a placement
    Snapshot {
        #[arg(short, long, default_value = STARTING_PLACEMENT)]
        placement: String,
    },
    /// Count pseudo-legal move paths, split by root move
    Perft {
        #[arg(short, long, default_value_t = 3)]
        depth: u8,

        #[arg(short, long, default_value = STARTING_PLACEMENT)]
        placement: String,

        #[arg(short, long, value_enum, default_value_t = Side::White)]
        side: Side,
    },
    /// Play random pseudo-legal moves from the starting position
    Play {
        #[arg(long, default_value_t = 10)]
        plies: u32,

        /// Seed for reproducible games; random when omitted
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Side {
    White,
    Black,
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_moves(placement: &str, side: Color) -> Result<()> {
    let session = GameSession::from_placement(placement, side)?;
    session.board().draw_to_terminal();
    println!();
    println!("{} has {} moves:", side, session.moves().len());
    for (from, moves) in &session.moves().iter().group_by(|m| m.from) {
        let piece = session
            .board()
            .piece_at(from)
            .ok_or_else(|| eyre!("move list references empty square {from}"))?;
        println!("  {} {}: {}", piece.to_symbol(), from, moves.map(|m| m.to).join(" "));
    }
    Ok(())
}

fn print_snapshot(placement: &str) -> Result<()> {
    let session = GameSession::from_placement(placement, Color::White)?;
    let snapshot = session.snapshot();
    println!("{snapshot}");
    for row in snapshot.rows() {
        println!("  {row}");
    }
    Ok(())
}

fn run_perft(placement: &str, side: Color, depth: u8) -> Result<()> {
    let session = GameSession::from_placement(placement, side)?;
    let now = Instant::now();
    let split = split_perft(session.board(), side, depth);
    let elapsed = now.elapsed().as_secs_f32();

    for (m, nodes) in &split {
        println!("{}: {}", m, nodes);
    }
    let total: u64 = if depth == 0 { 1 } else { split.iter().map(|(_, n)| n).sum() };
    println!();
    println!("Nodes searched: {} (depth {}, {:.3}s)", total, depth, elapsed);
    Ok(())
}

fn play(plies: u32, seed: Option<u64>) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut session = GameSession::new();
    session.board().draw_to_terminal();
    println!();

    for ply in 1..=plies {
        let Some(&selected) = session.moves().choose(&mut rng) else {
            println!("{} has no moves", session.side_to_move());
            break;
        };
        let side = session.side_to_move();
        session.apply_move(selected.from, selected.to)?;
        println!(
            "move {}: {} {} ({})",
            (ply + 1) / 2,
            side,
            selected.to_human(),
            selected.to_algebraic()
        );
        session.board().draw_to_terminal();
        println!();
    }
    println!("{}", to_placement(session.board()));
    Ok(())
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    init_tracing(args.verbose);

    match args.command {
        Command::Moves { placement, side } => print_moves(&placement, side.into()),
        Command::Snapshot { placement } => print_snapshot(&placement),
        Command::Perft { depth, placement, side } => run_perft(&placement, side.into(), depth),
        Command::Play { plies, seed } => play(plies, seed),
    }
}
