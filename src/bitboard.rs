//! Bitboard helpers and precomputed attack tables.
//!
//! A bitboard is a 64-bit integer where each bit represents a square on the board.
//! Square indexing follows [`Square`]: a8 = 0, b8 = 1, ..., h8 = 7, a7 = 8, ..., h1 = 63,
//! i.e. `square_index = row * 8 + col` with row 0 the first rank of a placement string.
//!
//! Leaper tables (knight, king) are purely geometric and ignore occupancy. Sliding
//! pieces use per-direction rays, cut at the first blocker.

use once_cell::sync::Lazy;
use tracing::debug;

use crate::types::{PieceKind, Square};

/// Convert a square index to a bitboard with that single bit set
#[inline(always)]
pub const fn sq_to_bb(sq: u8) -> u64 {
    1u64 << sq
}

/// Iterate over set bits in a bitboard, returning squares.
///
/// Forward iteration yields ascending indices, `.rev()` descending ones.
pub struct BitboardIter(pub u64);

impl Iterator for BitboardIter {
    type Item = Square;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        if self.0 == 0 {
            None
        } else {
            let sq = self.0.trailing_zeros() as u8;
            self.0 &= self.0 - 1; // Clear the lowest set bit
            Some(Square::from_index(sq))
        }
    }
}

impl DoubleEndedIterator for BitboardIter {
    #[inline(always)]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.0 == 0 {
            None
        } else {
            let sq = 63 - self.0.leading_zeros() as u8;
            self.0 &= !sq_to_bb(sq);
            Some(Square::from_index(sq))
        }
    }
}

/// Ray directions as (row delta, col delta). Row 0 is the top of the board,
/// so north decreases the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub const DIAGONAL: [Direction; 4] = [
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    pub const fn delta(self) -> (i8, i8) {
        match self {
            Direction::North => (-1, 0),
            Direction::NorthEast => (-1, 1),
            Direction::East => (0, 1),
            Direction::SouthEast => (1, 1),
            Direction::South => (1, 0),
            Direction::SouthWest => (1, -1),
            Direction::West => (0, -1),
            Direction::NorthWest => (-1, -1),
        }
    }

    /// Does stepping in this direction increase the square index
    pub const fn goes_to_higher(self) -> bool {
        let (dr, dc) = self.delta();
        dr * 8 + dc > 0
    }

    /// Directions a sliding piece of this kind moves along; empty for leapers and pawns
    pub fn for_kind(kind: PieceKind) -> &'static [Direction] {
        match kind {
            PieceKind::Rook => &Self::ORTHOGONAL,
            PieceKind::Bishop => &Self::DIAGONAL,
            PieceKind::Queen => &Self::ALL,
            PieceKind::Pawn | PieceKind::Knight | PieceKind::King => &[],
        }
    }
}

// Knight move deltas: (row_delta, col_delta)
const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (-2, -1), (-2, 1), (-1, -2), (-1, 2),
    (1, -2), (1, 2), (2, -1), (2, 1),
];

// King move deltas
const KING_DELTAS: [(i8, i8); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// Mask of every on-board square at one of `deltas` from `sq`
const fn leaper_mask(sq: u8, deltas: &[(i8, i8); 8]) -> u64 {
    let row = (sq >> 3) as i8;
    let col = (sq & 7) as i8;
    let mut mask = 0u64;
    let mut i = 0;
    while i < 8 {
        let (dr, dc) = deltas[i];
        let nr = row + dr;
        let nc = col + dc;
        if nr >= 0 && nr < 8 && nc >= 0 && nc < 8 {
            mask |= sq_to_bb((nr * 8 + nc) as u8);
        }
        i += 1;
    }
    mask
}

/// Mask of every square from `sq` (exclusive) to the board edge in `direction`
const fn ray_mask(sq: u8, direction: Direction) -> u64 {
    let (dr, dc) = direction.delta();
    let mut r = (sq >> 3) as i8 + dr;
    let mut c = (sq & 7) as i8 + dc;
    let mut mask = 0u64;
    while r >= 0 && r < 8 && c >= 0 && c < 8 {
        mask |= sq_to_bb((r * 8 + c) as u8);
        r += dr;
        c += dc;
    }
    mask
}

/// Precomputed attack tables
pub struct AttackTables {
    /// Knight attacks for each square
    pub knight: [u64; 64],
    /// King attacks for each square
    pub king: [u64; 64],
    /// Ray from each square to the edge, indexed `rays[direction as usize][square]`
    pub rays: [[u64; 64]; 8],
}

impl AttackTables {
    pub const fn new() -> Self {
        let mut knight = [0u64; 64];
        let mut king = [0u64; 64];
        let mut rays = [[0u64; 64]; 8];

        let mut sq: u8 = 0;
        while sq < 64 {
            knight[sq as usize] = leaper_mask(sq, &KNIGHT_DELTAS);
            king[sq as usize] = leaper_mask(sq, &KING_DELTAS);

            let mut d = 0;
            while d < 8 {
                rays[d][sq as usize] = ray_mask(sq, Direction::ALL[d]);
                d += 1;
            }
            sq += 1;
        }

        AttackTables { knight, king, rays }
    }

    #[inline]
    pub fn knight_attacks(&self, sq: Square) -> u64 {
        self.knight[sq.index()]
    }

    #[inline]
    pub fn king_attacks(&self, sq: Square) -> u64 {
        self.king[sq.index()]
    }

    #[inline]
    pub fn ray(&self, direction: Direction, sq: Square) -> u64 {
        self.rays[direction as usize][sq.index()]
    }

    /// Get attacks along a ray, stopping at the first occupied square.
    /// The blocker closest to the origin is the lowest set bit for rays
    /// going towards higher indices and the highest set bit otherwise.
    #[inline]
    pub fn ray_attacks(&self, direction: Direction, sq: Square, occupied: u64) -> u64 {
        let ray = self.ray(direction, sq);
        let blockers = ray & occupied;

        if blockers == 0 {
            return ray;
        }

        let blocker_sq = if direction.goes_to_higher() {
            blockers.trailing_zeros() as u8
        } else {
            63 - blockers.leading_zeros() as u8
        };

        // Keep the ray up to and including the blocker
        ray ^ self.rays[direction as usize][blocker_sq as usize]
    }

    /// Union of the rays of a sliding piece; zero for non-sliders
    pub fn slider_attacks(&self, kind: PieceKind, sq: Square, occupied: u64) -> u64 {
        Direction::for_kind(kind)
            .iter()
            .fold(0, |acc, d| acc | self.ray_attacks(*d, sq, occupied))
    }
}

impl Default for AttackTables {
    fn default() -> Self {
        Self::new()
    }
}

/// Global attack tables, built on first use and read-only afterwards
pub static ATTACK_TABLES: Lazy<AttackTables> = Lazy::new(|| {
    debug!("building attack tables");
    AttackTables::new()
});

/// Knight destinations from `sq`, ignoring occupancy
#[inline]
pub fn knight_attacks(sq: Square) -> u64 {
    ATTACK_TABLES.knight_attacks(sq)
}

/// King destinations from `sq`, ignoring occupancy
#[inline]
pub fn king_attacks(sq: Square) -> u64 {
    ATTACK_TABLES.king_attacks(sq)
}
