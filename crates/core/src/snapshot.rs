use std::hash::Hasher;

use crate::types::{cell_from_code, Cell};

/// Render/observation view of a game.
///
/// Board cells are stored as codes (0 = empty, 1..=6 = candy) so frontends do
/// not need the live [`crate::Board`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub width: usize,
    pub cells: Vec<u8>,
    pub score: u32,
    pub tick: u64,
    pub cursor: usize,
    /// Cell picked up by a keyboard or mouse drag, if any
    pub held: Option<usize>,
    pub paused: bool,
    pub episode_id: u32,
    pub seed: u32,
    pub swaps_committed: u32,
    pub swaps_rejected: u32,
}

impl GameSnapshot {
    pub fn height(&self) -> usize {
        self.width
    }

    pub fn cell(&self, row: usize, col: usize) -> Cell {
        if row >= self.width || col >= self.width {
            return None;
        }
        self.cells
            .get(row * self.width + col)
            .copied()
            .and_then(cell_from_code)
    }

    /// Board rows as code slices
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks(self.width.max(1))
    }

    /// Stable 64-bit digest of everything a renderer draws.
    ///
    /// FNV-1a rather than `DefaultHasher`, whose output may change between Rust releases.
    pub fn fingerprint(&self) -> u64 {
        let mut h = Fnv1aHasher::new();
        h.write_usize(self.width);
        h.write(&self.cells);
        h.write_u32(self.score);
        h.write_usize(self.cursor);
        h.write_usize(self.held.map(|i| i + 1).unwrap_or(0));
        h.write_u8(self.paused as u8);
        h.finish()
    }
}

#[derive(Debug, Clone)]
struct Fnv1aHasher {
    state: u64,
}

impl Fnv1aHasher {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;

    fn new() -> Self {
        Self {
            state: Self::OFFSET_BASIS,
        }
    }
}

impl Hasher for Fnv1aHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.state ^= b as u64;
            self.state = self.state.wrapping_mul(Self::PRIME);
        }
    }
}
