//! Transposition table for caching search results.
//!
//! A fixed-size, power-of-two-sized array of single-entry slots indexed by
//! `hash mod size`. Every store is unconditional (always-replace); every
//! probe re-verifies the full 64-bit hash before treating the slot as a hit,
//! so collisions silently degrade to a cache miss rather than corrupting the
//! search.

use std::mem;

use crate::board::Move;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundType {
    Exact,
    LowerBound,
    UpperBound,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct TTEntry {
    hash: u64,
    depth: u32,
    score: i32,
    bound_type: BoundType,
    best_move: Option<Move>,
}

impl TTEntry {
    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn bound_type(&self) -> BoundType {
        self.bound_type
    }

    pub fn best_move(&self) -> Option<Move> {
        self.best_move
    }
}

pub struct TranspositionTable {
    table: Vec<Option<TTEntry>>,
    mask: usize,
    occupied: usize,
}

impl TranspositionTable {
    /// `size_mb`: desired size in megabytes. Rounded down to a power-of-two
    /// entry count.
    #[must_use]
    pub fn new(size_mb: usize) -> Self {
        let entry_size = mem::size_of::<Option<TTEntry>>();
        let mut num_entries = (size_mb * 1024 * 1024) / entry_size.max(1);
        num_entries = num_entries.next_power_of_two() / 2;
        if num_entries == 0 {
            num_entries = 1024;
        }

        TranspositionTable {
            table: vec![None; num_entries],
            mask: num_entries - 1,
            occupied: 0,
        }
    }

    fn index(&self, hash: u64) -> usize {
        (hash as usize) & self.mask
    }

    /// Look up `hash`, returning a hit only when the slot's own full hash
    /// matches (a mismatch means a different position landed on this slot).
    pub(crate) fn probe(&self, hash: u64) -> Option<&TTEntry> {
        self.table[self.index(hash)]
            .as_ref()
            .filter(|entry| entry.hash == hash)
    }

    /// Unconditionally overwrite the slot for `hash`.
    pub(crate) fn store(
        &mut self,
        hash: u64,
        depth: u32,
        score: i32,
        bound_type: BoundType,
        best_move: Option<Move>,
    ) {
        let index = self.index(hash);
        if self.table[index].is_none() {
            self.occupied += 1;
        }
        self.table[index] = Some(TTEntry {
            hash,
            depth,
            score,
            bound_type,
            best_move,
        });
    }

    pub fn clear(&mut self) {
        self.table.iter_mut().for_each(|slot| *slot = None);
        self.occupied = 0;
    }

    #[must_use]
    pub fn hashfull_per_mille(&self) -> u32 {
        if self.table.is_empty() {
            return 0;
        }
        ((self.occupied as u64 * 1000) / self.table.len() as u64) as u32
    }
}
