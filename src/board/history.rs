//! `PositionHistory`: an append-only stack of Zobrist hashes for the
//! positions reached along the current game line, used for threefold
//! repetition detection.
//!
//! Entries are pushed before recursing into a child node and popped on
//! return. Hashes belonging to the persistent game history (everything
//! before the current search root) stay on the stack for the whole search,
//! so a position that repeats a pre-root position is still caught.

use std::collections::HashMap;

#[derive(Clone, Debug, Default)]
pub struct PositionHistory {
    stack: Vec<u64>,
    counts: HashMap<u64, u32>,
}

impl PositionHistory {
    #[must_use]
    pub fn new() -> Self {
        PositionHistory {
            stack: Vec::new(),
            counts: HashMap::new(),
        }
    }

    /// Push a hash onto the history stack, e.g. before recursing into a
    /// child position reached by making a move.
    pub fn push(&mut self, hash: u64) {
        self.stack.push(hash);
        *self.counts.entry(hash).or_insert(0) += 1;
    }

    /// Pop the most recently pushed hash, e.g. on return from recursion.
    ///
    /// # Panics
    /// Panics if the stack is empty, which would indicate a push/pop
    /// mismatch in the caller.
    pub fn pop(&mut self) {
        let hash = self.stack.pop().expect("pop on empty PositionHistory");
        if let Some(count) = self.counts.get_mut(&hash) {
            *count -= 1;
            if *count == 0 {
                self.counts.remove(&hash);
            }
        }
    }

    /// Number of times `hash` currently appears on the stack.
    #[must_use]
    pub fn count(&self, hash: u64) -> u32 {
        self.counts.get(&hash).copied().unwrap_or(0)
    }

    /// True once `hash` has occurred three or more times on the stack,
    /// i.e. the current position (already pushed) is a threefold repetition.
    #[must_use]
    pub fn is_threefold(&self, hash: u64) -> bool {
        self.count(hash) >= 3
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}
