//! Free-slot allocation for rows of child transitions
//!
//! Given the symbols a state needs edges for, the allocator picks one offset
//! such that `offset + symbol` is free for every symbol. Existing free slots
//! are preferred; the store only grows when no placement exists. Offsets are
//! never negative: a candidate slot below the smallest symbol cannot host it.

use std::collections::BTreeSet;

use super::store::ArrayStore;
use crate::Symbol;

impl ArrayStore {
    /// Smallest offset such that `offset + value` is a free slot
    ///
    /// Looks up the smallest free index `>= value`; when none exists the store
    /// is grown until one does.
    pub fn next_available_hop(&mut self, value: Symbol) -> usize {
        loop {
            if let Some(slot) = self.free_successor(value) {
                return slot - value;
            }
            // Every existing index is either occupied or below `value`, so the
            // first slot that can qualify is `max(len, value)`.
            let target = self.len().max(value);
            self.ensure_reachable_index(target);
        }
    }

    /// Start of the first run of `amount` consecutive free slots
    ///
    /// Scans in ascending order and returns the first qualifying run, not the
    /// best fitting one.
    pub fn find_consecutive_free(&self, amount: usize) -> Option<usize> {
        self.find_consecutive_free_from(0, amount)
    }

    /// Like [`find_consecutive_free`](Self::find_consecutive_free), ignoring
    /// free slots below `from`
    pub fn find_consecutive_free_from(&self, from: usize, amount: usize) -> Option<usize> {
        if amount == 0 {
            return None;
        }

        let mut run_start = None;
        let mut previous = 0;
        let mut run_len = 0;
        for slot in self.free_from(from) {
            match run_start {
                Some(_) if slot == previous + 1 => run_len += 1,
                _ => {
                    run_start = Some(slot);
                    run_len = 1;
                }
            }
            previous = slot;
            if run_len == amount {
                return run_start;
            }
        }
        None
    }

    /// One offset that places every symbol of `values` on a free slot
    ///
    /// A single symbol delegates to [`next_available_hop`](Self::next_available_hop).
    /// Several symbols need the whole span `min..=max` free and contiguous;
    /// if no such run exists the block is appended at the tail.
    ///
    /// Runs starting below the smallest symbol are skipped during the search
    /// rather than taking the first run and then falling back to the tail.
    ///
    /// # Panics
    ///
    /// Panics if `values` is empty.
    pub fn next_available_move(&mut self, values: &BTreeSet<Symbol>) -> usize {
        let (min, max) = match (values.first(), values.last()) {
            (Some(&min), Some(&max)) => (min, max),
            _ => panic!("next_available_move requires at least one symbol"),
        };
        if values.len() == 1 {
            return self.next_available_hop(min);
        }

        let span = max - min + 1;
        if let Some(block_start) = self.find_consecutive_free_from(min, span) {
            return block_start - min;
        }

        let block_start = self.len().max(min);
        self.grow_by(block_start + span - self.len());
        log::trace!(
            "no free run of {} slots, appended block at {}",
            span,
            block_start
        );
        block_start - min
    }
}
