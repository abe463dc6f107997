//! Conflict resolution by row relocation
//!
//! When state `s` needs an edge on `c` but `base[s] + c` already belongs to
//! another state, every existing child of `s` is moved to one fresh offset
//! that also leaves room for `c`. Moving a child changes its index, so the
//! `check` entries of its own children are rewritten to the new index.

use std::collections::BTreeSet;

use super::store::{Base, Check};
use super::DoubleArrayTrie;
use crate::fsa::traits::StateInspectable;
use crate::{StateId, Symbol};

impl DoubleArrayTrie {
    /// Move the whole child row of `state` so that `new_symbol` fits
    ///
    /// Afterwards `base[state] + new_symbol` is a free slot; claiming it is
    /// left to the caller.
    pub(super) fn resolve_conflict(&mut self, state: StateId, new_symbol: Symbol) {
        let old_offset = self.row_offset(state);
        let children = self.out_symbols(state);
        assert!(
            !children.contains(&new_symbol),
            "state {} already owns an edge on {}",
            state,
            new_symbol
        );

        let mut values: BTreeSet<Symbol> = children.iter().copied().collect();
        values.insert(new_symbol);
        let new_offset = self.store.next_available_move(&values);

        let mut repointed = 0;
        for &symbol in &children {
            let old = old_offset + symbol;
            let target = new_offset + symbol;
            assert!(
                self.store.is_free(target),
                "allocator returned offset {} but slot {} is occupied",
                new_offset,
                target
            );

            let moved_base = self.store.base(old);
            self.store.set_check(target, Check::Parent(state));
            self.store.set_base(target, moved_base);

            match moved_base {
                Base::Offset(child_offset) => {
                    // Grandchildren may sit anywhere in the row, scan all of it
                    for grand_symbol in 0..self.alphabet_size {
                        let grandchild = child_offset + grand_symbol;
                        if grandchild < self.store.len()
                            && self.store.check(grandchild) == Check::Parent(old)
                        {
                            self.store.set_check(grandchild, Check::Parent(target));
                            repointed += 1;
                        }
                    }
                }
                Base::Leaf => {}
                Base::Empty => panic!("edge {} of state {} has an empty base", old, state),
            }

            self.store.vacate(old);
        }

        self.store.set_base(state, Base::Offset(new_offset));
        assert!(
            self.store.is_free(new_offset + new_symbol),
            "relocated row of state {} left no room for symbol {}",
            state,
            new_symbol
        );

        self.counters.relocations += 1;
        self.counters.relocated_edges += children.len();
        self.counters.repointed_children += repointed;
        log::debug!(
            "relocated row of state {}: offset {} -> {}, {} edges moved, {} children repointed",
            state,
            old_offset,
            new_offset,
            children.len(),
            repointed
        );
    }
}
