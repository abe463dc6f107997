//! Incremental insertion of symbol sequences

use super::encoding::SymbolEncoder;
use super::store::{Base, Check, ROOT_STATE};
use super::{DoubleArrayTrie, MAX_RESOLUTIONS_PER_STEP};
use crate::error::{check_symbol, Result};
use crate::{StateId, Symbol};

impl DoubleArrayTrie {
    /// Insert a symbol sequence, returning whether the arrays changed
    ///
    /// Walking an already present path (including a prefix of a longer
    /// string) changes nothing and returns `false`. Symbols outside
    /// `[0, alphabet_size)` are rejected before any mutation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use datrie::fsa::DoubleArrayTrie;
    ///
    /// let mut trie = DoubleArrayTrie::new(4).unwrap();
    /// assert!(trie.insert(&[1, 2, 3]).unwrap());
    /// assert!(!trie.insert(&[1, 2]).unwrap());
    /// assert!(trie.insert(&[1, 2, 3, 0]).unwrap());
    /// assert!(trie.insert(&[4]).is_err());
    /// ```
    pub fn insert(&mut self, symbols: &[Symbol]) -> Result<bool> {
        for &symbol in symbols {
            check_symbol(symbol, self.alphabet_size)?;
        }
        self.counters.insertions += 1;

        let mut changed = false;
        let mut state = ROOT_STATE;
        for (position, &symbol) in symbols.iter().enumerate() {
            let next_symbol = symbols.get(position + 1).copied();
            let (next_state, step_changed) = self.extend(state, symbol, next_symbol);
            changed |= step_changed;
            state = next_state;
        }

        if changed {
            self.counters.mutating_insertions += 1;
        }
        if self.config.verify_after_insert {
            if let Err(err) = self.verify() {
                panic!("trie corrupted by insert of {:?}: {}", symbols, err);
            }
        }
        Ok(changed)
    }

    /// Encode every string and insert it, returning how many insertions changed the trie
    ///
    /// Stops at the first string the encoder or the alphabet rejects; strings
    /// before it stay inserted.
    pub fn insert_all<I, S, E>(&mut self, strings: I, encoder: &E) -> Result<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        E: SymbolEncoder + ?Sized,
    {
        let mut changed = 0;
        for string in strings {
            let symbols = encoder.encode(string.as_ref())?;
            if self.insert(&symbols)? {
                changed += 1;
            }
        }
        Ok(changed)
    }

    /// Take one step from `state` on `symbol`, creating the edge if needed
    fn extend(
        &mut self,
        state: StateId,
        symbol: Symbol,
        next_symbol: Option<Symbol>,
    ) -> (StateId, bool) {
        let mut changed = false;

        // A former terminal gets its first child: give it a row now
        if self.store.base(state) == Base::Leaf {
            let offset = self.store.next_available_hop(symbol);
            self.store.set_base(state, Base::Offset(offset));
            log::trace!("materialized row of leaf {} at offset {}", state, offset);
            changed = true;
        }

        let mut resolutions = 0;
        loop {
            let dest = self.row_offset(state) + symbol;
            self.store.ensure_reachable_index(dest);

            if self.store.is_free(dest) {
                self.store.set_check(dest, Check::Parent(state));
                let base = match next_symbol {
                    None => Base::Leaf,
                    Some(next) => Base::Offset(self.store.next_available_hop(next)),
                };
                self.store.set_base(dest, base);
                self.record_resolutions(resolutions);
                return (dest, true);
            }

            match self.store.check(dest) {
                Check::Parent(owner) if owner == state => {
                    self.record_resolutions(resolutions);
                    return (dest, changed);
                }
                Check::Empty => panic!("slot {} has a base but no owner", dest),
                Check::Root | Check::Parent(_) => {
                    assert!(
                        resolutions < MAX_RESOLUTIONS_PER_STEP,
                        "slot {} still taken after relocating state {}",
                        dest,
                        state
                    );
                    self.resolve_conflict(state, symbol);
                    resolutions += 1;
                    changed = true;
                }
            }
        }
    }

    fn record_resolutions(&mut self, resolutions: usize) {
        if resolutions > self.counters.max_resolutions_per_step {
            self.counters.max_resolutions_per_step = resolutions;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DoubleArrayConfig;
    use crate::fsa::double_array::encoding::LowercaseAscii;
    use crate::fsa::traits::{FiniteStateAutomaton, StatisticsProvider, Walk};

    fn encode(word: &str) -> Vec<Symbol> {
        LowercaseAscii.encode(word).unwrap()
    }

    fn path_of(trie: &DoubleArrayTrie, word: &str) -> Vec<StateId> {
        let mut state = trie.root();
        encode(word)
            .into_iter()
            .map(|symbol| {
                state = trie
                    .transition(state, symbol)
                    .unwrap_or_else(|| panic!("{} not reachable", word));
                state
            })
            .collect()
    }

    #[test]
    fn test_empty_input_is_noop() {
        let mut trie = DoubleArrayTrie::new(26).unwrap();
        assert!(!trie.insert(&[]).unwrap());
        assert_eq!(trie.len(), 1);
    }

    #[test]
    fn test_first_insert_layout() {
        let mut trie = DoubleArrayTrie::new(26).unwrap();
        assert!(trie.insert(&encode("cat")).unwrap());

        // root -> 3 ('c'), 3 -> 1 ('a'), 1 -> 19 ('t')
        assert_eq!(path_of(&trie, "cat"), vec![3, 1, 19]);
        assert_eq!(trie.bases()[3], Base::Offset(1));
        assert_eq!(trie.bases()[1], Base::Offset(0));
        assert_eq!(trie.bases()[19], Base::Leaf);
        assert_eq!(trie.checks()[19], Check::Parent(1));
        assert_eq!(trie.len(), 20);
    }

    #[test]
    fn test_duplicate_insertions() {
        let mut trie = DoubleArrayTrie::new(26).unwrap();
        assert!(trie.insert(&encode("duplicate")).unwrap());

        let bases = trie.bases().to_vec();
        let checks = trie.checks().to_vec();
        assert!(!trie.insert(&encode("duplicate")).unwrap());
        assert!(!trie.insert(&encode("duplicate")).unwrap());
        assert_eq!(trie.bases(), &bases[..]);
        assert_eq!(trie.checks(), &checks[..]);
    }

    #[test]
    fn test_prefix_of_existing_is_traversal() {
        let mut trie = DoubleArrayTrie::new(26).unwrap();
        trie.insert(&encode("cargo")).unwrap();
        assert!(!trie.insert(&encode("car")).unwrap());
    }

    #[test]
    fn test_leaf_materializes_on_extension() {
        let mut trie = DoubleArrayTrie::new(26).unwrap();
        trie.insert(&encode("car")).unwrap();
        let r = *path_of(&trie, "car").last().unwrap();
        assert_eq!(trie.bases()[r], Base::Leaf);

        assert!(trie.insert(&encode("cargo")).unwrap());
        assert!(matches!(trie.bases()[r], Base::Offset(_)));
        assert_eq!(path_of(&trie, "cargo")[..3], path_of(&trie, "car")[..]);
    }

    #[test]
    fn test_prefix_sharing() {
        let mut trie = DoubleArrayTrie::new(26).unwrap();
        trie.insert(&encode("cat")).unwrap();
        trie.insert(&encode("car")).unwrap();

        let cat = path_of(&trie, "cat");
        let car = path_of(&trie, "car");
        assert_eq!(cat[..2], car[..2]);
        assert_ne!(cat[2], car[2]);
        assert_eq!(trie.walk(&encode("cab")), Walk::Stopped { depth: 2 });
    }

    #[test]
    fn test_invalid_symbol_rejected_without_mutation() {
        let mut trie = DoubleArrayTrie::new(4).unwrap();
        trie.insert(&[0, 1]).unwrap();
        let before = trie.bases().to_vec();

        let err = trie.insert(&[0, 2, 9]).unwrap_err();
        assert_eq!(err.category(), "symbol");
        assert!(err.is_recoverable());
        assert_eq!(trie.bases(), &before[..]);
        assert_eq!(trie.stats().insertions, 1);
    }

    #[test]
    fn test_insert_all_counts_changes() {
        let mut trie = DoubleArrayTrie::new(26).unwrap();
        let changed = trie
            .insert_all(["tree", "train", "tree", "tr"], &LowercaseAscii)
            .unwrap();
        assert_eq!(changed, 2);
    }

    #[test]
    fn test_insert_all_stops_on_encoding_error() {
        let mut trie = DoubleArrayTrie::new(26).unwrap();
        let err = trie
            .insert_all(vec!["ok", "Bad", "never"], &LowercaseAscii)
            .unwrap_err();
        assert_eq!(err.category(), "encoding");
        assert!(trie.walk(&encode("ok")).is_complete());
        assert!(!trie.walk(&encode("never")).is_complete());
    }

    #[test]
    fn test_collision_triggers_single_resolution() {
        let mut trie = DoubleArrayTrie::with_config(DoubleArrayConfig {
            alphabet_size: 26,
            verify_after_insert: true,
            ..Default::default()
        })
        .unwrap();
        let words = [
            "cat", "car", "cargo", "cabin", "metal", "mental", "metallica", "mask", "tree",
            "train", "dispatcher",
        ];
        for word in words {
            trie.insert(&encode(word)).unwrap();
        }

        let stats = trie.stats();
        assert!(stats.relocations > 0);
        assert_eq!(stats.max_resolutions_per_step, MAX_RESOLUTIONS_PER_STEP);
        for word in words {
            assert!(trie.walk(&encode(word)).is_complete(), "lost {}", word);
        }
    }
}
