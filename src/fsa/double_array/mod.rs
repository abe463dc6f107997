//! Double Array Trie with row relocation on offset collisions
//!
//! The trie is stored in two parallel arrays:
//! - `base`: row offset of each state (or a leaf / empty marker)
//! - `check`: the state that owns the edge landing on each index
//!
//! For a transition from state `s` on symbol `c`:
//! ```text
//! next_state = base[s] + c
//! if check[next_state] == s then transition is valid
//! ```
//!
//! Construction is incremental. Each state's row offset is picked greedily
//! when the state is created; when a later edge of another state claims the
//! slot a row needs, the whole row is moved to a fresh offset and the moved
//! children's own children are repointed at their new parent index.
//!
//! # Layout
//!
//! ```text
//! base[i]:  Empty | Leaf | Offset(n)
//! check[i]: Empty | Root | Parent(state)
//! ```
//!
//! A slot is free exactly when both fields are `Empty`. Index 0 is the root
//! and is never freed.

mod allocator;
mod builder;
pub mod encoding;
mod resolver;
pub mod store;

pub use encoding::{LowercaseAscii, SymbolEncoder, SymbolTable};
pub use store::{
    ArrayStore, Base, Check, EMPTY_VALUE, INITIAL_ROOT_BASE, LEAF_BASE_VALUE, ROOT_CHECK_VALUE,
    ROOT_STATE,
};

use crate::config::{Config, DoubleArrayConfig};
use crate::error::{DatrieError, Result};
use crate::fsa::traits::{FiniteStateAutomaton, StateInspectable, StatisticsProvider, TrieStats};
use crate::{StateId, Symbol};

/// Most conflict resolutions a single symbol step may need before its slot is free
pub const MAX_RESOLUTIONS_PER_STEP: usize = 1;

/// Counters collected while the trie is built
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct BuildCounters {
    pub insertions: usize,
    pub mutating_insertions: usize,
    pub relocations: usize,
    pub relocated_edges: usize,
    pub repointed_children: usize,
    pub max_resolutions_per_step: usize,
}

/// Double-array trie over a fixed alphabet `[0, alphabet_size)`
///
/// # Examples
///
/// ```rust
/// use datrie::fsa::{DoubleArrayTrie, FiniteStateAutomaton, Walk};
///
/// let mut trie = DoubleArrayTrie::new(26).unwrap();
/// assert!(trie.insert(&[2, 0, 19]).unwrap()); // "cat"
/// assert!(!trie.insert(&[2, 0, 19]).unwrap());
/// assert!(matches!(trie.walk(&[2, 0, 19]), Walk::Complete(_)));
/// assert_eq!(trie.walk(&[2, 0, 1]), Walk::Stopped { depth: 2 });
/// ```
#[derive(Debug, Clone)]
pub struct DoubleArrayTrie {
    alphabet_size: usize,
    store: ArrayStore,
    config: DoubleArrayConfig,
    counters: BuildCounters,
}

impl DoubleArrayTrie {
    /// Create a trie holding only the root
    ///
    /// Fails with a configuration error when `alphabet_size` is zero.
    pub fn new(alphabet_size: usize) -> Result<Self> {
        Self::with_config(DoubleArrayConfig {
            alphabet_size,
            ..Default::default()
        })
    }

    /// Create a trie from a validated configuration
    pub fn with_config(config: DoubleArrayConfig) -> Result<Self> {
        config.validate()?;
        log::debug!(
            "creating double array trie: alphabet_size={}, reserve_capacity={}",
            config.alphabet_size,
            config.reserve_capacity
        );

        Ok(Self {
            alphabet_size: config.alphabet_size,
            store: ArrayStore::with_capacity(config.reserve_capacity)?,
            config,
            counters: BuildCounters::default(),
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &DoubleArrayConfig {
        &self.config
    }

    /// Number of array slots (`N`)
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether the trie holds no edges besides the root
    pub fn is_empty(&self) -> bool {
        self.store.len() - self.store.free_count() == 1
    }

    /// Read-only access to the backing store
    pub fn store(&self) -> &ArrayStore {
        &self.store
    }

    /// Typed `base` array
    pub fn bases(&self) -> &[Base] {
        self.store.bases()
    }

    /// Typed `check` array
    pub fn checks(&self) -> &[Check] {
        self.store.checks()
    }

    /// `base` array with sentinels mapped to [`EMPTY_VALUE`] and [`LEAF_BASE_VALUE`]
    pub fn base_values(&self) -> Vec<i64> {
        self.store.bases().iter().map(|b| b.to_value()).collect()
    }

    /// `check` array with sentinels mapped to [`EMPTY_VALUE`] and [`ROOT_CHECK_VALUE`]
    pub fn check_values(&self) -> Vec<i64> {
        self.store.checks().iter().map(|c| c.to_value()).collect()
    }

    /// Row offset of a materialized state. Panics for leaves and free slots.
    fn row_offset(&self, state: StateId) -> usize {
        match self.store.base(state) {
            Base::Offset(offset) => offset,
            other => panic!("state {} has no row offset (base is {:?})", state, other),
        }
    }

    /// Recheck every structural invariant of the arrays
    ///
    /// Construction never produces a violation through the public API; this
    /// is a diagnostic for tests and debugging tools.
    pub fn verify(&self) -> Result<()> {
        let store = &self.store;
        let len = store.len();

        if store.bases().len() != store.checks().len() {
            return Err(DatrieError::integrity(len, "base/check length mismatch"));
        }
        if store.check(ROOT_STATE) != Check::Root {
            return Err(DatrieError::integrity(ROOT_STATE, "root anchor missing"));
        }
        if store.base(ROOT_STATE).offset().is_none() {
            return Err(DatrieError::integrity(ROOT_STATE, "root has no row offset"));
        }
        if let Some(last) = store.last_free() {
            if last >= len {
                return Err(DatrieError::integrity(last, "free set holds an index past the end"));
            }
        }

        for index in 0..len {
            if !store.free_set_agrees(index) {
                return Err(DatrieError::integrity(index, "free set out of sync with slot"));
            }
            if index == ROOT_STATE {
                continue;
            }
            match (store.base(index), store.check(index)) {
                (_, Check::Root) => {
                    return Err(DatrieError::integrity(index, "root anchor outside index 0"));
                }
                (Base::Empty, Check::Empty) => {}
                (_, Check::Empty) => {
                    return Err(DatrieError::integrity(index, "base set on an unowned slot"));
                }
                (Base::Empty, Check::Parent(_)) => {
                    return Err(DatrieError::integrity(index, "owned slot has an empty base"));
                }
                (_, Check::Parent(parent)) => {
                    if parent >= len || parent == index || store.is_free(parent) {
                        return Err(DatrieError::integrity(
                            index,
                            format!("parent {} is not a materialized state", parent),
                        ));
                    }
                    match store.base(parent) {
                        Base::Offset(offset)
                            if index >= offset && index - offset < self.alphabet_size => {}
                        _ => {
                            return Err(DatrieError::integrity(
                                index,
                                format!("slot is not in the row of its parent {}", parent),
                            ));
                        }
                    }
                }
            }
        }

        Ok(())
    }
}

impl FiniteStateAutomaton for DoubleArrayTrie {
    fn root(&self) -> StateId {
        ROOT_STATE
    }

    fn alphabet_size(&self) -> usize {
        self.alphabet_size
    }

    fn transition(&self, state: StateId, symbol: Symbol) -> Option<StateId> {
        if symbol >= self.alphabet_size || state >= self.store.len() {
            return None;
        }
        let next_state = self.store.base(state).offset()? + symbol;
        if next_state < self.store.len() && self.store.check(next_state) == Check::Parent(state) {
            Some(next_state)
        } else {
            None
        }
    }
}

impl StateInspectable for DoubleArrayTrie {
    fn out_symbols(&self, state: StateId) -> Vec<Symbol> {
        (0..self.alphabet_size)
            .filter(|&symbol| self.transition(state, symbol).is_some())
            .collect()
    }
}

impl StatisticsProvider for DoubleArrayTrie {
    fn stats(&self) -> TrieStats {
        let array_len = self.store.len();
        let free_slots = self.store.free_count();
        let num_states = array_len - free_slots;

        TrieStats {
            num_states,
            num_transitions: num_states - 1,
            array_len,
            free_slots,
            memory_usage: array_len
                * (std::mem::size_of::<Base>() + std::mem::size_of::<Check>()),
            insertions: self.counters.insertions,
            mutating_insertions: self.counters.mutating_insertions,
            relocations: self.counters.relocations,
            relocated_edges: self.counters.relocated_edges,
            repointed_children: self.counters.repointed_children,
            max_resolutions_per_step: self.counters.max_resolutions_per_step,
        }
    }
}
