//! Finite State Automata and Trie structures
//!
//! This module provides the double-array trie together with the generic
//! automaton interfaces it implements.

pub mod double_array;
pub mod traits;

// Re-export core types
pub use double_array::{
    ArrayStore, Base, Check, DoubleArrayTrie, LowercaseAscii, SymbolEncoder, SymbolTable,
    EMPTY_VALUE, INITIAL_ROOT_BASE, LEAF_BASE_VALUE, MAX_RESOLUTIONS_PER_STEP, ROOT_CHECK_VALUE,
    ROOT_STATE,
};
pub use traits::{FiniteStateAutomaton, StateInspectable, StatisticsProvider, TrieStats, Walk};
