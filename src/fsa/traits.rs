//! Core FSA (Finite State Automaton) traits and abstractions
//!
//! This module defines the traits shared by automata over a small integer
//! alphabet `[0, alphabet_size)`.

use crate::{StateId, Symbol};

use serde::{Deserialize, Serialize};

/// Outcome of following a symbol sequence from the root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Walk {
    /// Every symbol had a transition; holds the state reached
    Complete(StateId),
    /// The symbol at `depth` had no transition
    Stopped {
        /// Number of symbols consumed before the walk failed
        depth: usize,
    },
}

impl Walk {
    /// Whether every symbol was consumed
    pub fn is_complete(&self) -> bool {
        matches!(self, Walk::Complete(_))
    }
}

/// Core trait for finite state automaton operations
pub trait FiniteStateAutomaton {
    /// Get the initial/root state
    fn root(&self) -> StateId;

    /// Number of distinct symbols
    fn alphabet_size(&self) -> usize;

    /// Transition from a state given an input symbol
    fn transition(&self, state: StateId, symbol: Symbol) -> Option<StateId>;

    /// Follow `input` from the root as far as transitions exist
    ///
    /// This only follows edges. It does not tell a stored string apart from
    /// a prefix of a longer one.
    fn walk(&self, input: &[Symbol]) -> Walk {
        let mut state = self.root();
        for (depth, &symbol) in input.iter().enumerate() {
            match self.transition(state, symbol) {
                Some(next_state) => state = next_state,
                None => return Walk::Stopped { depth },
            }
        }
        Walk::Complete(state)
    }
}

/// Trait for automata that support state inspection
pub trait StateInspectable: FiniteStateAutomaton {
    /// Get all outgoing symbols from a state, ascending
    fn out_symbols(&self, state: StateId) -> Vec<Symbol>;

    /// Get the outgoing degree (number of transitions) from a state
    fn out_degree(&self, state: StateId) -> usize {
        self.out_symbols(state).len()
    }

    /// Check if a state has any outgoing transitions
    fn is_leaf(&self, state: StateId) -> bool {
        self.out_degree(state) == 0
    }
}

/// Statistics about trie layout and construction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrieStats {
    /// Occupied slots, root included
    pub num_states: usize,
    /// Total number of transitions
    pub num_transitions: usize,
    /// Length of the `base`/`check` arrays
    pub array_len: usize,
    /// Free slots inside the arrays
    pub free_slots: usize,
    /// Memory usage of both arrays in bytes
    pub memory_usage: usize,
    /// Calls to `insert` that passed input validation
    pub insertions: usize,
    /// Insertions that changed the arrays
    pub mutating_insertions: usize,
    /// Conflict resolutions performed
    pub relocations: usize,
    /// Child edges moved by conflict resolution
    pub relocated_edges: usize,
    /// Grandchild back-pointers rewritten by conflict resolution
    pub repointed_children: usize,
    /// Largest number of resolutions any single symbol step needed
    pub max_resolutions_per_step: usize,
}

impl TrieStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Fraction of array slots that are occupied
    pub fn load_factor(&self) -> f64 {
        if self.array_len == 0 {
            0.0
        } else {
            self.num_states as f64 / self.array_len as f64
        }
    }
}

/// Trait for automata that provide layout and construction statistics
pub trait StatisticsProvider {
    /// Get detailed statistics about the trie
    fn stats(&self) -> TrieStats;

    /// Get memory usage in bytes
    fn memory_usage(&self) -> usize {
        self.stats().memory_usage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Chain automaton: state n accepts only symbol n and moves to n + 1
    struct MockChain {
        length: usize,
    }

    impl FiniteStateAutomaton for MockChain {
        fn root(&self) -> StateId {
            0
        }

        fn alphabet_size(&self) -> usize {
            self.length
        }

        fn transition(&self, state: StateId, symbol: Symbol) -> Option<StateId> {
            (state < self.length && symbol == state).then_some(state + 1)
        }
    }

    impl StateInspectable for MockChain {
        fn out_symbols(&self, state: StateId) -> Vec<Symbol> {
            if state < self.length {
                vec![state]
            } else {
                Vec::new()
            }
        }
    }

    #[test]
    fn test_walk_complete_and_stopped() {
        let chain = MockChain { length: 3 };
        assert_eq!(chain.walk(&[0, 1, 2]), Walk::Complete(3));
        assert_eq!(chain.walk(&[]), Walk::Complete(0));
        assert_eq!(chain.walk(&[0, 2]), Walk::Stopped { depth: 1 });
        assert!(chain.walk(&[0, 1]).is_complete());
        assert!(!chain.walk(&[1]).is_complete());
    }

    #[test]
    fn test_state_inspection_defaults() {
        let chain = MockChain { length: 2 };
        assert_eq!(chain.out_degree(0), 1);
        assert!(!chain.is_leaf(1));
        assert!(chain.is_leaf(2));
    }

    #[test]
    fn test_trie_stats() {
        let mut stats = TrieStats::new();
        assert_eq!(stats.load_factor(), 0.0);

        stats.num_states = 30;
        stats.array_len = 40;
        assert!((stats.load_factor() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_trie_stats_serde() {
        let stats = TrieStats {
            num_states: 5,
            relocations: 2,
            ..Default::default()
        };
        let json = serde_json::to_string(&stats).unwrap();
        let back: TrieStats = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stats);
    }
}
