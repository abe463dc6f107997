//! # Datrie: Incremental Double-Array Tries
//!
//! This crate builds a double-array trie over a fixed integer alphabet. The
//! trie lives in two parallel arrays (`base` and `check`) and is grown one
//! symbol sequence at a time. When a new edge lands on a slot that another
//! state already owns, the conflicting row is relocated to a free block.
//!
//! ## Key Features
//!
//! - **Compact Layout**: Transitions are a single addition plus an ownership check
//! - **Incremental Construction**: Insert in any order, duplicates are no-ops
//! - **Conflict Relocation**: Ordered free-slot set drives first-fit placement
//! - **Integrity Checking**: [`DoubleArrayTrie::verify`] rechecks every structural invariant
//! - **Configurable**: Presets, environment variables, and JSON files via [`config::Config`]
//!
//! ## Quick Start
//!
//! ```rust
//! use datrie::{DoubleArrayTrie, FiniteStateAutomaton, LowercaseAscii, SymbolEncoder};
//!
//! let mut trie = DoubleArrayTrie::new(26).unwrap();
//! trie.insert_all(["cat", "car", "cargo"], &LowercaseAscii).unwrap();
//!
//! let cat = LowercaseAscii.encode("cat").unwrap();
//! assert!(trie.walk(&cat).is_complete());
//! assert!(trie.verify().is_ok());
//!
//! // Raw integer views of both arrays
//! let bases = trie.base_values();
//! let checks = trie.check_values();
//! assert_eq!(bases.len(), checks.len());
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod fsa;

/// Index of a slot in the parallel arrays; a state is identified by its slot
pub type StateId = usize;

/// Symbol id in `[0, alphabet_size)`
pub type Symbol = usize;

// Re-export core types
pub use config::{Config, DoubleArrayConfig};
pub use error::{DatrieError, Result};
pub use fsa::{
    Base, Check, DoubleArrayTrie, FiniteStateAutomaton, LowercaseAscii, StateInspectable,
    StatisticsProvider, SymbolEncoder, SymbolTable, TrieStats, Walk,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library
///
/// Logs the version. Nothing else needs global setup.
pub fn init() {
    log::debug!("datrie {} initialized", VERSION);
}
