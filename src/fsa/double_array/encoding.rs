//! Mapping from characters to symbol ids
//!
//! The trie only stores integers in `[0, alphabet_size)`. An encoder supplies
//! the injective mapping from the characters of input strings to those ids.

use std::collections::HashMap;

use crate::error::{DatrieError, Result};
use crate::Symbol;

/// Injective mapping from characters to symbol ids in `[0, alphabet_size())`
pub trait SymbolEncoder {
    /// Number of symbol ids the encoder can produce
    fn alphabet_size(&self) -> usize;

    /// Symbol id of `ch`, or `None` if the character is not in the alphabet
    fn encode_char(&self, ch: char) -> Option<Symbol>;

    /// Encode a whole string, failing on the first unmapped character
    fn encode(&self, input: &str) -> Result<Vec<Symbol>> {
        input
            .chars()
            .enumerate()
            .map(|(position, ch)| {
                self.encode_char(ch)
                    .ok_or_else(|| DatrieError::encoding(ch, position))
            })
            .collect()
    }
}

/// `'a'..='z'` mapped to `0..26`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LowercaseAscii;

impl SymbolEncoder for LowercaseAscii {
    fn alphabet_size(&self) -> usize {
        26
    }

    #[inline]
    fn encode_char(&self, ch: char) -> Option<Symbol> {
        ch.is_ascii_lowercase().then(|| ch as Symbol - 'a' as Symbol)
    }
}

/// Encoder over an explicit list of characters, numbered in order of first appearance
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: HashMap<char, Symbol>,
}

impl SymbolTable {
    /// Build a table from the distinct characters of `alphabet`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use datrie::fsa::{SymbolEncoder, SymbolTable};
    ///
    /// let dna = SymbolTable::new("acgt");
    /// assert_eq!(dna.alphabet_size(), 4);
    /// assert_eq!(dna.encode("gattaca").unwrap(), vec![2, 0, 3, 3, 0, 1, 0]);
    /// ```
    pub fn new(alphabet: &str) -> Self {
        let mut symbols = HashMap::new();
        for ch in alphabet.chars() {
            let next = symbols.len();
            symbols.entry(ch).or_insert(next);
        }
        Self { symbols }
    }
}

impl SymbolEncoder for SymbolTable {
    fn alphabet_size(&self) -> usize {
        self.symbols.len()
    }

    fn encode_char(&self, ch: char) -> Option<Symbol> {
        self.symbols.get(&ch).copied()
    }
}
