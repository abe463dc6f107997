//! Configuration for double-array trie construction.

use super::{parse_env_bool, parse_env_var, Config, ValidationError};
use crate::error::{DatrieError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest supported alphabet
pub const MAX_ALPHABET_SIZE: usize = 1 << 16;

/// Largest number of slots a configuration may reserve up front
pub const MAX_RESERVE_CAPACITY: usize = 1 << 28;

/// Settings for a [`DoubleArrayTrie`](crate::fsa::DoubleArrayTrie)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoubleArrayConfig {
    /// Number of symbols; valid symbols are `0..alphabet_size`
    pub alphabet_size: usize,
    /// Slots to reserve up front. Only affects allocation, never the array length.
    pub reserve_capacity: usize,
    /// Recheck every structural invariant after each insert, panicking on violation
    pub verify_after_insert: bool,
}

impl Default for DoubleArrayConfig {
    fn default() -> Self {
        Self {
            alphabet_size: 26,
            reserve_capacity: 64,
            verify_after_insert: false,
        }
    }
}

impl Config for DoubleArrayConfig {
    fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if self.alphabet_size == 0 || self.alphabet_size > MAX_ALPHABET_SIZE {
            errors.push(
                ValidationError::new(
                    "alphabet_size",
                    &self.alphabet_size.to_string(),
                    "alphabet size must be between 1 and 65536",
                )
                .with_suggestion("26 for lowercase ASCII, 256 for bytes"),
            );
        }

        if self.reserve_capacity > MAX_RESERVE_CAPACITY {
            errors.push(
                ValidationError::new(
                    "reserve_capacity",
                    &self.reserve_capacity.to_string(),
                    "reserve capacity exceeds the supported slot count",
                )
                .with_suggestion("at most 268435456 slots; the arrays grow on demand"),
            );
        }

        if !errors.is_empty() {
            return Err(DatrieError::configuration(format!(
                "Configuration validation failed: {}",
                errors
                    .into_iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join("; ")
            )));
        }

        Ok(())
    }

    fn from_env_with_prefix(prefix: &str) -> Result<Self> {
        let mut config = Self::default();
        config.alphabet_size =
            parse_env_var(&format!("{}TRIE_ALPHABET_SIZE", prefix), config.alphabet_size);
        config.reserve_capacity = parse_env_var(
            &format!("{}TRIE_RESERVE_CAPACITY", prefix),
            config.reserve_capacity,
        );
        config.verify_after_insert =
            parse_env_bool(&format!("{}TRIE_VERIFY", prefix), config.verify_after_insert);
        config.validate()?;
        log::debug!("loaded trie config from environment: {:?}", config);
        Ok(config)
    }

    fn performance_preset() -> Self {
        Self {
            reserve_capacity: 1 << 16,
            ..Self::default()
        }
    }

    fn memory_preset() -> Self {
        Self {
            reserve_capacity: 0,
            ..Self::default()
        }
    }

    fn realtime_preset() -> Self {
        Self {
            reserve_capacity: 1 << 12,
            ..Self::default()
        }
    }

    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let serialized = serde_json::to_string_pretty(self).map_err(|e| {
            DatrieError::configuration(format!("Failed to serialize trie config: {}", e))
        })?;
        std::fs::write(path, serialized)?;
        Ok(())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            DatrieError::configuration(format!("Failed to parse trie config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }
}

impl DoubleArrayConfig {
    /// Create a new configuration builder.
    pub fn builder() -> DoubleArrayConfigBuilder {
        DoubleArrayConfigBuilder::new()
    }
}

/// Builder for [`DoubleArrayConfig`]
#[derive(Debug, Clone, Default)]
pub struct DoubleArrayConfigBuilder {
    config: DoubleArrayConfig,
}

impl DoubleArrayConfigBuilder {
    /// Create a new configuration builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the alphabet size.
    pub fn alphabet_size(mut self, size: usize) -> Self {
        self.config.alphabet_size = size;
        self
    }

    /// Set how many slots to reserve up front.
    pub fn reserve_capacity(mut self, capacity: usize) -> Self {
        self.config.reserve_capacity = capacity;
        self
    }

    /// Enable or disable the integrity check after every insert.
    pub fn verify_after_insert(mut self, enabled: bool) -> Self {
        self.config.verify_after_insert = enabled;
        self
    }

    /// Validate and return the configuration.
    pub fn build(self) -> Result<DoubleArrayConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
