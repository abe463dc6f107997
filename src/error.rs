//! Error handling for the datrie library
//!
//! Recoverable failures (bad input symbols, encoder rejections, configuration
//! problems) are reported through [`DatrieError`]. Corrupted construction
//! bookkeeping is not an error value: it panics at the point of detection.

use thiserror::Error;

/// Main error type for the datrie library
#[derive(Error, Debug)]
pub enum DatrieError {
    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Symbol id outside `[0, alphabet_size)`
    #[error("Invalid symbol: {symbol} is outside the alphabet [0, {alphabet_size})")]
    InvalidSymbol {
        /// The rejected symbol id
        symbol: usize,
        /// Size of the trie's alphabet
        alphabet_size: usize,
    },

    /// A symbol encoder could not map an input character
    #[error("Encoding error: cannot encode {ch:?} at position {position}")]
    Encoding {
        /// The rejected character
        ch: char,
        /// Character position inside the input string
        position: usize,
    },

    /// Configuration or parameter errors
    #[error("Invalid configuration: {message}")]
    Configuration {
        /// Configuration error message
        message: String,
    },

    /// Structural invariant violation found by an explicit integrity check
    #[error("Integrity violation at index {index}: {message}")]
    Integrity {
        /// Array index where the violation was detected
        index: usize,
        /// Description of the broken invariant
        message: String,
    },
}

impl DatrieError {
    /// Create an invalid symbol error
    pub fn invalid_symbol(symbol: usize, alphabet_size: usize) -> Self {
        Self::InvalidSymbol {
            symbol,
            alphabet_size,
        }
    }

    /// Create an encoding error
    pub fn encoding(ch: char, position: usize) -> Self {
        Self::Encoding { ch, position }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an integrity error
    pub fn integrity<S: Into<String>>(index: usize, message: S) -> Self {
        Self::Integrity {
            index,
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(_) => true,
            Self::InvalidSymbol { .. } => true,
            Self::Encoding { .. } => true,
            Self::Configuration { .. } => false,
            Self::Integrity { .. } => false,
        }
    }

    /// Get the error category for logging/metrics
    pub fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::InvalidSymbol { .. } => "symbol",
            Self::Encoding { .. } => "encoding",
            Self::Configuration { .. } => "config",
            Self::Integrity { .. } => "integrity",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, DatrieError>;

/// Reject a symbol outside `[0, alphabet_size)`
#[inline]
pub fn check_symbol(symbol: usize, alphabet_size: usize) -> Result<()> {
    if symbol >= alphabet_size {
        Err(DatrieError::invalid_symbol(symbol, alphabet_size))
    } else {
        Ok(())
    }
}
