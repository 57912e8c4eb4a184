//! Error handling for the wordzip library
//!
//! Every failure in the coding pipeline is local and synchronous: it is
//! returned at the point of detection and never retried.

use thiserror::Error;

/// Main error type for the wordzip library
#[derive(Error, Debug)]
pub enum WordzipError {
    /// I/O related errors (configuration files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Lookup of a key that was never inserted
    #[error("Absent key: {key:?}")]
    AbsentKey {
        /// String form of the missing key
        key: String,
    },

    /// Insertion of a new key into a table with no free slot
    #[error("Capacity exhausted: no free slot among {capacity} buckets")]
    CapacityExhausted {
        /// Fixed capacity of the table
        capacity: usize,
    },

    /// A token bound to the empty code, which cannot be decoded
    #[error("Degenerate code: token {token:?} is bound to the empty code")]
    DegenerateCode {
        /// The token holding the empty code
        token: String,
    },

    /// The encoder produced a token the code table does not contain
    #[error("Tokenization mismatch: token {token:?} at position {position} has no code")]
    TokenizationMismatch {
        /// The token without a code
        token: String,
        /// Index of the token in the token stream
        position: usize,
    },

    /// Invalid data format or corruption
    #[error("Invalid data: {message}")]
    InvalidData {
        /// Error message describing the issue
        message: String,
    },

    /// Configuration or parameter errors
    #[error("Invalid configuration: {message}")]
    Configuration {
        /// Configuration error message
        message: String,
    },
}

impl WordzipError {
    /// Create an absent key error
    pub fn absent_key<S: Into<String>>(key: S) -> Self {
        Self::AbsentKey { key: key.into() }
    }

    /// Create a capacity exhausted error
    pub fn capacity_exhausted(capacity: usize) -> Self {
        Self::CapacityExhausted { capacity }
    }

    /// Create a degenerate code error
    pub fn degenerate_code<S: Into<String>>(token: S) -> Self {
        Self::DegenerateCode { token: token.into() }
    }

    /// Create a tokenization mismatch error
    pub fn tokenization_mismatch<S: Into<String>>(token: S, position: usize) -> Self {
        Self::TokenizationMismatch {
            token: token.into(),
            position,
        }
    }

    /// Create an invalid data error
    pub fn invalid_data<S: Into<String>>(message: S) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error
    ///
    /// The coding core is purely computational, so only I/O can succeed on
    /// a retry.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(_) => true,
            Self::AbsentKey { .. } => false,
            Self::CapacityExhausted { .. } => false,
            Self::DegenerateCode { .. } => false,
            Self::TokenizationMismatch { .. } => false,
            Self::InvalidData { .. } => false,
            Self::Configuration { .. } => false,
        }
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::AbsentKey { .. } => "absent_key",
            Self::CapacityExhausted { .. } => "capacity",
            Self::DegenerateCode { .. } => "degenerate_code",
            Self::TokenizationMismatch { .. } => "tokenization",
            Self::InvalidData { .. } => "data",
            Self::Configuration { .. } => "config",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, WordzipError>;
