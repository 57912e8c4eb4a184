//! # Wordzip: Word-Level Huffman Coding
//!
//! This crate compresses text by assigning prefix-free bit codes to whole
//! words and to single delimiter characters, using Huffman's algorithm
//! over observed token frequencies.
//!
//! ## Key Features
//!
//! - **Tokenization**: word runs and single-character delimiters, with a
//!   configurable policy for a word at the very end of the text
//! - **Probe Tables**: fixed-capacity open-addressing maps with linear
//!   probing, reproducible polynomial hashing and probe statistics
//! - **Prefix Trees**: arena-backed Huffman trees built without recursion
//! - **Transmittable Code Tables**: length-prefixed text and JSON forms that
//!   decode independently of the tree they came from
//!
//! ## Quick Start
//!
//! ```rust
//! use wordzip::{build_code, decode, CodeTable, CodingConfig, CodingTree, TrailingWord};
//!
//! // Encode and get the code table to ship with the bits
//! let text = "the rain in spain falls mainly on the plain.";
//! let (bits, codes) = build_code(text)?;
//!
//! // Decode with a table restored from its text form
//! let restored = CodeTable::from_text(&codes.to_text())?;
//! assert_eq!(decode(&bits, &restored)?, text);
//!
//! // A final word without a delimiter is kept only on request
//! let config = CodingConfig::default().with_trailing_word(TrailingWord::Emit);
//! let tree = CodingTree::with_config("aa bb", config)?;
//! assert_eq!(tree.decode()?, "aa bb");
//! assert_eq!(tree.tree().leaf_count(), 3);
//! # Ok::<(), wordzip::WordzipError>(())
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod entropy;
pub mod error;
pub mod hash_map;
pub mod string;

// Re-export core types
pub use config::{CodingConfig, Config};
pub use error::{Result, WordzipError};
pub use hash_map::{ProbeStats, ProbeTable};
pub use string::{Token, TokenKind, Tokenizer, TrailingWord};

pub use entropy::{
    build_code, decode, BitString, CodeGenerator, CodeTable, CodingTree, Decoder, Encoder,
    PrefixNode, PrefixTree, TreeBuilder,
};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the library version at debug level
///
/// Holds no state, so calling it more than once is harmless.
pub fn init() {
    log::debug!("Initializing wordzip v{}", VERSION);
}
