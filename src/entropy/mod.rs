//! Word-level entropy coding
//!
//! This module implements Huffman coding over word and delimiter tokens:
//! frequency counting, prefix tree construction, code generation, encoding
//! and trie-based decoding.

pub mod bits;
pub mod code_table;
pub mod coding;
pub mod decoder;
pub mod huffman;

// Re-export main types
pub use bits::BitString;
pub use code_table::CodeTable;
pub use coding::{build_code, count_frequencies, decode, CodingTree, Encoder};
pub use decoder::Decoder;
pub use huffman::{CodeGenerator, NodeId, PrefixNode, PrefixTree, TreeBuilder};
