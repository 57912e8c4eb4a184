//! Bit sequence decoding against a code table
//!
//! The decoder never sees the tree the codes came from. It rebuilds a
//! binary trie from the `(token, code)` pairs alone, so a table restored
//! from text or JSON decodes the same as the one produced by encoding.

use super::bits::BitString;
use super::code_table::CodeTable;
use crate::error::{Result, WordzipError};

/// Trie node; leaves carry a token and have no children
#[derive(Debug, Clone, Default)]
struct TrieNode {
    token: Option<String>,
    children: [Option<usize>; 2],
}

impl TrieNode {
    #[inline]
    fn is_leaf(&self) -> bool {
        self.children == [None, None]
    }
}

const ROOT: usize = 0;

/// Prefix trie rebuilt from a [`CodeTable`]
#[derive(Debug, Clone)]
pub struct Decoder {
    nodes: Vec<TrieNode>,
}

impl Decoder {
    /// Rebuild the trie for `codes`
    ///
    /// Fails with [`WordzipError::DegenerateCode`] if a token has the empty
    /// code, and with [`WordzipError::InvalidData`] if two tokens share a
    /// code or one code is a prefix of another.
    pub fn new(codes: &CodeTable) -> Result<Self> {
        let mut nodes = vec![TrieNode::default()];

        for (token, code) in codes.iter() {
            if code.is_empty() {
                return Err(WordzipError::degenerate_code(token));
            }

            let mut current = ROOT;
            for bit in code.iter() {
                if nodes[current].token.is_some() {
                    return Err(conflict(token, code));
                }
                let branch = usize::from(bit);
                current = match nodes[current].children[branch] {
                    Some(child) => child,
                    None => {
                        let child = nodes.len();
                        nodes.push(TrieNode::default());
                        nodes[current].children[branch] = Some(child);
                        child
                    }
                };
            }

            let leaf = &mut nodes[current];
            if leaf.token.is_some() || !leaf.is_leaf() {
                return Err(conflict(token, code));
            }
            leaf.token = Some(token.to_string());
        }

        log::trace!("Rebuilt decode trie with {} nodes", nodes.len());
        Ok(Self { nodes })
    }

    /// Number of trie nodes, including the root
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Decode `bits` into the token sequence
    pub fn decode_tokens(&self, bits: &BitString) -> Result<Vec<&str>> {
        let mut tokens = Vec::new();
        let mut current = ROOT;

        for (offset, bit) in bits.iter().enumerate() {
            current = self.nodes[current].children[usize::from(bit)].ok_or_else(|| {
                WordzipError::invalid_data(format!(
                    "bit {} at offset {} leads to no code",
                    u8::from(bit),
                    offset
                ))
            })?;

            let node = &self.nodes[current];
            if node.is_leaf() {
                match node.token.as_deref() {
                    Some(token) => tokens.push(token),
                    None => {
                        return Err(WordzipError::invalid_data(format!(
                            "trie leaf without token at offset {}",
                            offset
                        )))
                    }
                }
                current = ROOT;
            }
        }

        if current != ROOT {
            return Err(WordzipError::invalid_data(format!(
                "bit sequence of length {} ends inside a code",
                bits.len()
            )));
        }

        Ok(tokens)
    }

    /// Decode `bits` into text
    pub fn decode(&self, bits: &BitString) -> Result<String> {
        Ok(self.decode_tokens(bits)?.concat())
    }
}

fn conflict(token: &str, code: &BitString) -> WordzipError {
    WordzipError::invalid_data(format!(
        "code {} of token {:?} collides with another code",
        code, token
    ))
}
