//! Word-level Huffman coding pipeline
//!
//! [`CodingTree`] runs the whole encode side for one text: tokenize and
//! count, build the prefix tree, derive the code table, then tokenize
//! again and concatenate codes. Decoding only needs the bits and a code
//! table, see [`decode`].
//!
//! ```rust
//! use wordzip::{build_code, decode};
//!
//! let text = "to be, or not to be.";
//! let (bits, codes) = build_code(text)?;
//! assert_eq!(decode(&bits, &codes)?, text);
//! # Ok::<(), wordzip::WordzipError>(())
//! ```

use super::bits::BitString;
use super::code_table::CodeTable;
use super::decoder::Decoder;
use super::huffman::{CodeGenerator, PrefixTree, TreeBuilder};
use crate::config::{CodingConfig, Config};
use crate::error::{Result, WordzipError};
use crate::hash_map::ProbeTable;
use crate::string::Tokenizer;

/// Count how often each token of `text` occurs
///
/// The table has exactly `capacity` slots and lists tokens in order of
/// first occurrence.
pub fn count_frequencies(
    tokenizer: &Tokenizer,
    text: &str,
    capacity: usize,
) -> Result<ProbeTable<String, usize>> {
    let mut frequencies = ProbeTable::with_capacity(capacity)?;
    for token in tokenizer.tokens(text) {
        match frequencies.get_mut(token.as_str()) {
            Some(count) => *count += 1,
            None => {
                frequencies.put(token.as_str().to_string(), 1)?;
            }
        }
    }
    Ok(frequencies)
}

/// Translates text into bits with a fixed code table
#[derive(Debug, Clone, Copy)]
pub struct Encoder<'a> {
    codes: &'a CodeTable,
    tokenizer: Tokenizer,
}

impl<'a> Encoder<'a> {
    /// Create an encoder; `tokenizer` must match the one the codes were built with
    pub fn new(codes: &'a CodeTable, tokenizer: Tokenizer) -> Self {
        Self { codes, tokenizer }
    }

    /// Concatenate the codes of every token of `text`
    ///
    /// A token without a code fails with
    /// [`WordzipError::TokenizationMismatch`] carrying its index in the
    /// token stream.
    pub fn encode(&self, text: &str) -> Result<BitString> {
        let mut bits = BitString::new();
        for (position, token) in self.tokenizer.tokens(text).enumerate() {
            let code = self
                .codes
                .get(token.as_str())
                .ok_or_else(|| WordzipError::tokenization_mismatch(token.as_str(), position))?;
            bits.append(code);
        }
        Ok(bits)
    }
}

/// Encoded text together with everything built to encode it
#[derive(Debug, Clone)]
pub struct CodingTree {
    config: CodingConfig,
    frequencies: ProbeTable<String, usize>,
    tree: PrefixTree,
    codes: CodeTable,
    bits: BitString,
}

impl CodingTree {
    /// Encode `text` with the default configuration
    pub fn new(text: &str) -> Result<Self> {
        Self::with_config(text, CodingConfig::default())
    }

    /// Encode `text` with `config`
    pub fn with_config(text: &str, config: CodingConfig) -> Result<Self> {
        config.validate()?;
        let tokenizer = Tokenizer::new(config.trailing_word);

        if let Some(tail) = tokenizer.dropped_tail(text) {
            log::warn!(
                "Trailing word {:?} is not followed by a delimiter and will not be encoded",
                tail
            );
        }

        let token_count = tokenizer.count(text);
        let capacity = config.capacity_for(token_count);
        let frequencies = count_frequencies(&tokenizer, text, capacity)?;
        log::debug!(
            "Counted {} tokens ({} distinct) into a table of {} buckets",
            token_count,
            frequencies.len(),
            capacity
        );

        let tree = TreeBuilder::build(&frequencies);
        let code_capacity = config.capacity_for(frequencies.len());
        let codes = CodeGenerator::generate(&tree, code_capacity)?;
        if let Some(token) = codes.degenerate_token() {
            return Err(WordzipError::degenerate_code(token));
        }

        let bits = Encoder::new(&codes, tokenizer).encode(text)?;
        log::debug!(
            "Encoded {} tokens into {} bits, longest code {} bits",
            token_count,
            bits.len(),
            codes.max_code_length()
        );

        if config.log_table_stats {
            log::debug!("Frequency table statistics:\n{}", frequencies.stats());
            log::debug!("Code table statistics:\n{}", codes.stats());
        }

        Ok(Self {
            config,
            frequencies,
            tree,
            codes,
            bits,
        })
    }

    /// Encoded bit sequence
    #[inline]
    pub fn bits(&self) -> &BitString {
        &self.bits
    }

    /// Token to code table
    #[inline]
    pub fn codes(&self) -> &CodeTable {
        &self.codes
    }

    /// Token frequencies, in order of first occurrence
    #[inline]
    pub fn frequencies(&self) -> &ProbeTable<String, usize> {
        &self.frequencies
    }

    /// Prefix tree the codes were derived from
    #[inline]
    pub fn tree(&self) -> &PrefixTree {
        &self.tree
    }

    /// Configuration used for encoding
    #[inline]
    pub fn config(&self) -> &CodingConfig {
        &self.config
    }

    /// Tokenizer used for both passes
    pub fn tokenizer(&self) -> Tokenizer {
        Tokenizer::new(self.config.trailing_word)
    }

    /// Decode the bits back with the table built here
    pub fn decode(&self) -> Result<String> {
        decode(&self.bits, &self.codes)
    }

    /// Split into the bit sequence and the code table
    pub fn into_parts(self) -> (BitString, CodeTable) {
        (self.bits, self.codes)
    }
}

/// Encode `text` with the default configuration
///
/// Returns the bit sequence and the code table needed to decode it.
pub fn build_code(text: &str) -> Result<(BitString, CodeTable)> {
    Ok(CodingTree::new(text)?.into_parts())
}

/// Decode `bits` with `codes`
///
/// `codes` may come from anywhere, e.g. [`CodeTable::from_text`].
pub fn decode(bits: &BitString, codes: &CodeTable) -> Result<String> {
    Decoder::new(codes)?.decode(bits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::string::TrailingWord;

    #[test]
    fn test_count_frequencies() {
        let frequencies = count_frequencies(&Tokenizer::default(), "a b a. ", 32).unwrap();
        let counts: Vec<(&str, usize)> = frequencies
            .iter()
            .map(|(token, &count)| (token.as_str(), count))
            .collect();
        assert_eq!(counts, vec![("a", 2), (" ", 3), ("b", 1), (".", 1), ("", 1)]);
        assert_eq!(frequencies.capacity(), 32);
    }

    #[test]
    fn test_count_frequencies_capacity_exhausted() {
        let result = count_frequencies(&Tokenizer::default(), "a b c d ", 3);
        assert!(matches!(
            result,
            Err(WordzipError::CapacityExhausted { capacity: 3 })
        ));
    }

    #[test]
    fn test_code_table_sized_by_vocabulary() {
        let text = "to be or not to be, ".repeat(2000);
        let tree = CodingTree::new(&text).unwrap();
        let distinct = tree.codes().len();
        assert_eq!(distinct, tree.frequencies().len());

        let config = CodingConfig::default();
        assert_eq!(tree.codes().capacity(), config.capacity_for(distinct));
        let bound = (distinct * config.capacity_factor + 1).max(config.min_capacity);
        assert!(tree.codes().capacity() <= bound);
        assert!(tree.frequencies().capacity() > 100 * tree.codes().capacity());
        assert!(tree.codes().stats().fill_percentage > 10.0);
        assert_eq!(tree.decode().unwrap(), text);
    }

    #[test]
    fn test_round_trip() {
        let text = "the cat sat on the mat, and the dog sat on the log.\n";
        let tree = CodingTree::new(text).unwrap();
        assert_eq!(tree.decode().unwrap(), text);
        assert_eq!(tree.tree().root_weight(), Tokenizer::default().count(text));
        assert!(tree.codes().is_prefix_free());
        assert_eq!(tree.codes().len(), tree.frequencies().len());
    }

    #[test]
    fn test_frequent_tokens_get_short_codes() {
        let text = "x x x x x x x x y z.";
        let tree = CodingTree::new(text).unwrap();
        let space = tree.codes().get(" ").map(BitString::len).unwrap();
        let z = tree.codes().get("z").map(BitString::len).unwrap();
        assert!(space < z);
    }

    #[test]
    fn test_trailing_word_policies() {
        let dropped = CodingTree::new("aa bb").unwrap();
        assert_eq!(dropped.decode().unwrap(), "aa ");
        assert!(!dropped.codes().contains("bb"));

        let config = CodingConfig::default().with_trailing_word(TrailingWord::Emit);
        let emitted = CodingTree::with_config("aa bb", config).unwrap();
        assert_eq!(emitted.decode().unwrap(), "aa bb");
        assert_eq!(emitted.tokenizer().trailing_word(), TrailingWord::Emit);
    }

    #[test]
    fn test_encoder_reports_mismatch_position() {
        let codes = CodingTree::new("aa bb ").unwrap().into_parts().1;
        let encoder = Encoder::new(&codes, Tokenizer::default());
        match encoder.encode("aa cc ") {
            Err(WordzipError::TokenizationMismatch { token, position }) => {
                assert_eq!(token, "cc");
                assert_eq!(position, 2);
            }
            other => panic!("expected TokenizationMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = CodingConfig::default();
        config.capacity_factor = 0;
        assert!(matches!(
            CodingTree::with_config("a b ", config),
            Err(WordzipError::Configuration { .. })
        ));
    }
}
