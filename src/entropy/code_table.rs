//! Token to code mapping
//!
//! A [`CodeTable`] is a fixed-capacity [`ProbeTable`] from token to
//! [`BitString`]. Iteration follows insertion order, which for generated
//! tables is the left-to-right leaf order of the prefix tree.
//!
//! Tables can be carried between encoder and decoder in two forms:
//!
//! - **Text** ([`CodeTable::to_text`]): one entry per line,
//!   `<token length in chars>:<token><code>\n`. The length prefix makes any
//!   token (including `:`, digits, newlines and the empty token)
//!   unambiguous without escaping.
//! - **JSON** (serde): an ordered array of `[token, code]` pairs.

use super::bits::BitString;
use crate::error::{Result, WordzipError};
use crate::hash_map::{ProbeStats, ProbeTable};
use serde::de::Error as DeError;
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

/// Smallest capacity chosen when a table is rebuilt from pairs
const MIN_REBUILT_CAPACITY: usize = 16;

/// Mapping from token to prefix-free code
#[derive(Debug, Clone)]
pub struct CodeTable {
    table: ProbeTable<String, BitString>,
}

impl CodeTable {
    /// Create an empty table with exactly `capacity` slots
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Ok(Self {
            table: ProbeTable::with_capacity(capacity)?,
        })
    }

    /// Build a table from `(token, code)` pairs, keeping their order
    ///
    /// Capacity is sized at twice the number of pairs. Duplicate tokens are
    /// rejected.
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, BitString)>,
    {
        let pairs: Vec<(String, BitString)> = pairs.into_iter().collect();
        let capacity = (pairs.len() * 2 + 1).max(MIN_REBUILT_CAPACITY);
        let mut codes = Self::with_capacity(capacity)?;
        for (token, code) in pairs {
            if codes.contains(&token) {
                return Err(WordzipError::invalid_data(format!(
                    "duplicate token {:?} in code table",
                    token
                )));
            }
            codes.insert(token, code)?;
        }
        Ok(codes)
    }

    /// Bind `token` to `code`, returning the previous code if any
    pub fn insert(&mut self, token: String, code: BitString) -> Result<Option<BitString>> {
        self.table.put(token, code)
    }

    /// Code of `token`, `None` when the token has no code
    #[inline]
    pub fn get(&self, token: &str) -> Option<&BitString> {
        self.table.get(token)
    }

    /// Code of `token` or [`WordzipError::AbsentKey`]
    pub fn lookup(&self, token: &str) -> Result<&BitString> {
        self.table.lookup(token)
    }

    /// Check whether `token` has a code
    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        self.table.contains_key(token)
    }

    /// Number of tokens
    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Check whether the table is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Number of slots of the backing table
    #[inline]
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Iterate over `(token, code)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BitString)> + '_ {
        self.table.iter().map(|(token, code)| (token.as_str(), code))
    }

    /// Iterate over tokens in insertion order
    pub fn tokens(&self) -> impl Iterator<Item = &str> + '_ {
        self.table.keys().map(String::as_str)
    }

    /// Length of the longest code
    pub fn max_code_length(&self) -> usize {
        self.table.values().map(BitString::len).max().unwrap_or(0)
    }

    /// First token bound to the empty code, if any
    pub fn degenerate_token(&self) -> Option<&str> {
        self.iter()
            .find(|(_, code)| code.is_empty())
            .map(|(token, _)| token)
    }

    /// Check that no code is a prefix of (or equal to) another
    pub fn is_prefix_free(&self) -> bool {
        let mut codes: Vec<&BitString> = self.table.values().collect();
        // All extensions of a code sort directly after it
        codes.sort();
        codes.windows(2).all(|pair| !pair[0].is_prefix_of(pair[1]))
    }

    /// Probe statistics of the backing table
    pub fn stats(&self) -> ProbeStats {
        self.table.stats()
    }

    /// Render as length-prefixed text
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for (token, code) in self.iter() {
            out.push_str(&token.chars().count().to_string());
            out.push(':');
            out.push_str(token);
            out.push_str(&code.to_string());
            out.push('\n');
        }
        out
    }

    /// Parse the text produced by [`CodeTable::to_text`]
    pub fn from_text(text: &str) -> Result<Self> {
        let mut chars = text.chars().peekable();
        let mut pairs = Vec::new();
        let mut line = 1usize;

        while chars.peek().is_some() {
            let token = parse_token(&mut chars, line)?;
            let code = parse_code(&mut chars, line)?;
            pairs.push((token, code));
            line += 1;
        }

        Self::from_pairs(pairs)
    }
}

fn parse_token(chars: &mut Peekable<Chars<'_>>, line: usize) -> Result<String> {
    let mut digits = String::new();
    loop {
        match chars.next() {
            Some(':') => break,
            Some(c) if c.is_ascii_digit() => digits.push(c),
            Some(c) => {
                return Err(WordzipError::invalid_data(format!(
                    "entry {}: unexpected {:?} in token length",
                    line, c
                )))
            }
            None => {
                return Err(WordzipError::invalid_data(format!(
                    "entry {}: truncated token length",
                    line
                )))
            }
        }
    }

    let length: usize = digits.parse().map_err(|_| {
        WordzipError::invalid_data(format!("entry {}: missing token length", line))
    })?;

    let token: String = chars.by_ref().take(length).collect();
    if token.chars().count() != length {
        return Err(WordzipError::invalid_data(format!(
            "entry {}: token shorter than its declared length {}",
            line, length
        )));
    }
    Ok(token)
}

fn parse_code(chars: &mut Peekable<Chars<'_>>, line: usize) -> Result<BitString> {
    let mut code = BitString::new();
    loop {
        match chars.next() {
            Some('0') => code.push(false),
            Some('1') => code.push(true),
            Some('\n') => return Ok(code),
            Some(c) => {
                return Err(WordzipError::invalid_data(format!(
                    "entry {}: unexpected {:?} in code",
                    line, c
                )))
            }
            None => {
                return Err(WordzipError::invalid_data(format!(
                    "entry {}: missing line terminator",
                    line
                )))
            }
        }
    }
}

/// Renders entries in slot order as `[(token, code), ...]`
impl fmt::Display for CodeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.table, f)
    }
}

impl Serialize for CodeTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for pair in self.iter() {
            seq.serialize_element(&pair)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for CodeTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let pairs = Vec::<(String, BitString)>::deserialize(deserializer)?;
        Self::from_pairs(pairs).map_err(DeError::custom)
    }
}
