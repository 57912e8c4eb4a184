//! Word/delimiter tokenization
//!
//! Text is scanned left to right. Word characters (letters, decimal
//! digits, apostrophe, hyphen) accumulate into a word run; any other character
//! flushes the run as one token followed by the character itself as a
//! second token. The run is flushed even when empty, so adjacent
//! delimiters (or a leading delimiter) produce explicit empty-string
//! tokens.
//!
//! A word run at the very end of the text has no delimiter to flush it.
//! [`TrailingWord`] decides whether it is dropped or emitted.
//!
//! ```rust
//! use wordzip::string::{Tokenizer, TrailingWord};
//!
//! let tokens: Vec<&str> = Tokenizer::default().tokens("aa bb").map(|t| t.as_str()).collect();
//! assert_eq!(tokens, vec!["aa", " "]);
//!
//! let emit = Tokenizer::new(TrailingWord::Emit);
//! let tokens: Vec<&str> = emit.tokens("aa bb").map(|t| t.as_str()).collect();
//! assert_eq!(tokens, vec!["aa", " ", "bb"]);
//! ```

use crate::error::WordzipError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::{CharIndices, FromStr};
use unicode_general_category::{get_general_category, GeneralCategory};

/// Check if a character belongs to a word run
///
/// Word characters are letters (`Lu`, `Ll`, `Lt`, `Lm`, `Lo`), decimal
/// digits (`Nd`), `'` and `-`. Other numerics such as `½` and combining
/// marks such as Devanagari vowel signs are delimiters.
#[inline]
pub fn is_word_char(c: char) -> bool {
    if c.is_ascii() {
        return c.is_ascii_alphanumeric() || c == '\'' || c == '-';
    }
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
            | GeneralCategory::DecimalNumber
    )
}

/// The unflushed word run at the end of `text`
///
/// Empty when the text ends with a delimiter.
pub fn trailing_run(text: &str) -> &str {
    let start = text
        .char_indices()
        .rev()
        .find(|&(_, c)| !is_word_char(c))
        .map_or(0, |(idx, c)| idx + c.len_utf8());
    &text[start..]
}

/// Handling of a word run at the end of the text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrailingWord {
    /// Discard the run: it is neither counted nor encoded
    #[default]
    Drop,
    /// Emit the run as a final word token
    Emit,
}

impl FromStr for TrailingWord {
    type Err = WordzipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "drop" => Ok(Self::Drop),
            "emit" => Ok(Self::Emit),
            _ => Err(WordzipError::configuration(format!(
                "invalid trailing word policy: {s:?} (expected \"drop\" or \"emit\")"
            ))),
        }
    }
}

impl fmt::Display for TrailingWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Drop => f.write_str("drop"),
            Self::Emit => f.write_str("emit"),
        }
    }
}

/// Token class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Run of word characters, possibly empty
    Word,
    /// Exactly one non-word character
    Delimiter,
}

/// A token borrowed from the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token<'a> {
    text: &'a str,
    kind: TokenKind,
}

impl<'a> Token<'a> {
    fn word(text: &'a str) -> Self {
        Self {
            text,
            kind: TokenKind::Word,
        }
    }

    fn delimiter(text: &'a str) -> Self {
        Self {
            text,
            kind: TokenKind::Delimiter,
        }
    }

    /// Token text
    #[inline]
    pub fn as_str(&self) -> &'a str {
        self.text
    }

    /// Token class
    #[inline]
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Check whether this is an empty word token
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text)
    }
}

/// Word/delimiter tokenizer
///
/// Stateless apart from its trailing-word policy; the frequency pass and
/// the encode pass share one value so they always agree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tokenizer {
    trailing: TrailingWord,
}

impl Tokenizer {
    /// Create a tokenizer with the given trailing-word policy
    pub fn new(trailing: TrailingWord) -> Self {
        Self { trailing }
    }

    /// Trailing-word policy
    pub fn trailing_word(&self) -> TrailingWord {
        self.trailing
    }

    /// Lazily tokenize `text`
    pub fn tokens<'a>(&self, text: &'a str) -> Tokens<'a> {
        Tokens {
            text,
            chars: text.char_indices(),
            word_start: 0,
            pending: None,
            trailing: self.trailing,
            finished: false,
        }
    }

    /// Number of tokens `text` produces
    pub fn count(&self, text: &str) -> usize {
        self.tokens(text).count()
    }

    /// The trailing word run this tokenizer discards, if any
    pub fn dropped_tail<'a>(&self, text: &'a str) -> Option<&'a str> {
        match self.trailing {
            TrailingWord::Drop => Some(trailing_run(text)).filter(|run| !run.is_empty()),
            TrailingWord::Emit => None,
        }
    }
}

/// Iterator over the tokens of a text
pub struct Tokens<'a> {
    text: &'a str,
    chars: CharIndices<'a>,
    word_start: usize,
    /// Delimiter waiting behind the word just returned
    pending: Option<Token<'a>>,
    trailing: TrailingWord,
    finished: bool,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(token) = self.pending.take() {
            return Some(token);
        }

        while let Some((idx, c)) = self.chars.next() {
            if is_word_char(c) {
                continue;
            }
            let end = idx + c.len_utf8();
            let word = &self.text[self.word_start..idx];
            self.pending = Some(Token::delimiter(&self.text[idx..end]));
            self.word_start = end;
            return Some(Token::word(word));
        }

        if self.finished {
            return None;
        }
        self.finished = true;

        match self.trailing {
            TrailingWord::Emit if self.word_start < self.text.len() => {
                Some(Token::word(&self.text[self.word_start..]))
            }
            _ => None,
        }
    }
}

impl std::iter::FusedIterator for Tokens<'_> {}
