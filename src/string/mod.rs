//! Text processing
//!
//! Splits text into the word and delimiter tokens that the coder counts
//! and encodes.

mod tokenizer;

pub use tokenizer::{is_word_char, trailing_run, Token, TokenKind, Tokenizer, Tokens, TrailingWord};
