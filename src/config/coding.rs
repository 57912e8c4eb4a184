//! Coding pipeline configuration.

use super::{parse_env_bool, parse_env_var, Config};
use crate::error::{Result, WordzipError};
use crate::hash_map::MAX_BUCKETS;
use crate::string::TrailingWord;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Configuration of the coding pipeline.
///
/// Both the frequency table and the code table are fixed-capacity probe
/// tables. Unless `fixed_capacity` is set, their capacity is derived from
/// the number of tokens the text produces, which bounds the number of
/// distinct tokens, so the tables can never fill up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodingConfig {
    /// Slots per emitted token when deriving table capacity (at least 2)
    pub capacity_factor: usize,
    /// Lower bound of the derived capacity
    pub min_capacity: usize,
    /// Use exactly this capacity instead of deriving one
    pub fixed_capacity: Option<usize>,
    /// What the tokenizer does with a word run at the end of the text
    pub trailing_word: TrailingWord,
    /// Log probe-table statistics at debug level after encoding
    pub log_table_stats: bool,
}

impl Default for CodingConfig {
    fn default() -> Self {
        Self {
            capacity_factor: 2,
            min_capacity: 16,
            fixed_capacity: None,
            trailing_word: TrailingWord::Drop,
            log_table_stats: false,
        }
    }
}

impl CodingConfig {
    /// Table capacity for a text that tokenizes into `token_count` tokens
    pub fn capacity_for(&self, token_count: usize) -> usize {
        match self.fixed_capacity {
            Some(capacity) => capacity,
            None => token_count
                .saturating_mul(self.capacity_factor)
                .saturating_add(1)
                .max(self.min_capacity)
                .min(MAX_BUCKETS),
        }
    }

    /// Set a fixed table capacity
    pub fn with_fixed_capacity(mut self, capacity: usize) -> Self {
        self.fixed_capacity = Some(capacity);
        self
    }

    /// Set the trailing word policy
    pub fn with_trailing_word(mut self, policy: TrailingWord) -> Self {
        self.trailing_word = policy;
        self
    }

    /// Enable or disable table statistics logging
    pub fn with_table_stats(mut self, enabled: bool) -> Self {
        self.log_table_stats = enabled;
        self
    }
}

impl Config for CodingConfig {
    fn validate(&self) -> Result<()> {
        if self.capacity_factor < 2 {
            return Err(WordzipError::configuration(
                "capacity_factor must be at least 2",
            ));
        }
        if self.min_capacity == 0 || self.min_capacity > MAX_BUCKETS {
            return Err(WordzipError::configuration(format!(
                "min_capacity must be between 1 and {}",
                MAX_BUCKETS
            )));
        }
        if let Some(capacity) = self.fixed_capacity {
            if capacity == 0 || capacity > MAX_BUCKETS {
                return Err(WordzipError::configuration(format!(
                    "fixed_capacity must be between 1 and {}",
                    MAX_BUCKETS
                )));
            }
        }
        Ok(())
    }

    fn from_env_with_prefix(prefix: &str) -> Result<Self> {
        let mut config = Self::default();
        config.capacity_factor =
            parse_env_var(&format!("{}CAPACITY_FACTOR", prefix), config.capacity_factor);
        config.min_capacity =
            parse_env_var(&format!("{}MIN_CAPACITY", prefix), config.min_capacity);
        config.fixed_capacity = env::var(format!("{}FIXED_CAPACITY", prefix))
            .ok()
            .and_then(|s| s.parse().ok())
            .or(config.fixed_capacity);
        config.trailing_word =
            parse_env_var(&format!("{}TRAILING_WORD", prefix), config.trailing_word);
        config.log_table_stats =
            parse_env_bool(&format!("{}LOG_TABLE_STATS", prefix), config.log_table_stats);
        config.validate()?;
        Ok(config)
    }

    fn performance_preset() -> Self {
        // Sparser tables keep probe runs short
        Self {
            capacity_factor: 4,
            min_capacity: 64,
            ..Self::default()
        }
    }

    fn memory_preset() -> Self {
        Self {
            capacity_factor: 2,
            min_capacity: 1,
            ..Self::default()
        }
    }

    fn realtime_preset() -> Self {
        Self {
            capacity_factor: 4,
            min_capacity: 256,
            ..Self::default()
        }
    }

    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let serialized = serde_json::to_string_pretty(self).map_err(|e| {
            WordzipError::configuration(format!("Failed to serialize coding config: {}", e))
        })?;
        std::fs::write(path, serialized)?;
        Ok(())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            WordzipError::configuration(format!("Failed to parse coding config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }
}
