//! Configuration APIs for wordzip
//!
//! The only tunable component is the coding pipeline: table sizing,
//! tokenizer tail handling and diagnostics. Configuration follows a few
//! principles:
//!
//! - **Type-safe**: invalid combinations are rejected by [`Config::validate`]
//! - **Environment-aware**: initialization from `WORDZIP_*` variables
//! - **Preset-friendly**: performance, memory, realtime and balanced presets
//! - **Persistable**: JSON save/load through `serde_json`
//!
//! ```rust
//! use wordzip::config::{CodingConfig, Config};
//! use wordzip::string::TrailingWord;
//!
//! let config = CodingConfig::default().with_trailing_word(TrailingWord::Emit);
//! assert!(config.validate().is_ok());
//!
//! let fast = CodingConfig::performance_preset();
//! assert!(fast.capacity_factor > config.capacity_factor);
//! ```

use crate::error::Result;
use std::env;
use std::fmt;
use std::path::Path;

pub mod coding;

#[cfg(test)]
mod tests;

pub use coding::CodingConfig;

/// Default prefix of configuration environment variables
pub const ENV_PREFIX: &str = "WORDZIP_";

/// Common configuration trait providing validation, environment initialization,
/// and preset management functionality.
pub trait Config: Clone + fmt::Debug {
    /// Validate the configuration for correctness and consistency.
    fn validate(&self) -> Result<()>;

    /// Initialize configuration from environment variables.
    ///
    /// Variables use the format `WORDZIP_{FIELD}`, for example
    /// `WORDZIP_CAPACITY_FACTOR=4`.
    fn from_env() -> Result<Self>
    where
        Self: Default,
    {
        Self::from_env_with_prefix(ENV_PREFIX)
    }

    /// Initialize configuration from environment variables with a custom prefix.
    fn from_env_with_prefix(prefix: &str) -> Result<Self>
    where
        Self: Default;

    /// Preset optimized for speed, at the cost of memory.
    fn performance_preset() -> Self;

    /// Preset optimized for minimal memory usage.
    fn memory_preset() -> Self;

    /// Preset with predictable latency.
    fn realtime_preset() -> Self;

    /// Balanced preset, the default configuration.
    fn balanced_preset() -> Self
    where
        Self: Default,
    {
        Self::default()
    }

    /// Save configuration to a JSON file.
    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()>;

    /// Load and validate configuration from a JSON file.
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self>;
}

/// Parse environment variable with fallback to default.
pub fn parse_env_var<T>(var_name: &str, default: T) -> T
where
    T: std::str::FromStr + Clone,
{
    env::var(var_name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Parse boolean environment variable.
///
/// Accepts: "true", "1", "yes", "on" (case-insensitive) as true,
/// everything else as false.
pub fn parse_env_bool(var_name: &str, default: bool) -> bool {
    env::var(var_name)
        .ok()
        .map(|s| {
            let s = s.to_lowercase();
            matches!(s.as_str(), "true" | "1" | "yes" | "on")
        })
        .unwrap_or(default)
}
