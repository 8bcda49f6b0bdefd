//! Error types for configuration loading.

use thiserror::Error;

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Error type for configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config file that could not be read.
    #[error("failed to read config file '{path}': {source}")]
    ReadFile {
        /// Path as given.
        path: String,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// A config file that could not be parsed.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A bind address that does not parse.
    #[error("invalid bind address '{value}': {source}")]
    InvalidBind {
        /// Address as configured.
        value: String,
        /// Parse failure detail.
        source: std::net::AddrParseError,
    },
}
