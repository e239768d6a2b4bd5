//! Filter configuration error types

use thiserror::Error;

/// Errors raised while loading or validating a domain configuration
///
/// Filtering itself never fails; every error here is a startup error.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize the config
    #[error("Failed to serialize config: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    /// A value failed validation
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// A configured term could not be compiled into a matcher
    #[error("Invalid term pattern: {0}")]
    Pattern(#[from] regex::Error),
}
