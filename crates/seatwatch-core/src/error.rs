//! Core error types for Seatwatch.
//!
//! Subsystem crates define their own error enums; this module holds the
//! shared configuration and validation errors they build on.

use thiserror::Error;

/// Central error type for shared Seatwatch operations.
#[derive(Error, Debug)]
pub enum SeatwatchError {
    /// Configuration errors (file loading, parsing, validation)
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors (invalid zone codes, malformed values)
    #[error("validation error: {0}")]
    Validation(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine config directory path
    #[error("could not determine config directory (XDG base directories not available)")]
    NoConfigDir,

    /// Config file explicitly requested but not present
    #[error("config file not found at {path}")]
    NotFound {
        /// Path where config was expected
        path: String,
    },

    /// Failed to parse TOML
    #[error("failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// I/O error reading config
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value
    #[error("invalid config value for {field}: {reason}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Reason for invalidity
        reason: String,
    },
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SeatwatchError::Validation("bad zone code".to_string());
        assert_eq!(err.to_string(), "validation error: bad zone code");

        let err = ConfigError::InvalidValue {
            field: "target.url".to_string(),
            reason: "must not be empty".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid config value for target.url: must not be empty"
        );
    }

    #[test]
    fn test_error_from_config() {
        let config_err = ConfigError::NoConfigDir;
        let err: SeatwatchError = config_err.into();
        assert!(matches!(err, SeatwatchError::Config(_)));
    }
}
