use seatwatch_browser::BrowserError;
use seatwatch_core::ConfigError;
use thiserror::Error;

/// Errors raised while driving a scan.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The control that opens the seat selector is missing or disabled
    #[error("primary action control {selector} unavailable: {reason}")]
    ButtonUnavailable {
        /// Configured selector
        selector: String,
        /// `absent` or `disabled`
        reason: String,
    },

    /// No zone entries survived discovery
    #[error("no zone entries found on the seat selector")]
    DiscoveryEmpty,

    /// A zone entry could not be found or is hidden
    #[error("zone entry '{zone}' is not visible")]
    ZoneNotVisible {
        /// Display text of the zone entry
        zone: String,
    },

    /// A bounded step ran out of time
    #[error("{step} timed out after {elapsed_ms}ms")]
    Timeout {
        /// Step that timed out
        step: String,
        /// Configured bound
        elapsed_ms: u128,
    },

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Browser session error
    #[error("browser error: {0}")]
    Browser(#[from] BrowserError),
}

/// Result type alias for scan operations.
pub type Result<T> = std::result::Result<T, ScanError>;
