//! Seatwatch Core - Foundation crate for the Seatwatch zone scanner.
//!
//! This crate provides shared types, error handling and configuration
//! management that all other Seatwatch crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths and env overrides
//! - [`types`] - Shared newtypes (`ZoneCode`, `Timestamp`)
//!
//! # Example
//!
//! ```rust
//! use seatwatch_core::{AppConfig, ZoneCode};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//! let priority = config.scanning.priority_codes()?;
//! assert_eq!(priority[0], ZoneCode::new("F1")?);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{
    AppConfig, BrowserConfig, NotificationConfig, OutputConfig, ScanningConfig, TargetConfig,
    TimingsConfig,
};
pub use error::{ConfigError, ConfigResult, SeatwatchError};
pub use types::{Timestamp, ZoneCode};
