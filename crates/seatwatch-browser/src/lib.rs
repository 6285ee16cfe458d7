//! Browser automation surface for seat-selection pages.
//!
//! Provides the [`BrowserActions`] trait the scanner drives, the
//! [`Locator`] strategies it resolves, and a headless Chromium
//! implementation backed by chromiumoxide.

pub mod actions;
mod dom;
pub mod engine;
pub mod error;
pub mod fingerprint;
pub mod locator;

pub use actions::{BrowserActions, BrowserLauncher, Element, ElementSet};
pub use engine::{BrowserEngine, ChromiumLauncher};
pub use error::{BrowserError, Result};
pub use fingerprint::FingerprintConfig;
pub use locator::Locator;
