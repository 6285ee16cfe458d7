//! Notification channels for scan reports.
//!
//! A channel receives one rendered report per scan that finds available
//! zones. An unconfigured channel is a valid, disabled state.

pub mod channel;
pub mod error;
pub mod webhook;

pub use channel::{NotificationChannel, NotificationMessage};
pub use error::{NotifyError, Result};
pub use webhook::WebhookChannel;
