//! Report dispatch.

use seatwatch_core::NotificationConfig;
use seatwatch_notify::{NotificationChannel, NotificationMessage};

/// Sends rendered reports through a notification channel.
///
/// Delivery failures are logged and swallowed; a scan's outcome never
/// depends on whether the notification went out.
pub struct ScanNotifier {
    channel: Box<dyn NotificationChannel>,
    sender_label: String,
    icon: String,
}

impl ScanNotifier {
    /// Wrap a channel with the configured sender identity.
    #[must_use]
    pub fn new(channel: Box<dyn NotificationChannel>, config: &NotificationConfig) -> Self {
        Self {
            channel,
            sender_label: config.sender_label.clone(),
            icon: config.icon.clone(),
        }
    }

    /// Post `text` once. Returns whether it was delivered.
    pub async fn dispatch(&self, text: &str) -> bool {
        if !self.channel.is_enabled() {
            tracing::info!(
                "Notification channel '{}' not configured; skipping delivery",
                self.channel.name()
            );
        }

        let message = NotificationMessage {
            text: text.to_string(),
            sender_label: self.sender_label.clone(),
            icon: self.icon.clone(),
        };

        match self.channel.post(&message).await {
            Ok(()) => self.channel.is_enabled(),
            Err(e) => {
                tracing::warn!(
                    "Failed to deliver notification via '{}': {}",
                    self.channel.name(),
                    e
                );
                false
            }
        }
    }
}

impl std::fmt::Debug for ScanNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanNotifier")
            .field("channel", &self.channel.name())
            .field("sender_label", &self.sender_label)
            .finish_non_exhaustive()
    }
}
