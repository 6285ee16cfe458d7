//! Incoming-webhook channel (Slack-compatible JSON payload).

use crate::channel::{NotificationChannel, NotificationMessage};
use crate::error::{NotifyError, Result};
use reqwest::Client;
use seatwatch_core::NotificationConfig;
use std::time::Duration;

/// Posts messages as JSON to a single webhook endpoint.
pub struct WebhookChannel {
    client: Client,
    endpoint: Option<String>,
}

impl WebhookChannel {
    /// Create a channel posting to `endpoint`, or a disabled channel when
    /// `endpoint` is `None`.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(endpoint: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NotifyError::ClientBuild(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.filter(|url| !url.trim().is_empty()),
        })
    }

    /// Create a channel from notification settings.
    pub fn from_config(config: &NotificationConfig) -> Result<Self> {
        Self::new(
            config.webhook_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }
}

#[async_trait::async_trait]
impl NotificationChannel for WebhookChannel {
    fn name(&self) -> &str {
        "webhook"
    }

    fn is_enabled(&self) -> bool {
        self.endpoint.is_some()
    }

    async fn post(&self, message: &NotificationMessage) -> Result<()> {
        let Some(endpoint) = &self.endpoint else {
            tracing::debug!("Webhook not configured, skipping notification");
            return Ok(());
        };

        let response = self.client.post(endpoint).json(message).send().await?;
        let status = response.status();

        if status.is_success() {
            tracing::info!("Webhook notification delivered");
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(NotifyError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }
}
