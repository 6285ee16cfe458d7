use crate::error::Result;
use serde::Serialize;

/// A rendered report ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationMessage {
    /// Report body
    pub text: String,
    /// Sender name shown by the chat service
    #[serde(rename = "username")]
    pub sender_label: String,
    /// Sender icon shortcode
    #[serde(rename = "icon_emoji")]
    pub icon: String,
}

/// Outbound notification transport.
#[async_trait::async_trait]
pub trait NotificationChannel: Send + Sync {
    /// Channel name for logs
    fn name(&self) -> &str;

    /// Whether an endpoint is configured
    fn is_enabled(&self) -> bool;

    /// Deliver one message. A disabled channel returns `Ok(())` without
    /// sending anything.
    async fn post(&self, message: &NotificationMessage) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_wire_format() {
        let message = NotificationMessage {
            text: "Zone F1 open".to_string(),
            sender_label: "Seatwatch Ticket Bot".to_string(),
            icon: ":ticket:".to_string(),
        };
        let json = serde_json::to_value(&message).expect("serialize message");
        assert_eq!(
            json,
            serde_json::json!({
                "text": "Zone F1 open",
                "username": "Seatwatch Ticket Bot",
                "icon_emoji": ":ticket:"
            })
        );
    }
}
