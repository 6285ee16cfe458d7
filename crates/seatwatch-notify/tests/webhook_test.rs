use seatwatch_notify::{NotificationChannel, NotificationMessage, NotifyError, WebhookChannel};
use std::time::Duration;
use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

fn message() -> NotificationMessage {
    NotificationMessage {
        text: "TICKETS AVAILABLE!".to_string(),
        sender_label: "Seatwatch Ticket Bot".to_string(),
        icon: ":ticket:".to_string(),
    }
}

#[tokio::test]
async fn test_posts_json_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(matchers::method("POST"))
        .and(matchers::path("/hook"))
        .and(matchers::body_json(serde_json::json!({
            "text": "TICKETS AVAILABLE!",
            "username": "Seatwatch Ticket Bot",
            "icon_emoji": ":ticket:"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let channel = WebhookChannel::new(
        Some(format!("{}/hook", mock_server.uri())),
        Duration::from_secs(5),
    )
    .expect("client");

    channel.post(&message()).await.expect("delivery succeeds");
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let mock_server = MockServer::start().await;

    Mock::given(matchers::method("POST"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no_service"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let channel =
        WebhookChannel::new(Some(mock_server.uri()), Duration::from_secs(5)).expect("client");

    let err = channel.post(&message()).await.expect_err("404 is an error");
    assert!(matches!(err, NotifyError::Status { status: 404, .. }));
}

#[tokio::test]
async fn test_slow_endpoint_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(matchers::method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&mock_server)
        .await;

    let channel =
        WebhookChannel::new(Some(mock_server.uri()), Duration::from_millis(200)).expect("client");

    let err = channel.post(&message()).await.expect_err("timeout");
    assert!(matches!(err, NotifyError::Request(_)));
}

#[tokio::test]
async fn test_disabled_channel_is_noop() {
    let channel = WebhookChannel::new(None, Duration::from_secs(1)).expect("client");
    assert!(!channel.is_enabled());
    channel.post(&message()).await.expect("disabled post is ok");
}
