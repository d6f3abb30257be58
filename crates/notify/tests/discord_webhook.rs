//! Webhook delivery tests against a mock Discord endpoint.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use notify::{
    Aggregator, DiscordWebhook, Message, NotificationSink, NotifyError, OutcomeCategory,
};

#[tokio::test]
async fn test_post_plain_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .and(body_json(json!({"content": "Followed alice."})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let sink = DiscordWebhook::new(format!("{}/hook", server.uri())).unwrap();
    sink.post(&Message::text("Followed alice.")).await.unwrap();
}

#[tokio::test]
async fn test_non_204_is_a_failed_delivery() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let sink = DiscordWebhook::new(format!("{}/hook", server.uri())).unwrap();
    let result = sink.post(&Message::text("hi")).await;

    assert!(matches!(result, Err(NotifyError::Status(200))));
}

#[tokio::test]
async fn test_unresponsive_webhook_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(ResponseTemplate::new(204).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let sink =
        DiscordWebhook::with_timeout(format!("{}/hook", server.uri()), Duration::from_millis(200))
            .unwrap();
    let result = sink.post(&Message::text("hi")).await;

    match result {
        Err(NotifyError::Http(e)) => assert!(e.is_timeout()),
        other => panic!("expected timeout, got {:?}", other),
    }
}

#[tokio::test]
async fn test_flush_through_webhook_retains_on_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let sink = DiscordWebhook::new(format!("{}/hook", server.uri())).unwrap();
    let mut aggregator = Aggregator::new("octo");
    aggregator.record(OutcomeCategory::Followed, "alice");

    assert!(!aggregator.flush(&sink).await);
    assert_eq!(aggregator.users(OutcomeCategory::Followed), ["alice"]);

    assert!(aggregator.flush(&sink).await);
    assert!(aggregator.is_empty());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    let body: serde_json::Value = serde_json::from_slice(&requests[1].body).unwrap();
    assert_eq!(body["content"], "GitHub(octo) Report: Followed: 1");
    assert_eq!(body["embeds"][0]["title"], "GitHub Follow/Unfollow Report");
}
