
use common_test_utils::{endpoint_for, mount_json_expect, RecordingSleeper};
use pancam::{BridgeClient, ReadinessCoordinator, ReadinessPolicy};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn setup(server: &MockServer) -> (BridgeClient, ReadinessCoordinator, Arc<RecordingSleeper>) {
    let sleeper = Arc::new(RecordingSleeper::default());
    let bridge = BridgeClient::new(endpoint_for(server, "front"), reqwest::Client::new());
    let readiness = ReadinessCoordinator::new(ReadinessPolicy::default(), sleeper.clone());
    (bridge, readiness, sleeper)
}

#[tokio::test]
async fn already_connected_returns_without_side_effects() {
    let server = MockServer::start().await;
    mount_json_expect(&server, "/api/front/status", 200, json!({"status": "connected"}), 1).await;
    mount_json_expect(&server, "/api/front/start", 200, json!({"status": true}), 0).await;
    let (bridge, readiness, sleeper) = setup(&server);

    assert!(readiness.ensure_ready(&bridge).await);
    assert_eq!(sleeper.count(), 0);
}

#[tokio::test]
async fn refused_start_fails_without_polling() {
    let server = MockServer::start().await;
    mount_json_expect(&server, "/api/front/status", 200, json!({"status": "disconnected"}), 1).await;
    mount_json_expect(&server, "/api/front/start", 200, json!({"status": false}), 1).await;
    let (bridge, readiness, sleeper) = setup(&server);

    assert!(!readiness.ensure_ready(&bridge).await);
    assert_eq!(sleeper.count(), 0);
}

#[tokio::test]
async fn gives_up_after_exactly_ten_polls() {
    let server = MockServer::start().await;
    // One initial check plus ten polls
    mount_json_expect(&server, "/api/front/status", 200, json!({"status": "disconnected"}), 11).await;
    mount_json_expect(&server, "/api/front/start", 200, json!({"status": true}), 1).await;
    let (bridge, readiness, sleeper) = setup(&server);

    assert!(!readiness.ensure_ready(&bridge).await);
    assert_eq!(sleeper.count(), 10);
    assert_eq!(sleeper.total(), Duration::from_secs(5));
}

#[tokio::test]
async fn stops_polling_once_connected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/front/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "connecting"})))
        .up_to_n_times(3)
        .with_priority(1)
        .expect(3)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/front/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "connected"})))
        .with_priority(2)
        .expect(1)
        .mount(&server)
        .await;
    mount_json_expect(&server, "/api/front/start", 200, json!({"status": "starting"}), 1).await;
    let (bridge, readiness, sleeper) = setup(&server);

    assert!(readiness.ensure_ready(&bridge).await);
    // Initial check and two polls saw "connecting", the third poll saw "connected"
    assert_eq!(sleeper.count(), 3);
}

#[tokio::test]
async fn honours_a_custom_policy() {
    let server = MockServer::start().await;
    mount_json_expect(&server, "/api/front/status", 500, json!({}), 4).await;
    mount_json_expect(&server, "/api/front/start", 200, json!({"status": 1}), 1).await;
    let sleeper = Arc::new(RecordingSleeper::default());
    let bridge = BridgeClient::new(endpoint_for(&server, "front"), reqwest::Client::new());
    let policy = ReadinessPolicy {
        max_attempts: 3,
        interval: Duration::from_millis(250),
    };
    let readiness = ReadinessCoordinator::new(policy, sleeper.clone());

    assert!(!readiness.ensure_ready(&bridge).await);
    assert_eq!(sleeper.count(), 3);
    assert_eq!(sleeper.total(), Duration::from_millis(750));
}
