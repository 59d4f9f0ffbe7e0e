
use common_test_utils::{controller_for, mount_json, mount_json_expect, temp_state_path, RecordingSleeper};
use pancam::camera::camera_entity::CameraPosture;
use pancam::camera::camera_remote::{CameraRemote, CommandOptions, RemoteControl};
use pancam::core::setup_flow::SetupEntry;
use pancam::ConfigStore;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use wiremock::MockServer;

fn entry() -> SetupEntry {
    SetupEntry {
        title: "Front Control".to_string(),
        host: "127.0.0.1".to_string(),
        port: 5000,
        name: "Front".to_string(),
        model: "Pan V3".to_string(),
        mac: "AA:BB:CC".to_string(),
    }
}

async fn bridge_with(commands: &[(&str, u16)]) -> MockServer {
    let server = MockServer::start().await;
    mount_json(&server, "/api/front/status", 200, json!({"status": "connected"})).await;
    for (command, status) in commands {
        mount_json(&server, &format!("/api/front/{}", command), *status, json!({"status": "success"})).await;
    }
    server
}

fn remote_for(server: &MockServer, state_path: PathBuf, sleeper: Arc<RecordingSleeper>) -> CameraRemote {
    let controller = Arc::new(controller_for(server, "front", state_path, Arc::default()));
    CameraRemote::new(controller, &entry(), sleeper)
}

#[tokio::test]
async fn initial_state_comes_from_stored_flag() {
    let server = bridge_with(&[]).await;
    let state_path = temp_state_path("remote-initial");
    ConfigStore::new(&state_path).save("front", true).unwrap();

    let remote = remote_for(&server, state_path, Arc::default());
    assert_eq!(remote.is_on(), Some(false));
    assert_eq!(remote.unique_id(), "AA:BB:CC");

    let fresh = remote_for(&server, temp_state_path("remote-fresh"), Arc::default());
    assert_eq!(fresh.is_on(), Some(true));
}

#[tokio::test]
async fn turn_off_and_on_move_between_postures() {
    let server = bridge_with(&[
        ("set_action_down", 200),
        ("set_status_light_off", 200),
        ("reset_rotation", 200),
        ("set_status_light_on", 200),
    ])
    .await;
    let mut remote = remote_for(&server, temp_state_path("remote-onoff"), Arc::default());

    assert!(remote.turn_off().await);
    assert_eq!(remote.posture(), CameraPosture::Privacy);
    assert_eq!(remote.is_on(), Some(false));

    assert!(remote.turn_on().await);
    assert_eq!(remote.is_on(), Some(true));
}

#[tokio::test]
async fn toggle_flips_between_modes() {
    let server = bridge_with(&[
        ("set_action_down", 200),
        ("set_status_light_off", 200),
        ("reset_rotation", 200),
        ("set_status_light_on", 200),
    ])
    .await;
    let mut remote = remote_for(&server, temp_state_path("remote-toggle"), Arc::default());

    assert!(remote.toggle().await);
    assert_eq!(remote.is_on(), Some(false));
    assert!(remote.toggle().await);
    assert_eq!(remote.is_on(), Some(true));
}

#[tokio::test]
async fn failed_transition_leaves_posture_unknown_until_update() {
    let server = bridge_with(&[("set_action_down", 200), ("set_status_light_off", 500)]).await;
    let mut remote = remote_for(&server, temp_state_path("remote-unknown"), Arc::default());

    assert!(!remote.turn_off().await);
    assert_eq!(remote.posture(), CameraPosture::Unknown);
    assert_eq!(remote.is_on(), None);

    remote.update().await;
    assert_eq!(remote.is_on(), Some(true));
}

#[tokio::test]
async fn send_command_pans_each_direction_and_skips_unknown_payloads() {
    let server = MockServer::start().await;
    mount_json(&server, "/api/front/status", 200, json!({"status": "connected"})).await;
    mount_json_expect(&server, "/api/front/pan_left", 200, json!({"status": "success"}), 2).await;
    mount_json_expect(&server, "/api/front/pan_up", 200, json!({"status": "success"}), 2).await;
    let sleeper = Arc::new(RecordingSleeper::default());
    let mut remote = remote_for(&server, temp_state_path("remote-send"), sleeper.clone());

    let commands = vec!["left".to_string(), "spin".to_string(), "UP".to_string()];
    let options = CommandOptions {
        num_repeats: 2,
        delay: Duration::from_millis(100),
    };
    let report = remote.send_command(&commands, &options).await;

    assert_eq!(report.sent, 4);
    assert_eq!(report.failed, 0);
    assert_eq!(report.unsupported, 2);
    assert!(!report.all_succeeded());
    assert_eq!(sleeper.count(), 6);
    assert_eq!(sleeper.total(), Duration::from_millis(600));
    assert_eq!(remote.is_on(), Some(true));
}

#[tokio::test]
async fn send_command_counts_failed_pans() {
    let server = bridge_with(&[("pan_right", 500)]).await;
    let mut remote = remote_for(&server, temp_state_path("remote-panfail"), Arc::default());

    let report = remote.send_command(&["right".to_string()], &CommandOptions::default()).await;
    assert_eq!(report.sent, 1);
    assert_eq!(report.failed, 1);
}

#[tokio::test]
async fn device_info_carries_registration_details() {
    let server = MockServer::start().await;
    let remote = remote_for(&server, temp_state_path("remote-device"), Arc::default());

    let info = remote.device_info();
    assert_eq!(info.identifier, "AA:BB:CC");
    assert_eq!(info.name, "Front");
    assert_eq!(info.model, "Pan V3");
    assert_eq!(info.manufacturer, "Wyze");
}
