use crate::camera::bridge_client::BridgeClient;
use crate::camera::camera_entity::{CameraEndpoint, CameraIdentity, CameraPosture, ConnectionState, PanDirection};
use crate::camera::readiness::ReadinessCoordinator;
use crate::core::config_store::ConfigStore;
use crate::errors::AppError;
use log::{error, info, warn};
use reqwest::Client;
use std::time::Instant;
use tokio::task;

const PRIVACY_STEPS: [&str; 2] = ["set_action_down", "set_status_light_off"];
const STRAIGHT_STEPS: [&str; 2] = ["reset_rotation", "set_status_light_on"];

/// Everything a caller can do with one camera: identity lookups, the
/// persisted privacy flag, and the commands that move it.
///
/// Commands are not serialized against each other; one logical caller per
/// camera is assumed.
#[derive(Clone)]
pub struct CameraController {
    bridge: BridgeClient,
    readiness: ReadinessCoordinator,
    store: ConfigStore,
}

impl CameraController {
    pub fn new(endpoint: CameraEndpoint, http_client: Client, store: ConfigStore) -> Self {
        CameraController {
            bridge: BridgeClient::new(endpoint, http_client),
            readiness: ReadinessCoordinator::default(),
            store,
        }
    }

    pub fn with_readiness(mut self, readiness: ReadinessCoordinator) -> Self {
        self.readiness = readiness;
        self
    }

    pub fn name(&self) -> &str {
        self.bridge.endpoint().name()
    }

    pub fn bridge(&self) -> &BridgeClient {
        &self.bridge
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    pub async fn get_identity(&self) -> Option<CameraIdentity> {
        self.bridge.get_identity().await
    }

    pub async fn get_mac(&self) -> Option<String> {
        self.bridge.get_identity().await.map(|identity| identity.mac)
    }

    pub async fn get_model(&self) -> Option<String> {
        self.bridge.get_identity().await.map(|identity| identity.model)
    }

    pub async fn get_stream_url(&self) -> Option<String> {
        self.bridge.get_stream_url().await
    }

    pub async fn connection_status(&self) -> ConnectionState {
        self.bridge.get_connection_status().await
    }

    pub async fn ensure_ready(&self) -> bool {
        self.readiness.ensure_ready(&self.bridge).await
    }

    /// Last committed privacy flag. No network traffic.
    pub fn is_in_privacy_mode(&self) -> bool {
        self.store.load(self.name()).is_private
    }

    pub fn posture(&self) -> CameraPosture {
        CameraPosture::from(self.store.load(self.name()))
    }

    /// Same as [`posture`](Self::posture), with the file read kept off the async workers.
    pub async fn refresh_posture(&self) -> CameraPosture {
        let store = self.store.clone();
        let name = self.name().to_string();
        match task::spawn_blocking(move || store.load(&name)).await {
            Ok(state) => CameraPosture::from(state),
            Err(e) => {
                error!("❌ Camera [{}]: state read task failed: {}", self.name(), e);
                CameraPosture::Unknown
            }
        }
    }

    pub async fn enter_privacy_mode(&self) -> bool {
        self.transition("privacy", PRIVACY_STEPS, true).await
    }

    pub async fn exit_privacy_mode(&self) -> bool {
        self.transition("straight", STRAIGHT_STEPS, false).await
    }

    /// Momentary nudge; leaves the persisted privacy flag alone.
    pub async fn pan(&self, direction: PanDirection) -> bool {
        if !self.ensure_ready().await {
            warn!("Camera [{}]: not ready, skipping pan {}.", self.name(), direction);
            return false;
        }
        let ok = self.bridge.send_command(direction.command_path()).await;
        if !ok {
            warn!("Camera [{}]: unable to pan {}.", self.name(), direction);
        }
        ok
    }

    // Both steps are always attempted. A failed step does not undo the other
    // one; the flag is only written once both were accepted.
    async fn transition(&self, label: &str, steps: [&str; 2], is_private: bool) -> bool {
        let start_time = Instant::now();
        info!("🎬 Camera [{}]: moving to {} position.", self.name(), label);

        if !self.ensure_ready().await {
            error!("❌ Camera [{}]: bridge session never became ready, {} move abandoned.", self.name(), label);
            return false;
        }

        let mut all_accepted = true;
        for step in steps {
            if !self.bridge.send_command(step).await {
                warn!("Camera [{}]: step '{}' of {} move failed.", self.name(), step, label);
                all_accepted = false;
            }
        }
        if !all_accepted {
            error!("❌ Camera [{}]: {} move incomplete after {:?}; stored state left as is.", self.name(), label, start_time.elapsed());
            return false;
        }

        let store = self.store.clone();
        let name = self.name().to_string();
        let saved = task::spawn_blocking(move || store.save(&name, is_private))
            .await
            .map_err(|e| AppError::Io(format!("state write task failed: {}", e)))
            .and_then(|result| result);
        if let Err(e) = saved {
            error!("❌ Camera [{}]: {} move succeeded but state could not be stored: {}", self.name(), label, e);
            return false;
        }
        info!("✅ Camera [{}]: now in {} position ({:?}).", self.name(), label, start_time.elapsed());
        true
    }
}
