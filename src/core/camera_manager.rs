use crate::camera::bridge_client::BridgeClient;
use crate::camera::camera_controller::CameraController;
use crate::camera::camera_entity::CameraEndpoint;
use crate::camera::readiness::{ReadinessCoordinator, ReadinessPolicy, Sleeper};
use crate::common::file_utils::mac_to_dir_name;
use crate::config_loader::MasterConfig;
use crate::core::config_store::ConfigStore;
use crate::core::setup_flow::{validate_camera, SetupEntry, SupportedModels};
use crate::errors::SetupError;
use log::{info, debug, error};
use reqwest::Client;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// A camera that passed setup, keyed by MAC in the [`CameraManager`].
pub struct RegisteredCamera {
    pub entry: SetupEntry,
    pub controller: Arc<CameraController>,
}

/// Explicit registry of set-up cameras. Owned by whoever composes the
/// application and handed to the operations by reference.
#[derive(Default)]
pub struct CameraManager {
    cameras: HashMap<String, Arc<RegisteredCamera>>,
}

impl CameraManager {
    pub fn new() -> Self {
        CameraManager::default()
    }

    /// Validates every configured camera against the bridge and registers the
    /// ones that pass. Cameras that fail are logged and left out.
    pub async fn initialize(master_config: &MasterConfig, http_client: &Client, sleeper: Arc<dyn Sleeper>) -> Self {
        debug!("🛠️ Initializing CameraManager...");
        let start_time = Instant::now();
        let settings = &master_config.app_settings;
        let supported = SupportedModels::new(settings.supported_models.clone());
        let readiness = ReadinessCoordinator::new(ReadinessPolicy::from(settings), sleeper);
        let state_directory = PathBuf::from(&settings.state_directory);

        let mut manager = CameraManager::new();
        for (idx, cam_config) in master_config.cameras.iter().enumerate() {
            debug!("  Processing camera config #{}: {}", idx + 1, cam_config.name);
            let endpoint = CameraEndpoint::from(cam_config);
            let bridge = BridgeClient::new(endpoint.clone(), http_client.clone());
            let entry = match validate_camera(&bridge, &supported).await {
                Ok(entry) => entry,
                Err(e) => {
                    error!("❌ Camera '{}' failed setup: {} ({:?})", cam_config.name, e.code(), e);
                    continue;
                }
            };

            let store = ConfigStore::new(state_file_path(&state_directory, &entry.mac, &settings.state_file_name));
            let controller = CameraController::new(endpoint, http_client.clone(), store)
                .with_readiness(readiness.clone());
            if let Err(e) = manager.register(entry, Arc::new(controller)) {
                error!("❌ Camera '{}' not registered: {} ({:?})", cam_config.name, e.code(), e);
            }
        }
        info!(
            "✅ CameraManager initialized with {} of {} cameras in {:?}.",
            manager.cameras.len(),
            master_config.cameras.len(),
            start_time.elapsed()
        );
        manager
    }

    pub fn register(&mut self, entry: SetupEntry, controller: Arc<CameraController>) -> Result<(), SetupError> {
        if self.cameras.contains_key(&entry.mac) {
            return Err(SetupError::AlreadyConfigured(entry.mac));
        }
        info!(
            "📷 Registered camera '{}' ({}) at {}:{} with MAC {}",
            entry.name, entry.model, entry.host, entry.port, entry.mac
        );
        self.cameras.insert(entry.mac.clone(), Arc::new(RegisteredCamera { entry, controller }));
        Ok(())
    }

    pub fn unregister(&mut self, mac: &str) -> Option<Arc<RegisteredCamera>> {
        let removed = self.cameras.remove(mac);
        if removed.is_some() {
            info!("Unregistered camera with MAC {}", mac);
        }
        removed
    }

    pub fn get(&self, mac: &str) -> Option<Arc<RegisteredCamera>> {
        self.cameras.get(mac).cloned()
    }

    pub fn len(&self) -> usize {
        self.cameras.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cameras.is_empty()
    }

    pub fn get_all_cameras(&self) -> Vec<Arc<RegisteredCamera>> {
        debug!("📷 Retrieving all registered cameras ({})", self.cameras.len());
        let mut all: Vec<_> = self.cameras.values().cloned().collect();
        all.sort_by(|a, b| a.entry.name.cmp(&b.entry.name));
        all
    }

    pub fn get_cameras_by_names(&self, names: &[String]) -> Vec<Arc<RegisteredCamera>> {
        debug!("📷 Retrieving cameras by names: {:?}", names);
        let mut result = Vec::new();
        for name in names {
            match self.cameras.values().find(|cam| cam.entry.name.eq_ignore_ascii_case(name)) {
                Some(cam) => result.push(cam.clone()),
                None => debug!("  Camera not found: {}", name),
            }
        }
        result
    }
}

/// `{state_directory}/{mac}/{file_name}`, one state file per camera.
pub fn state_file_path(state_directory: &Path, mac: &str, file_name: &str) -> PathBuf {
    state_directory.join(mac_to_dir_name(mac)).join(file_name)
}

// Helper to parse comma-separated camera names from CLI
pub fn parse_camera_names_arg(names_str_opt: Option<&String>) -> Option<Vec<String>> {
    names_str_opt.map(|names_str| {
        names_str.split(',').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_names() {
        let arg = " front, back ,,".to_string();
        assert_eq!(
            parse_camera_names_arg(Some(&arg)),
            Some(vec!["front".to_string(), "back".to_string()])
        );
        assert_eq!(parse_camera_names_arg(None), None);
    }

    #[test]
    fn state_files_live_under_mac_directories() {
        let path = state_file_path(Path::new("/srv/state"), "AA:BB:CC", "pan-camera.ini");
        assert_eq!(path, PathBuf::from("/srv/state/AA_BB_CC/pan-camera.ini"));
    }
}
