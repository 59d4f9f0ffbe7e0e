use crate::camera::bridge_client::BridgeClient;
use crate::errors::SetupError;
use log::{info, warn};
use std::collections::BTreeMap;

/// Models this crate knows how to drive, keyed by the bridge's model id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportedModels {
    models: BTreeMap<String, String>,
}

impl SupportedModels {
    pub fn new(models: BTreeMap<String, String>) -> Self {
        SupportedModels { models }
    }

    pub fn display_name(&self, model: &str) -> Option<&str> {
        self.models.get(model).map(String::as_str)
    }
}

impl Default for SupportedModels {
    fn default() -> Self {
        let mut models = BTreeMap::new();
        models.insert("HL_PAN3".to_string(), "Pan V3".to_string());
        SupportedModels { models }
    }
}

/// A validated camera, ready to be registered under its MAC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupEntry {
    pub title: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    pub model: String, // display name, e.g. "Pan V3"
    pub mac: String,
}

pub async fn validate_camera(bridge: &BridgeClient, supported: &SupportedModels) -> Result<SetupEntry, SetupError> {
    let endpoint = bridge.endpoint();
    let identity = match bridge.get_identity().await {
        Some(identity) => identity,
        None => {
            warn!("Setup [{}]: bridge returned no camera info.", endpoint.name());
            return Err(SetupError::StatusNotFound);
        }
    };
    info!("Setting up camera with MAC address {}", identity.mac);

    let Some(display_name) = supported.display_name(&identity.model) else {
        warn!("Setup [{}]: model '{}' is not supported.", endpoint.name(), identity.model);
        return Err(SetupError::UnsupportedModel(identity.model));
    };

    Ok(SetupEntry {
        title: format!("{} Control", endpoint.name()),
        host: endpoint.host().to_string(),
        port: endpoint.port(),
        name: endpoint.name().to_string(),
        model: display_name.to_string(),
        mac: identity.mac,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_allow_list_only_has_pan_v3() {
        let supported = SupportedModels::default();
        assert_eq!(supported.display_name("HL_PAN3"), Some("Pan V3"));
        assert_eq!(supported.display_name("OTHER"), None);
    }
}
