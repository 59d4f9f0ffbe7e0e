use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CameraConfig {
    pub name: String, // Camera name as known to the bridge, e.g. "front-door"
    pub host: String,
    #[serde(default = "default_bridge_port")]
    pub port: u16,
}

fn default_bridge_port() -> u16 {
    5000
}
