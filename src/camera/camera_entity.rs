use crate::camera_config::CameraConfig;
use std::fmt;
use std::str::FromStr;

/// Where a camera lives on the bridge. The name is matched case-insensitively
/// by the bridge, so URLs always use its lower-cased form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraEndpoint {
    host: String,
    port: u16,
    name: String,
}

impl CameraEndpoint {
    pub fn new(host: impl Into<String>, port: u16, name: impl Into<String>) -> Self {
        CameraEndpoint {
            host: host.into(),
            port,
            name: name.into(),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn api_base_url(&self) -> String {
        format!("http://{}:{}/api/{}", self.host, self.port, self.name.to_lowercase())
    }

    pub fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url(), path.trim_start_matches('/'))
    }
}

impl From<&CameraConfig> for CameraEndpoint {
    fn from(config: &CameraConfig) -> Self {
        CameraEndpoint::new(config.host.clone(), config.port, config.name.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraIdentity {
    pub mac: String,
    pub model: String,
}

/// The bridge's own control-session state for one camera. Observed, never owned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

impl ConnectionState {
    pub fn from_status(status: &str) -> Self {
        match status.trim().to_lowercase().as_str() {
            "connected" => ConnectionState::Connected,
            "connecting" => ConnectionState::Connecting,
            _ => ConnectionState::Disconnected,
        }
    }

    pub fn is_connected(self) -> bool {
        self == ConnectionState::Connected
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrivacyState {
    pub is_private: bool,
}

/// Where the camera is pointing, as far as this process knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraPosture {
    Unknown,
    Straight,
    Privacy,
}

impl From<PrivacyState> for CameraPosture {
    fn from(state: PrivacyState) -> Self {
        if state.is_private {
            CameraPosture::Privacy
        } else {
            CameraPosture::Straight
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanDirection {
    Left,
    Right,
    Up,
    Down,
}

impl PanDirection {
    pub const ALL: [PanDirection; 4] = [
        PanDirection::Left,
        PanDirection::Right,
        PanDirection::Up,
        PanDirection::Down,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PanDirection::Left => "left",
            PanDirection::Right => "right",
            PanDirection::Up => "up",
            PanDirection::Down => "down",
        }
    }

    /// Bridge endpoint that nudges the camera one step in this direction.
    pub fn command_path(self) -> &'static str {
        match self {
            PanDirection::Left => "pan_left",
            PanDirection::Right => "pan_right",
            PanDirection::Up => "pan_up",
            PanDirection::Down => "pan_down",
        }
    }
}

impl fmt::Display for PanDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PanDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "left" => Ok(PanDirection::Left),
            "right" => Ok(PanDirection::Right),
            "up" => Ok(PanDirection::Up),
            "down" => Ok(PanDirection::Down),
            other => Err(format!("'{}' is not a pan direction", other)),
        }
    }
}
