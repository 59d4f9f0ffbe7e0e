use crate::errors::AppError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_COMMAND_DELAY: Duration = Duration::from_millis(400);

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ApplicationConfig {
    pub state_directory: String,
    pub state_file_name: String,
    pub log_level: Option<String>, // Optional so the CLI flag or env var can take over
    pub request_timeout_secs: f32,
    pub readiness_poll_attempts: u32,
    pub readiness_poll_interval_ms: u64,
    pub command_delay_secs: f32, // Pause between repeated remote commands
    pub supported_models: BTreeMap<String, String>, // bridge model id -> display name
}

impl ApplicationConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::try_from_secs_f32(self.request_timeout_secs).unwrap_or(DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn readiness_poll_interval(&self) -> Duration {
        Duration::from_millis(self.readiness_poll_interval_ms)
    }

    pub fn command_delay(&self) -> Duration {
        Duration::try_from_secs_f32(self.command_delay_secs).unwrap_or(DEFAULT_COMMAND_DELAY)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.state_directory.is_empty() {
            return Err(AppError::Config("state_directory cannot be empty".to_string()));
        }
        if self.state_file_name.is_empty() {
            return Err(AppError::Config("state_file_name cannot be empty".to_string()));
        }
        if self.readiness_poll_attempts == 0 {
            return Err(AppError::Config("readiness_poll_attempts must be at least 1".to_string()));
        }
        check_seconds("request_timeout_secs", self.request_timeout_secs)?;
        if self.request_timeout_secs == 0.0 {
            return Err(AppError::Config("request_timeout_secs must be greater than 0".to_string()));
        }
        check_seconds("command_delay_secs", self.command_delay_secs)
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        let mut supported_models = BTreeMap::new();
        supported_models.insert("HL_PAN3".to_string(), "Pan V3".to_string());
        ApplicationConfig {
            state_directory: "./state".to_string(),
            state_file_name: "pan-camera.ini".to_string(),
            log_level: Some("info".to_string()),
            request_timeout_secs: 10.0,
            readiness_poll_attempts: 10,
            readiness_poll_interval_ms: 500,
            command_delay_secs: 0.4,
            supported_models,
        }
    }
}

fn check_seconds(field: &str, value: f32) -> Result<(), AppError> {
    Duration::try_from_secs_f32(value)
        .map(|_| ())
        .map_err(|e| AppError::Config(format!("{} = {} is not a usable duration: {}", field, value, e)))
}
