pub mod app_config;
pub mod camera;
pub mod camera_config;
pub mod cli;
pub mod common;
pub mod config_loader;
pub mod core;
pub mod errors;
pub mod operations;

pub use crate::camera::bridge_client::BridgeClient;
pub use crate::camera::camera_controller::CameraController;
pub use crate::camera::camera_entity::{CameraEndpoint, CameraIdentity, ConnectionState, PanDirection, PrivacyState};
pub use crate::camera::readiness::{ReadinessCoordinator, ReadinessPolicy, Sleeper};
pub use crate::core::config_store::ConfigStore;
pub use crate::errors::{AppError, SetupError};
