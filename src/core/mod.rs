pub mod camera_manager;
pub mod config_store;
pub mod setup_flow;
