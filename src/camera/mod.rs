pub mod bridge_client;
pub mod camera_controller;
pub mod camera_entity;
pub mod camera_remote;
pub mod readiness;
pub mod stream_source;
