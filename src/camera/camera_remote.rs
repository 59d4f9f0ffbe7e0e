//! Remote-style control surface over a registered camera: "on" means the
//! camera looks straight ahead, "off" means it is parked in privacy mode.

use crate::camera::camera_controller::CameraController;
use crate::camera::camera_entity::{CameraPosture, PanDirection};
use crate::camera::readiness::Sleeper;
use crate::core::setup_flow::SetupEntry;
use async_trait::async_trait;
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;

pub const MANUFACTURER: &str = "Wyze";
pub const DEFAULT_COMMAND_DELAY: Duration = Duration::from_millis(400);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub identifier: String,
    pub name: String,
    pub model: String,
    pub manufacturer: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandOptions {
    pub num_repeats: u32,
    pub delay: Duration,
}

impl Default for CommandOptions {
    fn default() -> Self {
        CommandOptions {
            num_repeats: 1,
            delay: DEFAULT_COMMAND_DELAY,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommandReport {
    pub sent: usize,
    pub failed: usize,
    pub unsupported: usize,
}

impl CommandReport {
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0 && self.unsupported == 0
    }
}

#[async_trait]
pub trait RemoteControl: Send {
    /// `None` while the camera's position is not known.
    fn is_on(&self) -> Option<bool>;

    async fn turn_on(&mut self) -> bool;

    async fn turn_off(&mut self) -> bool;

    async fn toggle(&mut self) -> bool {
        if self.is_on() == Some(false) {
            self.turn_on().await
        } else {
            self.turn_off().await
        }
    }

    async fn send_command(&mut self, commands: &[String], options: &CommandOptions) -> CommandReport;

    async fn update(&mut self);
}

pub struct CameraRemote {
    controller: Arc<CameraController>,
    name: String,
    mac: String,
    model: String,
    posture: CameraPosture,
    sleeper: Arc<dyn Sleeper>,
}

impl CameraRemote {
    pub fn new(controller: Arc<CameraController>, entry: &SetupEntry, sleeper: Arc<dyn Sleeper>) -> Self {
        debug!("Creating CameraRemote for {} ({}, {})", entry.mac, entry.name, entry.model);
        let posture = controller.posture();
        CameraRemote {
            controller,
            name: entry.name.clone(),
            mac: entry.mac.clone(),
            model: entry.model.clone(),
            posture,
            sleeper,
        }
    }

    pub fn unique_id(&self) -> &str {
        &self.mac
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn posture(&self) -> CameraPosture {
        self.posture
    }

    pub fn device_info(&self) -> DeviceInfo {
        DeviceInfo {
            identifier: self.mac.clone(),
            name: self.name.clone(),
            model: self.model.clone(),
            manufacturer: MANUFACTURER,
        }
    }

    fn settle(&mut self, succeeded: bool, target: CameraPosture) -> bool {
        // A failed move may still have turned the camera halfway.
        self.posture = if succeeded { target } else { CameraPosture::Unknown };
        succeeded
    }
}

#[async_trait]
impl RemoteControl for CameraRemote {
    fn is_on(&self) -> Option<bool> {
        match self.posture {
            CameraPosture::Straight => Some(true),
            CameraPosture::Privacy => Some(false),
            CameraPosture::Unknown => None,
        }
    }

    async fn turn_on(&mut self) -> bool {
        let ok = self.controller.exit_privacy_mode().await;
        self.settle(ok, CameraPosture::Straight)
    }

    async fn turn_off(&mut self) -> bool {
        let ok = self.controller.enter_privacy_mode().await;
        self.settle(ok, CameraPosture::Privacy)
    }

    async fn send_command(&mut self, commands: &[String], options: &CommandOptions) -> CommandReport {
        info!("Remote [{}]: send_command {:?} x{}", self.name, commands, options.num_repeats);
        let mut report = CommandReport::default();
        for _ in 0..options.num_repeats {
            for payload in commands {
                match payload.parse::<PanDirection>() {
                    Ok(direction) => {
                        report.sent += 1;
                        if !self.controller.pan(direction).await {
                            warn!("Unable to pan {}", direction);
                            report.failed += 1;
                        }
                    }
                    Err(_) => {
                        warn!("{} is not a supported command", payload);
                        report.unsupported += 1;
                    }
                }
                self.sleeper.sleep(options.delay).await;
            }
        }
        report
    }

    async fn update(&mut self) {
        self.posture = self.controller.refresh_posture().await;
    }
}
