use serde::Deserialize;
use std::fs;
use crate::app_config::ApplicationConfig;
use crate::camera_config::CameraConfig;
use anyhow::{Result, Context, bail};
use std::collections::HashSet;
use log::{debug, info};
use std::time::Instant;

#[derive(Debug, Deserialize, Clone)]
pub struct MasterConfig {
    #[serde(rename = "application", default)]
    pub app_settings: ApplicationConfig,
    pub cameras: Vec<CameraConfig>,
}

pub fn load_config(path: &str) -> Result<MasterConfig> {
    debug!("📄 Attempting to load config from: {}", path);
    let start_time = Instant::now();

    let config_str = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file '{}'. 📖", path))?;
    debug!("Read config file in {:?}", start_time.elapsed());

    let config = parse_config(&config_str)
        .with_context(|| format!("Invalid configuration in '{}'", path))?;

    info!("✅ Successfully loaded and validated configuration from '{}' in {:?}", path, start_time.elapsed());
    Ok(config)
}

pub fn parse_config(config_str: &str) -> Result<MasterConfig> {
    let config: MasterConfig = serde_yaml::from_str(config_str)
        .context("Failed to parse YAML configuration. 💔")?;
    validate_master_config(&config).context("Master configuration validation failed 👎")?;
    Ok(config)
}

fn validate_master_config(config: &MasterConfig) -> Result<()> {
    debug!("🕵️ Validating master configuration...");
    config.app_settings.validate().context("❌ Invalid application settings")?;

    if config.cameras.is_empty() {
        bail!("❌ No cameras defined in the configuration.");
    }

    let mut camera_names = HashSet::new();
    for (idx, camera) in config.cameras.iter().enumerate() {
        debug!("Validating camera #{}: {}", idx + 1, camera.name);
        if camera.name.trim().is_empty() {
            bail!("❌ Camera name cannot be empty for camera #{}.", idx + 1);
        }
        if !camera_names.insert(camera.name.to_lowercase()) {
            bail!("❌ Duplicate camera name found: {}", camera.name);
        }
        if camera.host.trim().is_empty() {
            bail!("❌ Bridge host for camera '{}' cannot be empty.", camera.name);
        }
        if camera.port == 0 {
            bail!("❌ Bridge port for camera '{}' cannot be 0.", camera.name);
        }
    }
    debug!("👍 Master configuration validated.");
    Ok(())
}
