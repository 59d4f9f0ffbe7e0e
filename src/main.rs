use pancam::camera::readiness::TokioSleeper;
use pancam::common::logging_setup;
use pancam::core::camera_manager::CameraManager;
use pancam::{cli, config_loader, operations};
use log::{info, error, debug};
use anyhow::{Context, Result, bail};
use std::sync::Arc;
use std::time::Instant;

#[tokio::main]
async fn main() -> Result<()> {
    let main_start_time = Instant::now();
    let matches = cli::build_cli().get_matches();

    let config_path = matches.get_one::<String>("config").map(|s| s.as_str()).unwrap_or("config/pancam.yaml");

    let master_config = match config_loader::load_config(config_path) {
        Ok(cfg) => {
            if let Err(e) = logging_setup::initialize_logging(Some(&cfg), &matches) {
                eprintln!("Failed to initialize logger: {}. Logging might not work as expected.", e);
            }
            info!("✅ Configuration loaded from: {}", config_path);
            cfg
        }
        Err(e) => {
            if let Err(log_err) = logging_setup::initialize_logging(None, &matches) {
                eprintln!("Failed to initialize logger: {}. Logging might not work as expected.", log_err);
            }
            error!("❌ Failed to load master configuration from '{}': {:#}. Exiting.", config_path, e);
            return Err(e.context(format!("Failed to load master configuration from '{}'", config_path)));
        }
    };

    let http_client = reqwest::Client::builder()
        .timeout(master_config.app_settings.request_timeout())
        .build()
        .context("Failed to build HTTP client")?;

    info!("🚀 pancam starting with {} cameras configured.", master_config.cameras.len());
    let camera_manager = CameraManager::initialize(&master_config, &http_client, Arc::new(TokioSleeper)).await;
    if camera_manager.is_empty() {
        bail!("None of the {} configured cameras passed setup", master_config.cameras.len());
    }

    if let Some((operation_name, sub_matches)) = matches.subcommand() {
        debug!("🎬 Dispatching to subcommand: {}", operation_name);
        let op_start_time = Instant::now();

        let op_result: Result<()> = match operation_name {
            "info" => {
                operations::camera_info_op::handle_camera_info_cli(&master_config, &camera_manager, sub_matches).await
            }
            "privacy" => {
                operations::camera_control_op::handle_privacy_cli(&master_config, &camera_manager, sub_matches).await
            }
            "pan" => {
                operations::pan_op::handle_pan_cli(&master_config, &camera_manager, sub_matches).await
            }
            "test" => {
                operations::diagnostic_op::handle_diagnostic_cli(&master_config, &camera_manager, sub_matches).await
            }
            other => bail!("Subcommand '{}' not implemented.", other),
        };

        if let Err(e) = op_result {
            error!("❌ Operation '{}' failed after {:?}: {:#}", operation_name, op_start_time.elapsed(), e);
            return Err(e);
        }
        info!("✅ Operation '{}' completed successfully in {:?}.", operation_name, op_start_time.elapsed());
    } else {
        info!("🤔 No subcommand provided. Registered {} camera(s); nothing else to do.", camera_manager.len());
    }

    info!("🏁 pancam finished in {:?}.", main_start_time.elapsed());
    Ok(())
}
