use crate::camera::stream_source::StreamSource;
use crate::config_loader::MasterConfig;
use crate::core::camera_manager::CameraManager;
use crate::operations::op_helper::run_generic_camera_op;
use anyhow::Result;
use clap::ArgMatches;
use log::info;

pub async fn handle_camera_info_cli(
    master_config: &MasterConfig,
    camera_manager: &CameraManager,
    args: &ArgMatches,
) -> Result<()> {
    run_generic_camera_op(
        master_config,
        camera_manager,
        args,
        "Camera Info",
        |camera, _app_settings| async move {
            let entry = &camera.entry;
            let stream = StreamSource::resolve(&camera.controller).await;
            let privacy = camera.controller.is_in_privacy_mode();

            info!("📷 {} [{}]", entry.title, entry.mac);
            info!("    bridge:  {}:{}", entry.host, entry.port);
            info!("    model:   {}", entry.model);
            match stream {
                Some(source) => info!("    stream:  {} ({})", source.input, source.extra_arguments),
                None => info!("    stream:  unavailable"),
            }
            info!("    privacy: {}", if privacy { "on" } else { "off" });
            Ok(())
        },
    )
    .await
}
