use crate::camera::camera_entity::PanDirection;
use crate::camera::camera_remote::{CameraRemote, CommandOptions, RemoteControl};
use crate::camera::readiness::TokioSleeper;
use crate::config_loader::MasterConfig;
use crate::core::camera_manager::CameraManager;
use crate::operations::op_helper::run_generic_camera_op;
use anyhow::{anyhow, bail, Context, Result};
use clap::ArgMatches;
use log::{debug, info};
use std::sync::Arc;

pub async fn handle_pan_cli(
    master_config: &MasterConfig,
    camera_manager: &CameraManager,
    args: &ArgMatches,
) -> Result<()> {
    let direction_arg = args.get_one::<String>("direction")
        .context("Missing --direction argument for pan command")?;
    let commands: Vec<String> = direction_arg
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();
    if commands.is_empty() {
        bail!("No pan direction given.");
    }
    for command in &commands {
        command.parse::<PanDirection>().map_err(|e| anyhow!(e))?;
    }
    let num_repeats = args.get_one::<u32>("repeats").copied().unwrap_or(1);
    debug!("Pan commands {:?} repeated {} time(s)", commands, num_repeats);

    run_generic_camera_op(
        master_config,
        camera_manager,
        args,
        "Pan",
        move |camera, app_settings| {
            let commands = commands.clone();
            async move {
                let mut remote = CameraRemote::new(camera.controller.clone(), &camera.entry, Arc::new(TokioSleeper));
                let options = CommandOptions {
                    num_repeats,
                    delay: app_settings.command_delay(),
                };
                let report = remote.send_command(&commands, &options).await;
                info!("↔️ Camera '{}': {} nudge(s) sent, {} failed.", remote.name(), report.sent, report.failed);
                if report.all_succeeded() {
                    Ok(())
                } else {
                    bail!("camera '{}': {} of {} nudge(s) failed", remote.name(), report.failed, report.sent)
                }
            }
        },
    )
    .await
}
