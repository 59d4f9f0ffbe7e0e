use crate::camera::camera_remote::{CameraRemote, RemoteControl};
use crate::camera::readiness::TokioSleeper;
use crate::config_loader::MasterConfig;
use crate::core::camera_manager::CameraManager;
use crate::operations::op_helper::run_generic_camera_op;
use anyhow::{bail, Context, Result};
use clap::ArgMatches;
use log::{error, info};
use std::sync::Arc;
use std::time::Instant;

pub async fn handle_privacy_cli(
    master_config: &MasterConfig,
    camera_manager: &CameraManager,
    args: &ArgMatches,
) -> Result<()> {
    let action_str = args.get_one::<String>("action")
        .context("Missing --action argument for privacy command")?;

    let enter = match action_str.to_lowercase().as_str() {
        "enter" => true,
        "exit" => false,
        s => {
            error!("❌ Invalid action '{}'. Must be 'enter' or 'exit'.", s);
            bail!("Invalid action '{}'. Must be 'enter' or 'exit'.", s);
        }
    };
    let emoji = if enter { "🙈" } else { "👀" };
    info!("{} Preparing to {} privacy mode.", emoji, if enter { "enter" } else { "exit" });

    run_generic_camera_op(
        master_config,
        camera_manager,
        args,
        "Privacy Mode",
        move |camera, _app_settings| async move {
            let cam_op_start_time = Instant::now();
            let mut remote = CameraRemote::new(camera.controller.clone(), &camera.entry, Arc::new(TokioSleeper));
            let action_verb = if enter { "enter" } else { "exit" };

            let ok = if enter { remote.turn_off().await } else { remote.turn_on().await };
            if ok {
                info!("✅ Camera '{}' {}ed privacy mode in {:?}.", remote.name(), action_verb, cam_op_start_time.elapsed());
                Ok(())
            } else {
                bail!(
                    "camera '{}' did not {} privacy mode (position now {:?})",
                    remote.name(),
                    action_verb,
                    remote.posture()
                )
            }
        },
    )
    .await
}
