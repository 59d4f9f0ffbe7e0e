use crate::app_config::ApplicationConfig;
use crate::config_loader::MasterConfig;
use crate::core::camera_manager::{parse_camera_names_arg, CameraManager, RegisteredCamera};
use anyhow::{bail, Result};
use clap::ArgMatches;
use futures::future::join_all;
use log::{debug, error, info, warn};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinHandle;

/// Resolves the `--cameras` selection (default: every registered camera).
pub fn select_cameras(camera_manager: &CameraManager, args: &ArgMatches) -> Vec<Arc<RegisteredCamera>> {
    let specific_cameras_arg = args.try_get_one::<String>("cameras").ok().flatten();
    match parse_camera_names_arg(specific_cameras_arg) {
        Some(names) => {
            let found = camera_manager.get_cameras_by_names(&names);
            if found.len() < names.len() {
                warn!("⚠️ Only {} of the requested cameras {:?} are registered.", found.len(), names);
            }
            found
        }
        None => camera_manager.get_all_cameras(),
    }
}

/// Helper function to orchestrate an operation across multiple cameras.
///
/// This function handles:
/// - Parsing camera selection arguments.
/// - Spawning a Tokio task for each camera to execute the provided `per_camera_op`.
/// - Collecting results and logging errors.
///
/// # Arguments
/// * `master_config`: The application's master configuration.
/// * `camera_manager`: The registry of set-up cameras.
/// * `args`: Subcommand arguments; `--cameras` narrows the selection.
/// * `operation_display_name`: A user-friendly name for the operation (e.g., "Privacy Mode").
/// * `per_camera_op`: An asynchronous closure that defines the work to be done for each camera.
///   It receives the registered camera and the shared application settings.
///
/// Returns an error when any camera's task failed.
pub async fn run_generic_camera_op<F, Fut>(
    master_config: &MasterConfig,
    camera_manager: &CameraManager,
    args: &ArgMatches,
    operation_display_name: &str,
    per_camera_op: F,
) -> Result<()>
where
    F: Fn(Arc<RegisteredCamera>, Arc<ApplicationConfig>) -> Fut + Send + Sync + 'static + Clone,
    Fut: std::future::Future<Output = Result<()>> + Send + 'static,
{
    let op_helper_start_time = Instant::now();
    info!("🛠️ Starting generic operation: '{}'...", operation_display_name);

    let cameras_to_target = select_cameras(camera_manager, args);
    if cameras_to_target.is_empty() {
        warn!(
            "⚠️ No registered cameras selected for '{}'. Operation finished in {:?}",
            operation_display_name, op_helper_start_time.elapsed()
        );
        return Ok(());
    }
    info!("🎯 Targeting {} camera(s) for {}.", cameras_to_target.len(), operation_display_name);

    let mut tasks: Vec<JoinHandle<Result<()>>> = Vec::new();
    let app_settings_arc = Arc::new(master_config.app_settings.clone());

    for camera in cameras_to_target.iter() {
        let op_clone = per_camera_op.clone();
        let task_app_settings = Arc::clone(&app_settings_arc);
        let camera_clone = Arc::clone(camera);
        let operation_display_name_owned = operation_display_name.to_string();

        tasks.push(tokio::spawn(async move {
            let camera_name_for_log = camera_clone.entry.name.clone();
            debug!("    Task for camera '{}' (operation '{}') started.", camera_name_for_log, operation_display_name_owned);
            let res = op_clone(camera_clone, task_app_settings).await;
            if res.is_err() {
                debug!("    Task for camera '{}' (operation '{}') finished with an error.", camera_name_for_log, operation_display_name_owned);
            } else {
                debug!("    Task for camera '{}' (operation '{}') finished successfully.", camera_name_for_log, operation_display_name_owned);
            }
            res
        }));
    }

    info!("🔄 Waiting for all {} tasks to complete for '{}'...", tasks.len(), operation_display_name);
    let results = join_all(tasks).await;

    let mut operation_errors = 0;
    for (camera, task_result) in cameras_to_target.iter().zip(results) {
        match task_result {
            Ok(Ok(())) => {
                debug!("  Task for '{}' completed successfully.", camera.entry.name);
            }
            Ok(Err(op_err)) => {
                error!("❌ Error during '{}' for camera '{}': {:#}", operation_display_name, camera.entry.name, op_err);
                operation_errors += 1;
            }
            Err(join_err) => {
                error!("💀 Task execution failed (panic or cancellation) for '{}' for camera '{}': {:#}", operation_display_name, camera.entry.name, join_err);
                operation_errors += 1;
            }
        }
    }

    info!("🏁 '{}' operation finished in {:?}.", operation_display_name, op_helper_start_time.elapsed());
    if operation_errors > 0 {
        bail!(
            "'{}' failed for {} of {} camera(s)",
            operation_display_name,
            operation_errors,
            cameras_to_target.len()
        );
    }
    info!("✅ '{}' succeeded for all {} camera(s).", operation_display_name, cameras_to_target.len());
    Ok(())
}
