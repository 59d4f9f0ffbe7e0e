use crate::camera::camera_controller::CameraController;
use log::{info, warn};

/// Extra input arguments handed to the external media pipeline.
pub const DEFAULT_EXTRA_ARGUMENTS: &str = "-pred 1";

/// What the media pipeline needs to open a camera's live feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamSource {
    pub name: String,
    pub input: String,
    pub extra_arguments: String,
}

impl StreamSource {
    pub async fn resolve(controller: &CameraController) -> Option<StreamSource> {
        match controller.get_stream_url().await {
            Some(input) => {
                info!("📹 Stream [{}]: {}", controller.name(), input);
                Some(StreamSource {
                    name: controller.name().to_string(),
                    input,
                    extra_arguments: DEFAULT_EXTRA_ARGUMENTS.to_string(),
                })
            }
            None => {
                warn!("Stream [{}]: bridge reported no RTSP url.", controller.name());
                None
            }
        }
    }
}
