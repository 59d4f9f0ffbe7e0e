use crate::app_config::ApplicationConfig;
use crate::camera::bridge_client::BridgeClient;
use async_trait::async_trait;
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub const DEFAULT_POLL_ATTEMPTS: u32 = 10;
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Suspends the current task. Swapped out in tests so polling runs without real delay.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for ReadinessPolicy {
    fn default() -> Self {
        ReadinessPolicy {
            max_attempts: DEFAULT_POLL_ATTEMPTS,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl From<&ApplicationConfig> for ReadinessPolicy {
    fn from(settings: &ApplicationConfig) -> Self {
        ReadinessPolicy {
            max_attempts: settings.readiness_poll_attempts,
            interval: settings.readiness_poll_interval(),
        }
    }
}

/// Makes sure the bridge's control session for a camera is live before a
/// command goes out. Commands sent earlier are silently dropped by the bridge.
#[derive(Clone)]
pub struct ReadinessCoordinator {
    policy: ReadinessPolicy,
    sleeper: Arc<dyn Sleeper>,
}

impl ReadinessCoordinator {
    pub fn new(policy: ReadinessPolicy, sleeper: Arc<dyn Sleeper>) -> Self {
        ReadinessCoordinator { policy, sleeper }
    }

    pub fn policy(&self) -> ReadinessPolicy {
        self.policy
    }

    pub async fn ensure_ready(&self, bridge: &BridgeClient) -> bool {
        let camera_name = bridge.endpoint().name();
        if bridge.get_connection_status().await.is_connected() {
            debug!("Readiness [{}]: already connected.", camera_name);
            return true;
        }

        info!("🔌 Readiness [{}]: session not connected, asking the bridge to start it.", camera_name);
        if !bridge.request_connect().await {
            warn!("Readiness [{}]: bridge refused to start the session.", camera_name);
            return false;
        }

        let start_time = Instant::now();
        for attempt in 1..=self.policy.max_attempts {
            self.sleeper.sleep(self.policy.interval).await;
            let state = bridge.get_connection_status().await;
            debug!("Readiness [{}]: poll {}/{} -> {:?}", camera_name, attempt, self.policy.max_attempts, state);
            if state.is_connected() {
                info!("✅ Readiness [{}]: connected after {} poll(s) in {:?}.", camera_name, attempt, start_time.elapsed());
                return true;
            }
        }

        warn!(
            "⏱️ Readiness [{}]: still not connected after {} polls ({:?}).",
            camera_name, self.policy.max_attempts, start_time.elapsed()
        );
        false
    }
}

impl Default for ReadinessCoordinator {
    fn default() -> Self {
        ReadinessCoordinator::new(ReadinessPolicy::default(), Arc::new(TokioSleeper))
    }
}
