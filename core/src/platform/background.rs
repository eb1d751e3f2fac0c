// Background-fetch scheduler adapter
//
// The OS wakes the app on a fixed cadence and hands the handler a task
// id. Whatever happens, the handler must report the task finished or
// the OS penalizes the app's future wake-ups.

use crate::CoreError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Task identifier registered with the OS scheduler.
pub const FETCH_TASK_ID: &str = "com.transistorsoft.fetch";

/// OS scheduler flags. Fixed at build time, not runtime-configurable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchConfig {
    pub task_id: String,
    /// The OS enforces a floor of 15 minutes.
    pub minimum_fetch_interval_mins: u32,
    pub stop_on_terminate: bool,
    pub start_on_boot: bool,
    /// Network-agnostic: runs on any connectivity, including none.
    pub requires_network: bool,
    pub requires_charging: bool,
    pub requires_battery_not_low: bool,
    pub requires_storage_not_low: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            task_id: FETCH_TASK_ID.to_string(),
            minimum_fetch_interval_mins: 15,
            stop_on_terminate: false,
            start_on_boot: true,
            requires_network: false,
            requires_charging: false,
            requires_battery_not_low: false,
            requires_storage_not_low: false,
        }
    }
}

/// Callbacks the scheduler drives. `on_timeout` fires when the OS is
/// about to reclaim the execution window; it must still finish the task.
#[async_trait]
pub trait TaskHandler: Send + Sync {
    async fn on_wake(&self, task_id: String);
    async fn on_timeout(&self, task_id: String);
}

#[async_trait]
pub trait BackgroundScheduler: Send + Sync {
    /// Register the periodic-wake handler. Returns the scheduler's
    /// status code (platform-defined, logged and otherwise ignored).
    async fn configure(
        &self,
        config: FetchConfig,
        handler: Arc<dyn TaskHandler>,
    ) -> Result<i32, CoreError>;

    /// Signal the OS that the task with `task_id` is done.
    async fn finish(&self, task_id: &str) -> Result<(), CoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_registration_contract() {
        let config = FetchConfig::default();
        assert_eq!(config.task_id, FETCH_TASK_ID);
        assert_eq!(config.minimum_fetch_interval_mins, 15);
        assert!(!config.stop_on_terminate);
        assert!(config.start_on_boot);
        assert!(!config.requires_network);
    }
}
