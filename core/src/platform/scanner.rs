// Camera code-scanner adapter
//
// Availability and permission queries plus a start/stop scanning
// session with a subscribe/unsubscribe detection pair.

use crate::platform::SubscriptionId;
use crate::CoreError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detection {
    pub value: String,
    pub symbology: String,
}

pub type DetectionCallback = Arc<dyn Fn(Detection) + Send + Sync>;

#[async_trait]
pub trait CodeScanner: Send + Sync {
    /// Whether the device has a usable camera.
    async fn is_available(&self) -> Result<bool, CoreError>;

    /// Raw camera authorization code; never pops a dialog.
    async fn check_permission(&self) -> Result<i32, CoreError>;

    /// Raw camera authorization code; may pop the system dialog.
    async fn request_permission(&self) -> Result<i32, CoreError>;

    async fn start(&self) -> Result<(), CoreError>;
    async fn stop(&self) -> Result<(), CoreError>;

    fn subscribe(&self, callback: DetectionCallback) -> SubscriptionId;
    fn unsubscribe(&self, id: SubscriptionId);
}
