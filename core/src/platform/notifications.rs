// Local notification adapter
//
// Channel setup plus show/cancel over the platform notification SDK.
// Duplicate-id suppression lives in the NotificationCenter façade, not
// here; the adapter shows whatever it is handed.

use crate::CoreError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const DEFAULT_CHANNEL_ID: &str = "default";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationPriority {
    Default,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub id: String,
    pub title: String,
    pub body: String,
    pub channel_id: Option<String>,
    pub priority: Option<NotificationPriority>,
    pub data: Option<HashMap<String, String>>,
}

impl NotificationRequest {
    pub fn new(id: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            body: body.into(),
            channel_id: None,
            priority: None,
            data: None,
        }
    }

    pub fn high_priority(mut self) -> Self {
        self.priority = Some(NotificationPriority::High);
        self
    }

    pub fn channel(mut self, channel_id: impl Into<String>) -> Self {
        self.channel_id = Some(channel_id.into());
        self
    }
}

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Create the default notification channel; fire-and-forget at startup.
    async fn initialize_channels(&self) -> Result<(), CoreError>;

    async fn show(&self, request: &NotificationRequest) -> Result<(), CoreError>;
    async fn cancel(&self, id: &str) -> Result<(), CoreError>;
    async fn cancel_all(&self) -> Result<(), CoreError>;
}
