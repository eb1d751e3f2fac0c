// Push messaging adapter
//
// Wraps the cloud-messaging SDK: platform connection bring-up, token
// retrieval, and subscription pairs for foreground messages and token
// refreshes. Messages are transient, held in UI state only, never
// persisted.

use crate::platform::SubscriptionId;
use crate::CoreError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushNotificationBody {
    pub title: Option<String>,
    pub body: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushMessage {
    pub message_id: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub collapse_key: Option<String>,
    pub data: Option<HashMap<String, String>>,
    pub notification: Option<PushNotificationBody>,
}

pub type MessageCallback = Arc<dyn Fn(PushMessage) + Send + Sync>;
pub type TokenCallback = Arc<dyn Fn(String) + Send + Sync>;

#[async_trait]
pub trait PushMessaging: Send + Sync {
    /// Bring up the messaging platform connection. This is the one
    /// startup step that is fatal when it fails.
    async fn initialize(&self) -> Result<(), CoreError>;

    /// Fetch the current push token, if the platform has issued one.
    async fn token(&self) -> Result<Option<String>, CoreError>;

    fn subscribe_messages(&self, callback: MessageCallback) -> SubscriptionId;
    fn unsubscribe_messages(&self, id: SubscriptionId);

    fn subscribe_token_refresh(&self, callback: TokenCallback) -> SubscriptionId;
    fn unsubscribe_token_refresh(&self, id: SubscriptionId);

    async fn subscribe_topic(&self, topic: &str) -> Result<(), CoreError>;
    async fn unsubscribe_topic(&self, topic: &str) -> Result<(), CoreError>;
}
