// Notification façade and push-message plumbing
//
// NotificationCenter pairs permission requests with user-facing
// feedback and gives local notifications idempotent-show semantics.
// MessageHandler wires the push-messaging subscriptions: foreground
// messages go to the delegate and get mirrored as local notifications,
// refreshed tokens get persisted.

use crate::platform::messaging::{MessageCallback, PushMessage, PushMessaging, TokenCallback};
use crate::platform::notifications::{NotificationRequest, Notifier, DEFAULT_CHANNEL_ID};
use crate::platform::permissions::{PermissionGateway, PermissionStatus};
use crate::platform::SubscriptionId;
use crate::store::token::PushTokenStore;
use crate::CoreError;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;

// ============================================================================
// NOTIFICATION CENTER
// ============================================================================

pub struct NotificationCenter {
    notifier: Arc<dyn Notifier>,
    permissions: Arc<dyn PermissionGateway>,
    shown_ids: Mutex<HashSet<String>>,
}

impl NotificationCenter {
    pub fn new(notifier: Arc<dyn Notifier>, permissions: Arc<dyn PermissionGateway>) -> Self {
        Self {
            notifier,
            permissions,
            shown_ids: Mutex::new(HashSet::new()),
        }
    }

    /// Request notification permission and log the user-facing outcome.
    /// The platform dialog itself is the adapter's side effect.
    pub async fn request_permission_with_feedback(&self) -> Result<PermissionStatus, CoreError> {
        let code = self.permissions.request_notification_permission().await?;
        let status = PermissionStatus::from_authorization(code);
        if status.is_granted() {
            tracing::info!("notification permission granted");
        } else {
            tracing::warn!(%status, "notification permission not granted; enable in settings");
        }
        Ok(status)
    }

    pub async fn check_permission(&self) -> Result<PermissionStatus, CoreError> {
        let code = self.permissions.check_notification_permission().await?;
        Ok(PermissionStatus::from_authorization(code))
    }

    /// Hex accent color for the current permission badge.
    pub async fn permission_status_color(&self) -> Result<&'static str, CoreError> {
        Ok(self.check_permission().await?.status_color())
    }

    /// Show a notification. Duplicate ids are ignored; showing is
    /// idempotent per id for the lifetime of the process.
    pub async fn show(&self, request: NotificationRequest) -> Result<(), CoreError> {
        if !self.shown_ids.lock().insert(request.id.clone()) {
            tracing::debug!(id = %request.id, "duplicate notification id, skipping");
            return Ok(());
        }
        self.notifier.show(&request).await
    }

    /// Development path: deliberately bypasses the permission check so a
    /// notification can be verified by hand regardless of state.
    pub async fn send_test_notification(&self) -> Result<(), CoreError> {
        let request = NotificationRequest::new(
            format!("simple_test_{}", crate::current_timestamp_millis()),
            "Simple Test",
            "Simple test notification without permission checks",
        )
        .channel(DEFAULT_CHANNEL_ID)
        .high_priority();

        self.show(request).await
    }

    pub async fn cancel(&self, id: &str) -> Result<(), CoreError> {
        self.shown_ids.lock().remove(id);
        self.notifier.cancel(id).await
    }

    pub async fn cancel_all(&self) -> Result<(), CoreError> {
        self.shown_ids.lock().clear();
        self.notifier.cancel_all().await
    }
}

// ============================================================================
// MESSAGE HANDLER
// ============================================================================

/// Callback interface for screens interested in push traffic.
pub trait MessageDelegate: Send + Sync {
    fn on_message(&self, message: PushMessage);
    fn on_token_refresh(&self, token: String);
}

pub struct MessageHandler {
    messaging: Arc<dyn PushMessaging>,
    notifications: Arc<NotificationCenter>,
    token_store: PushTokenStore,
    subscriptions: Mutex<Vec<Subscription>>,
}

enum Subscription {
    Message(SubscriptionId),
    TokenRefresh(SubscriptionId),
}

impl MessageHandler {
    pub fn new(
        messaging: Arc<dyn PushMessaging>,
        notifications: Arc<NotificationCenter>,
        token_store: PushTokenStore,
    ) -> Self {
        Self {
            messaging,
            notifications,
            token_store,
            subscriptions: Mutex::new(Vec::new()),
        }
    }

    /// Wire up the message and token-refresh listeners. Requires a tokio
    /// runtime: the local-notification mirror is spawned.
    pub fn attach(&self, delegate: Arc<dyn MessageDelegate>) {
        let notifications = Arc::clone(&self.notifications);
        let message_delegate = Arc::clone(&delegate);
        let on_message: MessageCallback = Arc::new(move |message: PushMessage| {
            tracing::info!(
                title = message
                    .notification
                    .as_ref()
                    .and_then(|n| n.title.as_deref()),
                "push message received"
            );
            message_delegate.on_message(message.clone());

            if let Some(body) = message.notification {
                let notifications = Arc::clone(&notifications);
                tokio::spawn(async move {
                    let request = NotificationRequest::new(
                        format!("fcm_notification_{}", crate::current_timestamp_millis()),
                        body.title.unwrap_or_else(|| "FCM Message".to_string()),
                        body.body.unwrap_or_else(|| "You have a new message".to_string()),
                    )
                    .channel(DEFAULT_CHANNEL_ID)
                    .high_priority();

                    if let Err(e) = notifications.show(request).await {
                        tracing::error!(error = %e, "failed to mirror push as notification");
                    }
                });
            }
        });

        let token_store = self.token_store.clone();
        let on_token: TokenCallback = Arc::new(move |token: String| {
            tracing::info!("push token refreshed");
            if let Err(e) = token_store.save(&token) {
                tracing::error!(error = %e, "failed to persist refreshed token");
            }
            delegate.on_token_refresh(token);
        });

        let mut subscriptions = self.subscriptions.lock();
        subscriptions.push(Subscription::Message(
            self.messaging.subscribe_messages(on_message),
        ));
        subscriptions.push(Subscription::TokenRefresh(
            self.messaging.subscribe_token_refresh(on_token),
        ));
    }

    /// Join a server-side broadcast topic.
    pub async fn subscribe_topic(&self, topic: &str) -> Result<(), CoreError> {
        self.messaging.subscribe_topic(topic).await?;
        tracing::info!(topic, "subscribed to topic");
        Ok(())
    }

    pub async fn unsubscribe_topic(&self, topic: &str) -> Result<(), CoreError> {
        self.messaging.unsubscribe_topic(topic).await?;
        tracing::info!(topic, "unsubscribed from topic");
        Ok(())
    }

    /// Drop every listener registered by [`attach`].
    pub fn detach(&self) {
        for subscription in self.subscriptions.lock().drain(..) {
            match subscription {
                Subscription::Message(id) => self.messaging.unsubscribe_messages(id),
                Subscription::TokenRefresh(id) => self.messaging.unsubscribe_token_refresh(id),
            }
        }
    }
}
