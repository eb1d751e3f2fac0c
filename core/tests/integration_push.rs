// Push plumbing: delegate delivery, token persistence, the local
// notification mirror, and topic membership.

mod common;

use common::Fakes;
use fieldsync_core::platform::messaging::{PushMessage, PushNotificationBody};
use fieldsync_core::{MessageDelegate, ServiceContext};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct RecordingDelegate {
    messages: Mutex<Vec<PushMessage>>,
    tokens: Mutex<Vec<String>>,
}

impl MessageDelegate for RecordingDelegate {
    fn on_message(&self, message: PushMessage) {
        self.messages.lock().unwrap().push(message);
    }

    fn on_token_refresh(&self, token: String) {
        self.tokens.lock().unwrap().push(token);
    }
}

fn push_with_body(title: &str, body: &str) -> PushMessage {
    PushMessage {
        message_id: Some("m1".to_string()),
        notification: Some(PushNotificationBody {
            title: Some(title.to_string()),
            body: Some(body.to_string()),
            image_url: None,
        }),
        ..Default::default()
    }
}

#[tokio::test]
async fn token_refresh_is_persisted_and_delivered() {
    let (fakes, adapters) = Fakes::new();
    let context = Arc::new(ServiceContext::in_memory(adapters));

    let delegate = Arc::new(RecordingDelegate::default());
    context.messages.attach(delegate.clone());

    fakes.messaging.emit_token_refresh("token-next");

    assert_eq!(
        context.token_store.get().unwrap().as_deref(),
        Some("token-next")
    );
    assert_eq!(delegate.tokens.lock().unwrap().as_slice(), ["token-next"]);
}

#[tokio::test]
async fn foreground_push_reaches_delegate_and_mirror() {
    let (fakes, adapters) = Fakes::new();
    let context = Arc::new(ServiceContext::in_memory(adapters));

    let delegate = Arc::new(RecordingDelegate::default());
    context.messages.attach(delegate.clone());

    fakes
        .messaging
        .emit_message(push_with_body("Hello", "world"));

    // The mirror notification is spawned; give it a beat to land.
    tokio::time::sleep(Duration::from_millis(20)).await;

    let messages = delegate.messages.lock().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].message_id.as_deref(), Some("m1"));

    let shown = fakes.notifier.shown.lock().unwrap();
    assert_eq!(shown.len(), 1);
    assert!(shown[0].id.starts_with("fcm_notification_"));
    assert_eq!(shown[0].title, "Hello");
    assert_eq!(shown[0].body, "world");
}

#[tokio::test]
async fn data_only_push_skips_the_mirror() {
    let (fakes, adapters) = Fakes::new();
    let context = Arc::new(ServiceContext::in_memory(adapters));

    let delegate = Arc::new(RecordingDelegate::default());
    context.messages.attach(delegate.clone());

    fakes.messaging.emit_message(PushMessage {
        message_id: Some("m2".to_string()),
        ..Default::default()
    });
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert_eq!(delegate.messages.lock().unwrap().len(), 1);
    assert!(fakes.notifier.shown.lock().unwrap().is_empty());
}

#[tokio::test]
async fn detach_silences_both_listener_kinds() {
    let (fakes, adapters) = Fakes::new();
    let context = Arc::new(ServiceContext::in_memory(adapters));

    let delegate = Arc::new(RecordingDelegate::default());
    context.messages.attach(delegate.clone());
    context.messages.detach();
    assert_eq!(fakes.messaging.message_sub_count(), 0);

    fakes.messaging.emit_message(push_with_body("late", "msg"));
    fakes.messaging.emit_token_refresh("token-late");
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert!(delegate.messages.lock().unwrap().is_empty());
    assert!(delegate.tokens.lock().unwrap().is_empty());
    assert!(fakes.notifier.shown.lock().unwrap().is_empty());
    assert!(context.token_store.get().unwrap().is_none());
}

#[tokio::test]
async fn topic_membership_is_forwarded() {
    let (fakes, adapters) = Fakes::new();
    let context = Arc::new(ServiceContext::in_memory(adapters));

    context.messages.subscribe_topic("news").await.unwrap();
    context.messages.subscribe_topic("alerts").await.unwrap();
    assert_eq!(
        fakes.messaging.topics.lock().unwrap().as_slice(),
        ["news", "alerts"]
    );

    context.messages.unsubscribe_topic("news").await.unwrap();
    assert_eq!(fakes.messaging.topics.lock().unwrap().as_slice(), ["alerts"]);
}
