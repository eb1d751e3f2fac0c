#![allow(dead_code)]

// Recording fakes shared by the integration tests. Each one remembers
// what was asked of it so tests can assert on call order and counts.

use async_trait::async_trait;
use fieldsync_core::platform::background::{BackgroundScheduler, FetchConfig, TaskHandler};
use fieldsync_core::platform::messaging::{
    MessageCallback, PushMessaging, TokenCallback,
};
use fieldsync_core::platform::notifications::{NotificationRequest, Notifier};
use fieldsync_core::platform::permissions::{authorization, PermissionGateway};
use fieldsync_core::platform::printer::{DiscoveredPrinter, PrintOptions, PrinterPort};
use fieldsync_core::platform::scanner::{CodeScanner, Detection, DetectionCallback};
use fieldsync_core::platform::SubscriptionId;
use fieldsync_core::{CoreError, PlatformAdapters};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

// ============================================================================
// MESSAGING
// ============================================================================

pub struct FakeMessaging {
    pub init_error: Mutex<Option<CoreError>>,
    pub token_value: Mutex<Result<Option<String>, CoreError>>,
    pub initialized: AtomicBool,
    pub topics: Mutex<Vec<String>>,
    next: AtomicU64,
    message_subs: Mutex<HashMap<SubscriptionId, MessageCallback>>,
    token_subs: Mutex<HashMap<SubscriptionId, TokenCallback>>,
}

impl Default for FakeMessaging {
    fn default() -> Self {
        Self {
            init_error: Mutex::new(None),
            token_value: Mutex::new(Ok(Some("token-abc".to_string()))),
            initialized: AtomicBool::new(false),
            topics: Mutex::new(Vec::new()),
            next: AtomicU64::new(0),
            message_subs: Mutex::new(HashMap::new()),
            token_subs: Mutex::new(HashMap::new()),
        }
    }
}

impl FakeMessaging {
    pub fn failing_init(message: &str) -> Self {
        let fake = Self::default();
        *fake.init_error.lock().unwrap() = Some(CoreError::Platform(message.to_string()));
        fake
    }

    pub fn emit_message(&self, message: fieldsync_core::platform::messaging::PushMessage) {
        for callback in self.message_subs.lock().unwrap().values() {
            callback(message.clone());
        }
    }

    pub fn emit_token_refresh(&self, token: &str) {
        for callback in self.token_subs.lock().unwrap().values() {
            callback(token.to_string());
        }
    }

    pub fn message_sub_count(&self) -> usize {
        self.message_subs.lock().unwrap().len()
    }
}

#[async_trait]
impl PushMessaging for FakeMessaging {
    async fn initialize(&self) -> Result<(), CoreError> {
        if let Some(err) = self.init_error.lock().unwrap().clone() {
            return Err(err);
        }
        self.initialized.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn token(&self) -> Result<Option<String>, CoreError> {
        self.token_value.lock().unwrap().clone()
    }

    fn subscribe_messages(&self, callback: MessageCallback) -> SubscriptionId {
        let id = self.next.fetch_add(1, Ordering::SeqCst);
        self.message_subs.lock().unwrap().insert(id, callback);
        id
    }

    fn unsubscribe_messages(&self, id: SubscriptionId) {
        self.message_subs.lock().unwrap().remove(&id);
    }

    fn subscribe_token_refresh(&self, callback: TokenCallback) -> SubscriptionId {
        let id = self.next.fetch_add(1, Ordering::SeqCst);
        self.token_subs.lock().unwrap().insert(id, callback);
        id
    }

    fn unsubscribe_token_refresh(&self, id: SubscriptionId) {
        self.token_subs.lock().unwrap().remove(&id);
    }

    async fn subscribe_topic(&self, topic: &str) -> Result<(), CoreError> {
        self.topics.lock().unwrap().push(topic.to_string());
        Ok(())
    }

    async fn unsubscribe_topic(&self, topic: &str) -> Result<(), CoreError> {
        self.topics.lock().unwrap().retain(|t| t != topic);
        Ok(())
    }
}

// ============================================================================
// NOTIFICATIONS
// ============================================================================

#[derive(Default)]
pub struct FakeNotifier {
    pub channels_initialized: AtomicBool,
    pub shown: Mutex<Vec<NotificationRequest>>,
}

#[async_trait]
impl Notifier for FakeNotifier {
    async fn initialize_channels(&self) -> Result<(), CoreError> {
        self.channels_initialized.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn show(&self, request: &NotificationRequest) -> Result<(), CoreError> {
        self.shown.lock().unwrap().push(request.clone());
        Ok(())
    }

    async fn cancel(&self, _id: &str) -> Result<(), CoreError> {
        Ok(())
    }

    async fn cancel_all(&self) -> Result<(), CoreError> {
        self.shown.lock().unwrap().clear();
        Ok(())
    }
}

pub struct FakeGateway {
    pub code: i32,
    pub check_error: Option<CoreError>,
}

impl Default for FakeGateway {
    fn default() -> Self {
        Self {
            code: authorization::AUTHORIZED,
            check_error: None,
        }
    }
}

#[async_trait]
impl PermissionGateway for FakeGateway {
    async fn request_notification_permission(&self) -> Result<i32, CoreError> {
        Ok(self.code)
    }

    async fn check_notification_permission(&self) -> Result<i32, CoreError> {
        match &self.check_error {
            Some(err) => Err(err.clone()),
            None => Ok(self.code),
        }
    }
}

// ============================================================================
// SCHEDULER
// ============================================================================

#[derive(Default)]
pub struct FakeScheduler {
    pub configured: Mutex<Option<FetchConfig>>,
    pub finished: Mutex<Vec<String>>,
    pub fail_configure: AtomicBool,
    handler: Mutex<Option<Arc<dyn TaskHandler>>>,
}

impl FakeScheduler {
    pub async fn trigger(&self, task_id: &str) {
        let handler = self
            .handler
            .lock()
            .unwrap()
            .clone()
            .expect("no handler configured");
        handler.on_wake(task_id.to_string()).await;
    }

    pub async fn trigger_timeout(&self, task_id: &str) {
        let handler = self
            .handler
            .lock()
            .unwrap()
            .clone()
            .expect("no handler configured");
        handler.on_timeout(task_id.to_string()).await;
    }

    pub fn finish_count(&self, task_id: &str) -> usize {
        self.finished
            .lock()
            .unwrap()
            .iter()
            .filter(|id| id.as_str() == task_id)
            .count()
    }
}

#[async_trait]
impl BackgroundScheduler for FakeScheduler {
    async fn configure(
        &self,
        config: FetchConfig,
        handler: Arc<dyn TaskHandler>,
    ) -> Result<i32, CoreError> {
        if self.fail_configure.load(Ordering::SeqCst) {
            return Err(CoreError::Platform("scheduler unavailable".to_string()));
        }
        *self.configured.lock().unwrap() = Some(config);
        *self.handler.lock().unwrap() = Some(handler);
        Ok(2)
    }

    async fn finish(&self, task_id: &str) -> Result<(), CoreError> {
        self.finished.lock().unwrap().push(task_id.to_string());
        Ok(())
    }
}

// ============================================================================
// PRINTER
// ============================================================================

pub struct FakePrinter {
    pub enabled: AtomicBool,
    pub devices: Mutex<Vec<DiscoveredPrinter>>,
    pub jobs: Mutex<Vec<(String, String)>>,
}

impl Default for FakePrinter {
    fn default() -> Self {
        Self {
            enabled: AtomicBool::new(true),
            devices: Mutex::new(vec![DiscoveredPrinter {
                name: "RPP02N".to_string(),
                address: "86:67:7A:12:4E:A5".to_string(),
                paired: true,
            }]),
            jobs: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl PrinterPort for FakePrinter {
    async fn is_enabled(&self) -> Result<bool, CoreError> {
        Ok(self.enabled.load(Ordering::SeqCst))
    }

    async fn list_devices(&self) -> Result<Vec<DiscoveredPrinter>, CoreError> {
        Ok(self.devices.lock().unwrap().clone())
    }

    async fn print(
        &self,
        address: &str,
        payload: &str,
        _options: &PrintOptions,
    ) -> Result<(), CoreError> {
        self.jobs
            .lock()
            .unwrap()
            .push((address.to_string(), payload.to_string()));
        Ok(())
    }
}

// ============================================================================
// SCANNER
// ============================================================================

#[derive(Default)]
pub struct FakeScanner {
    pub active: AtomicBool,
    next: AtomicU64,
    subs: Mutex<HashMap<SubscriptionId, DetectionCallback>>,
}

impl FakeScanner {
    pub fn emit(&self, value: &str, symbology: &str) {
        let detection = Detection {
            value: value.to_string(),
            symbology: symbology.to_string(),
        };
        for callback in self.subs.lock().unwrap().values() {
            callback(detection.clone());
        }
    }

    pub fn sub_count(&self) -> usize {
        self.subs.lock().unwrap().len()
    }
}

#[async_trait]
impl CodeScanner for FakeScanner {
    async fn is_available(&self) -> Result<bool, CoreError> {
        Ok(true)
    }

    async fn check_permission(&self) -> Result<i32, CoreError> {
        Ok(authorization::AUTHORIZED)
    }

    async fn request_permission(&self) -> Result<i32, CoreError> {
        Ok(authorization::AUTHORIZED)
    }

    async fn start(&self) -> Result<(), CoreError> {
        self.active.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn stop(&self) -> Result<(), CoreError> {
        self.active.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn subscribe(&self, callback: DetectionCallback) -> SubscriptionId {
        let id = self.next.fetch_add(1, Ordering::SeqCst);
        self.subs.lock().unwrap().insert(id, callback);
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.subs.lock().unwrap().remove(&id);
    }
}

// ============================================================================
// BUNDLE
// ============================================================================

pub struct Fakes {
    pub messaging: Arc<FakeMessaging>,
    pub notifier: Arc<FakeNotifier>,
    pub scheduler: Arc<FakeScheduler>,
    pub printer: Arc<FakePrinter>,
    pub scanner: Arc<FakeScanner>,
}

impl Fakes {
    pub fn new() -> (Self, PlatformAdapters) {
        Self::with_messaging(FakeMessaging::default())
    }

    pub fn with_messaging(messaging: FakeMessaging) -> (Self, PlatformAdapters) {
        let messaging = Arc::new(messaging);
        let notifier = Arc::new(FakeNotifier::default());
        let scheduler = Arc::new(FakeScheduler::default());
        let printer = Arc::new(FakePrinter::default());
        let scanner = Arc::new(FakeScanner::default());

        let adapters = PlatformAdapters {
            messaging: messaging.clone(),
            notifier: notifier.clone(),
            permissions: Arc::new(FakeGateway::default()),
            printer: printer.clone(),
            scanner: scanner.clone(),
            scheduler: scheduler.clone(),
        };

        (
            Self {
                messaging,
                notifier,
                scheduler,
                printer,
                scanner,
            },
            adapters,
        )
    }
}
