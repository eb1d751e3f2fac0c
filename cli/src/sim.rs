// Simulated platform adapters
//
// Stand-ins for the mobile SDK surfaces so the whole service spine can
// be driven from a terminal. Each one answers immediately and prints
// what the real platform would have done.

use async_trait::async_trait;
use colored::Colorize;
use fieldsync_core::platform::background::{BackgroundScheduler, FetchConfig, TaskHandler};
use fieldsync_core::platform::messaging::{
    MessageCallback, PushMessage, PushMessaging, TokenCallback,
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

/// The one printer the simulator "discovers".
pub const SIM_PRINTER_NAME: &str = "RPP02N";
pub const SIM_PRINTER_ADDRESS: &str = "86:67:7A:12:4E:A5";

fn next_id(counter: &AtomicU64) -> SubscriptionId {
    counter.fetch_add(1, Ordering::SeqCst)
}

// ============================================================================
// MESSAGING
// ============================================================================

#[derive(Default)]
pub struct SimPushMessaging {
    next: AtomicU64,
    message_subs: Mutex<HashMap<SubscriptionId, MessageCallback>>,
    token_subs: Mutex<HashMap<SubscriptionId, TokenCallback>>,
}

impl SimPushMessaging {
    pub fn emit_message(&self, message: PushMessage) {
        let subs = self.message_subs.lock().unwrap();
        for callback in subs.values() {
            callback(message.clone());
        }
    }

    pub fn emit_token_refresh(&self, token: &str) {
        let subs = self.token_subs.lock().unwrap();
        for callback in subs.values() {
            callback(token.to_string());
        }
    }
}

#[async_trait]
impl PushMessaging for SimPushMessaging {
    async fn initialize(&self) -> Result<(), CoreError> {
        Ok(())
    }

    async fn token(&self) -> Result<Option<String>, CoreError> {
        Ok(Some(format!("sim-token-{}", uuid::Uuid::new_v4())))
    }

    fn subscribe_messages(&self, callback: MessageCallback) -> SubscriptionId {
        let id = next_id(&self.next);
        self.message_subs.lock().unwrap().insert(id, callback);
        id
    }

    fn unsubscribe_messages(&self, id: SubscriptionId) {
        self.message_subs.lock().unwrap().remove(&id);
    }

    fn subscribe_token_refresh(&self, callback: TokenCallback) -> SubscriptionId {
        let id = next_id(&self.next);
        self.token_subs.lock().unwrap().insert(id, callback);
        id
    }

    fn unsubscribe_token_refresh(&self, id: SubscriptionId) {
        self.token_subs.lock().unwrap().remove(&id);
    }

    async fn subscribe_topic(&self, topic: &str) -> Result<(), CoreError> {
        println!("{} subscribed to topic {topic}", "[messaging]".dimmed());
        Ok(())
    }

    async fn unsubscribe_topic(&self, topic: &str) -> Result<(), CoreError> {
        println!("{} unsubscribed from topic {topic}", "[messaging]".dimmed());
        Ok(())
    }
}

// ============================================================================
// NOTIFICATIONS
// ============================================================================

#[derive(Default)]
pub struct SimNotifier;

#[async_trait]
impl Notifier for SimNotifier {
    async fn initialize_channels(&self) -> Result<(), CoreError> {
        println!("{} channels ready", "[notify]".dimmed());
        Ok(())
    }

    async fn show(&self, request: &NotificationRequest) -> Result<(), CoreError> {
        println!(
            "{} {}: {}",
            "[notify]".cyan(),
            request.title.bold(),
            request.body
        );
        Ok(())
    }

    async fn cancel(&self, id: &str) -> Result<(), CoreError> {
        println!("{} cancelled {id}", "[notify]".dimmed());
        Ok(())
    }

    async fn cancel_all(&self) -> Result<(), CoreError> {
        println!("{} cancelled all", "[notify]".dimmed());
        Ok(())
    }
}

#[derive(Default)]
pub struct SimPermissionGateway;

#[async_trait]
impl PermissionGateway for SimPermissionGateway {
    async fn request_notification_permission(&self) -> Result<i32, CoreError> {
        Ok(authorization::AUTHORIZED)
    }

    async fn check_notification_permission(&self) -> Result<i32, CoreError> {
        Ok(authorization::AUTHORIZED)
    }
}

// ============================================================================
// PRINTER
// ============================================================================

#[derive(Default)]
pub struct SimPrinterPort;

#[async_trait]
impl PrinterPort for SimPrinterPort {
    async fn is_enabled(&self) -> Result<bool, CoreError> {
        Ok(true)
    }

    async fn list_devices(&self) -> Result<Vec<DiscoveredPrinter>, CoreError> {
        Ok(vec![DiscoveredPrinter {
            name: SIM_PRINTER_NAME.to_string(),
            address: SIM_PRINTER_ADDRESS.to_string(),
            paired: true,
        }])
    }

    async fn print(
        &self,
        address: &str,
        payload: &str,
        options: &PrintOptions,
    ) -> Result<(), CoreError> {
        println!(
            "{} job to {address} ({}mm, {} cpl)",
            "[printer]".cyan(),
            options.width_mm,
            options.chars_per_line
        );
        for line in payload.lines() {
            println!("  {}", line);
        }
        Ok(())
    }
}

// ============================================================================
// SCANNER
// ============================================================================

#[derive(Default)]
pub struct SimCodeScanner {
    next: AtomicU64,
    active: AtomicBool,
    subs: Mutex<HashMap<SubscriptionId, DetectionCallback>>,
}

impl SimCodeScanner {
    /// Push a detection through every live subscription, as the camera
    /// pipeline would.
    pub fn emit(&self, value: &str, symbology: &str) {
        if !self.active.load(Ordering::SeqCst) {
            return;
        }
        let detection = Detection {
            value: value.to_string(),
            symbology: symbology.to_string(),
        };
        let subs = self.subs.lock().unwrap();
        for callback in subs.values() {
            callback(detection.clone());
        }
    }
}

#[async_trait]
impl CodeScanner for SimCodeScanner {
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
        let id = next_id(&self.next);
        self.subs.lock().unwrap().insert(id, callback);
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.subs.lock().unwrap().remove(&id);
    }
}

// ============================================================================
// SCHEDULER
// ============================================================================

#[derive(Default)]
pub struct SimScheduler {
    handler: Mutex<Option<Arc<dyn TaskHandler>>>,
}

impl SimScheduler {
    /// Fire the registered handler as the OS would on a periodic wake.
    pub async fn trigger(&self, task_id: &str) -> Result<(), CoreError> {
        let handler = self.handler.lock().unwrap().clone();
        match handler {
            Some(handler) => {
                handler.on_wake(task_id.to_string()).await;
                Ok(())
            }
            None => Err(CoreError::Platform(
                "background fetch not configured".to_string(),
            )),
        }
    }
}

#[async_trait]
impl BackgroundScheduler for SimScheduler {
    async fn configure(
        &self,
        config: FetchConfig,
        handler: Arc<dyn TaskHandler>,
    ) -> Result<i32, CoreError> {
        println!(
            "{} registered {} every {} min",
            "[fetch]".dimmed(),
            config.task_id,
            config.minimum_fetch_interval_mins
        );
        *self.handler.lock().unwrap() = Some(handler);
        Ok(2)
    }

    async fn finish(&self, task_id: &str) -> Result<(), CoreError> {
        println!("{} finished {task_id}", "[fetch]".dimmed());
        Ok(())
    }
}

// ============================================================================
// BUNDLE
// ============================================================================

pub struct SimPlatform {
    pub messaging: Arc<SimPushMessaging>,
    pub scanner: Arc<SimCodeScanner>,
    pub scheduler: Arc<SimScheduler>,
}

impl SimPlatform {
    pub fn new() -> (Self, PlatformAdapters) {
        let messaging = Arc::new(SimPushMessaging::default());
        let scanner = Arc::new(SimCodeScanner::default());
        let scheduler = Arc::new(SimScheduler::default());

        let adapters = PlatformAdapters {
            messaging: messaging.clone(),
            notifier: Arc::new(SimNotifier),
            permissions: Arc::new(SimPermissionGateway),
            printer: Arc::new(SimPrinterPort),
            scanner: scanner.clone(),
            scheduler: scheduler.clone(),
        };

        (
            Self {
                messaging,
                scanner,
                scheduler,
            },
            adapters,
        )
    }
}
